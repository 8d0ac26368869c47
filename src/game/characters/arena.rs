// Actor storage with generation-checked handles

use crate::core::Vector2;

use super::character::Character;
use super::controller::Role;

/// Handle to an actor in an [`ActorArena`]. A handle goes stale once its actor
/// is removed; stale handles never resolve, even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId {
    index: u32,
    generation: u32,
}

impl ActorId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
enum Entry {
    Vacant,
    Occupied(Box<Character>),
    /// Checked out for its own update
    Taken,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Entry,
}

/// Owns every actor of a stage. Iteration follows slot order.
#[derive(Debug, Default)]
pub struct ActorArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ActorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an actor built from its own future handle
    pub fn insert_with(&mut self, build: impl FnOnce(ActorId) -> Character) -> ActorId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Entry::Vacant,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        let id = ActorId {
            index,
            generation: slot.generation,
        };
        slot.entry = Entry::Occupied(Box::new(build(id)));
        self.len += 1;
        id
    }

    fn slot(&self, id: ActorId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ActorId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    /// Get an actor by handle
    pub fn get(&self, id: ActorId) -> Option<&Character> {
        match &self.slot(id)?.entry {
            Entry::Occupied(actor) => Some(actor.as_ref()),
            _ => None,
        }
    }

    /// Get a mutable actor by handle
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Character> {
        match &mut self.slot_mut(id)?.entry {
            Entry::Occupied(actor) => Some(actor.as_mut()),
            _ => None,
        }
    }

    /// Check if a handle resolves to a stored actor
    pub fn contains(&self, id: ActorId) -> bool {
        self.get(id).is_some()
    }

    /// Remove an actor, invalidating its handle
    pub fn remove(&mut self, id: ActorId) -> Option<Character> {
        let slot = self.slot_mut(id)?;
        if !matches!(slot.entry, Entry::Occupied(_)) {
            return None;
        }

        let entry = std::mem::replace(&mut slot.entry, Entry::Vacant);
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        match entry {
            Entry::Occupied(actor) => Some(*actor),
            _ => None,
        }
    }

    /// Check an actor out of the arena. Until it is restored the handle does
    /// not resolve, so the actor can't observe itself through a [`WorldView`].
    pub fn take(&mut self, id: ActorId) -> Option<Character> {
        let slot = self.slot_mut(id)?;
        if !matches!(slot.entry, Entry::Occupied(_)) {
            return None;
        }
        match std::mem::replace(&mut slot.entry, Entry::Taken) {
            Entry::Occupied(actor) => Some(*actor),
            _ => None,
        }
    }

    /// Put back an actor checked out with [`ActorArena::take`]
    pub fn restore(&mut self, id: ActorId, actor: Character) {
        match self.slot_mut(id) {
            Some(slot) if matches!(slot.entry, Entry::Taken) => {
                slot.entry = Entry::Occupied(Box::new(actor));
            }
            _ => log::warn!("Restoring actor {:?} into a slot that was not checked out", id),
        }
    }

    /// Iterate stored actors in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Character)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match &slot.entry {
            Entry::Occupied(actor) => Some((
                ActorId {
                    index: index as u32,
                    generation: slot.generation,
                },
                actor.as_ref(),
            )),
            _ => None,
        })
    }

    /// Handles of all stored actors in slot order
    pub fn ids(&self) -> Vec<ActorId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Number of actors, including checked-out ones
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every actor
    pub fn clear(&mut self) {
        for id in self.ids() {
            self.remove(id);
        }
    }
}

/// Read-only view of the other actors, handed to an actor during its update
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    arena: &'a ActorArena,
}

impl<'a> WorldView<'a> {
    pub fn new(arena: &'a ActorArena) -> Self {
        Self { arena }
    }

    /// A live actor, neither destroyed nor scheduled for removal
    pub fn get(&self, id: ActorId) -> Option<&'a Character> {
        self.arena.get(id).filter(|actor| !actor.is_expired())
    }

    pub fn position_of(&self, id: ActorId) -> Option<Vector2> {
        self.get(id).map(|actor| actor.position())
    }

    /// Live actors in arena order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &'a Character)> + 'a {
        self.arena.iter().filter(|(_, actor)| !actor.is_expired())
    }

    /// Positions of live actors with the given role
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = (ActorId, Vector2)> + 'a {
        self.actors()
            .filter(move |(_, actor)| actor.role() == role)
            .map(|(id, actor)| (id, actor.position()))
    }
}
