use ::rand::RngCore;

use crate::creature::Creature;
use crate::world::WorldBounds;

/// Stable handle to a creature. The generation field invalidates stale references.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

/// Removals requested while a pass is running. Applied once the pass ends.
#[derive(Default, Debug)]
pub struct RemovalQueue {
    pending: Vec<EntityId>,
}

impl RemovalQueue {
    pub fn push(&mut self, id: EntityId) {
        if !self.pending.contains(&id) {
            self.pending.push(id);
        }
    }
}

/// Slot storage for the live creatures, with generational indices and a free
/// list. Iteration follows slot order, which is insertion order until a slot
/// is reused.
#[derive(Default)]
pub struct CreatureArena {
    slots: Vec<Option<Creature>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    count: usize,
}

impl CreatureArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, creature: Creature) -> EntityId {
        self.count += 1;
        // Reuse the lowest free slot so iteration order stays stable.
        if let Some(pos) = self
            .free_list
            .iter()
            .enumerate()
            .min_by_key(|(_, idx)| **idx)
            .map(|(pos, _)| pos)
        {
            let index = self.free_list.swap_remove(pos);
            let idx = index as usize;
            self.slots[idx] = Some(creature);
            return EntityId {
                index,
                generation: self.generations[idx],
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Some(creature));
        self.generations.push(0);
        EntityId {
            index,
            generation: 0,
        }
    }

    /// Remove a creature, handing it back. Stale ids return `None`.
    pub fn despawn(&mut self, id: EntityId) -> Option<Creature> {
        let idx = id.index as usize;
        if idx < self.slots.len() && self.generations[idx] == id.generation {
            let creature = self.slots[idx].take()?;
            self.generations[idx] += 1;
            self.free_list.push(id.index);
            self.count -= 1;
            Some(creature)
        } else {
            None
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Creature> {
        let idx = id.index as usize;
        if idx < self.slots.len() && self.generations[idx] == id.generation {
            self.slots[idx].as_ref()
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        let idx = id.index as usize;
        if idx < self.slots.len() && self.generations[idx] == id.generation {
            self.slots[idx].as_mut()
        } else {
            None
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate over `(id, &Creature)` for every live creature.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Creature)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref().map(|c| {
                (
                    EntityId {
                        index: i as u32,
                        generation: self.generations[i],
                    },
                    c,
                )
            })
        })
    }

    /// Ids of every live creature, in iteration order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        for id in self.ids() {
            self.despawn(id);
        }
    }

    pub fn update_all(&mut self, dt: f32, bounds: &WorldBounds, rng: &mut dyn RngCore) {
        self.update_all_with(dt, bounds, rng, |_, _, _| {});
    }

    /// Update every creature that was live when the pass began, exactly once.
    /// `visit` sees each creature right after its update and may queue
    /// removals; those take effect after the whole pass. Returns the creatures
    /// that were removed.
    pub fn update_all_with<F>(
        &mut self,
        dt: f32,
        bounds: &WorldBounds,
        rng: &mut dyn RngCore,
        mut visit: F,
    ) -> Vec<(EntityId, Creature)>
    where
        F: FnMut(EntityId, &Creature, &mut RemovalQueue),
    {
        let snapshot = self.ids();
        let mut removals = RemovalQueue::default();

        for id in snapshot {
            if let Some(creature) = self.get_mut(id) {
                creature.update(dt, bounds, rng);
                visit(id, creature, &mut removals);
            }
        }

        removals
            .pending
            .into_iter()
            .filter_map(|id| self.despawn(id).map(|c| (id, c)))
            .collect()
    }

    /// Read-only pass for the renderer.
    pub fn draw_all<F>(&self, mut draw: F)
    where
        F: FnMut(&Creature),
    {
        for (_, creature) in self.iter() {
            draw(creature);
        }
    }
}
