use std::collections::VecDeque;
use crate::config::ReplacementPolicyConfig;

/// A fixed capacity group of cache slots: either a whole fully associative cache, or one set of a
/// set associative cache
///
/// Slots are never removed, only overwritten. Empty slots hold `None`, which never matches a tag,
/// and the recency order always contains every slot exactly once
#[derive(Debug, Clone)]
pub struct SlotGroup {
    tags: Vec<Option<u64>>,
    // Slot indices, oldest (or least recently used) first
    recency: VecDeque<usize>,
    frequencies: Vec<u64>,
}

impl SlotGroup {
    pub fn new(capacity: usize) -> Self {
        Self {
            tags: vec![None; capacity],
            recency: (0..capacity).collect(),
            frequencies: vec![0; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.tags.len()
    }

    /// Finds the slot holding a tag, if any
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.tags.iter().position(|t| *t == Some(tag))
    }

    /// Looks up a tag, updating the group with the given policy on both hits and misses
    ///
    /// returns: bool, true on a hit
    #[inline]
    pub fn lookup<R: ReplacementPolicy>(&mut self, tag: u64, policy: &mut R) -> bool {
        match self.find(tag) {
            Some(slot) => {
                policy.update_on_read(self, slot);
                true
            }
            None => {
                policy.replace(self, tag);
                false
            }
        }
    }

    /// The stored tags, by slot index
    pub fn tags(&self) -> &[Option<u64>] {
        &self.tags
    }

    /// The stored tags, oldest (or least recently used) first
    pub fn tags_by_recency(&self) -> Vec<Option<u64>> {
        self.recency.iter().map(|slot| self.tags[*slot]).collect()
    }

    /// The use counts of each slot, by slot index. Only maintained by LFU
    pub fn frequencies(&self) -> &[u64] {
        &self.frequencies
    }

    pub fn uninitialised_slot_count(&self) -> usize {
        self.tags.iter().filter(|t| t.is_none()).count()
    }

    fn fill(&mut self, slot: usize, tag: u64) {
        self.tags[slot] = Some(tag);
    }

    // Moves a slot to the most recently used end
    fn touch(&mut self, slot: usize) {
        if let Some(position) = self.recency.iter().position(|s| *s == slot) {
            self.recency.remove(position);
        }
        self.recency.push_back(slot);
    }

    // Overwrites the oldest slot and marks it as the newest
    fn replace_oldest(&mut self, tag: u64) -> usize {
        // Groups always have at least one slot, so the order is never empty
        debug_assert!(!self.recency.is_empty(), "slot group has no slots");
        let slot = self.recency.pop_front().unwrap_or(0);
        self.fill(slot, tag);
        self.recency.push_back(slot);
        slot
    }
}

/// A generic trait for implementing new replacement policies. Used by associative caches to manage
/// each of their slot groups
pub trait ReplacementPolicy {
    /// Updates the group when the tag in a slot is read
    ///
    /// Not applicable for some policies, a default which does nothing is provided
    ///
    /// # Arguments
    ///
    /// * `group`: The group containing the slot
    /// * `slot`: The index of the slot which was read
    ///
    /// returns: ()
    fn update_on_read(&mut self, _group: &mut SlotGroup, _slot: usize) {}

    /// Places a tag which missed into the group, evicting whatever the policy chooses
    ///
    /// # Arguments
    ///
    /// * `group`: The group the tag maps to
    /// * `tag`: The tag to store
    ///
    /// returns: usize, the slot the tag now occupies
    fn replace(&mut self, group: &mut SlotGroup, tag: u64) -> usize;
}

/// Round robin replacement, evicting whichever slot was filled earliest. Reads don't affect it
#[derive(Debug, Default, Copy, Clone)]
pub struct RoundRobin;

impl ReplacementPolicy for RoundRobin {
    fn replace(&mut self, group: &mut SlotGroup, tag: u64) -> usize {
        group.replace_oldest(tag)
    }
}

/// Least Recently Used replacement policy
///
/// Reads move the slot to the back of the group's recency order, so the front is always the least
/// recently used slot
#[derive(Debug, Default, Copy, Clone)]
pub struct LeastRecentlyUsed;

impl ReplacementPolicy for LeastRecentlyUsed {
    fn update_on_read(&mut self, group: &mut SlotGroup, slot: usize) {
        group.touch(slot);
    }

    fn replace(&mut self, group: &mut SlotGroup, tag: u64) -> usize {
        group.replace_oldest(tag)
    }
}

/// Least frequently used replacement policy
///
/// Ties between equally used slots go to the lowest slot index, so empty slots are filled in order
#[derive(Debug, Default, Copy, Clone)]
pub struct LeastFrequentlyUsed;

impl ReplacementPolicy for LeastFrequentlyUsed {
    fn update_on_read(&mut self, group: &mut SlotGroup, slot: usize) {
        group.frequencies[slot] += 1;
    }

    fn replace(&mut self, group: &mut SlotGroup, tag: u64) -> usize {
        let mut min_value = u64::MAX;
        let mut min_index = 0;
        for (index, frequency) in group.frequencies.iter().enumerate() {
            // Strictly less, the first minimum wins
            if *frequency < min_value {
                min_value = *frequency;
                min_index = index;
            }
        }
        group.fill(min_index, tag);
        group.frequencies[min_index] = 1;
        min_index
    }
}

/// Enum for the 3 replacement policies provided by the library
///
/// Explicitly branching on the concrete policies lets the compiler inline them, which it can't do
/// through a trait object
#[derive(Debug, Copy, Clone)]
pub enum GenericPolicy {
    RoundRobin(RoundRobin),
    LeastRecentlyUsed(LeastRecentlyUsed),
    LeastFrequentlyUsed(LeastFrequentlyUsed),
}

impl From<ReplacementPolicyConfig> for GenericPolicy {
    fn from(value: ReplacementPolicyConfig) -> Self {
        match value {
            ReplacementPolicyConfig::RoundRobin => Self::RoundRobin(RoundRobin),
            ReplacementPolicyConfig::LeastRecentlyUsed => Self::LeastRecentlyUsed(LeastRecentlyUsed),
            ReplacementPolicyConfig::LeastFrequentlyUsed => Self::LeastFrequentlyUsed(LeastFrequentlyUsed),
        }
    }
}

impl ReplacementPolicy for GenericPolicy {
    fn update_on_read(&mut self, group: &mut SlotGroup, slot: usize) {
        match self {
            GenericPolicy::RoundRobin(p) => p.update_on_read(group, slot),
            GenericPolicy::LeastRecentlyUsed(p) => p.update_on_read(group, slot),
            GenericPolicy::LeastFrequentlyUsed(p) => p.update_on_read(group, slot),
        }
    }

    fn replace(&mut self, group: &mut SlotGroup, tag: u64) -> usize {
        match self {
            GenericPolicy::RoundRobin(p) => p.replace(group, tag),
            GenericPolicy::LeastRecentlyUsed(p) => p.replace(group, tag),
            GenericPolicy::LeastFrequentlyUsed(p) => p.replace(group, tag),
        }
    }
}
