use crate::entities::item::{Item, ItemId};

pub const INVENTORY_SIZE: usize = 28;

/// Fixed-length slot array with stacking rules.
///
/// Slot indices stay stable until a slot is explicitly emptied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContainer {
    slots: Vec<Option<Item>>,
}

impl Default for ItemContainer {
    fn default() -> Self {
        Self::new(INVENTORY_SIZE)
    }
}

impl ItemContainer {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, slot: usize) -> Option<&Item> {
        self.slots.get(slot).and_then(|entry| entry.as_ref())
    }

    pub fn set_slot(&mut self, slot: usize, item: Option<Item>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = item;
        }
    }

    pub fn take_slot(&mut self, slot: usize) -> Option<Item> {
        self.slots.get_mut(slot).and_then(|entry| entry.take())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_ref().map(|item| (index, item)))
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|entry| entry.is_some())
    }

    pub fn first_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|entry| entry.is_none())
    }

    pub fn find(&self, id: ItemId) -> Option<usize> {
        self.slots
            .iter()
            .position(|entry| entry.map(|item| item.id) == Some(id))
    }

    /// Places `item` and returns the slot used, or `None` when it does not fit.
    ///
    /// Stackable items merge into an existing stack of the same id before a
    /// free slot is considered. A merge that would overflow the amount fails
    /// without touching the container. Non-stackable items only fit one per
    /// slot, so any other amount is rejected.
    pub fn add(&mut self, item: impl Into<Item>, stackable: bool) -> Option<usize> {
        let item = item.into();
        if item.amount == 0 || (!stackable && item.amount != 1) {
            return None;
        }
        if stackable {
            if let Some(index) = self.find(item.id) {
                let existing = self.slots[index].as_mut()?;
                existing.amount = existing.amount.checked_add(item.amount)?;
                return Some(index);
            }
        }

        let index = self.first_free_slot()?;
        self.slots[index] = Some(item);
        Some(index)
    }

    /// Empties `slot`. Out of range or already empty slots are ignored.
    pub fn remove(&mut self, slot: usize) {
        self.take_slot(slot);
    }

    /// True when any slot holds the id, whatever the amount.
    pub fn has(&self, item: impl Into<ItemId>) -> bool {
        self.find(item.into()).is_some()
    }

    pub fn count(&self, id: ItemId) -> u64 {
        self.iter()
            .filter(|(_, item)| item.id == id)
            .map(|(_, item)| u64::from(item.amount))
            .sum()
    }
}
