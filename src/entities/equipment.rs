use crate::entities::item::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// Worn-item slots. Indices are fixed by the client and leave gaps for slot
/// types that do not exist yet, so never treat them as a dense range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Back,
    Neck,
    MainHand,
    Torso,
    OffHand,
    Legs,
    Hands,
    Feet,
    Ring,
    Quiver,
}

pub const EQUIPMENT_SLOTS: [EquipmentSlot; 11] = [
    EquipmentSlot::Head,
    EquipmentSlot::Back,
    EquipmentSlot::Neck,
    EquipmentSlot::MainHand,
    EquipmentSlot::Torso,
    EquipmentSlot::OffHand,
    EquipmentSlot::Legs,
    EquipmentSlot::Hands,
    EquipmentSlot::Feet,
    EquipmentSlot::Ring,
    EquipmentSlot::Quiver,
];

/// Number of raw slots the client reserves, gaps included.
pub const EQUIPMENT_SIZE: usize = 14;

impl EquipmentSlot {
    pub fn index(self) -> usize {
        match self {
            EquipmentSlot::Head => 0,
            EquipmentSlot::Back => 1,
            EquipmentSlot::Neck => 2,
            EquipmentSlot::MainHand => 3,
            EquipmentSlot::Torso => 4,
            EquipmentSlot::OffHand => 5,
            EquipmentSlot::Legs => 7,
            EquipmentSlot::Hands => 9,
            EquipmentSlot::Feet => 10,
            EquipmentSlot::Ring => 12,
            EquipmentSlot::Quiver => 13,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        EQUIPMENT_SLOTS
            .iter()
            .copied()
            .find(|slot| slot.index() == index)
    }

    pub fn name(self) -> &'static str {
        match self {
            EquipmentSlot::Head => "head",
            EquipmentSlot::Back => "back",
            EquipmentSlot::Neck => "neck",
            EquipmentSlot::MainHand => "main_hand",
            EquipmentSlot::Torso => "torso",
            EquipmentSlot::OffHand => "off_hand",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Hands => "hands",
            EquipmentSlot::Feet => "feet",
            EquipmentSlot::Ring => "ring",
            EquipmentSlot::Quiver => "quiver",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        EQUIPMENT_SLOTS.iter().copied().find(|slot| slot.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    slots: [Option<Item>; EQUIPMENT_SIZE],
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            slots: [None; EQUIPMENT_SIZE],
        }
    }
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots[slot.index()].as_ref()
    }

    /// Puts `item` into `slot` and hands back whatever was worn there.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slots[slot.index()].replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slots[slot.index()].take()
    }

    pub fn has(&self, id: ItemId) -> bool {
        self.iter().any(|(_, item)| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EQUIPMENT_SLOTS
            .iter()
            .filter_map(|slot| self.get(*slot).map(|item| (*slot, item)))
    }
}
