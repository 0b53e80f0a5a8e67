/// Numeric game id of an item type, as known by the client cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u16);

/// One occupied inventory slot.
///
/// Non-stackable items always carry an amount of 1 per slot; stackable items
/// track their quantity here instead of spreading across slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub amount: u32,
}

impl Item {
    pub fn new(id: ItemId, amount: u32) -> Self {
        Self { id, amount }
    }

    pub fn single(id: ItemId) -> Self {
        Self { id, amount: 1 }
    }
}

impl From<ItemId> for Item {
    fn from(id: ItemId) -> Self {
        Item::single(id)
    }
}

impl From<u16> for Item {
    fn from(id: u16) -> Self {
        Item::single(ItemId(id))
    }
}

impl From<u16> for ItemId {
    fn from(id: u16) -> Self {
        ItemId(id)
    }
}

impl From<Item> for ItemId {
    fn from(item: Item) -> Self {
        item.id
    }
}

impl From<&Item> for ItemId {
    fn from(item: &Item) -> Self {
        item.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_id_becomes_single_item() {
        let item: Item = 995u16.into();
        assert_eq!(item, Item::new(ItemId(995), 1));
    }

    #[test]
    fn item_converts_back_to_id() {
        let item = Item::new(ItemId(1205), 4);
        assert_eq!(ItemId::from(&item), ItemId(1205));
    }
}
