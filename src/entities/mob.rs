use crate::entities::equipment::{Equipment, EquipmentSlot};
use crate::entities::inventory::ItemContainer;
use crate::entities::item::{Item, ItemId};
use crate::entities::skills::{Skill, Skills};
use crate::entities::update_flags::{Animation, ChatMessage, Graphic, HitSplat, HitType, UpdateFlags};
use crate::entities::walking_queue::{QueueStep, WalkingQueue};
use crate::items::catalog::ItemCatalog;
use crate::items::config::{DefensiveBonuses, OffensiveBonuses};
use crate::world::position::{Direction, Position};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("inventory slot {0} is empty")]
    EmptySlot(usize),
    #[error("no item configuration for {0:?}")]
    NoConfiguration(ItemId),
    #[error("item {0:?} cannot be equipped")]
    NotEquippable(ItemId),
    #[error("{} level {required} required, have {current}", .skill.name())]
    RequirementNotMet {
        skill: Skill,
        required: u8,
        current: u8,
    },
    #[error("nothing equipped in {}", .0.name())]
    NothingEquipped(EquipmentSlot),
    #[error("inventory is full")]
    InventoryFull,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquipmentBonuses {
    pub offensive: OffensiveBonuses,
    pub defensive: DefensiveBonuses,
}

/// State shared by every mobile actor.
///
/// The walking queue, update flags, inventory, equipment and skills belong to
/// this mob alone and are only changed through its methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mob {
    world_index: Option<u16>,
    pub position: Position,
    pub walk_direction: Option<Direction>,
    pub run_direction: Option<Direction>,
    pub face_direction: Option<Direction>,
    walking_queue: WalkingQueue,
    update_flags: UpdateFlags,
    inventory: ItemContainer,
    equipment: Equipment,
    skills: Skills,
}

impl Mob {
    pub fn new(position: Position) -> Self {
        Self {
            world_index: None,
            position,
            walk_direction: None,
            run_direction: None,
            face_direction: None,
            walking_queue: WalkingQueue::default(),
            update_flags: UpdateFlags::default(),
            inventory: ItemContainer::default(),
            equipment: Equipment::default(),
            skills: Skills::default(),
        }
    }

    pub fn world_index(&self) -> Option<u16> {
        self.world_index
    }

    pub fn set_world_index(&mut self, index: u16) {
        self.world_index = Some(index);
    }

    pub fn clear_world_index(&mut self) {
        self.world_index = None;
    }

    pub fn walking_queue(&self) -> &WalkingQueue {
        &self.walking_queue
    }

    pub fn update_flags(&self) -> &UpdateFlags {
        &self.update_flags
    }

    pub fn inventory(&self) -> &ItemContainer {
        &self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn skills(&self) -> &Skills {
        &self.skills
    }

    pub fn skills_mut(&mut self) -> &mut Skills {
        &mut self.skills
    }

    // TODO: facing another mob needs a mob index field in the flags.
    pub fn face(&mut self, position: Position) {
        self.update_flags.set_face_position(position);
    }

    pub fn play_animation(&mut self, animation: impl Into<Animation>) {
        self.update_flags.set_animation(animation);
    }

    pub fn play_graphics(&mut self, graphics: impl Into<Graphic>) {
        self.update_flags.set_graphics(graphics);
    }

    pub fn say(&mut self, text: impl Into<String>) {
        self.update_flags.set_chat(ChatMessage {
            color: 0,
            effects: 0,
            text: text.into(),
        });
    }

    pub fn show_hit(&mut self, damage: u16) {
        let kind = if damage == 0 {
            HitType::Miss
        } else {
            HitType::Damage
        };
        self.update_flags.set_hit(HitSplat { damage, kind });
    }

    /// Stages a waypoint without arming the queue.
    pub fn queue_waypoint(&mut self, x: u16, y: u16) {
        self.walking_queue.add(x, y);
    }

    pub fn start_moving(&mut self) {
        self.walking_queue.set_valid(true);
    }

    pub fn clear_path(&mut self) {
        self.walking_queue.clear();
    }

    /// Replaces any pending path with a single armed waypoint.
    pub fn walk_to(&mut self, destination: Position) {
        self.walking_queue.clear();
        self.walking_queue.set_valid(true);
        self.walking_queue.add(destination.x, destination.y);
    }

    /// Releases one waypoint, if the queue allows it, and moves there.
    pub fn process_movement(&mut self) -> Option<QueueStep> {
        self.walk_direction = None;
        self.run_direction = None;
        let step = self.walking_queue.step(self.position)?;
        self.position = step.to;
        self.walk_direction = step.direction;
        if step.direction.is_some() {
            self.face_direction = step.direction;
        }
        Some(step)
    }

    /// Drains this tick's update flags.
    pub fn take_update_flags(&mut self) -> UpdateFlags {
        self.update_flags.take()
    }

    pub fn remove_item(&mut self, slot: usize) {
        self.inventory.remove(slot);
    }

    /// Returns false when the inventory has no room for the item.
    pub fn give_item(&mut self, item: impl Into<Item>, catalog: &ItemCatalog) -> bool {
        let item = item.into();
        let stackable = catalog.is_stackable(item.id);
        let placed = self.inventory.add(item, stackable).is_some();
        if !placed {
            debug!(
                target: "mobstate::world",
                world_index = ?self.world_index,
                item = item.id.0,
                "inventory full"
            );
        }
        placed
    }

    pub fn has_item_in_inventory(&self, item: impl Into<ItemId>) -> bool {
        self.inventory.has(item)
    }

    /// Currently the same check as [`Mob::has_item_in_inventory`]; worn
    /// items are not counted.
    pub fn has_item_on_person(&self, item: impl Into<ItemId>) -> bool {
        self.has_item_in_inventory(item)
    }

    /// Wears the item in `inventory_slot`. Whatever was worn in the target
    /// slot joins an existing stack of the same id when it is stackable, and
    /// otherwise takes the vacated inventory slot. A merge that would
    /// overflow the stack fails with [`EquipError::InventoryFull`] and
    /// leaves everything in place.
    pub fn equip_item(
        &mut self,
        inventory_slot: usize,
        catalog: &ItemCatalog,
    ) -> Result<EquipmentSlot, EquipError> {
        let item = *self
            .inventory
            .slot(inventory_slot)
            .ok_or(EquipError::EmptySlot(inventory_slot))?;
        let details = catalog
            .by_id(item.id)
            .ok_or(EquipError::NoConfiguration(item.id))?;
        let slot = details
            .equipment_slot()
            .ok_or(EquipError::NotEquippable(item.id))?;

        if let Some(data) = details.equipment.as_ref() {
            for (name, required) in &data.requirements.skills {
                let Some(skill) = Skill::from_name(name) else {
                    warn!(
                        target: "mobstate::items",
                        item = %details.key,
                        skill = %name,
                        "unknown skill requirement ignored"
                    );
                    continue;
                };
                let current = self.skills.level(skill);
                if current < *required {
                    return Err(EquipError::RequirementNotMet {
                        skill,
                        required: *required,
                        current,
                    });
                }
            }
        }

        let mut merge = None;
        if let Some(previous) = self.equipment.get(slot).copied() {
            if catalog.is_stackable(previous.id) {
                if let Some((index, stacked)) = self
                    .inventory
                    .iter()
                    .find(|(index, stacked)| *index != inventory_slot && stacked.id == previous.id)
                {
                    let amount = stacked
                        .amount
                        .checked_add(previous.amount)
                        .ok_or(EquipError::InventoryFull)?;
                    merge = Some((index, Item::new(previous.id, amount)));
                }
            }
        }

        self.inventory.remove(inventory_slot);
        if let Some(previous) = self.equipment.replace(slot, item) {
            match merge {
                Some((index, merged)) => self.inventory.set_slot(index, Some(merged)),
                None => self.inventory.set_slot(inventory_slot, Some(previous)),
            }
        }
        self.update_flags.set_appearance_changed();
        Ok(slot)
    }

    /// Moves the worn item back into the inventory and returns the slot used.
    pub fn unequip(
        &mut self,
        slot: EquipmentSlot,
        catalog: &ItemCatalog,
    ) -> Result<usize, EquipError> {
        let item = *self
            .equipment
            .get(slot)
            .ok_or(EquipError::NothingEquipped(slot))?;
        let index = self
            .inventory
            .add(item, catalog.is_stackable(item.id))
            .ok_or(EquipError::InventoryFull)?;
        self.equipment.take(slot);
        self.update_flags.set_appearance_changed();
        Ok(index)
    }

    pub fn equipment_bonuses(&self, catalog: &ItemCatalog) -> EquipmentBonuses {
        let mut bonuses = EquipmentBonuses::default();
        for (_, item) in self.equipment.iter() {
            let Some(data) = catalog
                .by_id(item.id)
                .and_then(|details| details.equipment.as_ref())
            else {
                continue;
            };
            bonuses.offensive += data.offensive_bonuses;
            bonuses.defensive += data.defensive_bonuses;
        }
        bonuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::inventory::INVENTORY_SIZE;
    use crate::items::config::ItemDefinition;
    use std::collections::HashMap;

    const ITEMS: &str = r#"
coins:
  game_id: 995
bronze_sword:
  game_id: 1277
  equippable: true
  equipment_data:
    equipment_slot: main_hand
    offensive_bonuses:
      stab: 4
      slash: 5
rune_scimitar:
  game_id: 1333
  equippable: true
  equipment_data:
    equipment_slot: main_hand
    requirements:
      skills:
        attack: 40
    offensive_bonuses:
      slash: 45
bronze_med_helm:
  game_id: 1139
  equippable: true
  equipment_data:
    equipment_slot: head
    defensive_bonuses:
      stab: 3
      slash: 4
logs:
  game_id: 1511
bronze_arrow:
  game_id: 882
  equippable: true
  equipment_data:
    equipment_slot: quiver
    offensive_bonuses:
      ranged: 7
iron_arrow:
  game_id: 884
  equippable: true
  equipment_data:
    equipment_slot: quiver
    offensive_bonuses:
      ranged: 10
"#;

    fn catalog() -> ItemCatalog {
        let mut definitions = HashMap::new();
        definitions.insert(
            ItemId(995),
            ItemDefinition {
                id: 995,
                name: "Coins".to_string(),
                stackable: true,
                ..ItemDefinition::default()
            },
        );
        for id in [882, 884] {
            definitions.insert(
                ItemId(id),
                ItemDefinition {
                    id,
                    stackable: true,
                    ..ItemDefinition::default()
                },
            );
        }
        let documents = vec![("items.yaml".to_string(), ITEMS.to_string())];
        ItemCatalog::from_documents(&documents, &definitions).expect("catalog")
    }

    fn mob() -> Mob {
        Mob::new(Position::new(3222, 3218, 0))
    }

    #[test]
    fn new_mob_has_no_directions_or_index() {
        let mob = mob();
        assert_eq!(mob.world_index(), None);
        assert_eq!(mob.walk_direction, None);
        assert_eq!(mob.run_direction, None);
        assert_eq!(mob.face_direction, None);
        assert_eq!(mob.inventory().size(), INVENTORY_SIZE);
    }

    #[test]
    fn visual_mutators_write_update_flags() {
        let mut mob = mob();
        mob.face(Position::new(3223, 3218, 0));
        mob.play_animation(866u16);
        mob.play_graphics(Graphic {
            id: 76,
            delay: 10,
            height: 0,
        });

        let flags = mob.take_update_flags();
        assert_eq!(flags.face_position, Some(Position::new(3223, 3218, 0)));
        assert_eq!(flags.animation, Some(Animation { id: 866, delay: 0 }));
        assert_eq!(flags.graphics.map(|graphic| graphic.height), Some(0));
        assert_eq!(mob.take_update_flags(), UpdateFlags::default());
    }

    #[test]
    fn give_item_stacks_configured_stackables() {
        let catalog = catalog();
        let mut mob = mob();
        assert!(mob.give_item(ItemId(995), &catalog));
        assert!(mob.give_item(Item::new(ItemId(995), 9), &catalog));
        assert_eq!(mob.inventory().occupied(), 1);
        assert_eq!(mob.inventory().count(ItemId(995)), 10);
    }

    #[test]
    fn unconfigured_items_do_not_stack() {
        let catalog = catalog();
        let mut mob = mob();
        assert!(mob.give_item(ItemId(4151), &catalog));
        assert!(mob.give_item(ItemId(4151), &catalog));
        assert_eq!(mob.inventory().occupied(), 2);
    }

    #[test]
    fn give_item_reports_full_inventory() {
        let catalog = catalog();
        let mut mob = mob();
        for _ in 0..INVENTORY_SIZE {
            assert!(mob.give_item(ItemId(1511), &catalog));
        }
        assert!(!mob.give_item(ItemId(1511), &catalog));
        mob.remove_item(4);
        assert!(mob.give_item(ItemId(1511), &catalog));
    }

    #[test]
    fn on_person_matches_inventory_only() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(ItemId(1277), &catalog);
        assert!(mob.has_item_in_inventory(ItemId(1277)));
        assert!(mob.has_item_on_person(ItemId(1277)));
        mob.equip_item(0, &catalog).expect("equip");
        assert!(!mob.has_item_in_inventory(ItemId(1277)));
        assert!(!mob.has_item_on_person(ItemId(1277)));
    }

    #[test]
    fn equip_swaps_previous_item_into_vacated_slot() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(ItemId(1277), &catalog);
        mob.give_item(ItemId(1511), &catalog);
        mob.skills_mut().set_level(Skill::Attack, 40);
        mob.give_item(ItemId(1333), &catalog);

        assert_eq!(mob.equip_item(0, &catalog), Ok(EquipmentSlot::MainHand));
        assert!(mob.take_update_flags().appearance_changed);
        assert_eq!(mob.equip_item(2, &catalog), Ok(EquipmentSlot::MainHand));
        assert_eq!(mob.inventory().slot(2), Some(&Item::single(ItemId(1277))));
        assert_eq!(
            mob.equipment().get(EquipmentSlot::MainHand),
            Some(&Item::single(ItemId(1333)))
        );
    }

    #[test]
    fn swapped_out_ammunition_joins_existing_stack() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(Item::new(ItemId(882), 100), &catalog);
        assert_eq!(mob.equip_item(0, &catalog), Ok(EquipmentSlot::Quiver));
        mob.give_item(Item::new(ItemId(884), 30), &catalog);
        mob.give_item(Item::new(ItemId(882), 50), &catalog);

        assert_eq!(mob.equip_item(0, &catalog), Ok(EquipmentSlot::Quiver));
        let bronze: Vec<(usize, u32)> = mob
            .inventory()
            .iter()
            .filter(|(_, item)| item.id == ItemId(882))
            .map(|(index, item)| (index, item.amount))
            .collect();
        assert_eq!(bronze, vec![(1, 150)]);
        assert_eq!(mob.inventory().slot(0), None);
        assert_eq!(
            mob.equipment().get(EquipmentSlot::Quiver),
            Some(&Item::new(ItemId(884), 30))
        );
    }

    #[test]
    fn overflowing_ammunition_swap_changes_nothing() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(Item::new(ItemId(882), u32::MAX), &catalog);
        mob.equip_item(0, &catalog).expect("equip");
        mob.take_update_flags();
        mob.give_item(Item::new(ItemId(884), 30), &catalog);
        mob.give_item(Item::new(ItemId(882), 1), &catalog);

        assert_eq!(mob.equip_item(0, &catalog), Err(EquipError::InventoryFull));
        assert_eq!(mob.inventory().slot(0), Some(&Item::new(ItemId(884), 30)));
        assert_eq!(mob.inventory().slot(1), Some(&Item::new(ItemId(882), 1)));
        assert_eq!(
            mob.equipment().get(EquipmentSlot::Quiver),
            Some(&Item::new(ItemId(882), u32::MAX))
        );
        assert!(!mob.update_flags().appearance_changed);
    }

    #[test]
    fn equip_rejects_unmet_requirement() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(ItemId(1333), &catalog);
        let err = mob.equip_item(0, &catalog).expect_err("requirement");
        assert_eq!(
            err,
            EquipError::RequirementNotMet {
                skill: Skill::Attack,
                required: 40,
                current: 1
            }
        );
        assert!(mob.has_item_in_inventory(ItemId(1333)));
        assert!(!mob.update_flags().appearance_changed);
    }

    #[test]
    fn equip_falls_back_for_unknown_and_plain_items() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(ItemId(4151), &catalog);
        mob.give_item(ItemId(1511), &catalog);
        assert_eq!(mob.equip_item(0, &catalog), Err(EquipError::NoConfiguration(ItemId(4151))));
        assert_eq!(mob.equip_item(1, &catalog), Err(EquipError::NotEquippable(ItemId(1511))));
        assert_eq!(mob.equip_item(7, &catalog), Err(EquipError::EmptySlot(7)));
    }

    #[test]
    fn unequip_needs_inventory_room() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(ItemId(1139), &catalog);
        mob.equip_item(0, &catalog).expect("equip");
        for _ in 0..INVENTORY_SIZE {
            mob.give_item(ItemId(1511), &catalog);
        }
        assert_eq!(mob.unequip(EquipmentSlot::Head, &catalog), Err(EquipError::InventoryFull));
        assert!(mob.equipment().get(EquipmentSlot::Head).is_some());

        mob.remove_item(10);
        assert_eq!(mob.unequip(EquipmentSlot::Head, &catalog), Ok(10));
        assert_eq!(
            mob.unequip(EquipmentSlot::Head, &catalog),
            Err(EquipError::NothingEquipped(EquipmentSlot::Head))
        );
    }

    #[test]
    fn bonuses_sum_worn_items() {
        let catalog = catalog();
        let mut mob = mob();
        mob.give_item(ItemId(1277), &catalog);
        mob.give_item(ItemId(1139), &catalog);
        mob.equip_item(0, &catalog).expect("sword");
        mob.equip_item(1, &catalog).expect("helm");

        let bonuses = mob.equipment_bonuses(&catalog);
        assert_eq!(bonuses.offensive.slash, 5);
        assert_eq!(bonuses.offensive.stab, 4);
        assert_eq!(bonuses.defensive.slash, 4);
        assert_eq!(bonuses.defensive.crush, 0);
    }

    #[test]
    fn movement_updates_position_and_directions() {
        let mut mob = mob();
        mob.queue_waypoint(3223, 3219);
        assert_eq!(mob.process_movement(), None);

        mob.start_moving();
        let step = mob.process_movement().expect("step");
        assert_eq!(step.to, Position::new(3223, 3219, 0));
        assert_eq!(mob.position, step.to);
        assert_eq!(mob.walk_direction, Some(Direction::Northeast));
        assert_eq!(mob.face_direction, Some(Direction::Northeast));

        assert_eq!(mob.process_movement(), None);
        assert_eq!(mob.walk_direction, None);
        assert_eq!(mob.face_direction, Some(Direction::Northeast));
    }

    #[test]
    fn walk_to_replaces_pending_path() {
        let mut mob = mob();
        mob.queue_waypoint(1, 1);
        mob.queue_waypoint(2, 2);
        mob.walk_to(Position::new(3224, 3218, 0));
        assert_eq!(mob.walking_queue().len(), 1);
        let step = mob.process_movement().expect("step");
        assert_eq!(step.to, Position::new(3224, 3218, 0));
    }

    #[test]
    fn chat_and_hits_are_recorded() {
        let mut mob = mob();
        mob.say("Hello");
        mob.show_hit(0);
        let flags = mob.take_update_flags();
        assert_eq!(flags.chat.map(|chat| chat.text), Some("Hello".to_string()));
        assert_eq!(flags.hit.map(|hit| hit.kind), Some(HitType::Miss));
    }
}
