use crate::entities::equipment::EquipmentSlot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Hat,
    Helmet,
    Torso,
    FullTop,
    OneHanded,
    TwoHanded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRequirements {
    pub skills: BTreeMap<String, u8>,
    pub quests: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffensiveBonuses {
    pub speed: i32,
    pub stab: i32,
    pub slash: i32,
    pub crush: i32,
    pub magic: i32,
    pub ranged: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefensiveBonuses {
    pub stab: i32,
    pub slash: i32,
    pub crush: i32,
    pub magic: i32,
    pub ranged: i32,
}

impl std::ops::AddAssign for OffensiveBonuses {
    fn add_assign(&mut self, other: Self) {
        self.speed += other.speed;
        self.stab += other.stab;
        self.slash += other.slash;
        self.crush += other.crush;
        self.magic += other.magic;
        self.ranged += other.ranged;
    }
}

impl std::ops::AddAssign for DefensiveBonuses {
    fn add_assign(&mut self, other: Self) {
        self.stab += other.stab;
        self.slash += other.slash;
        self.crush += other.crush;
        self.magic += other.magic;
        self.ranged += other.ranged;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentData {
    pub equipment_slot: EquipmentSlot,
    #[serde(default)]
    pub equipment_type: Option<EquipmentType>,
    #[serde(default)]
    pub requirements: ItemRequirements,
    #[serde(default)]
    pub offensive_bonuses: OffensiveBonuses,
    #[serde(default)]
    pub defensive_bonuses: DefensiveBonuses,
    #[serde(default)]
    pub skill_bonuses: BTreeMap<String, i32>,
}

/// One item entry as written in the YAML item files, after presets have been
/// folded in. `extends` is consumed by the loader and never reaches here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemConfiguration {
    pub game_id: u16,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tradable: Option<bool>,
    #[serde(default)]
    pub weight: Option<f32>,
    #[serde(default)]
    pub equippable: Option<bool>,
    #[serde(default)]
    pub equipment_data: Option<EquipmentData>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_yaml::Value>,
}

/// Definition that ships with the client cache for a game id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemDefinition {
    pub id: u16,
    pub name: String,
    pub stackable: bool,
    pub value: u32,
    pub members: bool,
    pub ground_options: Vec<String>,
    pub inventory_options: Vec<String>,
    pub noted_id: Option<u16>,
    pub note_template_id: Option<u16>,
}
