pub mod actor;
pub mod equipment;
pub mod inventory;
pub mod item;
pub mod mob;
pub mod npc;
pub mod player;
pub mod skills;
pub mod update_flags;
pub mod walking_queue;
