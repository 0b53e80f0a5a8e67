pub mod cron;
pub mod position;
pub mod registry;
pub mod spawns;
pub mod time;
pub mod wander;
