mod config;
pub mod entities;
pub mod items;
pub mod telemetry;
pub mod world;

pub use config::{AppConfig, ConfigError};

use crate::entities::item::ItemId;
use crate::items::catalog::{load_item_definitions, ItemCatalog};
use crate::items::config::ItemDefinition;
use crate::world::registry::{MobUpdate, World, WorldSettings};
use crate::world::spawns::load_npc_spawns;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub fn run(args: &[String]) -> Result<(), String> {
    let config = AppConfig::from_args(args).map_err(|err| err.to_string())?;
    telemetry::logging::init(&config.log_filter)?;

    let definitions: HashMap<ItemId, ItemDefinition> = {
        let path = config.definitions_path();
        if path.is_file() {
            load_item_definitions(&path).map_err(|err| err.to_string())?
        } else {
            debug!(target: "mobstate", path = %path.display(), "no item definitions file");
            HashMap::new()
        }
    };
    let catalog = ItemCatalog::load(&config.items_dir(), &definitions)
        .map_err(|err| err.to_string())?;

    let spawns_path = config.spawns_path();
    let spawns = if spawns_path.is_file() {
        load_npc_spawns(&spawns_path).map_err(|err| err.to_string())?
    } else {
        warn!(target: "mobstate", path = %spawns_path.display(), "no spawn file, world starts empty");
        Vec::new()
    };

    let world = World::new(WorldSettings {
        tick_length: config.tick_length,
        wander_interval: config.wander_interval,
        seed: config.seed,
        ..WorldSettings::default()
    })
    .into_shared();

    {
        let mut world = world
            .lock()
            .map_err(|_| "world lock poisoned".to_string())?;
        for spawn in &spawns {
            world
                .register(spawn.to_npc())
                .map_err(|err| format!("spawn {}: {}", spawn.key, err))?;
        }
        info!(
            target: "mobstate",
            root = %config.root.display(),
            items = catalog.len(),
            npcs = world.len(),
            ticks = config.ticks,
            "world ready"
        );
    }

    for _ in 0..config.ticks {
        let (tick, updates) = {
            let mut world = world
                .lock()
                .map_err(|_| "world lock poisoned".to_string())?;
            let updates = world.tick();
            (world.now(), updates)
        };
        for update in &updates {
            log_update(tick.0, update);
        }
        std::thread::sleep(config.tick_length);
    }
    info!(target: "mobstate", ticks = config.ticks, "simulation finished");
    Ok(())
}

fn log_update(tick: u64, update: &MobUpdate) {
    info!(
        target: "mobstate::world",
        tick,
        world_index = update.world_index,
        kind = ?update.kind,
        x = update.position.x,
        y = update.position.y,
        z = update.position.z,
        direction = world::position::direction_code(update.step.as_ref().and_then(|step| step.direction)),
        animation = update.flags.animation.is_some(),
        graphics = update.flags.graphics.is_some(),
        chat = update.flags.chat.is_some(),
        appearance = update.flags.appearance_changed,
        "mob update"
    );
}
