use crate::entities::npc::Npc;
use crate::world::position::Position;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NpcSpawn {
    pub key: String,
    pub x: u16,
    pub y: u16,
    #[serde(default)]
    pub z: u8,
    #[serde(default)]
    pub radius: Option<u16>,
}

impl NpcSpawn {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    pub fn to_npc(&self) -> Npc {
        Npc::new(self.key.clone(), self.position(), self.radius)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub fn parse_npc_spawns(content: &str) -> Result<Vec<NpcSpawn>, serde_yaml::Error> {
    let spawns: Option<Vec<NpcSpawn>> = serde_yaml::from_str(content)?;
    Ok(spawns.unwrap_or_default())
}

pub fn load_npc_spawns(path: &Path) -> Result<Vec<NpcSpawn>, SpawnError> {
    let content = fs::read_to_string(path).map_err(|source| SpawnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_npc_spawns(&content).map_err(|source| SpawnError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
