use crate::entities::equipment::EquipmentSlot;
use crate::entities::item::ItemId;
use crate::items::config::{EquipmentData, ItemConfiguration, ItemDefinition};
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const PRESETS_KEY: &str = "presets";
const EXTENDS_KEY: &str = "extends";

#[derive(Debug, thiserror::Error)]
pub enum ItemConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{origin}: entry '{key}' is not a mapping")]
    NotAMapping { origin: String, key: String },
    #[error("{origin}: item '{key}' is invalid: {source}")]
    InvalidItem {
        origin: String,
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Source of cache-side item definitions.
pub trait ItemDefinitions {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition>;
}

impl ItemDefinitions for HashMap<ItemId, ItemDefinition> {
    fn definition(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.get(&id)
    }
}

/// Reads a YAML list of cache definitions into a lookup table.
pub fn load_item_definitions(path: &Path) -> Result<HashMap<ItemId, ItemDefinition>, ItemConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ItemConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let definitions: Vec<ItemDefinition> =
        serde_yaml::from_str(&content).map_err(|source| ItemConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })?;
    Ok(definitions
        .into_iter()
        .map(|definition| (ItemId(definition.id), definition))
        .collect())
}

/// Resolved profile of one item: file configuration, presets and cache
/// definition combined.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub key: String,
    pub game_id: ItemId,
    pub name: String,
    pub description: String,
    pub tradable: bool,
    pub equippable: bool,
    pub weight: f32,
    pub equipment: Option<EquipmentData>,
    pub metadata: BTreeMap<String, Value>,
    pub stackable: bool,
    pub value: u32,
    pub members: bool,
    pub ground_options: Vec<String>,
    pub inventory_options: Vec<String>,
    pub noted_id: Option<ItemId>,
    pub note_template_id: Option<ItemId>,
}

impl ItemDetails {
    fn resolve(key: &str, config: ItemConfiguration, definition: Option<&ItemDefinition>) -> Self {
        let mut details = ItemDetails {
            key: key.to_string(),
            game_id: ItemId(config.game_id),
            name: String::new(),
            description: config.description.unwrap_or_default(),
            tradable: config.tradable.unwrap_or(false),
            equippable: config.equippable.unwrap_or(false),
            weight: config.weight.unwrap_or(0.0),
            equipment: config.equipment_data,
            metadata: config.metadata,
            stackable: false,
            value: 0,
            members: false,
            ground_options: Vec::new(),
            inventory_options: Vec::new(),
            noted_id: None,
            note_template_id: None,
        };
        if let Some(definition) = definition {
            details.name = definition.name.clone();
            details.stackable = definition.stackable;
            details.value = definition.value;
            details.members = definition.members;
            details.ground_options = definition.ground_options.clone();
            details.inventory_options = definition.inventory_options.clone();
            details.noted_id = definition.noted_id.map(ItemId);
            details.note_template_id = definition.note_template_id.map(ItemId);
        }
        details
    }

    /// Slot the item is worn in, when it can be worn at all.
    pub fn equipment_slot(&self) -> Option<EquipmentSlot> {
        if !self.equippable {
            return None;
        }
        self.equipment.as_ref().map(|data| data.equipment_slot)
    }
}

#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    items: HashMap<String, ItemDetails>,
    id_map: HashMap<ItemId, String>,
}

impl ItemCatalog {
    /// Loads every `.yaml`/`.yml` file in `dir`, in file name order.
    pub fn load(dir: &Path, definitions: &dyn ItemDefinitions) -> Result<Self, ItemConfigError> {
        let entries = fs::read_dir(dir).map_err(|source| ItemConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ItemConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();
            if path.is_file() && (ext == "yaml" || ext == "yml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path).map_err(|source| ItemConfigError::Io {
                path: path.clone(),
                source,
            })?;
            documents.push((path.display().to_string(), content));
        }
        let catalog = Self::from_documents(&documents, definitions)?;
        info!(
            target: "mobstate::items",
            items = catalog.len(),
            files = documents.len(),
            "item configuration loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog from `(origin, yaml)` pairs.
    ///
    /// Presets are gathered from every document before any item is resolved,
    /// so an item may extend a preset declared in a later file. Presets named
    /// in `extends` are merged in order and the item's own values go on top.
    pub fn from_documents(
        documents: &[(String, String)],
        definitions: &dyn ItemDefinitions,
    ) -> Result<Self, ItemConfigError> {
        let mut presets: HashMap<String, Value> = HashMap::new();
        let mut entries: Vec<(String, String, Value)> = Vec::new();

        for (origin, content) in documents {
            let root: Mapping = match serde_yaml::from_str::<Option<Mapping>>(content) {
                Ok(Some(root)) => root,
                Ok(None) => continue,
                Err(source) => {
                    return Err(ItemConfigError::Parse {
                        origin: origin.clone(),
                        source,
                    })
                }
            };
            for (key, value) in root {
                let key = yaml_key(&key);
                if key == PRESETS_KEY {
                    let Value::Mapping(declared) = value else {
                        return Err(ItemConfigError::NotAMapping {
                            origin: origin.clone(),
                            key,
                        });
                    };
                    for (preset_key, preset) in declared {
                        presets.insert(yaml_key(&preset_key), preset);
                    }
                    continue;
                }
                if !value.is_mapping() {
                    return Err(ItemConfigError::NotAMapping {
                        origin: origin.clone(),
                        key,
                    });
                }
                entries.push((origin.clone(), key, value));
            }
        }

        let mut catalog = ItemCatalog::default();
        for (origin, key, value) in entries {
            let merged = apply_presets(&key, value, &presets);
            let config: ItemConfiguration =
                serde_yaml::from_value(merged).map_err(|source| ItemConfigError::InvalidItem {
                    origin: origin.clone(),
                    key: key.clone(),
                    source,
                })?;
            let definition = definitions.definition(ItemId(config.game_id));
            catalog.insert(ItemDetails::resolve(&key, config, definition));
        }
        Ok(catalog)
    }

    /// Adds or replaces an item. A game id already claimed by another key is
    /// reassigned to the new key.
    pub fn insert(&mut self, details: ItemDetails) {
        if let Some(previous) = self.id_map.get(&details.game_id) {
            if previous != &details.key {
                warn!(
                    target: "mobstate::items",
                    game_id = details.game_id.0,
                    previous = %previous,
                    key = %details.key,
                    "duplicate game id, later key wins"
                );
            }
        }
        self.id_map.insert(details.game_id, details.key.clone());
        self.items.insert(details.key.clone(), details);
    }

    pub fn get(&self, key: &str) -> Option<&ItemDetails> {
        self.items.get(key)
    }

    pub fn by_id(&self, id: ItemId) -> Option<&ItemDetails> {
        self.id_map.get(&id).and_then(|key| self.items.get(key))
    }

    pub fn key_for(&self, id: ItemId) -> Option<&str> {
        self.id_map.get(&id).map(String::as_str)
    }

    /// Unknown ids are treated as non-stackable.
    pub fn is_stackable(&self, id: ItemId) -> bool {
        self.by_id(id).map(|details| details.stackable).unwrap_or(false)
    }

    /// Unknown ids are treated as non-equippable.
    pub fn equipment_slot(&self, id: ItemId) -> Option<EquipmentSlot> {
        self.by_id(id).and_then(ItemDetails::equipment_slot)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn yaml_key(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
    }
}

fn extends_list(value: &Value) -> Vec<String> {
    match value.get(EXTENDS_KEY) {
        Some(Value::String(single)) => vec![single.clone()],
        Some(Value::Sequence(many)) => many.iter().map(yaml_key).collect(),
        _ => Vec::new(),
    }
}

fn apply_presets(key: &str, mut value: Value, presets: &HashMap<String, Value>) -> Value {
    let extends = extends_list(&value);
    if let Value::Mapping(map) = &mut value {
        map.remove(EXTENDS_KEY);
    }
    let mut merged = Value::Mapping(Mapping::new());
    for preset_key in extends {
        match presets.get(&preset_key) {
            Some(preset) => {
                let mut preset = preset.clone();
                if let Value::Mapping(map) = &mut preset {
                    map.remove(EXTENDS_KEY);
                }
                merge_value(&mut merged, preset);
            }
            None => warn!(
                target: "mobstate::items",
                item = key,
                preset = %preset_key,
                "unknown preset skipped"
            ),
        }
    }
    merge_value(&mut merged, value);
    merged
}

/// Deep merge: mappings merge key by key, null never overwrites, anything
/// else replaces the base value.
fn merge_value(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
