use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use ghostjob_core::error::Error;
use ghostjob_core::settings::SettingsStore;

/// Settings persisted as one JSON object on disk.
///
/// Every `set` rewrites the whole file. A missing file reads as empty.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    pub fn open(path: &Path) -> Result<Self> {
        let values = match std::fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => {
                let value: Value = serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse settings {}", path.display()))?;
                match value {
                    Value::Object(map) => map,
                    _ => bail!("settings file {} is not a JSON object", path.display()),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read settings {}", path.display()));
            }
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "settings loaded");
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), Error> {
        self.values.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text + "\n").map_err(|e| Error::Settings {
            key: key.to_string(),
            reason: format!("{}: {e}", self.path.display()),
        })
    }
}
