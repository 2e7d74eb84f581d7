//! Cursor configuration with TOML preset support.
//!
//! The enable checkbox, the size slider, and the marker display properties
//! live here. Options serialize to/from TOML presets; the UI-exposed subset
//! is described by a JSON schema for building the module widget.

mod cursor;
mod marker;
mod parameters;

use std::path::Path;

pub use cursor::{
    CursorOptions, FallbackOrientation, MAX_CURSOR_SIZE, MIN_CURSOR_SIZE,
};
pub use marker::MarkerOptions;
pub use parameters::{ParameterNode, ENABLE_KEY, SCALE_KEY};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CursorError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[cursor]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Enable toggle, size, and fallback orientation.
    pub cursor: CursorOptions,
    /// Marker display properties.
    #[schemars(skip)]
    pub marker: MarkerOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Io`] if the file cannot be read and
    /// [`CursorError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, CursorError> {
        let content = std::fs::read_to_string(path).map_err(CursorError::Io)?;
        toml::from_str(&content)
            .map_err(|e| CursorError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::OptionsParse`] if serialization fails and
    /// [`CursorError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CursorError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CursorError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CursorError::Io)?;
        }
        std::fs::write(path, content).map_err(CursorError::Io)
    }

    /// Load a named preset from `dir`, logging the outcome.
    ///
    /// # Errors
    ///
    /// Same as [`Options::load`].
    pub fn load_preset(dir: &Path, name: &str) -> Result<Self, CursorError> {
        let path = dir.join(format!("{name}.toml"));
        match Self::load(&path) {
            Ok(options) => {
                log::info!("Loaded cursor preset '{name}'");
                Ok(options)
            }
            Err(e) => {
                log::error!("Failed to load cursor preset '{name}': {e}");
                Err(e)
            }
        }
    }

    /// Save these options as a named preset in `dir`, logging the outcome.
    ///
    /// # Errors
    ///
    /// Same as [`Options::save`].
    pub fn save_preset(
        &self,
        dir: &Path,
        name: &str,
    ) -> Result<(), CursorError> {
        let path = dir.join(format!("{name}.toml"));
        self.save(&path)
            .inspect(|()| log::info!("Saved cursor preset '{name}'"))
            .inspect_err(|e| {
                log::error!("Failed to save cursor preset '{name}': {e}");
            })
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
