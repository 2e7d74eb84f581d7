//! String key/value parameter node persisted with the host scene.
//!
//! Mirrors the host convention: booleans are `"true"`/`"false"`, numbers
//! are decimal strings, and missing keys are filled with defaults when the
//! node is first observed.

use std::collections::BTreeMap;

use super::cursor::CursorOptions;
use crate::error::CursorError;

/// Parameter key for the enable checkbox.
pub const ENABLE_KEY: &str = "Enable";
/// Parameter key for the size slider.
pub const SCALE_KEY: &str = "Scale";

const DEFAULT_ENABLE: &str = "true";
const DEFAULT_SCALE: &str = "3.0";

/// Per-scene parameter storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterNode {
    values: BTreeMap<String, String>,
    revision: u64,
}

impl ParameterNode {
    /// Create an empty parameter node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in `Enable` and `Scale` when absent or empty. Existing values
    /// are left alone.
    pub fn set_defaults(&mut self) {
        let defaults =
            [(ENABLE_KEY, DEFAULT_ENABLE), (SCALE_KEY, DEFAULT_SCALE)];
        for (key, default) in defaults {
            if self.get(key).is_none_or(str::is_empty) {
                let _ = self.set(key, default);
            }
        }
    }

    /// Raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set `key` to `value`. Returns `true` (and bumps the revision) only
    /// when the stored value actually changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        if self.get(key) == Some(value) {
            return false;
        }
        let _ = self.values.insert(key.to_owned(), value.to_owned());
        self.revision += 1;
        true
    }

    /// Modification counter; increases on every effective change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Parse the stored values over `base`. Keys that are missing keep the
    /// value from `base`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidParameter`] if `Enable` is not
    /// `"true"`/`"false"` or `Scale` is not a finite number.
    pub fn cursor_options(
        &self,
        base: &CursorOptions,
    ) -> Result<CursorOptions, CursorError> {
        let mut options = base.clone();
        if let Some(raw) = self.get(ENABLE_KEY) {
            options.enabled = match raw {
                "true" => true,
                "false" => false,
                _ => return Err(invalid(ENABLE_KEY, raw)),
            };
        }
        if let Some(raw) = self.get(SCALE_KEY) {
            let size: f32 =
                raw.trim().parse().map_err(|_| invalid(SCALE_KEY, raw))?;
            if !size.is_finite() {
                return Err(invalid(SCALE_KEY, raw));
            }
            options.size = CursorOptions::clamp_size(size);
        }
        Ok(options)
    }

    /// Write the enable and size values. Returns `true` if anything
    /// changed.
    pub fn store(&mut self, options: &CursorOptions) -> bool {
        let enable = if options.enabled { "true" } else { "false" };
        let enable_changed = self.set(ENABLE_KEY, enable);
        let scale_changed = self.set(SCALE_KEY, &format!("{:?}", options.size));
        enable_changed || scale_changed
    }
}

fn invalid(name: &str, value: &str) -> CursorError {
    CursorError::InvalidParameter {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}
