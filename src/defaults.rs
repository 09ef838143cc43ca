//! Placeholder expansion and the factory-defaults snapshot

use crate::constant::SETTINGS_DIR_PLACEHOLDER;
use crate::field::SettingsDefinition;
use crate::value::Value;
use std::path::Path;
use tracing::debug;

/// Replaces the settings-directory token in every text field of `values`
pub fn expand_placeholders<S: SettingsDefinition>(values: &mut S, settings_dir: &Path) {
    let replacement = settings_dir.to_string_lossy();
    for field in S::fields() {
        (field.expand)(values, SETTINGS_DIR_PLACEHOLDER, &replacement);
    }
    debug!("Expanded {} in defaults to {}", SETTINGS_DIR_PLACEHOLDER, replacement);
}

/// Post-expansion value of every declared field, frozen at construction
#[derive(Debug, Clone)]
pub struct DefaultsSnapshot<S> {
    values: S,
}

impl<S: SettingsDefinition> DefaultsSnapshot<S> {
    pub fn capture(values: &S) -> Self {
        Self {
            values: values.clone(),
        }
    }

    /// Recorded default of `name`, `None` if no such field is declared
    pub fn value(&self, name: &str) -> Option<Value> {
        S::field(name).map(|field| (field.read)(&self.values))
    }

    /// Puts the default of `name` back into `live` and returns it
    pub fn restore_one(&self, name: &str, live: &mut S) -> Option<Value> {
        let field = S::field(name)?;
        (field.restore)(live, &self.values);
        Some((field.read)(live))
    }

    pub fn restore_all(&self, live: &mut S) {
        *live = self.values.clone();
    }

    pub fn values(&self) -> &S {
        &self.values
    }
}
