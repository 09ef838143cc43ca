//! Settings facade
//!
//! [`Settings`] owns one definition instance together with its defaults
//! snapshot and settings file, and exposes name/string based access for
//! UI layers that do not know the concrete definition type.

use crate::defaults::{DefaultsSnapshot, expand_placeholders};
use crate::field::{self, SettingInfo, SettingsDefinition};
use crate::store::{PersistenceError, SettingsFile};
use crate::value::{ConversionError, Value};
use directories::BaseDirs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    NotFound(String),

    #[error("Invalid setting value: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Settings storage error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// A loaded settings definition bound to its file on disk.
///
/// Construct one per application identity at startup and pass it to the
/// components that need it. Nothing is written until [`Settings::save`].
pub struct Settings<S: SettingsDefinition> {
    values: S,
    defaults: DefaultsSnapshot<S>,
    file: SettingsFile,
    created: bool,
}

impl<S: SettingsDefinition> Settings<S> {
    /// Opens `<user data dir>/<name>/settings.json`, creating it on first run
    pub fn open(name: &str) -> Result<Self, SettingsError> {
        let base = BaseDirs::new().ok_or(PersistenceError::NoDataDir)?;
        Self::open_in(base.data_dir(), name)
    }

    /// Same as [`Settings::open`] with an explicit data root, which should be
    /// absolute since it ends up inside expanded defaults.
    pub fn open_in(root: impl AsRef<Path>, name: &str) -> Result<Self, SettingsError> {
        debug_assert!(
            field::names_are_unique::<S>(),
            "settings definition declares a name twice"
        );

        let file = SettingsFile::new(root.as_ref().join(name));

        let mut values = S::default();
        expand_placeholders(&mut values, file.dir());
        let defaults = DefaultsSnapshot::capture(&values);

        let created = file.ensure(encoded(&values))?;
        let mut settings = Self {
            values,
            defaults,
            file,
            created,
        };
        if !created {
            settings.apply_persisted()?;
        }

        Ok(settings)
    }

    /// Current value of `name`
    pub fn get(&self, name: &str) -> Result<Value, SettingsError> {
        let field = lookup::<S>(name)?;
        Ok((field.read)(&self.values))
    }

    /// Current value of `name` in its stored string form
    pub fn get_string(&self, name: &str) -> Result<String, SettingsError> {
        let field = lookup::<S>(name)?;
        Ok((field.encode)(&self.values))
    }

    /// Parses `value` as the declared type of `name` and assigns it.
    /// On error the field keeps its previous value.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
        let field = lookup::<S>(name)?;
        (field.decode)(&mut self.values, value)?;
        debug!("Set {} to {:?}", name, value);
        Ok(())
    }

    /// Restores `name` to its factory default
    pub fn reset(&mut self, name: &str) -> Result<(), SettingsError> {
        self.defaults
            .restore_one(name, &mut self.values)
            .ok_or_else(|| SettingsError::NotFound(name.to_string()))?;
        debug!("Reset {}", name);
        Ok(())
    }

    pub fn reset_all(&mut self) {
        self.defaults.restore_all(&mut self.values);
    }

    /// Factory default of `name`, after placeholder expansion
    pub fn default_value(&self, name: &str) -> Result<Value, SettingsError> {
        self.defaults
            .value(name)
            .ok_or_else(|| SettingsError::NotFound(name.to_string()))
    }

    /// Writes every declared field to the settings file
    pub fn save(&self) -> Result<(), SettingsError> {
        self.file.save(encoded(&self.values))?;
        Ok(())
    }

    /// Name, description and live value of each field, in declaration order
    pub fn settings_info(&self) -> impl Iterator<Item = SettingInfo> + '_ {
        field::describe(&self.values)
    }

    pub fn values(&self) -> &S {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut S {
        &mut self.values
    }

    pub fn defaults(&self) -> &S {
        self.defaults.values()
    }

    /// Whether opening this instance wrote a fresh settings file
    pub fn was_created(&self) -> bool {
        self.created
    }

    pub fn settings_dir(&self) -> &Path {
        self.file.dir()
    }

    pub fn file_path(&self) -> &Path {
        self.file.path()
    }

    fn apply_persisted(&mut self) -> Result<(), PersistenceError> {
        let Some(entries) = self.file.load()? else {
            return Ok(());
        };

        for (name, raw) in entries {
            let Some(field) = S::field(&name) else {
                debug!("Ignoring unknown setting {}", name);
                continue;
            };
            // A bad entry only costs that one field
            if let Err(e) = (field.decode)(&mut self.values, &raw) {
                warn!("Keeping default for {}: {}", name, e);
            }
        }

        info!("Applied settings from {:?}", self.file.path());
        Ok(())
    }
}

fn lookup<S: SettingsDefinition>(
    name: &str,
) -> Result<&'static field::FieldDescriptor<S>, SettingsError> {
    S::field(name).ok_or_else(|| SettingsError::NotFound(name.to_string()))
}

fn encoded<S: SettingsDefinition>(values: &S) -> impl Iterator<Item = (&'static str, String)> + '_ {
    S::fields()
        .iter()
        .map(move |field| (field.name, (field.encode)(values)))
}
