//! Field descriptor discovery
//!
//! A settings definition publishes a static table of [`FieldDescriptor`]s,
//! one per declared field, so the facade can reach typed fields by name
//! without runtime reflection. The table is normally generated by
//! [`define_settings!`](crate::define_settings).

use crate::value::{ConversionError, Kind, Value};
use serde::Serialize;

/// Name, metadata and type-erased accessors for one declared field
pub struct FieldDescriptor<S> {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: Kind,
    pub options: fn() -> &'static [&'static str],
    pub read: fn(&S) -> Value,
    pub encode: fn(&S) -> String,
    /// Leaves the field untouched when the string does not decode
    pub decode: fn(&mut S, &str) -> Result<(), ConversionError>,
    pub expand: fn(&mut S, &str, &str),
    /// Copies the field from the second argument into the first
    pub restore: fn(&mut S, &S),
}

/// A structure whose field set is fixed at compile time.
pub trait SettingsDefinition: Default + Clone + 'static {
    /// Declared fields, in a stable order
    fn fields() -> &'static [FieldDescriptor<Self>];

    fn field(name: &str) -> Option<&'static FieldDescriptor<Self>> {
        Self::fields().iter().find(|field| field.name == name)
    }
}

/// One row of the settings listing shown to users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: Kind,
    pub options: &'static [&'static str],
    pub value: Value,
}

impl<S> FieldDescriptor<S> {
    pub fn info(&self, values: &S) -> SettingInfo {
        SettingInfo {
            name: self.name,
            description: self.description,
            kind: self.kind,
            options: (self.options)(),
            value: (self.read)(values),
        }
    }
}

/// Lists every declared field of `values` with its current value
pub fn describe<S: SettingsDefinition>(values: &S) -> impl Iterator<Item = SettingInfo> + '_ {
    S::fields().iter().map(move |field| field.info(values))
}

/// Whether every declared name is distinct
pub(crate) fn names_are_unique<S: SettingsDefinition>() -> bool {
    let fields = S::fields();
    fields
        .iter()
        .enumerate()
        .all(|(i, field)| fields[..i].iter().all(|earlier| earlier.name != field.name))
}
