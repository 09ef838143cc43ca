//! Field settings library
//!
//! Typed application settings declared as plain structs, reachable by name
//! as strings, and persisted to `<data dir>/<name>/settings.json`.

mod macros;

pub mod constant;
pub mod defaults;
pub mod field;
pub mod settings;
pub mod store;
pub mod value;

pub use field::{FieldDescriptor, SettingInfo, SettingsDefinition};
pub use settings::{Settings, SettingsError};
pub use store::PersistenceError;
pub use value::{ConversionError, Kind, Scalar, Value};
