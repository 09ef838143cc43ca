/// Token replaced by the absolute settings directory inside text defaults
pub const SETTINGS_DIR_PLACEHOLDER: &str = "%SETTINGS_DIR%";

/// Settings file name and metadata constants
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const TEMP_FILE_SUFFIX: &str = "tmp";
