use field_settings::{Scalar, Settings, SettingsError, Value, define_settings, setting_enum};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use uuid::Uuid;

setting_enum! {
    pub enum Theme {
        Light,
        Dark,
        System,
    }
}

define_settings! {
    pub struct AppSettings {
        "Folder screenshots are written to"
        screenshot_dir: String = "%SETTINGS_DIR%/screenshots".to_string(),
        "Check for updates on startup"
        check_updates: bool = true,
        "Number of recent files to remember"
        recent_limit: i32 = 10,
        "Interface scale factor"
        ui_scale: f64 = 1.25,
        "Anonymous installation id"
        install_id: Uuid = Uuid::nil(),
        "Colour theme"
        theme: Theme = Theme::System,
    }
}

const NAME: &str = "Test App";

fn open(root: &Path) -> Settings<AppSettings> {
    Settings::open_in(root, NAME).unwrap()
}

fn persisted(root: &Path) -> serde_json::Map<String, serde_json::Value> {
    let text = fs::read_to_string(root.join(NAME).join("settings.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_codec_round_trip_for_every_kind() {
    fn check<T: Scalar + PartialEq + std::fmt::Debug>(values: &[T]) {
        for value in values {
            assert_eq!(&T::decode(&value.encode()).unwrap(), value);
        }
    }

    check(&["".to_string(), "C:\\Users\\me".to_string(), "with \"quotes\"\n".to_string()]);
    check(&[true, false]);
    check(&[i32::MIN, -1, 0, i32::MAX]);
    check(&[i64::MIN, i64::MAX]);
    check(&[0.0, 1.25, -2.5e-10, f64::MAX, f64::NEG_INFINITY]);
    check(&[Uuid::nil(), Uuid::new_v4()]);
    check(&[Theme::Light, Theme::Dark, Theme::System]);
}

#[test]
fn test_instances_do_not_share_state() {
    let root = tempdir().unwrap();
    let mut first = open(root.path());
    let second = open(root.path());

    first.set("recent_limit", "3").unwrap();
    first.set("theme", "Dark").unwrap();

    assert_eq!(second.values().recent_limit, 10);
    assert_eq!(second.values().theme, Theme::System);
    assert_eq!(first.defaults().recent_limit, 10);
    assert_eq!(first.default_value("theme").unwrap(), Value::Enum("System"));
}

#[test]
fn test_reset_matches_fresh_instance() {
    let root = tempdir().unwrap();
    let fresh = open(root.path());
    let mut settings = open(root.path());

    let edits = [
        ("screenshot_dir", "/tmp/elsewhere"),
        ("check_updates", "false"),
        ("recent_limit", "-4"),
        ("ui_scale", "3.5"),
        ("install_id", "67e55044-10b1-426f-9247-bb680e5fe0c8"),
        ("theme", "Light"),
    ];
    for (name, value) in edits {
        settings.set(name, value).unwrap();
        settings.reset(name).unwrap();
        assert_eq!(settings.get(name).unwrap(), fresh.get(name).unwrap(), "{}", name);
    }
}

#[test]
fn test_unknown_name_is_rejected_without_mutation() {
    let root = tempdir().unwrap();
    let mut settings = open(root.path());
    let before: Vec<_> = settings.settings_info().collect();

    assert!(matches!(settings.get("NoSuchField"), Err(SettingsError::NotFound(_))));
    assert!(matches!(settings.set("NoSuchField", "1"), Err(SettingsError::NotFound(_))));
    assert!(matches!(settings.reset("NoSuchField"), Err(SettingsError::NotFound(_))));

    let after: Vec<_> = settings.settings_info().collect();
    assert_eq!(before, after);
}

#[test]
fn test_partially_corrupt_file_keeps_valid_entries() {
    let root = tempdir().unwrap();
    let dir = root.path().join(NAME);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("settings.json"),
        r#"{
            "recent_limit": "25",
            "check_updates": "notabool",
            "ui_scale": "12,5",
            "theme": "Dark",
            "removed_in_newer_build": "x"
        }"#,
    )
    .unwrap();

    let settings = open(root.path());
    assert!(!settings.was_created());
    assert_eq!(settings.values().recent_limit, 25);
    assert_eq!(settings.values().theme, Theme::Dark);
    assert!(settings.values().check_updates);
    assert_eq!(settings.values().ui_scale, 1.25);

    // save re-derives keys from declared fields
    settings.save().unwrap();
    let saved = persisted(root.path());
    assert!(!saved.contains_key("removed_in_newer_build"));
    assert_eq!(saved.len(), 6);
    assert_eq!(saved["check_updates"], "true");
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let root = tempdir().unwrap();
    let dir = root.path().join(NAME);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("settings.json"), "recent_limit = 25").unwrap();

    let settings = open(root.path());
    assert_eq!(settings.values().recent_limit, 10);
}

#[test]
fn test_first_run_creates_file_with_defaults() {
    let root = tempdir().unwrap();
    let created = open(root.path());
    assert!(created.was_created());

    let saved = persisted(root.path());
    let keys: Vec<_> = saved.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["screenshot_dir", "check_updates", "recent_limit", "ui_scale", "install_id", "theme"]
    );

    let reloaded = open(root.path());
    assert!(!reloaded.was_created());
    for info in created.settings_info() {
        assert_eq!(reloaded.get(info.name).unwrap(), info.value, "{}", info.name);
        assert_eq!(reloaded.default_value(info.name).unwrap(), info.value);
    }
}

#[test]
fn test_placeholder_expanded_before_snapshot() {
    let root = tempdir().unwrap();
    let settings = open(root.path());

    let expected = format!("{}/screenshots", root.path().join(NAME).display());
    assert_eq!(settings.values().screenshot_dir, expected);
    assert!(!settings.values().screenshot_dir.contains("%SETTINGS_DIR%"));
    assert_eq!(
        settings.default_value("screenshot_dir").unwrap(),
        Value::Text(expected.clone())
    );
    assert_eq!(persisted(root.path())["screenshot_dir"], expected.as_str());
}

#[test]
fn test_placeholder_not_resolved_in_loaded_values() {
    let root = tempdir().unwrap();
    let mut settings = open(root.path());
    settings.set("screenshot_dir", "%SETTINGS_DIR%/raw").unwrap();
    settings.save().unwrap();

    let reopened = open(root.path());
    assert_eq!(reopened.values().screenshot_dir, "%SETTINGS_DIR%/raw");
}

#[test]
fn test_saved_values_survive_reopen() {
    let root = tempdir().unwrap();
    let id = Uuid::new_v4();
    let mut settings = open(root.path());
    settings.set("install_id", &id.to_string()).unwrap();
    settings.set("ui_scale", "0.1").unwrap();
    settings.values_mut().check_updates = false;
    settings.save().unwrap();

    let reopened = open(root.path());
    assert_eq!(reopened.values().install_id, id);
    assert_eq!(reopened.values().ui_scale, 0.1);
    assert!(!reopened.values().check_updates);
}

define_settings! {
    pub struct ViewSettings {
        "Zoom factor"
        scale: f32 = 0.3,
    }
}

#[test]
fn test_single_precision_displays_as_stored() {
    let root = tempdir().unwrap();
    let mut settings: Settings<ViewSettings> = Settings::open_in(root.path(), "View").unwrap();
    settings.set("scale", "1.1").unwrap();

    let stored = settings.get_string("scale").unwrap();
    assert_eq!(stored, "1.1");
    assert_eq!(settings.get("scale").unwrap().to_string(), stored);
    let shown = settings.settings_info().next().unwrap().value.to_string();
    assert_eq!(shown, stored);
    assert_eq!(settings.default_value("scale").unwrap().to_string(), "0.3");
}
