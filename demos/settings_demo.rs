//! Example demonstrating the settings system
//!
//! Run with: cargo run --example settings_demo -- [name value]

use field_settings::{Settings, define_settings, setting_enum};

setting_enum! {
    pub enum Theme {
        Light,
        Dark,
    }
}

define_settings! {
    pub struct DemoSettings {
        "Folder exported documents are written to"
        export_dir: String = "%SETTINGS_DIR%/exports".to_string(),
        "Application theme"
        theme: Theme = Theme::Light,
        "Auto-save interval in seconds (0 = disabled)"
        autosave_interval: u32 = 300,
        "Font size"
        font_size: f32 = 14.0,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut settings = Settings::<DemoSettings>::open("Field Settings Demo")?;
    println!("Settings file: {}", settings.file_path().display());
    if settings.was_created() {
        println!("(created with defaults)");
    }

    let mut args = std::env::args().skip(1);
    if let (Some(name), Some(value)) = (args.next(), args.next()) {
        match settings.set(&name, &value) {
            Ok(()) => {
                settings.save()?;
                println!("Saved {} = {}", name, value);
            }
            Err(e) => println!("Not saved: {}", e),
        }
    }

    println!("\nCurrent settings:");
    for info in settings.settings_info() {
        println!("  {:<18} {:<12} {}", info.name, info.value.to_string(), info.description);
        if !info.options.is_empty() {
            println!("  {:<18} one of: {}", "", info.options.join(", "));
        }
    }

    Ok(())
}
