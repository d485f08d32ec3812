use process_sizing_toolbox::config::{self, Config};
use process_sizing_toolbox::flow::FlowMode;
use process_sizing_toolbox::units::TimeUnit;
use std::fs;
use std::path::PathBuf;

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pst_config_{}_{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join("config.toml")
}

#[test]
fn missing_file_is_created_with_defaults() {
    let path = scratch_path("missing");
    let _ = fs::remove_file(&path);
    let cfg = config::load_from(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.language, "auto");
    assert_eq!(cfg.flow.dry_feed_kg_per_h, 500.0);
    assert_eq!(cfg.nozzle.num_holes, 100);
}

#[test]
fn saved_settings_are_reloaded() {
    let path = scratch_path("saved");
    let mut cfg = Config::default();
    cfg.language = "en".into();
    cfg.flow_mode = Some(FlowMode::DensityVolume);
    cfg.display_units.retention_time = TimeUnit::Minute;
    cfg.nozzle.channel_length_mm = Some(7.5);
    cfg.save_to(&path).expect("save");

    let back = config::load_from(&path).expect("reload");
    assert_eq!(back.language, "en");
    assert_eq!(back.effective_flow_mode(), FlowMode::DensityVolume);
    assert_eq!(back.display_units.retention_time, TimeUnit::Minute);
    assert_eq!(back.nozzle.channel_length_mm, Some(7.5));
}

#[test]
fn malformed_file_is_an_error() {
    let path = scratch_path("broken");
    fs::write(&path, "language = [").unwrap();
    assert!(matches!(
        config::load_from(&path),
        Err(config::ConfigError::Parse(_))
    ));
}
