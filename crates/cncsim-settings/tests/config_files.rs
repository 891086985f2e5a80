//! Config files on disk

use cncsim_core::{AxisConfig, AxisType, Material, ToolType};
use cncsim_settings::{Config, SettingsError};

fn customized() -> Config {
    let mut config = Config::new();
    config.machine.axes.push(AxisConfig::new("B", AxisType::Rotary, -90.0, 90.0));
    config.tool.tool_type = ToolType::BallEndmill;
    config.tool.length = 75.0;
    config.workpiece.material = Material::Wood;
    config.simulation.speed = 180;
    config.simulation.tracepose = true;
    config
}

#[test]
fn test_toml_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[simulation]"));
    assert!(text.contains("tracepose = true"));
}

#[test]
fn test_json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "simulation": { "speed": 0 } }"#).unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Config(_))
    ));
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "machine = [").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}
