//! Configuration files driving a session.

mod fixtures;

use fixtures::{catalog_dir, file_loader, started_session, RED_BLUE};
use outfit_wizard::config::{Config, PopulationMode};
use outfit_wizard::session::SessionOptions;
use std::fs;
use tempfile::TempDir;

const CUSTOM_CONFIG: &str = r#"
[behavior]
default_to_first_color = false
population = "batch"

[ui]
continue_label = "Continue"
finish_label = "Done"

[[layers]]
id = "shirt"
label = "T-Shirt"
control = "shirt-dropdown"
surface = "layer-shirt"
catalog = "shirt.json"
asset_template = "img/shirt_{color}.webp"

[[layers]]
id = "hat"
label = "Hat"
catalog = "hat.json"
asset_template = "img/hat-"
"#;

#[test]
fn test_load_custom_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, CUSTOM_CONFIG).unwrap();

    let config = Config::load_from(&path).unwrap();

    assert!(!config.behavior.default_to_first_color);
    assert_eq!(config.behavior.population, PopulationMode::Batch);
    assert_eq!(config.ui.finish_label, "Done");
    assert_eq!(config.ui.placeholder_label, "Select a color");
    assert_eq!(config.layers.len(), 2);
    assert_eq!(config.layers[0].control.as_deref(), Some("shirt-dropdown"));
    assert_eq!(config.layers[1].surface, None);
}

#[tokio::test]
async fn test_config_drives_session() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, CUSTOM_CONFIG).unwrap();
    let config = Config::load_from(&path).unwrap();
    let catalogs = catalog_dir(&[("shirt.json", RED_BLUE)]);

    let mut session = started_session(config.layers.clone(), SessionOptions::from_config(&config));
    session.load_catalogs(&file_loader(catalogs.path())).await;

    assert_eq!(session.state().registry().selection("shirt"), None);
    assert_eq!(session.sink().next_label, "Continue");

    session.apply_color("shirt", "blue");
    let surface = session.sink().surface("layer-shirt").unwrap();
    assert_eq!(surface.image.as_deref(), Some("img/shirt_blue.webp"));
    assert_eq!(
        session.sink().control("shirt-dropdown").unwrap().value.as_deref(),
        Some("blue")
    );
}

#[test]
fn test_duplicate_layer_ids_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[[layers]]
id = "shirt"
label = "T-Shirt"
catalog = "a.json"
asset_template = "a-"

[[layers]]
id = "shirt"
label = "Shirt again"
catalog = "b.json"
asset_template = "b-"
"#,
    )
    .unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_save_round_trip_keeps_layers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");

    let mut config = Config::new();
    config.ui.continue_label = "Onward".to_string();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.layers, config.layers);
    assert_eq!(loaded.ui.continue_label, "Onward");
}
