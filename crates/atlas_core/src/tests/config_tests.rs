use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn temp_dir(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("civic_atlas_{label}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

#[test]
fn defaults_when_no_file_and_no_env() {
    let settings = load_settings_from(&[], env_from(&[])).expect("settings");
    assert_eq!(settings, AtlasSettings::default());
    assert_eq!(settings.initial_center, LatLng::new(32.78, -79.94));

    let viewport = settings.viewport_controller();
    assert_eq!(viewport.fit_padding, 0.2);
    assert_eq!(viewport.fly_to_zoom, 15.0);
    assert_eq!(viewport.fly_to_duration, Duration::from_millis(600));
}

#[test]
fn file_values_override_defaults() {
    let dir = temp_dir("settings_file");
    let path = dir.join(SETTINGS_FILE_NAME);
    fs::write(
        &path,
        "dataset_path = \"data/projects.json\"\nfit_padding = 0.1\ninitial_center = { lat = 33.0, lng = -80.0 }\n",
    )
    .expect("write");

    let settings =
        load_settings_from(&[dir.join("missing.toml"), path], env_from(&[])).expect("settings");
    assert_eq!(settings.dataset_path, Some(PathBuf::from("data/projects.json")));
    assert_eq!(settings.fit_padding, 0.1);
    assert_eq!(settings.initial_center, LatLng::new(33.0, -80.0));
    assert_eq!(settings.fly_to_zoom, 15.0);

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn env_overrides_file_and_ignores_garbage_numbers() {
    let settings = load_settings_from(
        &[],
        env_from(&[
            ("APP__DATASET_PATH", " /srv/atlas/projects.toml "),
            ("APP__FLY_TO_ZOOM", "17"),
            ("APP__FIT_PADDING", "wide"),
        ]),
    )
    .expect("settings");
    assert_eq!(
        settings.dataset_path,
        Some(PathBuf::from("/srv/atlas/projects.toml"))
    );
    assert_eq!(settings.fly_to_zoom, 17.0);
    assert_eq!(settings.fit_padding, 0.2);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = temp_dir("settings_bad");
    let path = dir.join(SETTINGS_FILE_NAME);
    fs::write(&path, "fit_padding = \"lots\"").expect("write");

    let err = load_settings_from(&[path], env_from(&[])).expect_err("malformed");
    assert!(matches!(err, SettingsError::Parse { .. }));

    fs::remove_dir_all(dir).expect("cleanup");
}

#[test]
fn fly_to_zoom_is_capped_at_max_zoom() {
    let settings = AtlasSettings {
        fly_to_zoom: 22.0,
        ..AtlasSettings::default()
    };
    assert_eq!(settings.viewport_controller().fly_to_zoom, 19.0);
}
