use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_listen_on_port_5000() {
    let settings = resolve_settings(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.port, 5000);
    assert_eq!(
        settings.bind_addr().expect("addr"),
        "0.0.0.0:5000".parse::<SocketAddr>().expect("socket addr")
    );
}

#[test]
fn port_env_overrides_default() {
    let settings = resolve_settings(None, env_from(&[("PORT", "8080")]));
    assert_eq!(settings.port, 8080);
}

#[test]
fn prefixed_env_wins_over_bare_env() {
    let settings = resolve_settings(
        None,
        env_from(&[("PORT", "8080"), ("APP__PORT", "9090")]),
    );
    assert_eq!(settings.port, 9090);
}

#[test]
fn invalid_port_is_ignored() {
    let settings = resolve_settings(None, env_from(&[("PORT", "not-a-port")]));
    assert_eq!(settings.port, 5000);
}

#[test]
fn settings_file_is_applied_before_env() {
    let file = r#"
        bind_host = "127.0.0.1"
        port = 7000
        dataset_path = "data/projects.json"
    "#;

    let settings = resolve_settings(Some(file), env_from(&[]));
    assert_eq!(settings.bind_host, "127.0.0.1");
    assert_eq!(settings.port, 7000);
    assert_eq!(settings.dataset_path, PathBuf::from("data/projects.json"));

    let settings = resolve_settings(
        Some(file),
        env_from(&[("PORT", "7100"), ("PROJECTS_FILE", "/srv/projects.json")]),
    );
    assert_eq!(settings.port, 7100);
    assert_eq!(settings.dataset_path, PathBuf::from("/srv/projects.json"));
}

#[test]
fn malformed_settings_file_falls_back_to_defaults() {
    let settings = resolve_settings(Some("port = \"lots\""), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn bind_addr_rejects_hostnames() {
    let settings = Settings {
        bind_host: "localhost".into(),
        ..Settings::default()
    };
    assert!(settings.bind_addr().is_err());
}
