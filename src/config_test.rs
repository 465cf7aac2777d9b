use super::*;

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_vars(None, None).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.assets_dir, PathBuf::from("chantiers"));
}

#[test]
fn parses_overrides() {
    let cfg = ServerConfig::from_vars(Some(" 8080 "), Some("/srv/chantiers")).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.assets_dir, PathBuf::from("/srv/chantiers"));
}

#[test]
fn rejects_bad_port() {
    let err = ServerConfig::from_vars(Some("http"), None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { .. }));
    assert!(err.to_string().contains("'http'"));
}

#[test]
fn rejects_out_of_range_port() {
    assert!(ServerConfig::from_vars(Some("70000"), None).is_err());
}

#[test]
fn rejects_blank_assets_dir() {
    let err = ServerConfig::from_vars(None, Some("  ")).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAssetsDir));
}

#[test]
fn bind_addr_listens_on_all_interfaces() {
    let cfg = ServerConfig::from_vars(Some("4000"), None).unwrap();
    assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:4000");
}
