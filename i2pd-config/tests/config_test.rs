use std::fs;
use std::path::PathBuf;

use i2pd_config::{LogTarget, RouterOptions, TunnelKind, TunnelsConfig};
use tempfile::tempdir;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_config_file_is_merged_and_overridden() {
    let dir = tempdir().unwrap();
    let conf_path = dir.path().join("i2pd.toml");
    fs::write(
        &conf_path,
        r#"
log = "file"
loglevel = "debug"
notransit = true

[http]
port = 7070
"#,
    )
    .unwrap();

    let datadir = dir.path().to_str().unwrap().to_string();
    let options = RouterOptions::from_args(
        &args(&[
            "router",
            &format!("--conf={}", conf_path.display()),
            &format!("--datadir={}", datadir),
            "--loglevel=warn",
        ]),
        "i2pd",
    )
    .unwrap();

    assert_eq!(options.log, LogTarget::File);
    assert_eq!(options.loglevel, "warn");
    assert!(options.notransit);
    assert_eq!(options.conf, Some(conf_path));
    assert_eq!(options.extra.get("http.port").map(String::as_str), Some("7070"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let err = RouterOptions::from_args(
        &args(&["router", "--datadir=/d", "--conf=/definitely/not/here.toml"]),
        "i2pd",
    )
    .unwrap_err();
    assert!(matches!(err, i2pd_config::ConfigError::IOError(_)));
}

#[test]
fn test_tunnels_file_roundtrip_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tunnels.toml");
    fs::write(
        &path,
        r#"
[mail]
type = "client"
address = "smtp.postman.i2p"
port = 7659

[site]
type = "server"
host = "127.0.0.1"
port = 80
keys = "site.dat"
"#,
    )
    .unwrap();

    let config = TunnelsConfig::from_file(&path).unwrap();
    assert_eq!(config.of_kind(TunnelKind::Client).count(), 1);
    assert_eq!(config.of_kind(TunnelKind::Server).count(), 1);
}

#[test]
fn test_missing_tunnels_file_is_empty() {
    let config = TunnelsConfig::from_file(&PathBuf::from("/definitely/not/tunnels.toml")).unwrap();
    assert!(config.tunnels.is_empty());
}
