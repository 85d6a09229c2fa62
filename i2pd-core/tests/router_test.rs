use std::fs;
use std::path::Path;

use i2pd_core::{
    CryptoKeyType, HostRouter, Identity, PrivateKeys, RouterApi, RouterError, SigningKeyType,
    TunnelKind,
};
use tempfile::tempdir;

fn write_keys(path: &Path, signing_type: SigningKeyType, crypto_type: CryptoKeyType) -> String {
    let identity = Identity::new(
        signing_type,
        crypto_type,
        &vec![0xaa; crypto_type.public_key_len()],
        &vec![0xbb; signing_type.public_key_len()],
    )
    .unwrap();
    let keys = PrivateKeys::new(
        identity,
        vec![0xcc; crypto_type.private_key_len()],
        vec![0xdd; signing_type.private_key_len()],
    )
    .unwrap();
    fs::write(path, keys.to_bytes()).unwrap();
    keys.ident_hash().to_base32()
}

fn init_router(datadir: &Path) -> HostRouter {
    let mut router = HostRouter::new();
    router
        .init(
            &[
                "router".to_string(),
                "--log=none".to_string(),
                format!("--datadir={}", datadir.display()),
            ],
            "i2pd",
        )
        .unwrap();
    router
}

#[test]
fn test_tunnels_are_enumerated_with_idents() {
    let dir = tempdir().unwrap();
    let site_ident = write_keys(
        &dir.path().join("site.dat"),
        SigningKeyType::EddsaSha512Ed25519,
        CryptoKeyType::EciesX25519Aead,
    );
    fs::write(
        dir.path().join("tunnels.toml"),
        r#"
[irc]
type = "client"
address = "irc.ilita.i2p"
port = 6668

[site]
type = "http"
host = "127.0.0.1"
port = 8080
keys = "site.dat"

[broken]
type = "server"
host = "127.0.0.1"
port = 22
keys = "missing.dat"
"#,
    )
    .unwrap();

    let router = init_router(dir.path());

    assert_eq!(router.tunnels_count(TunnelKind::Client), 1);
    assert_eq!(router.tunnels_count(TunnelKind::Server), 2);
    assert_eq!(router.tunnel_name(TunnelKind::Client, 0).as_deref(), Some("irc"));
    // client tunnel without keys has no ident
    assert_eq!(router.tunnel_ident(TunnelKind::Client, 0), None);

    assert_eq!(router.tunnel_name(TunnelKind::Server, 0).as_deref(), Some("broken"));
    assert_eq!(router.tunnel_ident(TunnelKind::Server, 0), None);
    assert_eq!(router.tunnel_name(TunnelKind::Server, 1).as_deref(), Some("site"));
    assert_eq!(router.tunnel_ident(TunnelKind::Server, 1), Some(site_ident));

    assert_eq!(router.tunnel_name(TunnelKind::Server, 2), None);
}

#[test]
fn test_no_server_tunnels_on_fresh_router() {
    let dir = tempdir().unwrap();
    let router = init_router(dir.path());
    assert_eq!(router.tunnels_count(TunnelKind::Server), 0);
    assert_eq!(router.tunnel_name(TunnelKind::Server, 0), None);
    assert_eq!(router.tunnel_ident(TunnelKind::Server, 0), None);
}

#[test]
fn test_load_private_keys_relative_to_datadir() {
    let dir = tempdir().unwrap();
    let expected = write_keys(
        &dir.path().join("dest.dat"),
        SigningKeyType::EcdsaSha256P256,
        CryptoKeyType::ElGamal,
    );
    let router = init_router(dir.path());

    let ident = router
        .load_private_keys_from_file(
            Path::new("dest.dat"),
            SigningKeyType::EcdsaSha256P256,
            CryptoKeyType::ElGamal,
        )
        .unwrap();
    assert_eq!(ident, expected);
}

#[test]
fn test_load_private_keys_type_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dest.dat");
    write_keys(&path, SigningKeyType::EcdsaSha256P256, CryptoKeyType::ElGamal);
    let router = HostRouter::new();

    let err = router
        .load_private_keys_from_file(
            &path,
            SigningKeyType::EddsaSha512Ed25519,
            CryptoKeyType::ElGamal,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RouterError::Key(i2pd_core::KeyError::SigningTypeMismatch { .. })
    ));

    let err = router
        .load_private_keys_from_file(
            &path,
            SigningKeyType::EcdsaSha256P256,
            CryptoKeyType::EciesX25519Aead,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RouterError::Key(i2pd_core::KeyError::CryptoTypeMismatch { .. })
    ));
}

#[test]
fn test_load_private_keys_missing_and_malformed() {
    let dir = tempdir().unwrap();
    let router = HostRouter::new();

    let missing = dir.path().join("nope.dat");
    assert!(matches!(
        router.load_private_keys_from_file(
            &missing,
            SigningKeyType::EddsaSha512Ed25519,
            CryptoKeyType::ElGamal,
        ),
        Err(RouterError::Key(i2pd_core::KeyError::Io(_)))
    ));

    let garbage = dir.path().join("garbage.dat");
    fs::write(&garbage, b"not a key file").unwrap();
    assert!(matches!(
        router.load_private_keys_from_file(
            &garbage,
            SigningKeyType::EddsaSha512Ed25519,
            CryptoKeyType::ElGamal,
        ),
        Err(RouterError::Key(i2pd_core::KeyError::Truncated { .. }))
    ));
}
