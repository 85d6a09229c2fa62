extern crate cbindgen;

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    let package_name = env::var("CARGO_PKG_NAME").unwrap().replace('-', "_");
    let output_file = PathBuf::from(&crate_dir).join(format!("{}.h", package_name)); // i2pd_capi.h

    let config_file = PathBuf::from(&crate_dir).join("cbindgen.toml");
    let config = if config_file.exists() {
        cbindgen::Config::from_file(config_file).expect("Failed to load cbindgen.toml")
    } else {
        cbindgen::Config {
            language: cbindgen::Language::C,
            ..Default::default()
        }
    };

    cbindgen::generate_with_config(&crate_dir, config)
        .expect("Unable to generate C bindings")
        .write_to_file(&output_file);

    println!("cargo:rerun-if-changed=cbindgen.toml");
    // Regenerate the header if it is deleted or edited by hand
    println!("cargo:rerun-if-changed={}", output_file.display());
}
