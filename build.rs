//! Build script for the Morse beacon firmware
//!
//! Passes the defmt linker script when building for the target.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host test builds link against std and need no target scripts
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_some() {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
