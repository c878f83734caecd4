// File: crates/trendline-core/build.rs
// Summary: Build script to link required Windows system libraries when the Skia raster backend is enabled.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    let png = std::env::var_os("CARGO_FEATURE_PNG").is_some();
    let windows = std::env::var("CARGO_CFG_TARGET_OS").map(|os| os == "windows").unwrap_or(false);
    if png && windows {
        // Needed for RegOpenKeyExW, RegQueryInfoKeyW, etc.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
