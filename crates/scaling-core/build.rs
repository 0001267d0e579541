// File: crates/scaling-core/build.rs
// Summary: Build script to link Windows system libraries required by Skia/ICU.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW, RegQueryInfoKeyW
        println!("cargo:rustc-link-lib=advapi32");
    }
}
