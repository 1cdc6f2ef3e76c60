fn main() {
    // Only the desktop shell embeds tauri.conf.json; the core library has
    // nothing to generate.
    println!("cargo:rerun-if-changed=tauri.conf.json");

    #[cfg(feature = "desktop")]
    tauri_build::build();
}
