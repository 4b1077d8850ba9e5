// Project layout checks

#[test]
fn test_cargo_dependencies_present() {
    let manifest = std::fs::read_to_string("Cargo.toml").expect("Cargo.toml should exist");

    // Match dependency names at the start of a line to avoid substring hits
    let required_deps = [
        "thiserror",
        "serde ", // with a space, to tell it apart from "serde_yml"
        "serde_yml",
        "turbojpeg",
        "jni",
        "tracing ",
        "tracing-subscriber",
        "paranoid-android",
    ];

    for dep in required_deps {
        let dep_trimmed = dep.trim();
        let found = manifest.lines().any(|line| {
            let trimmed = line.trim();
            trimmed.starts_with(dep_trimmed)
                && trimmed[dep_trimmed.len()..].starts_with([' ', '=', '.'])
        });
        assert!(
            found,
            "Cargo.toml should contain dependency: {}",
            dep_trimmed
        );
    }
}

#[test]
fn test_all_modules_exist() {
    let module_paths = [
        "src/lib.rs",
        "src/error.rs",
        "src/logging.rs",
        "src/pixels.rs",
        "src/bridge.rs",
        "src/config/mod.rs",
        "src/config/settings.rs",
        "src/codec/mod.rs",
        "src/codec/jpeg.rs",
        "src/codec/search.rs",
        "src/ffi/mod.rs",
        "src/ffi/turbojpeg_sys.rs",
        "src/ffi/turbojpeg.rs",
    ];

    for path in module_paths {
        assert!(
            std::path::Path::new(path).exists(),
            "Module file should exist: {}",
            path
        );
    }
}
