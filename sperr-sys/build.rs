use std::path::{Path, PathBuf};

fn main() {
    generate_bindings();

    let sperr_dir = sperr_source_dir();
    let sperr_install_dir = build_c_lib(&sperr_dir);

    // The shim references SPERR, so it has to come first on the link line.
    build_c_lib_shim(&sperr_dir, &sperr_install_dir);
    println!("cargo::rustc-link-lib=static=SPERR");
    if let Some(cxx_stdlib) = cxx_stdlib() {
        println!("cargo::rustc-link-lib=dylib={cxx_stdlib}");
    }
}

fn cxx_stdlib() -> Option<&'static str> {
    let target = std::env::var("TARGET").unwrap();
    if target.contains("msvc") {
        None
    } else if target.contains("apple") || target.contains("freebsd") {
        Some("c++")
    } else {
        Some("stdc++")
    }
}

fn manifest_dir() -> PathBuf {
    PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap())
}

fn generate_bindings() {
    let c_dir = manifest_dir().join("c");
    println!("cargo::rerun-if-changed={}", c_dir.display());

    let builder = bindgen::Builder::default()
        .use_core()
        .header("c/sperr_rs.h")
        .allowlist_file(".*sperr_rs.h")
        .allowlist_recursively(false)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()));
    let bindings = builder.generate().expect("Failed to generate bindings");

    let out_path = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    bindings
        .write_to_file(out_path.join("bindings.rs"))
        .expect("Couldn't write bindings!");
}

fn sperr_source_dir() -> PathBuf {
    println!("cargo::rerun-if-env-changed=SPERR_SOURCE_DIR");
    let dir = match std::env::var_os("SPERR_SOURCE_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => manifest_dir().join("third-party").join("SPERR"),
    };
    assert!(
        dir.join("CMakeLists.txt").is_file(),
        "SPERR sources not found at {}, run `git submodule update --init` or set SPERR_SOURCE_DIR",
        dir.display()
    );
    println!("cargo::rerun-if-changed={}", dir.display());
    dir
}

fn build_c_lib(sperr_dir: &Path) -> PathBuf {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap());

    let mut build = cmake::Config::new(sperr_dir);
    let bool2opt = |b: bool| if b { "ON" } else { "OFF" };
    build
        .define("BUILD_SHARED_LIBS", "OFF")
        .define("BUILD_UNIT_TESTS", "OFF")
        .define("BUILD_CLI_UTILITIES", "OFF")
        .define("USE_OMP", bool2opt(cfg!(feature = "openmp")))
        .out_dir(out_dir.join("sperr-build"));
    let install_dir = build.build();

    for lib_dir in ["lib", "lib64"] {
        println!(
            "cargo::rustc-link-search=native={}",
            install_dir.join(lib_dir).to_str().unwrap()
        );
    }
    install_dir
}

fn build_c_lib_shim(sperr_dir: &Path, sperr_install_dir: &Path) {
    let sources_dir = manifest_dir().join("c");

    cc::Build::new()
        .cpp(true)
        .std("c++17")
        .file(sources_dir.join("sperr_rs.cpp"))
        .include(&sources_dir)
        .include(sperr_install_dir.join("include"))
        .include(sperr_dir.join("include"))
        .warnings(false)
        .cpp_link_stdlib(None)
        .compile(&format!("sperr_rs_c_shim_{}", env!("CARGO_PKG_VERSION")));
}
