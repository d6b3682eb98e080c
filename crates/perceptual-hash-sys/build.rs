use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=csrc/phash_shim.cpp");
    println!("cargo:rerun-if-env-changed=PHASH_NO_PKG_CONFIG");

    // pkg-config emits the link lines for pHash and its own dependencies
    let library = pkg_config::Config::new()
        .atleast_version("0.9")
        .probe("pHash")
        .map_err(|e| format!("Failed to locate pHash via pkg-config: {}", e))?;

    let mut build = cc::Build::new();
    build
        .cpp(true)
        .file("csrc/phash_shim.cpp")
        .define("cimg_display", "0")
        .warnings(false);

    for include in &library.include_paths {
        build.include(include);
    }

    build.try_compile("phash_shim")?;

    Ok(())
}
