//! Generates the Rust bindings for `schema/shapes.yaml` into `OUT_DIR`.
//!
//! Every generated module is wrapped in `pub mod <name> { include!(..) }`
//! inside `bindings.rs`, which `src/lib.rs` includes.

use compactgen_codegen::{GeneratorConfig, generate_rust, write_units};
use compactgen_core::{CompiledSchema, load_schema};
use std::env;
use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let schema_path = manifest_dir.join("schema").join("shapes.yaml");
    let config_path = manifest_dir.join("compactgen.toml");

    println!("cargo:rerun-if-changed=schema");
    println!("cargo:rerun-if-changed={}", config_path.display());

    let schema = load_schema(&schema_path)?;
    let compiled = CompiledSchema::compile(&schema)?;
    let config = GeneratorConfig::load(&config_path)?;

    let generated_dir = out_dir.join("generated");
    let units = generate_rust(&compiled, &config.rust)?;
    write_units(&generated_dir, &units)?;

    let mut bindings = String::new();
    for unit in &units {
        let Some(module) = unit.relative_path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let path = generated_dir.join(&unit.relative_path);
        writeln!(
            bindings,
            "pub mod {module} {{\n    include!({:?});\n}}",
            path.display().to_string()
        )?;
    }
    fs::write(out_dir.join("bindings.rs"), bindings)?;
    Ok(())
}
