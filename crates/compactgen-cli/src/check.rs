//! `compactgen check`

use anyhow::{Context, Result};
use compactgen_core::{CompiledSchema, load_schema};
use std::path::Path;

pub fn run(schema_path: &Path) -> Result<()> {
    println!("Checking schema: {}", schema_path.display());

    let schema = load_schema(schema_path)
        .with_context(|| format!("failed to load schema {}", schema_path.display()))?;
    let compiled = CompiledSchema::compile(&schema)
        .with_context(|| format!("invalid schema {}", schema_path.display()))?;

    let externals: Vec<String> = compiled
        .resolved()
        .externals()
        .map(|id| compiled.get(id).qualified_name())
        .collect();

    println!("✓ Types: {}", compiled.identities().len());
    println!("✓ External types: {}", externals.len());
    for name in &externals {
        println!("    {name}");
    }

    println!("\nEmission order:");
    for (index, (def, fingerprint)) in compiled.emitted().enumerate() {
        println!("  {:>3}. {}  {fingerprint}", index + 1, def.qualified_name());
    }

    println!("\nSchema is valid!");
    Ok(())
}
