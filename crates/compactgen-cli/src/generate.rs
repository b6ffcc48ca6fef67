//! `compactgen generate`

use anyhow::{Context, Result, bail};
use compactgen_codegen::{GeneratorConfig, Language, generate, hints};
use compactgen_core::{CompiledSchema, load_schema};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file picked up next to the schema when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "compactgen.toml";

pub struct GenerateArgs {
    pub schema: PathBuf,
    pub language: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), &args.schema)?;

    let language = match (&args.language, config.generator.language) {
        (Some(flag), _) => flag.parse::<Language>()?,
        (None, Some(language)) => language,
        (None, None) => bail!("no target language: pass --language or set generator.language"),
    };
    let output_dir = args
        .output_dir
        .or_else(|| config.generator.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let schema = load_schema(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;
    let compiled = CompiledSchema::compile(&schema)
        .with_context(|| format!("invalid schema {}", args.schema.display()))?;

    info!(language = %language, output_dir = %output_dir.display(), "generating");
    let report = generate(&compiled, language, &config, &output_dir)
        .with_context(|| format!("failed to generate {language} code"))?;

    if !args.quiet {
        println!(
            "Generated {} {language} files in {} ({} written, {} unchanged)",
            report.total(),
            output_dir.display(),
            report.written.len(),
            report.unchanged.len()
        );
        for section in hints(&compiled, language, &config) {
            println!();
            print!("{section}");
        }
    }
    Ok(())
}

/// `--config` if given, else `compactgen.toml` beside the schema, else defaults.
fn load_config(explicit: Option<&Path>, schema: &Path) -> Result<GeneratorConfig> {
    if let Some(path) = explicit {
        return GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let beside = schema
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME);
    if beside.is_file() {
        debug!(path = %beside.display(), "using config next to schema");
        return GeneratorConfig::load(&beside)
            .with_context(|| format!("failed to load config {}", beside.display()));
    }
    Ok(GeneratorConfig::default())
}
