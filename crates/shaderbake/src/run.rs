use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bakery::{bake, BakeManifest, PipelineConfig, SlangCompiler};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => env::current_dir().context("failed to resolve working directory")?,
    };

    let mut config = PipelineConfig::anchored_at(&root);
    if let Some(manifest) = load_manifest(&root, cli.config.as_deref())? {
        config.apply_manifest(&root, &manifest);
    }
    if let Some(shaders) = cli.shaders {
        config.shader_root = root.join(shaders);
    }
    if let Some(output) = cli.output {
        config.output_path = root.join(output);
    }
    if let Some(compiler) = cli.compiler {
        config.compiler_path = root.join(compiler);
    }
    if let Some(namespace) = cli.namespace {
        config.namespace = namespace;
    }
    tracing::debug!(
        shaders = %config.shader_root.display(),
        output = %config.output_path.display(),
        compiler = %config.compiler_path.display(),
        namespace = %config.namespace,
        "resolved bake configuration"
    );

    let compiler = SlangCompiler::new(config.compiler_path.clone());
    let report = bake(&config, &compiler)?;

    println!("Written: {}", report.output.display());
    println!(
        "{} shader(s) baked, {} skipped",
        report.baked.len(),
        report.skipped.len()
    );
    Ok(())
}

fn load_manifest(root: &Path, explicit: Option<&Path>) -> Result<Option<BakeManifest>> {
    let path: PathBuf = match explicit {
        Some(path) => root.join(path),
        None => {
            let default = root.join("bake.toml");
            if !default.exists() {
                return Ok(None);
            }
            default
        }
    };
    let manifest = BakeManifest::load(&path)?;
    Ok(Some(manifest))
}
