//! Drives the whole bake: discovery, stage resolution, compilation,
//! and emission of the generated header.
//!
//! Error handling is deliberately asymmetric. A missing or unrecognized
//! stage annotation aborts the run before anything is written, because
//! it means a source file is broken and the generated header would be
//! silently incomplete. A failed compile only drops that one file: the
//! remaining shaders still compile and the header is still emitted.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::compile::Compile;
use crate::config::PipelineConfig;
use crate::discover::shader_sources;
use crate::emit::{render_header, write_header, CompiledShader};
use crate::stage::resolve_stage;

/// Outcome of a completed run: which shaders made it into the header
/// and which were skipped after a failed compile.
#[derive(Debug)]
pub struct BakeReport {
    pub baked: Vec<String>,
    pub skipped: Vec<PathBuf>,
    pub output: PathBuf,
}

pub fn bake(config: &PipelineConfig, compiler: &dyn Compile) -> Result<BakeReport> {
    let mut shaders: Vec<CompiledShader> = Vec::new();
    let mut skipped = Vec::new();

    for source in shader_sources(&config.shader_root) {
        let source = source.with_context(|| {
            format!("failed to scan shader root {}", config.shader_root.display())
        })?;
        let text = source
            .read_text()
            .with_context(|| format!("failed to read shader source {}", source.path().display()))?;
        let stage = resolve_stage(&text, source.path())?;

        info!(shader = %source.path().display(), stage = stage.profile_code(), "compiling shader");
        match compiler.compile(source.path(), stage) {
            Ok(bytecode) => shaders.push(CompiledShader {
                name: source.symbol_name(),
                bytecode,
            }),
            Err(err) if err.is_recoverable() => {
                warn!(shader = %source.path().display(), %err, "shader compile failed, skipping");
                skipped.push(source.path().to_path_buf());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to compile {}", source.path().display()));
            }
        }
    }

    let baked = shaders.iter().map(|shader| shader.name.clone()).collect();
    let contents = render_header(&config.namespace, &shaders);
    write_header(&config.output_path, &contents)
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;

    Ok(BakeReport {
        baked,
        skipped,
        output: config.output_path.clone(),
    })
}
