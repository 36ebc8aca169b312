mod compile;
mod config;
mod discover;
mod emit;
mod pipeline;
mod stage;

pub use compile::{Compile, CompileError, SlangCompiler};
pub use config::{BakeManifest, ConfigError, PipelineConfig};
pub use discover::{shader_sources, ShaderSource};
pub use emit::{render_header, write_header, CompiledShader};
pub use pipeline::{bake, BakeReport};
pub use stage::{resolve_stage, ShaderStage, StageError};
