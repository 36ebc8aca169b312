//! Pipeline settings, constructed once at startup and handed to every
//! component instead of living in ambient module state. The fixed
//! project layout (shaders under `shaders/`, the generated header one
//! level above in `inc/`, the compiler under `extern/`) is anchored at
//! a project root, and an optional `bake.toml` manifest can override
//! any of it before the CLI applies its own flags.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_SHADER_ROOT: &str = "shaders";
const DEFAULT_OUTPUT: &str = "inc/shader_data.hpp";
const DEFAULT_COMPILER: &str = "extern/slang/bin/slangc";
const DEFAULT_NAMESPACE: &str = "Shaders";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub shader_root: PathBuf,
    pub output_path: PathBuf,
    pub compiler_path: PathBuf,
    pub namespace: String,
}

impl PipelineConfig {
    /// Fixed layout resolved against a project root.
    pub fn anchored_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            shader_root: root.join(DEFAULT_SHADER_ROOT),
            output_path: root.join(DEFAULT_OUTPUT),
            compiler_path: root.join(DEFAULT_COMPILER),
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Layers manifest overrides on top of the fixed layout. Relative
    /// manifest paths stay relative to the project root.
    pub fn apply_manifest(&mut self, root: &Path, manifest: &BakeManifest) {
        if let Some(shaders) = &manifest.shaders {
            self.shader_root = root.join(shaders);
        }
        if let Some(output) = &manifest.output {
            self.output_path = root.join(output);
        }
        if let Some(compiler) = &manifest.compiler {
            self.compiler_path = root.join(compiler);
        }
        if let Some(namespace) = &manifest.namespace {
            self.namespace = namespace.clone();
        }
    }
}

/// Optional `bake.toml` manifest mirroring the CLI flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BakeManifest {
    #[serde(default)]
    pub shaders: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub compiler: Option<PathBuf>,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl BakeManifest {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            source: err,
        })?;
        toml::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            source: err,
        })
    }
}
