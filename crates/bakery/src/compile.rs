//! Turns one shader source into DXIL bytecode through the external
//! `slangc` process. The orchestrator only sees the `Compile` trait, so
//! tests swap in an in-process stub and never touch subprocess or
//! filesystem mechanics.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::debug;

use crate::stage::ShaderStage;

/// Shader model suffix appended to the per-stage profile code.
const SHADER_MODEL: &str = "6_6";

/// Extension of the transient bytecode file the compiler writes next to
/// the source; discovery ignores `tmp` files, so a crashed run cannot
/// feed its leftovers back into the next one.
const TRANSIENT_EXTENSION: &str = "dxil.tmp";

#[derive(Debug, Error)]
pub enum CompileError {
    /// The compiler ran and reported failure. Recoverable: the
    /// orchestrator skips the file and keeps going.
    #[error("shader compiler exited with {status} for {}", .path.display())]
    Failed { path: PathBuf, status: ExitStatus },

    /// The compiler process could not be started at all.
    #[error("failed to launch shader compiler {}", .compiler.display())]
    Launch {
        compiler: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bytecode the compiler claimed to produce could not be read back
    /// or cleaned up.
    #[error("failed to collect compiled bytecode {}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    /// Only a reported compile failure leaves sibling shaders
    /// unaffected; every other variant aborts the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CompileError::Failed { .. })
    }
}

pub trait Compile {
    /// Compiles one shader source for the given stage and returns the
    /// raw bytecode.
    fn compile(&self, source: &Path, stage: ShaderStage) -> Result<Vec<u8>, CompileError>;
}

/// Invokes the `slangc` binary to lower Slang sources to DXIL.
#[derive(Debug, Clone)]
pub struct SlangCompiler {
    binary: PathBuf,
}

impl SlangCompiler {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Compile for SlangCompiler {
    fn compile(&self, source: &Path, stage: ShaderStage) -> Result<Vec<u8>, CompileError> {
        let profile = format!("{}_{SHADER_MODEL}", stage.profile_code());
        let object_path = source.with_extension(TRANSIENT_EXTENSION);

        debug!(source = %source.display(), profile, "invoking slangc");
        let status = Command::new(&self.binary)
            .arg(source)
            .args(["-entry", "main", "-target", "dxil", "-profile"])
            .arg(&profile)
            .arg("-o")
            .arg(&object_path)
            .status()
            .map_err(|err| CompileError::Launch {
                compiler: self.binary.clone(),
                source: err,
            })?;

        if !status.success() {
            // The compiler may have left a partial artifact behind.
            remove_transient(&object_path).map_err(|err| CompileError::Artifact {
                path: object_path.clone(),
                source: err,
            })?;
            return Err(CompileError::Failed {
                path: source.to_path_buf(),
                status,
            });
        }

        // Delete the transient file whether or not the read succeeded.
        let bytecode = fs::read(&object_path);
        let removed = remove_transient(&object_path);
        let bytecode = bytecode.map_err(|err| CompileError::Artifact {
            path: object_path.clone(),
            source: err,
        })?;
        removed.map_err(|err| CompileError::Artifact {
            path: object_path,
            source: err,
        })?;
        Ok(bytecode)
    }
}

/// Deletes a transient bytecode file; one that never existed is fine.
fn remove_transient(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Stands in for slangc: records the profile it was asked for by
    /// writing it into the requested output file.
    const ECHO_PROFILE: &str = "#!/bin/sh\n\
        while [ $# -gt 1 ]; do\n\
          if [ \"$1\" = \"-profile\" ]; then profile=\"$2\"; fi\n\
          if [ \"$1\" = \"-o\" ]; then out=\"$2\"; fi\n\
          shift\n\
        done\n\
        printf '%s' \"$profile\" > \"$out\"\n";

    /// Writes a partial artifact, then fails.
    const FAIL_WITH_JUNK: &str = "#!/bin/sh\n\
        while [ $# -gt 1 ]; do\n\
          if [ \"$1\" = \"-o\" ]; then out=\"$2\"; fi\n\
          shift\n\
        done\n\
        printf 'junk' > \"$out\"\n\
        exit 1\n";

    fn fake_compiler(dir: &Path, script: &str) -> PathBuf {
        let path = dir.join("slangc");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn captures_bytecode_and_removes_the_transient_file() {
        let temp = tempfile::tempdir().unwrap();
        let compiler = SlangCompiler::new(fake_compiler(temp.path(), ECHO_PROFILE));
        let source = temp.path().join("blit.slang");
        fs::write(&source, "[shader(\"pixel\")]").unwrap();

        let bytecode = compiler.compile(&source, ShaderStage::Pixel).unwrap();
        assert_eq!(bytecode, b"ps_6_6");
        assert!(!temp.path().join("blit.dxil.tmp").exists());
    }

    #[test]
    fn nonzero_exit_is_recoverable_and_leaves_nothing_behind() {
        let temp = tempfile::tempdir().unwrap();
        let compiler = SlangCompiler::new(fake_compiler(temp.path(), FAIL_WITH_JUNK));
        let source = temp.path().join("bad.slang");
        fs::write(&source, "[shader(\"pixel\")]").unwrap();

        let err = compiler.compile(&source, ShaderStage::Pixel).unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(err, CompileError::Failed { .. }));
        assert!(!temp.path().join("bad.dxil.tmp").exists());
    }

    #[test]
    fn missing_binary_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let compiler = SlangCompiler::new(temp.path().join("no-such-slangc"));
        let source = temp.path().join("x.slang");
        fs::write(&source, "[shader(\"compute\")]").unwrap();

        let err = compiler.compile(&source, ShaderStage::Compute).unwrap_err();
        assert!(!err.is_recoverable());
        assert!(matches!(err, CompileError::Launch { .. }));
    }
}
