//! Enumerates candidate shader files under the shader root. The walk
//! is lazy and restartable; entries come out sorted by file name per
//! directory so two runs over the same tree process files in the same
//! order and the emitted header is reproducible byte for byte.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions that never hold shader source: generation tooling that
/// historically lives inside shader trees, and stale transient
/// bytecode from an interrupted run.
const EXCLUDED_EXTENSIONS: &[&str] = &["py", "tmp"];

/// One candidate shader file, identified during discovery and dropped
/// once its bytecode is collected or its compile fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    path: PathBuf,
}

impl ShaderSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Symbol the generated array is named after: the file stem with
    /// every character that is not valid in a C identifier replaced by
    /// an underscore, prefixed when the stem starts with a digit.
    pub fn symbol_name(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut name = String::with_capacity(stem.len() + 1);
        for ch in stem.chars() {
            if ch == '_' || ch.is_ascii_alphanumeric() {
                name.push(ch);
            } else {
                name.push('_');
            }
        }
        if name.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
            name.insert(0, '_');
        }
        name
    }

    /// Reads the source text, dropping invalid UTF-8 sequences instead
    /// of failing on them.
    pub fn read_text(&self) -> io::Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Recursively yields candidate shader files under `root`. Directories
/// and excluded extensions are filtered out; walk errors surface to the
/// caller.
pub fn shader_sources(root: &Path) -> impl Iterator<Item = Result<ShaderSource, walkdir::Error>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() || is_excluded(entry.path()) {
                    return None;
                }
                Some(Ok(ShaderSource::new(entry.into_path())))
            }
            Err(err) => Some(Err(err)),
        })
}

fn is_excluded(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXCLUDED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}
