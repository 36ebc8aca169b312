//! Extracts the pipeline stage a shader targets from its source text.
//! The stage is declared in-source with an attribute of the form
//! `[shader("vertex")]`; the captured name is folded to lowercase and
//! mapped through a closed set of recognized stages. A missing or
//! unrecognized declaration is fatal for the whole run, unlike a failed
//! compile which only skips the one file.
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("no [shader(\"...\")] attribute found in {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported shader stage '{stage}' in {}", .path.display())]
    Unsupported { stage: String, path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Compute,
    Vertex,
    Pixel,
    Geometry,
    Hull,
    Domain,
}

impl ShaderStage {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "compute" => Some(Self::Compute),
            "vertex" => Some(Self::Vertex),
            "pixel" => Some(Self::Pixel),
            "geometry" => Some(Self::Geometry),
            "hull" => Some(Self::Hull),
            "domain" => Some(Self::Domain),
            _ => None,
        }
    }

    /// Short code the compiler profile string is built from.
    pub fn profile_code(self) -> &'static str {
        match self {
            Self::Compute => "cs",
            Self::Vertex => "vs",
            Self::Pixel => "ps",
            Self::Geometry => "gs",
            Self::Hull => "hs",
            Self::Domain => "ds",
        }
    }
}

/// Resolves the stage declared anywhere in `text`, reporting `path` in
/// either failure.
pub fn resolve_stage(text: &str, path: &Path) -> Result<ShaderStage, StageError> {
    let name = find_stage_name(text).ok_or_else(|| StageError::NotFound {
        path: path.to_path_buf(),
    })?;
    let lowered = name.to_ascii_lowercase();
    ShaderStage::from_name(&lowered).ok_or_else(|| StageError::Unsupported {
        stage: lowered,
        path: path.to_path_buf(),
    })
}

/// Scans for the first well-formed `[shader("<name>")]` attribute and
/// returns the quoted name. Whitespace is allowed around the argument
/// but not between the closing parenthesis and bracket.
fn find_stage_name(text: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(found) = text[from..].find("[shader") {
        let start = from + found;
        if let Some(name) = match_attribute(&text[start + "[shader".len()..]) {
            return Some(name);
        }
        from = start + 1;
    }
    None
}

fn match_attribute(rest: &str) -> Option<&str> {
    let rest = rest.trim_start().strip_prefix('(')?;
    let rest = rest.trim_start().strip_prefix('"')?;
    let end = rest.find('"')?;
    let name = &rest[..end];
    if name.is_empty() || !name.chars().all(is_word_char) {
        return None;
    }
    let rest = rest[end + 1..].trim_start().strip_prefix(')')?;
    rest.strip_prefix(']')?;
    Some(name)
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}
