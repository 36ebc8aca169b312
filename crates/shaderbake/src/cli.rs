use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "shaderbake",
    author,
    version,
    about = "Bakes Slang shaders into a C++ header of DXIL byte arrays"
)]
pub struct Cli {
    /// Project root the default layout is resolved against (defaults to
    /// the working directory).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Directory scanned recursively for shader sources.
    #[arg(long, value_name = "DIR")]
    pub shaders: Option<PathBuf>,

    /// Path of the generated header.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// slangc binary used to compile each shader.
    #[arg(long, value_name = "FILE", env = "SHADERBAKE_COMPILER")]
    pub compiler: Option<PathBuf>,

    /// C++ namespace wrapping the generated arrays.
    #[arg(long, value_name = "NAME")]
    pub namespace: Option<String>,

    /// Manifest carrying the same settings as the flags above (defaults
    /// to `bake.toml` in the project root when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
