//! Renders the generated header and replaces the previous one on disk.
//! The output embeds every collected shader as a sized constant byte
//! array inside one namespace; downstream build steps include it
//! verbatim, so the layout here is a contract, not a style choice.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One shader's contribution to the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    pub name: String,
    pub bytecode: Vec<u8>,
}

/// Renders the complete header: fixed preamble, one constant array per
/// shader in the order given, enclosing namespace.
pub fn render_header(namespace: &str, shaders: &[CompiledShader]) -> String {
    let blocks: Vec<String> = shaders.iter().map(render_block).collect();
    format!(
        "#pragma once\n#include \"array\"\n#include \"cstdint\"\n\nnamespace {namespace}\n{{\n{}\n}}\n",
        blocks.join("\n\n")
    )
}

fn render_block(shader: &CompiledShader) -> String {
    let bytes = shader
        .bytecode
        .iter()
        .map(|byte| format!("0x{byte:02x}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "    inline constexpr std::array<uint8_t, {}> {}_code = {{\n        {bytes}\n    }};",
        shader.bytecode.len(),
        shader.name,
    )
}

/// Replaces `path` with `contents` in one step: the text goes to a
/// sibling staging file which is then renamed over the target.
pub fn write_header(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);
    fs::write(&staging, contents)?;
    fs::rename(&staging, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_exact_header_layout() {
        let shaders = vec![
            CompiledShader {
                name: "triangle".into(),
                bytecode: vec![0x00, 0x01, 0xfe],
            },
            CompiledShader {
                name: "blit".into(),
                bytecode: vec![0xab],
            },
        ];

        let expected = concat!(
            "#pragma once\n",
            "#include \"array\"\n",
            "#include \"cstdint\"\n",
            "\n",
            "namespace Shaders\n",
            "{\n",
            "    inline constexpr std::array<uint8_t, 3> triangle_code = {\n",
            "        0x00, 0x01, 0xfe\n",
            "    };\n",
            "\n",
            "    inline constexpr std::array<uint8_t, 1> blit_code = {\n",
            "        0xab\n",
            "    };\n",
            "}\n",
        );
        assert_eq!(render_header("Shaders", &shaders), expected);
    }

    #[test]
    fn renders_an_empty_namespace_without_entries() {
        assert_eq!(
            render_header("Shaders", &[]),
            "#pragma once\n#include \"array\"\n#include \"cstdint\"\n\nnamespace Shaders\n{\n\n}\n"
        );
    }

    #[test]
    fn zero_byte_bytecode_keeps_its_entry() {
        let shaders = vec![CompiledShader {
            name: "empty".into(),
            bytecode: Vec::new(),
        }];
        let header = render_header("NS", &shaders);
        assert!(header.contains("inline constexpr std::array<uint8_t, 0> empty_code"));
    }

    #[test]
    fn write_header_replaces_previous_content_and_leaves_no_staging_file() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("inc/shader_data.hpp");

        write_header(&out, "first").unwrap();
        write_header(&out, "second").unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "second");
        assert!(!temp.path().join("inc/shader_data.hpp.tmp").exists());
    }
}
