use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use wxjsx_jsx::{EmitOptions, emit_program};
use wxjsx_template::{Block, Conversion, parse_pug_json, parse_template_to_ast, transform_block};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Indented pug source.
    Pug,
    /// The JSON AST printed by pug-parser.
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmitMode {
    /// JSX source text.
    Jsx,
    /// The output tree as JSON.
    Tree,
}

/// Where the input comes from: a file, or stdin for `-`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Stdin,
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::Path(path)
        }
    }
}

impl Input {
    fn read(&self) -> Result<String> {
        match self {
            Input::Path(path) => {
                fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
            }
            Input::Stdin => {
                let mut src = String::new();
                io::stdin()
                    .read_to_string(&mut src)
                    .context("failed to read stdin")?;
                Ok(src)
            }
        }
    }

    fn stem(&self) -> &str {
        match self {
            Input::Path(path) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("template"),
            Input::Stdin => "stdin",
        }
    }
}

/// Reads `src` in `format` and runs the directive pass over it.
pub fn convert_source(src: &str, format: InputFormat) -> Result<Conversion> {
    let block: Block = match format {
        InputFormat::Pug => parse_template_to_ast(src)?,
        InputFormat::Json => parse_pug_json(src)?,
    };
    Ok(transform_block(block)?)
}

/// Renders a conversion the way `--emit` asks for.
pub fn render(conversion: &Conversion, emit: EmitMode, opts: &EmitOptions) -> Result<String> {
    match emit {
        EmitMode::Jsx => Ok(emit_program(&conversion.fragments, opts)),
        EmitMode::Tree => {
            let mut json = serde_json::to_string_pretty(&conversion.fragments)
                .context("failed to serialize output tree")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Converts one template. The result goes to `out_dir/<stem>.jsx` (or
/// `.json` for the tree) when an output directory is given, to stdout
/// otherwise. Returns the written path, if any.
pub fn convert_cmd(
    input: &Input,
    out_dir: Option<&Path>,
    format: InputFormat,
    emit: EmitMode,
    opts: &EmitOptions,
) -> Result<Option<PathBuf>> {
    let src = input.read()?;
    let conversion = convert_source(&src, format).with_context(|| match input {
        Input::Path(path) => format!("failed to convert {}", path.display()),
        Input::Stdin => "failed to convert stdin".to_string(),
    })?;
    if !conversion.diagnostics.is_empty() {
        tracing::info!(
            count = conversion.diagnostics.len(),
            "conversion finished with diagnostics"
        );
    }
    let code = render(&conversion, emit, opts)?;

    let Some(out_dir) = out_dir else {
        print!("{code}");
        return Ok(None);
    };
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let ext = match emit {
        EmitMode::Jsx => "jsx",
        EmitMode::Tree => "json",
    };
    let out_path = out_dir.join(format!("{}.{ext}", input.stem()));
    fs::write(&out_path, code)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    tracing::debug!(path = %out_path.display(), "wrote output");
    println!("Generated: {}", out_path.display());
    Ok(Some(out_path))
}
