use wxjsx_jsx::{EmitOptions, emit_program};

use crate::error::TransformResult;
use crate::template_ast::Block;
use crate::transform::{Conversion, transform_block};

/// Parses the JSON AST produced by pug-parser (`{ "type": "Block", "nodes": [...] }`).
pub fn parse_pug_json(json: &str) -> TransformResult<Block> {
    Ok(serde_json::from_str(json)?)
}

/// Public API: pug source to JSX text. Diagnostics are logged, not returned;
/// use [`compile_template`] to inspect them.
pub fn compile_template_to_jsx(template_src: &str, opts: &EmitOptions) -> TransformResult<String> {
    let conversion = compile_template(template_src)?;
    Ok(emit_program(&conversion.fragments, opts))
}

pub fn compile_template(template_src: &str) -> TransformResult<Conversion> {
    let block = crate::template_parse::parse_template_to_ast(template_src)?;
    transform_block(block)
}
