pub mod attrs;
pub mod cursor;
pub mod embed;
pub mod error;
pub mod template_ast;
pub mod template_codegen;
pub mod template_parse;
pub mod transform;

pub use attrs::{Directive, rewrite_attrs, rewrite_name, split_directive};
pub use cursor::Cursor;
pub use error::{Diagnostic, TransformError, TransformResult};
pub use template_ast::{AttrValue, Attribute, Block, Element, Node};
pub use template_codegen::{compile_template, compile_template_to_jsx, parse_pug_json};
pub use template_parse::parse_template_to_ast;
pub use transform::{Conversion, resolve_tag, transform_block};
