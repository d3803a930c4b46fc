use std::fmt;

use wxjsx_jsx::ExprParseError;

pub type TransformResult<T> = Result<T, TransformError>;

/// Hard failures. Any of these aborts the whole conversion.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error(transparent)]
    MalformedExpression(#[from] ExprParseError),

    #[error("`{directive}` on <{element}> needs a value")]
    MissingDirectiveValue { element: String, directive: String },

    #[error("template line {line}: {message}")]
    Source { line: usize, message: String },

    #[error("invalid template AST: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recoverable anomalies. The pass keeps going with a best-effort result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A style value mixing literal text and `{{ }}`; emitted as a string.
    UnsupportedStyleSyntax {
        element: String,
        property: String,
        value: String,
    },
    /// A style segment without a `:`; dropped.
    MalformedStyleDeclaration { element: String, segment: String },
    /// `wx:elif`/`wx:else` with no chain to attach to; the node renders
    /// unconditionally.
    StrayConditional { element: String, directive: String },
    /// `wx:for-item`/`wx:for-index` without `wx:for`; dropped.
    StrayLoopAlias { element: String, directive: String },
}

impl Diagnostic {
    /// Logs the diagnostic and appends it to `sink`.
    pub(crate) fn report(self, sink: &mut Vec<Diagnostic>) {
        tracing::warn!("{self}");
        sink.push(self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedStyleSyntax {
                element,
                property,
                value,
            } => write!(
                f,
                "<{element}> style `{property}: {value}` mixes text and interpolation; kept as a string"
            ),
            Self::MalformedStyleDeclaration { element, segment } => {
                write!(f, "<{element}> style segment `{segment}` has no ':'; dropped")
            }
            Self::StrayConditional { element, directive } => write!(
                f,
                "<{element}> has `{directive}` without a preceding wx:if/wx:elif; rendered unconditionally"
            ),
            Self::StrayLoopAlias { element, directive } => {
                write!(f, "<{element}> has `{directive}` without wx:for; dropped")
            }
        }
    }
}
