mod content;

pub use content::{ContentError, ContentErrorExt};

use std::borrow::Cow;

/// Failures raised by an expression engine. The resolver returns them unmodified.
#[forma_derive::forma_error]
#[derive(Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// Malformed template markup; `position` is the byte offset of the offending expression.
    #[error("Expression syntax error at byte {position}{}: {message}", format_context(.context))]
    Syntax { message: Cow<'static, str>, position: usize, context: Option<Cow<'static, str>> },

    /// A well-formed expression could not be rendered.
    #[error("Expression render error{}: {message}", format_context(.context))]
    Render { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ExpressionError {
    pub fn syntax(message: impl Into<Cow<'static, str>>, position: usize) -> Self {
        Self::Syntax { message: message.into(), position, context: None }
    }
}
