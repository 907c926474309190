use std::borrow::Cow;

/// Failures of the transform engine. All of them abort the whole document.
#[forma_derive::forma_error]
pub enum TransformError {
    /// Input text is not valid JSON.
    #[error("Invalid input{}: {source}", format_context(.context))]
    InvalidInput { source: serde_json::Error, context: Option<Cow<'static, str>> },

    /// A descriptor with a registered tag lacks its `data` key, or a field has the wrong shape.
    #[error("Malformed descriptor '{tag}'{}: {message}", format_context(.context))]
    MalformedDescriptor {
        tag: String,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The tag is neither registered nor a well-formed identifier.
    #[error("Unknown component '{tag}'{}", format_context(.context))]
    UnknownComponent { tag: String, context: Option<Cow<'static, str>> },

    /// Raised by an element's own reconstruction logic.
    #[error("Failed to reconstruct '{tag}'{}: {message}", format_context(.context))]
    Reconstruction {
        tag: String,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },
}

impl TransformError {
    pub fn malformed(tag: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedDescriptor { tag: tag.into(), message: message.into(), context: None }
    }

    pub fn unknown(tag: impl Into<String>) -> Self {
        Self::UnknownComponent { tag: tag.into(), context: None }
    }

    pub fn reconstruction(tag: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Reconstruction { tag: tag.into(), message: message.into(), context: None }
    }

    /// The tag the error is about, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { .. } => None,
            Self::MalformedDescriptor { tag, .. }
            | Self::UnknownComponent { tag, .. }
            | Self::Reconstruction { tag, .. } => Some(tag),
        }
    }
}
