use std::borrow::Cow;

/// Failures of a data fetch, shared verbatim with every caller coalesced onto it.
#[forma_derive::forma_error]
#[derive(Clone)]
pub enum FetchError {
    /// The upstream provider could not serve the request.
    #[error("Upstream fetch failed{}: {message}", format_context(.context))]
    Upstream { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A provider or cache was constructed with unusable settings.
    #[error("Invalid provider configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal provider error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FetchError {
    /// Shorthand for [`FetchError::Upstream`], the variant provider implementations return.
    pub fn upstream(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Upstream { message: message.into(), context: None }
    }
}
