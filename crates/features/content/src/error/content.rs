use forma_provider::FetchError;
use std::borrow::Cow;

/// Setup failures of a [`ContentResolver`](crate::ContentResolver).
#[forma_derive::forma_error]
pub enum ContentError {
    #[error("Data provider setup failed{}: {source}", format_context(.context))]
    Provider { source: FetchError, context: Option<Cow<'static, str>> },

    #[error("Internal content error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
