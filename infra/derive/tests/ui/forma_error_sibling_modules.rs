use std::borrow::Cow;

mod fetch {
    use std::borrow::Cow;

    #[forma_derive::forma_error]
    #[derive(Clone)]
    pub enum FetchError {
        #[error("Upstream failed{}: {message}", format_context(.context))]
        Upstream { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    }
}

mod setup {
    use super::fetch::FetchError;
    use std::borrow::Cow;

    #[forma_derive::forma_error]
    pub enum SetupError {
        #[error("Setup failed{}: {source}", format_context(.context))]
        Provider { source: FetchError, context: Option<Cow<'static, str>> },

        #[error("Internal setup error{}: {message}", format_context(.context))]
        Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    }
}

use fetch::FetchError;
use setup::{SetupError, SetupErrorExt};

fn build() -> Result<(), SetupError> {
    Err(FetchError::Upstream { message: Cow::Borrowed("offline"), context: None }).context("Building cache")
}

fn main() {
    let err = build().unwrap_err();
    assert_eq!(err.kind(), "Provider");
    assert_eq!(err.to_string(), "Setup failed (Building cache): Upstream failed: offline");

    let internal: SetupError = "boom".into();
    assert_eq!(internal.kind(), "Internal");
}
