use forma_derive::forma_error;
use std::borrow::Cow;

#[forma_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("Reading fixture")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading fixture): disk");

    let internal: DemoError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");
}
