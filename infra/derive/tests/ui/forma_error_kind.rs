use forma_derive::forma_error;
use std::borrow::Cow;

#[forma_error]
#[derive(Clone)]
pub enum LookupError {
    #[error("Missing tag{}: {tag}", format_context(.context))]
    Missing { tag: String, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = LookupError::Missing { tag: "Card".to_owned(), context: None };
    assert_eq!(err.kind(), "Missing");

    let with_context: Result<(), LookupError> = Err(err.clone());
    let err = with_context.context("Resolving").unwrap_err();
    assert_eq!(err.to_string(), "Missing tag (Resolving): Card");

    let rejected = LookupError::Rejected { message: "nope".into(), context: None };
    assert_eq!(rejected.kind(), "Rejected");
}
