use alloc::string::String;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("selector must not be empty")]
    EmptySelector,

    #[error("selector `{0}` did not resolve to an element collection")]
    InvalidSelector(String),

    #[error("{role} class `{name}` is not a valid class token")]
    InvalidClassName { role: &'static str, name: String },
}

pub type Result<T> = core::result::Result<T, Error>;
