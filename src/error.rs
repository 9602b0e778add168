use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntError {
    #[error("cannot parse integer from a string without digits: {text:?}")]
    Empty { text: String },

    #[error("invalid digit {found:?} at position {position} in {text:?}")]
    InvalidDigit {
        text: String,
        position: usize,
        found: char,
    },

    #[error("attempt to divide by zero")]
    DivideByZero,
}

pub type Result<T> = std::result::Result<T, IntError>;
