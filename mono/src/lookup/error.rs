use thiserror::Error;

/// The API answered with a payload that breaks its documented shape.
///
/// These are fatal: the workflow returns them as `Err` instead of folding them into an
/// unsuccessful result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    /// `message` is present but not a string
    #[error("Envelope `message` is not a string")]
    MessageNotString,

    /// `status` is present but not a string
    #[error("Envelope `status` is not a string")]
    StatusNotString,

    /// `data` is present but not an object
    #[error("Envelope `data` is not an object")]
    DataNotObject,

    /// `data.session_id` is present but not a string
    #[error("`data.session_id` is not a string")]
    SessionIdNotString,

    /// `data.methods` is present but not an array
    #[error("`data.methods` is not an array")]
    MethodsNotArray,

    /// An entry of `data.methods` is not an object
    #[error("`data.methods[{index}]` is not an object")]
    MethodEntryNotObject {
        /// Position of the entry
        index: usize,
    },

    /// An entry of `data.methods` lacks a required string field
    #[error("`data.methods[{index}]` has no string `{field}`")]
    MethodEntryField {
        /// Position of the entry
        index: usize,
        /// Missing or mistyped field
        field: &'static str,
    },

    /// A verification method wire string is not one of the known channels
    #[error("Invalid verification method: {0}")]
    InvalidMethod(String),
}
