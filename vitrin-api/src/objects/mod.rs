pub mod cart;
pub mod catalog;
pub mod delivery;
pub mod order;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Error envelope returned by the storefront backend.
///
/// The backend answers every rejected request with `{"detail": ...}` where
/// `detail` is a plain string for domain errors and a list of field objects
/// for request validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// One entry of a field-level validation list. Extra keys (`loc`, `type`)
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
}

impl ErrorDetail {
    /// Flatten the detail into one line. Field messages are kept verbatim,
    /// joined in server order.
    pub fn joined(&self) -> String {
        match self {
            ErrorDetail::Message(msg) => msg.clone(),
            ErrorDetail::Fields(fields) => fields.iter().map(|f| f.msg.as_str()).join(", "),
        }
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.joined())
    }
}
