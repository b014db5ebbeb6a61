//! Lifecycle error taxonomy.
//!
//! Four classes, all user-visible: validation failures never leave the
//! client, rejections carry the server's own words, transport failures wrap
//! the client error, and state conflicts name the order whose server-side
//! state contradicts the attempted stage.

use vitrin_api::ClientError;
use vitrin_api::objects::order::OrderId;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// A client-side precondition failed; nothing was sent to the backend.
    #[error("{0}")]
    Validation(String),

    /// The backend refused the operation; carries the server's detail
    /// message(s) verbatim.
    #[error("{0}")]
    Rejected(String),

    /// Network or decoding failure, including unknown status strings.
    #[error("transport failure: {0}")]
    Transport(#[source] ClientError),

    /// The server-observed order state contradicts the stage the client
    /// assumed (unpaid order at the delivery gate, order record without
    /// payment coordinates).
    #[error("order {order_id}: {reason}")]
    StateConflict { order_id: OrderId, reason: String },
}

impl From<ClientError> for FlowError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { detail, .. } => FlowError::Rejected(detail.joined()),
            other => FlowError::Transport(other),
        }
    }
}
