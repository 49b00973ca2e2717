//! Host message protocol.
//!
//! The transport (an extension messaging channel, a pipe, a test harness)
//! is an external collaborator; this module only defines the message
//! shapes and the synchronous request handler. A second message while one
//! is "in flight" cannot exist — handling is synchronous.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::component::Binder;
use crate::snapshot::ChangeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "TOGGLE_EDITING_MODE")]
    ToggleEditingMode { enabled: bool },
    #[serde(rename = "GET_CHANGES")]
    GetChanges,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Changes { success: bool, changes: ChangeSet },
    Error { success: bool, error: String },
    Ack { success: bool },
}

impl Response {
    pub fn ack() -> Self {
        Response::Ack { success: true }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            success: false,
            error: message.into(),
        }
    }
}

/// Handle one typed host request.
pub fn handle_request(binder: &mut Binder, request: Request) -> Response {
    match request {
        Request::ToggleEditingMode { enabled } => {
            if enabled {
                binder.enable_editing();
            } else {
                binder.disable_editing();
            }
            Response::ack()
        }
        Request::GetChanges => Response::Changes {
            success: true,
            changes: binder.get_changes(),
        },
    }
}

/// Handle an untyped host message.
///
/// Unknown or malformed requests answer `{ success: false, error }`
/// instead of failing the channel.
pub fn handle_request_value(binder: &mut Binder, message: &Value) -> Value {
    let request: Request = match serde_json::from_value(message.clone()) {
        Ok(request) => request,
        Err(err) => return json!({ "success": false, "error": err.to_string() }),
    };
    match serde_json::to_value(handle_request(binder, request)) {
        Ok(response) => response,
        Err(err) => json!({ "success": false, "error": err.to_string() }),
    }
}
