//! JSON-RPC 2.0 envelope encoding and decoding.
//!
//! The codec is pure: it knows nothing about sessions or HTTP. Requests
//! carry a fresh correlation id per call; responses are classified strictly
//! in this order: malformed envelope, server error (message text wins over
//! numeric code), empty result, decoded result.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Fixed protocol version stamped on every request.
pub(crate) const PROTOCOL_VERSION: &str = "2.0";

const EMPTY_RESPONSE: &str = "empty result and no error occurred";

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct RpcRequest {
    pub id: String,
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
}

/// Error object of a JSON-RPC response envelope.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RpcErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl RpcErrorBody {
    /// Message to surface for this error: the server-supplied text if
    /// present, otherwise the symbolic name of a well-known code. Unknown
    /// codes with no message yield an empty string, which still surfaces
    /// as a remote error, just an unlabeled one.
    fn display_message(&self) -> String {
        if !self.message.is_empty() {
            return self.message.clone();
        }
        RpcErrorKind::from_code(self.code)
            .symbol()
            .unwrap_or_default()
            .to_string()
    }
}

/// Well-known JSON-RPC error codes returned by the API service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RpcErrorKind {
    InvalidRequest,
    EncodingFailed,
    MethodNotFound,
    ParseError,
    Other,
}

impl RpcErrorKind {
    pub(crate) fn from_code(code: i64) -> Self {
        match code {
            -32600 => RpcErrorKind::InvalidRequest,
            -32603 => RpcErrorKind::EncodingFailed,
            -32601 => RpcErrorKind::MethodNotFound,
            -32700 => RpcErrorKind::ParseError,
            _ => RpcErrorKind::Other,
        }
    }

    pub(crate) fn symbol(self) -> Option<&'static str> {
        match self {
            RpcErrorKind::InvalidRequest => Some("ERROR_CODE_INVALID_REQUEST"),
            RpcErrorKind::EncodingFailed => Some("ERROR_CODE_JSON_ENCODING_FAILED"),
            RpcErrorKind::MethodNotFound => Some("ERROR_CODE_METHOD_NOT_FOUND"),
            RpcErrorKind::ParseError => Some("ERROR_CODE_PARSE_ERROR"),
            RpcErrorKind::Other => None,
        }
    }
}

/// Build the wire bytes for a request envelope.
///
/// The correlation id is a random non-negative integer rendered as a
/// decimal string; it only has to pair a response with its request within
/// a single outstanding call, so no sequencing is needed.
pub(crate) fn encode_request(method: &str, params: Value) -> Result<Vec<u8>> {
    let request = RpcRequest {
        id: rand::thread_rng().gen_range(0..i64::MAX).to_string(),
        jsonrpc: PROTOCOL_VERSION.to_string(),
        method: method.to_string(),
        params,
    };
    serde_json::to_vec(&request).map_err(ApiError::Encoding)
}

/// Parse a response envelope and extract the result payload.
pub(crate) fn decode_response<T: DeserializeOwned>(method: &str, body: &[u8]) -> Result<T> {
    let envelope: RpcResponse = serde_json::from_slice(body)
        .map_err(|err| ApiError::Protocol(format!("malformed response envelope: {err}")))?;

    if let Some(error) = envelope.error {
        return Err(ApiError::Remote {
            method: method.to_string(),
            message: error.display_message(),
        });
    }

    // A 200 with neither result nor error is a server bug, not a success
    // with a zero value.
    match envelope.result {
        Some(result) => serde_json::from_value(result)
            .map_err(|err| ApiError::Protocol(format!("unexpected result shape: {err}"))),
        None => Err(ApiError::Protocol(EMPTY_RESPONSE.to_string())),
    }
}
