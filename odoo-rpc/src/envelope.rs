use serde::{Deserialize, Serialize};

use crate::RpcError;

/// JSON-RPC 2.0 request as the Odoo web client sends it. The method is always `call`,
/// the actual operation is encoded in `params` and the URL.
#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<P> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: P,
    pub id: u64,
}

impl<P> RpcRequest<P> {
    pub fn call(id: u64, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "call",
            params,
            id,
        }
    }
}

/// Parameters of `/web/dataset/call_kw`.
#[derive(Debug, Serialize)]
pub(crate) struct CallKwParams<'a> {
    pub model: &'a str,
    pub method: &'a str,
    pub args: serde_json::Value,
    pub kwargs: serde_json::Value,
}

/// Generic JSON-RPC response. Exactly one of `result` and `error` is set by the server.
#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    #[allow(dead_code)]
    pub id: Option<u64>,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T, RpcError> {
        if let Some(error) = self.error {
            return Err(error.into());
        }

        self.result
            .ok_or_else(|| RpcError::ParsingError("Response carried neither result nor error".into()))
    }
}

/// Error object of a failed call. `message` is the short label (e.g. "Odoo Server Error"),
/// `data.message` the human readable detail.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<RpcErrorData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcErrorData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<RpcErrorObject> for RpcError {
    fn from(error: RpcErrorObject) -> Self {
        let data = error.data.unwrap_or_default();
        let message = data.message.or(data.name).unwrap_or_default();

        RpcError::Server {
            code: error.message,
            message,
        }
    }
}
