use serde_json::{json, Value};

use crate::domain::{parse_duration_hours, ports::outbound::FieldValues, RemoteError};

pub fn to_remote_error(error: odoo_rpc::RpcError) -> RemoteError {
    match error {
        odoo_rpc::RpcError::Server { code, message } => RemoteError::new(code, message),
        odoo_rpc::RpcError::Unauthorized => {
            RemoteError::new("Unauthorized", "session expired or access denied")
        }
        odoo_rpc::RpcError::ResponseError(msg) => RemoteError::new("ResponseError", msg),
        odoo_rpc::RpcError::ParsingError(msg) => RemoteError::new("ParsingError", msg),
        odoo_rpc::RpcError::Other(msg) => RemoteError::new("Error", msg),
    }
}

/// The store keeps durations as decimal hours. Numeric `h:mm` strings in the given fields are
/// converted; anything else is passed through for the server to judge.
pub fn to_store_values(mut values: FieldValues, duration_fields: &[String]) -> FieldValues {
    for name in duration_fields {
        let hours = values
            .get(name)
            .and_then(Value::as_str)
            .and_then(parse_duration_hours);
        if let Some(hours) = hours {
            values.insert(name.clone(), json!(hours));
        }
    }
    values
}
