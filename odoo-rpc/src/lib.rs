mod auth;
mod client;
mod envelope;
mod odoo_url;

pub(crate) use envelope::*;

pub use auth::*;
pub use client::*;
pub use envelope::{RpcErrorData, RpcErrorObject};
pub use odoo_url::OdooUrl;
