use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{CallKwParams, OdooUrl, RpcRequest, RpcResponse};

use super::Credentials;

pub struct OdooClient {
    base_url: OdooUrl,
    credentials: Credentials,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl OdooClient {
    pub fn new(base_url: OdooUrl, credentials: Credentials) -> Self {
        Self {
            base_url,
            credentials,
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn check_status(resp: &reqwest::Response) -> Result<(), RpcError> {
        if resp.status() == 401 || resp.status() == 403 {
            return Err(RpcError::Unauthorized);
        }
        Ok(())
    }

    /// Call `method` on `model` the way the web client does, through `/web/dataset/call_kw`.
    pub async fn call_kw<T: DeserializeOwned>(
        &self,
        model: &str,
        method: &str,
        args: Value,
        kwargs: Value,
    ) -> Result<T, RpcError> {
        let url = self.base_url.call_kw(model, method);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = RpcRequest::call(
            id,
            CallKwParams {
                model,
                method,
                args,
                kwargs,
            },
        );

        tracing::debug!(model, method, id, "Sending call_kw");

        let resp = self
            .http
            .post(url.as_ref())
            .header("Cookie", self.credentials.as_cookie_header())
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::ResponseError(e.to_string()))?;

        Self::check_status(&resp)?;

        let resp_data = resp.json::<RpcResponse<T>>().await.map_err(|e| {
            RpcError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })?;

        resp_data.into_result()
    }

    pub async fn create(&self, model: &str, values: Map<String, Value>) -> Result<i64, RpcError> {
        self.call_kw(model, "create", json!([values]), json!({}))
            .await
    }

    pub async fn write(
        &self,
        model: &str,
        ids: &[i64],
        values: Map<String, Value>,
    ) -> Result<bool, RpcError> {
        self.call_kw(model, "write", json!([ids, values]), json!({}))
            .await
    }

    pub async fn unlink(&self, model: &str, ids: &[i64]) -> Result<bool, RpcError> {
        self.call_kw(model, "unlink", json!([ids]), json!({}))
            .await
    }

    /// GET a page of the same site as HTML, authenticated with the session cookie.
    pub async fn fetch_page(&self, path: &str) -> Result<String, RpcError> {
        let url = self.base_url.append_path(path);

        let resp = self
            .http
            .get(url.as_ref())
            .header("Cookie", self.credentials.as_cookie_header())
            .header("Accept", "text/html")
            .send()
            .await
            .map_err(|e| RpcError::ResponseError(e.to_string()))?;

        Self::check_status(&resp)?;

        let resp = resp
            .error_for_status()
            .map_err(|e| RpcError::ResponseError(e.to_string()))?;

        resp.text()
            .await
            .map_err(|e| RpcError::ParsingError(format!("Failed to read page body: {}", e)))
    }
}

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("[{code}]: {message}")]
    Server { code: String, message: String },
    #[error("Other: {0}")]
    Other(String),
}
