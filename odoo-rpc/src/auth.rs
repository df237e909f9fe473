use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{OdooUrl, RpcError, RpcRequest, RpcResponse};

const SESSION_COOKIE: &str = "session_id";

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub db: Option<String>,
    pub login: Option<String>,
    pub uid: i64,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
struct AuthenticateParams<'a> {
    db: &'a str,
    login: &'a str,
    password: &'a str,
}

impl Credentials {
    /// Log in through `/web/session/authenticate` and keep the resulting session cookie.
    pub async fn authenticate(
        base_url: &OdooUrl,
        db: &str,
        login: &str,
        password: &str,
    ) -> Result<Credentials, RpcError> {
        let url = base_url.append_path("/web/session/authenticate");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = RpcRequest::call(
            1,
            AuthenticateParams {
                db,
                login,
                password,
            },
        );

        let resp = Client::new()
            .post(url.as_ref())
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::ResponseError(e.to_string()))?;

        if resp.status() == 401 || resp.status() == 403 {
            return Err(RpcError::Unauthorized);
        }

        let session_id = resp
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.value().to_string());

        let body = resp.json::<RpcResponse<Value>>().await.map_err(|e| {
            RpcError::ParsingError(format!("Failed to parse authenticate response: {}", e))
        })?;
        let result = body.into_result()?;

        // A failed login answers with `uid: false` rather than an error object.
        let uid = result
            .get("uid")
            .and_then(Value::as_i64)
            .ok_or(RpcError::Unauthorized)?;
        let session_id = session_id
            .ok_or_else(|| RpcError::Other("session_id cookie not found".to_string()))?;

        tracing::debug!(uid, db, login, "Authenticated against Odoo");

        Ok(Credentials {
            db: Some(db.to_string()),
            login: Some(login.to_string()),
            uid,
            session_id,
        })
    }

    pub fn as_cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.session_id)
    }
}
