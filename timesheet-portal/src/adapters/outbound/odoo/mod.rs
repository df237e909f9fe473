mod conversions;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{
    models::{LineId, SessionContext, UserId},
    ports::outbound::{FieldValues, PageRenderer, RemoteDataService},
    PortalError, RemoteError,
};

use self::conversions::{to_remote_error, to_store_values};

/// Adapter that binds the Odoo JSON-RPC client to the remote data and page ports.
pub struct OdooAdapter {
    client: odoo_rpc::OdooClient,
    page_path: String,
    duration_fields: Vec<String>,
}

impl OdooAdapter {
    pub fn new(client: odoo_rpc::OdooClient, page_path: impl Into<String>) -> Self {
        Self {
            client,
            page_path: page_path.into(),
            duration_fields: Vec::new(),
        }
    }

    /// Fields whose `h:mm` input is stored as decimal hours.
    pub fn with_duration_fields(mut self, fields: Vec<String>) -> Self {
        self.duration_fields = fields;
        self
    }

    /// Session of the authenticated user.
    pub fn session(&self) -> SessionContext {
        SessionContext::new(UserId::new(self.client.credentials().uid))
    }
}

#[async_trait]
impl RemoteDataService for OdooAdapter {
    async fn create(&self, model: &str, values: FieldValues) -> Result<LineId, RemoteError> {
        let values = to_store_values(values, &self.duration_fields);
        let id = self
            .client
            .create(model, values)
            .await
            .map_err(to_remote_error)?;
        Ok(LineId::new(id))
    }

    async fn write(
        &self,
        model: &str,
        id: LineId,
        values: FieldValues,
    ) -> Result<bool, RemoteError> {
        let values = to_store_values(values, &self.duration_fields);
        self.client
            .write(model, &[id.as_i64()], values)
            .await
            .map_err(to_remote_error)
    }

    async fn unlink(&self, model: &str, ids: &[LineId]) -> Result<bool, RemoteError> {
        let ids: Vec<i64> = ids.iter().map(LineId::as_i64).collect();
        self.client
            .unlink(model, &ids)
            .await
            .map_err(to_remote_error)
    }
}

#[async_trait]
impl PageRenderer for OdooAdapter {
    async fn fetch_page(&self) -> Result<String, PortalError> {
        debug!(path = %self.page_path, "Fetching portal page");
        self.client
            .fetch_page(&self.page_path)
            .await
            .map_err(|e| PortalError::page(e.to_string()))
    }
}
