use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{models::LineId, RemoteError};

/// Flat field name -> value mapping sent to the store.
pub type FieldValues = Map<String, Value>;

/// Outbound port for the remote data store holding the time-entry lines.
#[async_trait]
pub trait RemoteDataService: Send + Sync + 'static {
    /// Create a record and return its identifier.
    async fn create(&self, model: &str, values: FieldValues) -> Result<LineId, RemoteError>;

    async fn write(
        &self,
        model: &str,
        id: LineId,
        values: FieldValues,
    ) -> Result<bool, RemoteError>;

    async fn unlink(&self, model: &str, ids: &[LineId]) -> Result<bool, RemoteError>;
}
