use async_trait::async_trait;

use crate::domain::PortalError;

/// Outbound port for the server-side page rendering.
///
/// The rendered page is the only source of row content and of aggregates such as totals.
#[async_trait]
pub trait PageRenderer: Send + Sync + 'static {
    /// Full HTML of the page hosting the widget.
    async fn fetch_page(&self) -> Result<String, PortalError>;
}
