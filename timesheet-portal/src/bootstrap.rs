use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::outbound::OdooAdapter;
use crate::config::Settings;
use crate::controller::PortalController;
use crate::domain::ports::outbound::UserPrompt;

pub type OdooPortal<U> = PortalController<OdooAdapter, OdooAdapter, U>;

/// Log in to Odoo and load the widget from the configured page.
pub async fn connect<U: UserPrompt>(settings: &Settings, prompt: Arc<U>) -> Result<OdooPortal<U>> {
    let base_url = odoo_rpc::OdooUrl::new(settings.odoo.base_url.clone());
    let credentials = odoo_rpc::Credentials::authenticate(
        &base_url,
        &settings.odoo.database,
        &settings.odoo.login,
        &settings.odoo.password,
    )
    .await
    .with_context(|| format!("Failed to log in to {}", settings.odoo.base_url))?;

    let client = odoo_rpc::OdooClient::new(base_url, credentials);
    let adapter = Arc::new(
        OdooAdapter::new(client, settings.portal.page_path.clone())
            .with_duration_fields(settings.portal.duration_fields.clone()),
    );
    let session = adapter.session();

    info!(user_id = %session.user_id, page = %settings.portal.page_path, "Connected to Odoo");

    PortalController::load(
        adapter.clone(),
        adapter,
        prompt,
        session,
        settings.portal.options(),
    )
    .await
    .context("Failed to load the timesheet widget")
}
