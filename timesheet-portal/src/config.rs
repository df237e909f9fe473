use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::controller::{PortalOptions, DEFAULT_MODEL};
use crate::markup::{WidgetSelectors, DEFAULT_CONTAINER};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub odoo: OdooSettings,
    pub portal: PortalSettings,
}

#[derive(Deserialize, Clone)]
pub struct OdooSettings {
    pub base_url: String,
    pub database: String,
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for OdooSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdooSettings")
            .field("base_url", &self.base_url)
            .field("database", &self.database)
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct PortalSettings {
    /// Page hosting the widget, fetched on every reload.
    pub page_path: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_container")]
    pub container_selector: String,
    /// Fields stored as decimal hours on the server.
    #[serde(default)]
    pub duration_fields: Vec<String>,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    #[serde(default)]
    pub editable_mode: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

impl PortalSettings {
    pub fn options(&self) -> PortalOptions {
        PortalOptions {
            model: self.model.clone(),
            selectors: WidgetSelectors::new(self.container_selector.clone()),
            editable_mode: self.editable_mode,
        }
    }
}

/// Layered settings: `config/base.yaml`, `config/<APP_ENVIRONMENT>.yaml`, then `PORTAL_*`
/// environment variables (`PORTAL_ODOO__PASSWORD`). A `.env` file is loaded first if present.
pub fn read_config() -> Result<Settings, config::ConfigError> {
    dotenvy::dotenv().ok();

    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {}", e)))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|e| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {}", e)))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(config_directory.join(environment_filename)).required(false))
        .add_source(
            config::Environment::with_prefix("PORTAL")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
