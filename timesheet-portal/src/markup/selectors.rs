use scraper::Selector;

use crate::domain::PortalError;

pub const DEFAULT_CONTAINER: &str = "div.hr_timesheet_portal";

pub const ATTR_LINE_ID: &str = "data-line-id";
pub const ATTR_USER_ID: &str = "data-user-id";
pub const ATTR_FIELD_NAME: &str = "data-field-name";
pub const ATTR_FIELD_TYPE: &str = "data-field-type";
pub const ATTR_FIELD_VALUE: &str = "data-field-value";
pub const ATTR_ACCOUNT_ID: &str = "data-account-id";
pub const ATTR_PROJECT_ID: &str = "data-project-id";
pub const ATTR_TASK_ID: &str = "data-task-id";

/// Id of the form the inputs of the editable row belong to.
pub const FORM_ID: &str = "hr_timesheet_portal_form";

/// Structural signature of the widget inside a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSelectors {
    pub container: String,
}

impl Default for WidgetSelectors {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_string(),
        }
    }
}

impl WidgetSelectors {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }

    pub fn container(&self) -> Result<Selector, PortalError> {
        parse(&self.container)
    }

    pub fn tbody(&self) -> Result<Selector, PortalError> {
        parse("tbody")
    }
}

fn parse(selector: &str) -> Result<Selector, PortalError> {
    Selector::parse(selector)
        .map_err(|e| PortalError::InvalidMarkup(format!("bad selector `{}`: {}", selector, e)))
}
