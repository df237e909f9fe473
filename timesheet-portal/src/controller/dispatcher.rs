use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::{is_valid_duration, ports::outbound::FieldValues};

use super::*;

/// Description given to a freshly created line until the user fills it in.
pub const PLACEHOLDER_NAME: &str = "/";

pub const INVALID_DURATION_MESSAGE: &str = "Time duration has invalid format";

impl<R, P, U> PortalController<R, P, U>
where
    R: RemoteDataService,
    P: PageRenderer,
    U: UserPrompt,
{
    /// Create an empty line for the current user, reload, then open the new line for editing.
    pub async fn add_row(&mut self) -> Outcome {
        let values = self.new_line_values();

        let line_id = match self.remote.create(&self.options.model, values).await {
            Ok(line_id) => line_id,
            Err(e) => return self.display_failure(e.into()),
        };
        info!(%line_id, user_id = %self.session.user_id, "Created timesheet line");

        if let Err(e) = self.reload_table().await {
            return self.display_failure(e);
        }

        // The new line can only be located once the reloaded body contains it.
        match self.open_session(line_id) {
            Outcome::Ignored => Outcome::Reloaded,
            outcome => outcome,
        }
    }

    /// Validate and write the open session, then reload.
    pub async fn submit_row(&mut self) -> Outcome {
        let Some(session) = self.state.session() else {
            return Outcome::Ignored;
        };

        let line_id = session.line_id;
        if session.duration_values().any(|value| !is_valid_duration(value)) {
            self.prompt.alert(INVALID_DURATION_MESSAGE).await;
            if let Some(session) = self.state.session_mut() {
                session.validation_error = Some(INVALID_DURATION_MESSAGE.to_string());
            }
            info!(%line_id, "Submit blocked by duration format");
            return Outcome::Invalid;
        }

        let values: FieldValues = session
            .form_fields()
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();

        match self.remote.write(&self.options.model, line_id, values).await {
            Ok(true) => {}
            Ok(false) => {
                return self.display_failure(
                    RemoteError::new("WriteRejected", format!("line {} was not updated", line_id))
                        .into(),
                )
            }
            Err(e) => return self.display_failure(e.into()),
        }
        info!(%line_id, "Updated timesheet line");

        self.finish_with_reload().await
    }

    /// Ask for confirmation, unlink the line and reload. Rows of other users are skipped.
    pub async fn delete_row(&mut self, line_id: LineId) -> Outcome {
        let Some(row) = self.body.row(line_id) else {
            return Outcome::Ignored;
        };
        if !row.is_owned_by(self.session.user_id) {
            debug!(%line_id, owner = %row.owner, "Not deleting a line owned by another user");
            return Outcome::Ignored;
        }

        let question = format!(
            "Are you sure you want to remove line \"{}\"?",
            row.description()
        );
        if !self.prompt.confirm(&question).await {
            debug!(%line_id, "Delete declined");
            return Outcome::Declined;
        }

        match self.remote.unlink(&self.options.model, &[line_id]).await {
            Ok(true) => {}
            Ok(false) => {
                return self.display_failure(
                    RemoteError::new("UnlinkRejected", format!("line {} was not removed", line_id))
                        .into(),
                )
            }
            Err(e) => return self.display_failure(e.into()),
        }
        info!(%line_id, "Removed timesheet line");

        self.finish_with_reload().await
    }

    /// Reload on request, reporting a failure as a banner.
    pub async fn reload(&mut self) -> Outcome {
        self.finish_with_reload().await
    }

    /// Replace the table body with the server's current rendering.
    ///
    /// Clears the banners first. The edit state is only reset once a new body is in hand, so a
    /// failed fetch leaves the table as it was.
    pub async fn reload_table(&mut self) -> Result<(), PortalError> {
        self.banners.clear();

        let html = self.pages.fetch_page().await?;
        let (_, body) = markup::extract_table(&html, &self.options.selectors)?;

        debug!(rows = body.len(), "Table body replaced");
        self.body = body;
        self.state = EditState::Viewing;
        Ok(())
    }

    async fn finish_with_reload(&mut self) -> Outcome {
        match self.reload_table().await {
            Ok(()) => Outcome::Reloaded,
            Err(e) => self.display_failure(e),
        }
    }

    fn display_failure(&mut self, error: PortalError) -> Outcome {
        let banner = error.to_remote_error();
        warn!(error = %banner, "Timesheet operation failed");
        self.banners.insert(0, banner.clone());
        Outcome::Failed(banner)
    }

    fn new_line_values(&self) -> FieldValues {
        let mut values = FieldValues::new();
        values.insert("user_id".to_string(), json!(self.session.user_id));

        let related = [
            ("account_id", self.container.account_id),
            ("project_id", self.container.project_id),
            ("task_id", self.container.task_id),
        ];
        for (name, id) in related {
            if let Some(id) = id {
                values.insert(name.to_string(), json!(id));
            }
        }

        values.insert("unit_amount".to_string(), json!(0));
        values.insert("name".to_string(), json!(PLACEHOLDER_NAME));
        values
    }
}
