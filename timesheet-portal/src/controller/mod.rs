//! Row-interaction and synchronization controller.
//!
//! Every gesture goes through [`PortalController::handle`] (or [`PortalController::dispatch`]
//! for an already classified intent). Successful mutations never patch the table locally: the
//! body is always replaced by the server's current rendering.
//!
//! All operations take `&mut self`, so mutation chains on one controller run one after the
//! other; a second gesture cannot start before the previous chain has finished.

mod dispatcher;
mod edit_mode;
mod intent;
#[cfg(test)]
mod tests;

pub use intent::*;

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    models::{ContainerContext, EditSession, EditState, LineId, SessionContext},
    ports::outbound::{PageRenderer, RemoteDataService, UserPrompt},
    PortalError, RemoteError,
};
use crate::markup::{self, TableBody, WidgetSelectors};

pub const DEFAULT_MODEL: &str = "account.analytic.line";

/// Static options of one widget instance.
#[derive(Debug, Clone)]
pub struct PortalOptions {
    /// Remote model the lines belong to.
    pub model: String,
    pub selectors: WidgetSelectors,
    /// The page is open in the website builder; the widget must not react.
    pub editable_mode: bool,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            selectors: WidgetSelectors::default(),
            editable_mode: false,
        }
    }
}

/// Result of handling one intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Not applicable: foreign row, nothing to cancel, unknown line, builder mode.
    Ignored,
    /// The given row is now the one open for editing.
    Editing(LineId),
    /// Back to viewing without any remote call.
    Viewing,
    /// The mutation succeeded and the table was reloaded.
    Reloaded,
    /// The user declined the confirmation.
    Declined,
    /// Local validation blocked the submit.
    Invalid,
    /// The chain stopped; the banner shows this error.
    Failed(RemoteError),
}

pub struct PortalController<R, P, U> {
    remote: Arc<R>,
    pages: Arc<P>,
    prompt: Arc<U>,
    session: SessionContext,
    options: PortalOptions,
    container: ContainerContext,
    body: TableBody,
    state: EditState,
    banners: Vec<RemoteError>,
}

impl<R, P, U> PortalController<R, P, U>
where
    R: RemoteDataService,
    P: PageRenderer,
    U: UserPrompt,
{
    /// Fetch the page once and build the controller from its widget.
    pub async fn load(
        remote: Arc<R>,
        pages: Arc<P>,
        prompt: Arc<U>,
        session: SessionContext,
        options: PortalOptions,
    ) -> Result<Self, PortalError> {
        let html = pages.fetch_page().await?;
        let (container, body) = markup::extract_table(&html, &options.selectors)?;

        debug!(
            rows = body.len(),
            user_id = %session.user_id,
            "Timesheet widget loaded"
        );

        Ok(Self {
            remote,
            pages,
            prompt,
            session,
            options,
            container,
            body,
            state: EditState::Viewing,
            banners: Vec::new(),
        })
    }

    /// Classify a gesture and dispatch the resulting intent.
    pub async fn handle(&mut self, gesture: Gesture) -> Outcome {
        match classify(gesture) {
            Some(intent) => self.dispatch(intent).await,
            None => Outcome::Ignored,
        }
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Outcome {
        if self.options.editable_mode {
            debug!(?intent, "Widget inert in edit mode");
            return Outcome::Ignored;
        }

        match intent {
            Intent::AddRow => self.add_row().await,
            Intent::EnterEdit(line_id) => self.enter_edit(line_id),
            Intent::SetField { name, value } => self.set_field(&name, value),
            Intent::SubmitRow => self.submit_row().await,
            Intent::Cancel => self.exit_edit(),
            Intent::DeleteRow(line_id) => self.delete_row(line_id).await,
            Intent::Reload => self.reload().await,
        }
    }

    /// HTML of the visible widget state.
    pub fn render(&self) -> String {
        markup::render_widget(&self.banners, &self.body, &self.state)
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        self.state.session()
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    pub fn container(&self) -> &ContainerContext {
        &self.container
    }

    /// Error banners, newest first.
    pub fn banners(&self) -> &[RemoteError] {
        &self.banners
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}
