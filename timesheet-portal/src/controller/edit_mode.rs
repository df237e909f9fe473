use tracing::{debug, warn};

use super::*;

impl<R, P, U> PortalController<R, P, U>
where
    R: RemoteDataService,
    P: PageRenderer,
    U: UserPrompt,
{
    /// Open a row for editing. Rows of other users are silently skipped.
    pub fn enter_edit(&mut self, line_id: LineId) -> Outcome {
        let Some(row) = self.body.row(line_id) else {
            debug!(%line_id, "Edit requested for a line that is not rendered");
            return Outcome::Ignored;
        };

        if !row.is_owned_by(self.session.user_id) {
            debug!(%line_id, owner = %row.owner, "Not opening a line owned by another user");
            return Outcome::Ignored;
        }

        self.open_session(line_id)
    }

    /// Replace any current session with a fresh one for `line_id`. No ownership check:
    /// also used right after creating a line.
    pub(super) fn open_session(&mut self, line_id: LineId) -> Outcome {
        let Some(row) = self.body.row(line_id) else {
            warn!(%line_id, "Line not found in the rendered table, cannot open it");
            return Outcome::Ignored;
        };

        if let Some(previous) = self.state.editing_line() {
            debug!(%previous, next = %line_id, "Closing previous edit session");
        }

        self.state = EditState::Editing(EditSession::from_row(row));
        Outcome::Editing(line_id)
    }

    /// Drop the edit session and show the original row again. No remote call.
    pub fn exit_edit(&mut self) -> Outcome {
        match self.state.editing_line() {
            Some(line_id) => {
                debug!(%line_id, "Edit cancelled");
                self.state = EditState::Viewing;
                Outcome::Viewing
            }
            None => Outcome::Ignored,
        }
    }

    /// Record user input into the open session.
    pub fn set_field(&mut self, name: &str, value: String) -> Outcome {
        let Some(session) = self.state.session_mut() else {
            return Outcome::Ignored;
        };

        if session.set_value(name, value) {
            Outcome::Editing(session.line_id)
        } else {
            debug!(line_id = %session.line_id, field = name, "No such input on the edited row");
            Outcome::Ignored
        }
    }
}
