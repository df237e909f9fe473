use crate::domain::models::LineId;

/// A user gesture on the widget, described by its target.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// The "add line" heading of the container.
    HeadingClicked,
    RowClicked { line_id: LineId, in_edit_row: bool },
    /// The remove icon inside a row.
    RemoveClicked { line_id: LineId },
    SubmitClicked,
    /// The edit form was submitted without the button, e.g. Enter in an input.
    FormSubmitted,
    CancelClicked,
    FieldChanged { name: String, value: String },
    /// Explicit refresh request from the host page.
    RefreshRequested,
}

/// What the user wants done, independent of where they clicked.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    AddRow,
    EnterEdit(LineId),
    SetField { name: String, value: String },
    SubmitRow,
    Cancel,
    DeleteRow(LineId),
    Reload,
}

/// Map a gesture to an intent. Clicks on the row that is already a form are not edit requests.
pub fn classify(gesture: Gesture) -> Option<Intent> {
    match gesture {
        Gesture::HeadingClicked => Some(Intent::AddRow),
        Gesture::RowClicked {
            in_edit_row: true, ..
        } => None,
        Gesture::RowClicked { line_id, .. } => Some(Intent::EnterEdit(line_id)),
        Gesture::RemoveClicked { line_id } => Some(Intent::DeleteRow(line_id)),
        Gesture::SubmitClicked | Gesture::FormSubmitted => Some(Intent::SubmitRow),
        Gesture::CancelClicked => Some(Intent::Cancel),
        Gesture::FieldChanged { name, value } => Some(Intent::SetField { name, value }),
        Gesture::RefreshRequested => Some(Intent::Reload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_clicks_open_edit_unless_already_a_form() {
        let id = LineId::new(3);
        assert_eq!(
            classify(Gesture::RowClicked {
                line_id: id,
                in_edit_row: false
            }),
            Some(Intent::EnterEdit(id))
        );
        assert_eq!(
            classify(Gesture::RowClicked {
                line_id: id,
                in_edit_row: true
            }),
            None
        );
    }

    #[test]
    fn submit_button_and_form_submit_are_the_same_intent() {
        assert_eq!(classify(Gesture::SubmitClicked), Some(Intent::SubmitRow));
        assert_eq!(classify(Gesture::FormSubmitted), Some(Intent::SubmitRow));
    }

    #[test]
    fn remaining_gestures() {
        assert_eq!(classify(Gesture::HeadingClicked), Some(Intent::AddRow));
        assert_eq!(classify(Gesture::CancelClicked), Some(Intent::Cancel));
        assert_eq!(
            classify(Gesture::RemoveClicked {
                line_id: LineId::new(5)
            }),
            Some(Intent::DeleteRow(LineId::new(5)))
        );
        assert_eq!(
            classify(Gesture::FieldChanged {
                name: "name".into(),
                value: "x".into()
            }),
            Some(Intent::SetField {
                name: "name".into(),
                value: "x".into()
            })
        );
        assert_eq!(classify(Gesture::RefreshRequested), Some(Intent::Reload));
    }
}
