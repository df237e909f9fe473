use std::collections::BTreeMap;

use super::{FieldKind, LineId, Row};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
}

/// Transient state of the single row open for editing.
///
/// Holds the input values separately from any markup; the editable row is re-rendered from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub line_id: LineId,
    pub fields: Vec<SessionField>,
    /// Field that receives focus when the row is opened, the first input.
    pub focused: Option<String>,
    pub validation_error: Option<String>,
}

impl EditSession {
    /// Open a session seeded from the row's cells.
    pub fn from_row(row: &Row) -> Self {
        let fields: Vec<SessionField> = row
            .cells
            .iter()
            .map(|cell| SessionField {
                name: cell.name.clone(),
                kind: cell.kind.clone(),
                value: cell.seed_value().to_string(),
            })
            .collect();
        let focused = fields.first().map(|f| f.name.clone());

        Self {
            line_id: row.line_id,
            fields,
            focused,
            validation_error: None,
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Returns false when the row exposes no such input.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                self.validation_error = None;
                true
            }
            None => false,
        }
    }

    /// Values of every duration-typed input, in form order.
    pub fn duration_values(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.kind.is_duration())
            .map(|f| f.value.as_str())
    }

    /// Flat name -> value mapping of the whole form. A repeated name keeps its last value.
    pub fn form_fields(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

/// Edit-mode state of the table. There is no terminal state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing(EditSession),
}

impl EditState {
    pub fn editing_line(&self) -> Option<LineId> {
        match self {
            EditState::Viewing => None,
            EditState::Editing(session) => Some(session.line_id),
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        match self {
            EditState::Viewing => None,
            EditState::Editing(session) => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match self {
            EditState::Viewing => None,
            EditState::Editing(session) => Some(session),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing(_))
    }
}
