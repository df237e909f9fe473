use super::{LineId, RecordId, UserId};

/// Input type of the field `time-duration`. Values of such fields are validated before submit.
pub const TIME_DURATION: &str = "time-duration";

/// Field carrying the line's description, shown in the delete confirmation.
pub const DESCRIPTION_FIELD: &str = "name";

/// Input type of an editable cell, taken from its `data-field-type` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Other(String),
}

impl FieldKind {
    /// Absent or empty attribute means plain text.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("text") => FieldKind::Text,
            Some(other) => FieldKind::Other(other.to_string()),
        }
    }

    pub fn as_input_type(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Other(kind) => kind,
        }
    }

    pub fn is_duration(&self) -> bool {
        self.as_input_type() == TIME_DURATION
    }
}

/// One editable cell of a row.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCell {
    pub name: String,
    pub kind: FieldKind,
    /// Text content as rendered by the server.
    pub display: String,
    /// Raw value declared by the server when the display text is formatted.
    pub override_value: Option<String>,
}

impl FieldCell {
    /// Initial value of the input control: the override when it is non-empty, else the display text.
    pub fn seed_value(&self) -> &str {
        match self.override_value.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => &self.display,
        }
    }
}

/// A time-entry line as currently rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub line_id: LineId,
    pub owner: UserId,
    pub cells: Vec<FieldCell>,
}

impl Row {
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }

    pub fn cell(&self, name: &str) -> Option<&FieldCell> {
        self.cells.iter().find(|cell| cell.name == name)
    }

    pub fn description(&self) -> &str {
        self.cell(DESCRIPTION_FIELD)
            .map(|cell| cell.display.as_str())
            .unwrap_or_default()
    }
}

/// Identifiers the widget container is bound to; new lines are created against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerContext {
    pub account_id: Option<RecordId>,
    pub project_id: Option<RecordId>,
    pub task_id: Option<RecordId>,
}
