use crate::domain::models::{LineId, Row};

/// A cell of a rendered row. `field` is set for cells that become inputs in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMarkup {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub inner_html: String,
    pub field: Option<String>,
}

/// An interactive row together with the markup needed to re-render it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMarkup {
    pub row: Row,
    pub attrs: Vec<(String, String)>,
    pub cells: Vec<CellMarkup>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodySegment {
    /// Server content the client never interprets: totals, section headers, foreign rows.
    Opaque(String),
    Row(RowMarkup),
}

/// The server-rendered table body, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableBody {
    pub segments: Vec<BodySegment>,
}

impl TableBody {
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.segments.iter().filter_map(|segment| match segment {
            BodySegment::Row(markup) => Some(&markup.row),
            BodySegment::Opaque(_) => None,
        })
    }

    pub fn row(&self, line_id: LineId) -> Option<&Row> {
        self.rows().find(|row| row.line_id == line_id)
    }

    pub fn row_markup(&self, line_id: LineId) -> Option<&RowMarkup> {
        self.segments.iter().find_map(|segment| match segment {
            BodySegment::Row(markup) if markup.row.line_id == line_id => Some(markup),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
