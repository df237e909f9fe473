use crate::domain::models::{EditSession, EditState, SessionField};
use crate::domain::RemoteError;

use super::body::{BodySegment, CellMarkup, RowMarkup, TableBody};
use super::extract::escape;
use super::selectors::FORM_ID;

/// Visible state of the widget: banners first, then the table body.
pub fn render_widget(banners: &[RemoteError], body: &TableBody, state: &EditState) -> String {
    let mut html = render_banners(banners);
    html.push_str(&render_body(body, state));
    html
}

/// One `alert-danger` per failure, newest first.
pub fn render_banners(banners: &[RemoteError]) -> String {
    banners
        .iter()
        .map(|banner| {
            format!(
                r#"<div class="alert alert-danger">{}</div>"#,
                escape(&banner.banner_text())
            )
        })
        .collect()
}

/// The table body with the row being edited (if any) turned into a form row.
///
/// The editable row goes immediately above its original, which stays in place but hidden.
pub fn render_body(body: &TableBody, state: &EditState) -> String {
    let mut html = String::from("<tbody>");

    for segment in &body.segments {
        match segment {
            BodySegment::Opaque(markup) => html.push_str(markup),
            BodySegment::Row(row) => match state.session() {
                Some(session) if session.line_id == row.row.line_id => {
                    html.push_str(&render_edit_row(row, session));
                    html.push_str(&render_row(row, true));
                }
                _ => html.push_str(&render_row(row, false)),
            },
        }
    }

    html.push_str("</tbody>");
    html
}

fn render_row(row: &RowMarkup, hidden: bool) -> String {
    let mut attrs: Vec<(String, String)> = row
        .attrs
        .iter()
        .filter(|(name, _)| !(hidden && name == "style"))
        .cloned()
        .collect();
    if hidden {
        attrs.push(("style".to_string(), "display: none".to_string()));
    }

    let cells: String = row.cells.iter().map(render_static_cell).collect();
    format!("<tr{}>{}</tr>", render_attrs(&attrs), cells)
}

fn render_static_cell(cell: &CellMarkup) -> String {
    format!(
        "<{tag}{attrs}>{inner}</{tag}>",
        tag = cell.tag,
        attrs = render_attrs(&cell.attrs),
        inner = cell.inner_html
    )
}

fn render_edit_row(row: &RowMarkup, session: &EditSession) -> String {
    let mut attrs = row.attrs.clone();
    match attrs.iter_mut().find(|(name, _)| name == "class") {
        Some((_, class)) => {
            class.push_str(" edit");
        }
        None => attrs.push(("class".to_string(), "edit".to_string())),
    }

    let last = row.cells.len().saturating_sub(1);
    let mut cells = String::new();

    for (idx, cell) in row.cells.iter().enumerate() {
        let mut inner = String::new();
        if idx == last {
            inner.push_str(&render_form());
        }
        match cell
            .field
            .as_deref()
            .and_then(|name| session.fields.iter().find(|f| f.name == name))
        {
            Some(field) => inner.push_str(&render_input(field, session)),
            None => inner.push_str(&cell.inner_html),
        }

        cells.push_str(&format!(
            "<{tag}{attrs}>{inner}</{tag}>",
            tag = cell.tag,
            attrs = render_attrs(&cell.attrs),
            inner = inner
        ));
    }

    if row.cells.is_empty() {
        cells.push_str(&format!("<td>{}</td>", render_form()));
    }

    format!("<tr{}>{}</tr>", render_attrs(&attrs), cells)
}

fn render_input(field: &SessionField, session: &EditSession) -> String {
    let autofocus = if session.focused.as_deref() == Some(field.name.as_str()) {
        " autofocus"
    } else {
        ""
    };

    format!(
        r#"<input class="form-control" type="{}" value="{}" form="{}" name="{}"{}>"#,
        escape(field.kind.as_input_type()),
        escape(&field.value),
        FORM_ID,
        escape(&field.name),
        autofocus
    )
}

fn render_form() -> String {
    format!(
        r#"<form id="{}"><button class="btn btn-primary submit">Submit</button><button class="btn cancel" type="reset">Cancel</button></form>"#,
        FORM_ID
    )
}

fn render_attrs(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, escape(value)))
        .collect()
}
