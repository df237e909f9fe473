use std::str::FromStr;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::domain::{
    models::{ContainerContext, FieldCell, FieldKind, LineId, Row, UserId},
    PortalError,
};

use super::body::{BodySegment, CellMarkup, RowMarkup, TableBody};
use super::selectors::*;

/// Locate the widget in a fetched page and parse its table body.
///
/// The first container matching the selector that owns a `<tbody>` wins, even when the page
/// contains more than one.
pub fn extract_table(
    html: &str,
    selectors: &WidgetSelectors,
) -> Result<(ContainerContext, TableBody), PortalError> {
    let document = Html::parse_document(html);
    let container_selector = selectors.container()?;
    let tbody_selector = selectors.tbody()?;

    let (container, tbody) = document
        .select(&container_selector)
        .find_map(|container| {
            container
                .select(&tbody_selector)
                .next()
                .map(|tbody| (container, tbody))
        })
        .ok_or(PortalError::MissingTable)?;

    let context = ContainerContext {
        account_id: parse_attr(container, ATTR_ACCOUNT_ID),
        project_id: parse_attr(container, ATTR_PROJECT_ID),
        task_id: parse_attr(container, ATTR_TASK_ID),
    };

    Ok((context, parse_body(tbody)))
}

fn parse_body(tbody: ElementRef<'_>) -> TableBody {
    let mut segments = Vec::new();

    for node in tbody.children() {
        if let Some(element) = ElementRef::wrap(node) {
            match parse_row(element) {
                Some(row) => segments.push(BodySegment::Row(row)),
                None => segments.push(BodySegment::Opaque(element.html())),
            }
        } else if let Some(text) = node.value().as_text() {
            if !text.trim().is_empty() {
                segments.push(BodySegment::Opaque(escape(text)));
            }
        }
    }

    TableBody { segments }
}

fn parse_row(element: ElementRef<'_>) -> Option<RowMarkup> {
    if element.value().name() != "tr" {
        return None;
    }
    let raw_line_id = element.value().attr(ATTR_LINE_ID)?;

    let (Some(line_id), Some(owner)) = (
        parse_attr::<LineId>(element, ATTR_LINE_ID),
        parse_attr::<UserId>(element, ATTR_USER_ID),
    ) else {
        debug!(line_id = raw_line_id, "Row without usable line or owner id kept as static markup");
        return None;
    };

    let mut fields = Vec::new();
    let mut cells = Vec::new();

    for cell in element.children().filter_map(ElementRef::wrap) {
        let field = cell.value().attr(ATTR_FIELD_NAME).map(str::to_string);

        if let Some(name) = &field {
            fields.push(FieldCell {
                name: name.clone(),
                kind: FieldKind::from_attr(cell.value().attr(ATTR_FIELD_TYPE)),
                display: cell.text().collect::<String>().trim().to_string(),
                override_value: cell.value().attr(ATTR_FIELD_VALUE).map(str::to_string),
            });
        }

        cells.push(CellMarkup {
            tag: cell.value().name().to_string(),
            attrs: owned_attrs(cell),
            inner_html: cell.inner_html(),
            field,
        });
    }

    Some(RowMarkup {
        row: Row {
            line_id,
            owner,
            cells: fields,
        },
        attrs: owned_attrs(element),
        cells,
    })
}

fn parse_attr<T: FromStr>(element: ElementRef<'_>, name: &str) -> Option<T> {
    element.value().attr(name).and_then(|v| v.parse().ok())
}

fn owned_attrs(element: ElementRef<'_>) -> Vec<(String, String)> {
    element
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub(crate) fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}
