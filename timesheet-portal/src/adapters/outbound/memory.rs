//! In-memory stand-in for the remote store and the page renderer.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    models::{ContainerContext, LineId, UserId},
    parse_duration_hours,
    ports::outbound::{FieldValues, PageRenderer, RemoteDataService},
    PortalError, RemoteError,
};

/// A call received by [`MemoryPortal`], for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Create { model: String, values: FieldValues },
    Write { model: String, id: LineId, values: FieldValues },
    Unlink { model: String, ids: Vec<LineId> },
    FetchPage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryLine {
    pub id: LineId,
    pub owner: UserId,
    pub date: String,
    pub name: String,
    pub duration: String,
}

#[derive(Debug, Default)]
struct Store {
    lines: Vec<MemoryLine>,
    next_id: i64,
    calls: Vec<RemoteCall>,
    fail_next_call: Option<RemoteError>,
    reject_next_call: bool,
    fail_next_page: Option<String>,
}

/// Keeps lines in memory and renders them the way the portal page does, totals included.
#[derive(Debug, Clone)]
pub struct MemoryPortal {
    context: ContainerContext,
    store: Arc<Mutex<Store>>,
}

impl MemoryPortal {
    pub fn new(context: ContainerContext) -> Self {
        Self {
            context,
            store: Arc::new(Mutex::new(Store {
                next_id: 1,
                ..Store::default()
            })),
        }
    }

    /// Seed a line. Ids are assigned in insertion order starting at 1.
    pub fn with_line(self, owner: UserId, date: &str, name: &str, duration: &str) -> Self {
        {
            let mut store = self.lock();
            let id = LineId::new(store.next_id);
            store.next_id += 1;
            store.lines.push(MemoryLine {
                id,
                owner,
                date: date.to_string(),
                name: name.to_string(),
                duration: duration.to_string(),
            });
        }
        self
    }

    /// Make the next create/write/unlink fail with `error`.
    pub fn fail_next_call(&self, error: RemoteError) {
        self.lock().fail_next_call = Some(error);
    }

    /// Make the next write/unlink answer `false` without touching the store.
    pub fn reject_next_call(&self) {
        self.lock().reject_next_call = true;
    }

    /// Make the next page fetch fail.
    pub fn fail_next_page(&self, message: &str) {
        self.lock().fail_next_page = Some(message.to_string());
    }

    pub fn lines(&self) -> Vec<MemoryLine> {
        self.lock().lines.clone()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    /// Calls other than page fetches.
    pub fn mutations(&self) -> Vec<RemoteCall> {
        self.calls()
            .into_iter()
            .filter(|call| *call != RemoteCall::FetchPage)
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().expect("memory portal lock poisoned")
    }

    fn render_page(&self, lines: &[MemoryLine]) -> String {
        let mut attrs = String::new();
        let related = [
            ("data-account-id", self.context.account_id),
            ("data-project-id", self.context.project_id),
            ("data-task-id", self.context.task_id),
        ];
        for (name, id) in related {
            if let Some(id) = id {
                attrs.push_str(&format!(r#" {}="{}""#, name, id.as_i64()));
            }
        }

        let rows: String = lines.iter().map(render_line).collect();
        let total_minutes: u32 = lines
            .iter()
            .filter_map(|line| parse_duration_hours(&line.duration))
            .map(|hours| (hours * 60.0).round() as u32)
            .sum();

        format!(
            r#"<!DOCTYPE html>
<html><head><title>Timesheets</title></head><body>
<div class="o_portal_wrap">
<div class="hr_timesheet_portal"{attrs}>
<h5>Add line</h5>
<table class="table table-sm">
<thead><tr><th>Date</th><th>Description</th><th>Duration</th><th></th></tr></thead>
<tbody>
{rows}<tr class="total"><td colspan="2">Total</td><td class="total-amount">{hh}:{mm:02}</td><td></td></tr>
</tbody>
</table>
</div>
</div>
</body></html>"#,
            attrs = attrs,
            rows = rows,
            hh = total_minutes / 60,
            mm = total_minutes % 60,
        )
    }
}

fn render_line(line: &MemoryLine) -> String {
    format!(
        concat!(
            r#"<tr data-line-id="{id}" data-user-id="{owner}">"#,
            r#"<td data-field-name="date" data-field-type="date">{date}</td>"#,
            r#"<td data-field-name="name">{name}</td>"#,
            r#"<td data-field-name="unit_amount" data-field-type="time-duration" data-field-value="{duration}">{duration}</td>"#,
            r#"<td><i class="fa fa-remove"></i></td>"#,
            "</tr>\n"
        ),
        id = line.id,
        owner = line.owner,
        date = ammonia::clean_text(&line.date),
        name = ammonia::clean_text(&line.name),
        duration = ammonia::clean_text(&line.duration),
    )
}

fn text_value(values: &FieldValues, name: &str) -> Option<String> {
    values.get(name).map(|value| match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

#[async_trait]
impl RemoteDataService for MemoryPortal {
    async fn create(&self, model: &str, values: FieldValues) -> Result<LineId, RemoteError> {
        let mut store = self.lock();
        store.calls.push(RemoteCall::Create {
            model: model.to_string(),
            values: values.clone(),
        });
        if let Some(error) = store.fail_next_call.take() {
            return Err(error);
        }

        let id = LineId::new(store.next_id);
        store.next_id += 1;
        let owner = values
            .get("user_id")
            .and_then(Value::as_i64)
            .map(UserId::new)
            .ok_or_else(|| RemoteError::new("ValidationError", "user_id is required"))?;
        let duration = match text_value(&values, "unit_amount").as_deref() {
            None | Some("0") => "0:00".to_string(),
            Some(other) => other.to_string(),
        };

        store.lines.push(MemoryLine {
            id,
            owner,
            date: text_value(&values, "date").unwrap_or_default(),
            name: text_value(&values, "name").unwrap_or_default(),
            duration,
        });
        Ok(id)
    }

    async fn write(
        &self,
        model: &str,
        id: LineId,
        values: FieldValues,
    ) -> Result<bool, RemoteError> {
        let mut store = self.lock();
        store.calls.push(RemoteCall::Write {
            model: model.to_string(),
            id,
            values: values.clone(),
        });
        if let Some(error) = store.fail_next_call.take() {
            return Err(error);
        }
        if std::mem::take(&mut store.reject_next_call) {
            return Ok(false);
        }

        let line = store
            .lines
            .iter_mut()
            .find(|line| line.id == id)
            .ok_or_else(|| RemoteError::new("MissingError", format!("Record {} does not exist", id)))?;
        if let Some(date) = text_value(&values, "date") {
            line.date = date;
        }
        if let Some(name) = text_value(&values, "name") {
            line.name = name;
        }
        if let Some(duration) = text_value(&values, "unit_amount") {
            line.duration = duration;
        }
        Ok(true)
    }

    async fn unlink(&self, model: &str, ids: &[LineId]) -> Result<bool, RemoteError> {
        let mut store = self.lock();
        store.calls.push(RemoteCall::Unlink {
            model: model.to_string(),
            ids: ids.to_vec(),
        });
        if let Some(error) = store.fail_next_call.take() {
            return Err(error);
        }
        if std::mem::take(&mut store.reject_next_call) {
            return Ok(false);
        }

        store.lines.retain(|line| !ids.contains(&line.id));
        Ok(true)
    }
}

#[async_trait]
impl PageRenderer for MemoryPortal {
    async fn fetch_page(&self) -> Result<String, PortalError> {
        let lines = {
            let mut store = self.lock();
            store.calls.push(RemoteCall::FetchPage);
            if let Some(message) = store.fail_next_page.take() {
                return Err(PortalError::page(message));
            }
            store.lines.clone()
        };
        Ok(self.render_page(&lines))
    }
}
