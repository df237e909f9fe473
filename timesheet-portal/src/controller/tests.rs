use std::sync::Arc;

use scraper::{Html, Selector};
use serde_json::json;

use super::dispatcher::INVALID_DURATION_MESSAGE;
use super::*;
use crate::adapters::outbound::{MemoryPortal, RemoteCall, ScriptedPrompt};
use crate::domain::models::{RecordId, UserId};

type TestController = PortalController<MemoryPortal, MemoryPortal, ScriptedPrompt>;

const ME: i64 = 7;
const SOMEONE_ELSE: i64 = 8;

fn portal() -> MemoryPortal {
    MemoryPortal::new(ContainerContext {
        account_id: Some(RecordId::new(1)),
        project_id: Some(RecordId::new(2)),
        task_id: Some(RecordId::new(3)),
    })
    .with_line(UserId::new(ME), "2021-03-01", "Meeting", "1:30")
    .with_line(UserId::new(ME), "2021-03-01", "Review", "0:45")
    .with_line(UserId::new(SOMEONE_ELSE), "2021-03-02", "Other person's work", "2:00")
}

async fn controller_with(
    portal: &MemoryPortal,
    prompt: ScriptedPrompt,
    options: PortalOptions,
) -> (TestController, Arc<ScriptedPrompt>) {
    let prompt = Arc::new(prompt);
    let remote = Arc::new(portal.clone());
    let controller = PortalController::load(
        remote.clone(),
        remote,
        prompt.clone(),
        SessionContext::new(UserId::new(ME)),
        options,
    )
    .await
    .unwrap();
    (controller, prompt)
}

async fn controller(portal: &MemoryPortal) -> (TestController, Arc<ScriptedPrompt>) {
    controller_with(portal, ScriptedPrompt::always(true), PortalOptions::default()).await
}

fn edit_rows(html: &str) -> usize {
    let doc = Html::parse_fragment(&format!("<table>{}</table>", html));
    doc.select(&Selector::parse("tr.edit").unwrap()).count()
}

fn line(id: i64) -> LineId {
    LineId::new(id)
}

#[tokio::test]
async fn load_reads_rows_and_container() {
    let portal = portal();
    let (controller, _) = controller(&portal).await;

    assert_eq!(controller.body().len(), 3);
    assert_eq!(controller.container().task_id, Some(RecordId::new(3)));
    assert_eq!(controller.state(), &EditState::Viewing);
    assert!(controller.banners().is_empty());
    assert_eq!(portal.calls(), vec![RemoteCall::FetchPage]);
}

#[tokio::test]
async fn clicking_own_row_opens_it_for_editing() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    let outcome = controller
        .handle(Gesture::RowClicked {
            line_id: line(1),
            in_edit_row: false,
        })
        .await;

    assert_eq!(outcome, Outcome::Editing(line(1)));
    let session = controller.edit_session().unwrap();
    assert_eq!(session.value("name"), Some("Meeting"));
    assert_eq!(session.value("unit_amount"), Some("1:30"));
    assert_eq!(session.focused.as_deref(), Some("date"));
    assert_eq!(edit_rows(&controller.render()), 1);
}

#[tokio::test]
async fn rows_of_other_users_are_not_editable_or_deletable() {
    let portal = portal();
    let (mut controller, prompt) = controller(&portal).await;

    assert_eq!(controller.enter_edit(line(3)), Outcome::Ignored);
    assert_eq!(controller.state(), &EditState::Viewing);

    assert_eq!(controller.delete_row(line(3)).await, Outcome::Ignored);
    assert!(prompt.questions().is_empty());
    assert!(portal.mutations().is_empty());
    assert_eq!(portal.lines().len(), 3);
}

#[tokio::test]
async fn opening_another_row_replaces_the_session() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    controller.set_field("name", "Changed".to_string());
    assert_eq!(controller.enter_edit(line(2)), Outcome::Editing(line(2)));

    assert_eq!(controller.state().editing_line(), Some(line(2)));
    assert_eq!(controller.edit_session().unwrap().value("name"), Some("Review"));
    assert_eq!(edit_rows(&controller.render()), 1);
}

#[tokio::test]
async fn clicks_inside_the_form_row_do_nothing() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;
    controller.enter_edit(line(1));
    controller.set_field("name", "Typed".to_string());

    let outcome = controller
        .handle(Gesture::RowClicked {
            line_id: line(1),
            in_edit_row: true,
        })
        .await;

    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(controller.edit_session().unwrap().value("name"), Some("Typed"));
}

#[tokio::test]
async fn cancel_is_local_and_idempotent() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    assert_eq!(controller.handle(Gesture::CancelClicked).await, Outcome::Ignored);

    controller.enter_edit(line(1));
    controller.set_field("name", "Discard me".to_string());
    assert_eq!(controller.handle(Gesture::CancelClicked).await, Outcome::Viewing);
    assert_eq!(controller.state(), &EditState::Viewing);
    assert_eq!(controller.body().row(line(1)).unwrap().description(), "Meeting");
    assert_eq!(edit_rows(&controller.render()), 0);

    assert_eq!(controller.handle(Gesture::CancelClicked).await, Outcome::Ignored);
    assert_eq!(portal.calls(), vec![RemoteCall::FetchPage]);
}

#[tokio::test]
async fn field_changes_need_an_open_session() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    let outcome = controller
        .handle(Gesture::FieldChanged {
            name: "name".into(),
            value: "x".into(),
        })
        .await;
    assert_eq!(outcome, Outcome::Ignored);

    controller.enter_edit(line(1));
    assert_eq!(
        controller.set_field("nonexistent", "x".to_string()),
        Outcome::Ignored
    );
}

#[tokio::test]
async fn add_creates_line_reloads_and_opens_it() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    let outcome = controller.handle(Gesture::HeadingClicked).await;

    assert_eq!(outcome, Outcome::Editing(line(4)));
    let calls = portal.calls();
    assert_eq!(calls.len(), 3);
    match &calls[1] {
        RemoteCall::Create { model, values } => {
            assert_eq!(model, "account.analytic.line");
            assert_eq!(values["user_id"], json!(ME));
            assert_eq!(values["account_id"], json!(1));
            assert_eq!(values["project_id"], json!(2));
            assert_eq!(values["task_id"], json!(3));
            assert_eq!(values["unit_amount"], json!(0));
            assert_eq!(values["name"], json!("/"));
        }
        other => panic!("expected create, got {:?}", other),
    }
    assert_eq!(calls[2], RemoteCall::FetchPage);

    assert_eq!(controller.body().len(), 4);
    assert_eq!(controller.edit_session().unwrap().value("name"), Some("/"));
}

#[tokio::test]
async fn add_without_related_ids_omits_them() {
    let portal = MemoryPortal::new(ContainerContext::default());
    let (mut controller, _) = controller(&portal).await;

    controller.add_row().await;

    match &portal.mutations()[0] {
        RemoteCall::Create { values, .. } => {
            assert!(!values.contains_key("account_id"));
            assert!(!values.contains_key("task_id"));
        }
        other => panic!("expected create, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_create_shows_banner_and_skips_reload() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;
    portal.fail_next_call(RemoteError::new("AccessError", "not allowed"));

    let outcome = controller.add_row().await;

    assert_eq!(
        outcome,
        Outcome::Failed(RemoteError::new("AccessError", "not allowed"))
    );
    assert_eq!(controller.banners()[0].banner_text(), "[AccessError]: not allowed");
    assert_eq!(portal.calls().len(), 2);
    assert_eq!(controller.state(), &EditState::Viewing);
}

#[tokio::test]
async fn submit_writes_form_and_reloads() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    controller
        .handle(Gesture::FieldChanged {
            name: "unit_amount".into(),
            value: "2:15".into(),
        })
        .await;
    let outcome = controller.handle(Gesture::SubmitClicked).await;

    assert_eq!(outcome, Outcome::Reloaded);
    match &portal.mutations()[0] {
        RemoteCall::Write { id, values, .. } => {
            assert_eq!(*id, line(1));
            assert_eq!(values["unit_amount"], json!("2:15"));
            assert_eq!(values["name"], json!("Meeting"));
            assert_eq!(values["date"], json!("2021-03-01"));
            assert_eq!(values.len(), 3);
        }
        other => panic!("expected write, got {:?}", other),
    }

    assert_eq!(controller.state(), &EditState::Viewing);
    let row = controller.body().row(line(1)).unwrap();
    assert_eq!(row.cell("unit_amount").unwrap().display, "2:15");

    let html = controller.render();
    assert_eq!(edit_rows(&html), 0);
    // The total comes from the server rendering, 2:15 + 0:45 + 2:00.
    assert!(html.contains("5:00"));
}

#[tokio::test]
async fn enter_in_the_form_submits_too() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;
    controller.enter_edit(line(2));

    assert_eq!(controller.handle(Gesture::FormSubmitted).await, Outcome::Reloaded);
    assert_eq!(portal.mutations().len(), 1);
}

#[tokio::test]
async fn malformed_duration_blocks_submit() {
    let portal = portal();
    let (mut controller, prompt) = controller(&portal).await;

    controller.enter_edit(line(1));
    controller.set_field("unit_amount", "abc".to_string());
    let outcome = controller.submit_row().await;

    assert_eq!(outcome, Outcome::Invalid);
    assert_eq!(prompt.alerts(), vec![INVALID_DURATION_MESSAGE.to_string()]);
    assert!(portal.mutations().is_empty());
    let session = controller.edit_session().unwrap();
    assert_eq!(session.line_id, line(1));
    assert_eq!(session.value("unit_amount"), Some("abc"));
    assert!(session.validation_error.is_some());

    // Correcting the value allows the retry.
    controller.set_field("unit_amount", "1:45".to_string());
    assert_eq!(controller.submit_row().await, Outcome::Reloaded);
}

#[tokio::test]
async fn submit_without_session_is_ignored() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    assert_eq!(controller.handle(Gesture::SubmitClicked).await, Outcome::Ignored);
    assert!(portal.mutations().is_empty());
}

#[tokio::test]
async fn rejected_write_keeps_row_in_edit_mode() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    controller.set_field("unit_amount", "2:15".to_string());
    portal.fail_next_call(RemoteError::new("ValidationError", "negative duration"));
    let outcome = controller.submit_row().await;

    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(
        controller.banners()[0].banner_text(),
        "[ValidationError]: negative duration"
    );
    assert_eq!(controller.state().editing_line(), Some(line(1)));
    assert_eq!(
        controller.edit_session().unwrap().value("unit_amount"),
        Some("2:15")
    );
    assert_eq!(portal.calls().len(), 2);

    let html = controller.render();
    assert!(html.starts_with(r#"<div class="alert alert-danger">"#));
    assert_eq!(edit_rows(&html), 1);
}

#[tokio::test]
async fn banners_stack_and_clear_on_reload() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    portal.fail_next_call(RemoteError::new("First", "one"));
    controller.add_row().await;
    portal.fail_next_call(RemoteError::new("Second", "two"));
    controller.add_row().await;

    let codes: Vec<&str> = controller.banners().iter().map(|b| b.code.as_str()).collect();
    assert_eq!(codes, vec!["Second", "First"]);

    assert_eq!(controller.handle(Gesture::RefreshRequested).await, Outcome::Reloaded);
    assert!(controller.banners().is_empty());
}

#[tokio::test]
async fn failed_reload_keeps_table_and_edit_state() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    portal.fail_next_page("connection reset");
    let outcome = controller.submit_row().await;

    assert_eq!(
        outcome,
        Outcome::Failed(RemoteError::new("PageError", "connection reset"))
    );
    assert_eq!(controller.state().editing_line(), Some(line(1)));
    assert_eq!(controller.body().len(), 3);
}

#[tokio::test]
async fn confirmed_delete_unlinks_and_reloads() {
    let portal = portal();
    let (mut controller, prompt) = controller(&portal).await;

    let outcome = controller
        .handle(Gesture::RemoveClicked { line_id: line(2) })
        .await;

    assert_eq!(outcome, Outcome::Reloaded);
    assert_eq!(
        prompt.questions(),
        vec!["Are you sure you want to remove line \"Review\"?".to_string()]
    );
    match &portal.mutations()[0] {
        RemoteCall::Unlink { ids, .. } => assert_eq!(ids, &vec![line(2)]),
        other => panic!("expected unlink, got {:?}", other),
    }
    assert!(controller.body().row(line(2)).is_none());
    assert_eq!(controller.body().len(), 2);
}

#[tokio::test]
async fn declined_delete_makes_no_call() {
    let portal = portal();
    let (mut controller, prompt) =
        controller_with(&portal, ScriptedPrompt::with_answers([false]), PortalOptions::default())
            .await;

    assert_eq!(controller.delete_row(line(1)).await, Outcome::Declined);
    assert_eq!(prompt.questions().len(), 1);
    assert!(portal.mutations().is_empty());
    assert_eq!(portal.lines().len(), 3);
}

#[tokio::test]
async fn delete_while_editing_another_row_ends_the_session() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    assert_eq!(controller.delete_row(line(2)).await, Outcome::Reloaded);
    assert_eq!(controller.state(), &EditState::Viewing);
}

#[tokio::test]
async fn failed_unlink_keeps_row_and_edit_state() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    portal.fail_next_call(RemoteError::new("AccessError", "not allowed"));
    let outcome = controller.delete_row(line(2)).await;

    assert_eq!(
        outcome,
        Outcome::Failed(RemoteError::new("AccessError", "not allowed"))
    );
    assert_eq!(
        controller.banners()[0].banner_text(),
        "[AccessError]: not allowed"
    );
    assert_eq!(controller.state().editing_line(), Some(line(1)));
    assert_eq!(controller.body().len(), 3);
    assert_eq!(portal.lines().len(), 3);
    // No reload after the failed unlink.
    assert_eq!(portal.calls().len(), 2);
}

#[tokio::test]
async fn unlink_answering_false_is_reported() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    portal.reject_next_call();
    let outcome = controller.delete_row(line(2)).await;

    assert!(matches!(outcome, Outcome::Failed(ref e) if e.code == "UnlinkRejected"));
    assert_eq!(
        controller.banners()[0].banner_text(),
        "[UnlinkRejected]: line 2 was not removed"
    );
    assert_eq!(controller.state().editing_line(), Some(line(1)));
    assert!(controller.body().row(line(2)).is_some());
    assert_eq!(portal.lines().len(), 3);
}

#[tokio::test]
async fn write_answering_false_is_reported() {
    let portal = portal();
    let (mut controller, _) = controller(&portal).await;

    controller.enter_edit(line(1));
    controller.set_field("name", "Planning".to_string());
    portal.reject_next_call();
    let outcome = controller.submit_row().await;

    assert!(matches!(outcome, Outcome::Failed(ref e) if e.code == "WriteRejected"));
    assert_eq!(
        controller.banners()[0].banner_text(),
        "[WriteRejected]: line 1 was not updated"
    );
    assert_eq!(controller.state().editing_line(), Some(line(1)));
    assert_eq!(controller.edit_session().unwrap().value("name"), Some("Planning"));
    assert_eq!(portal.lines()[0].name, "Meeting");
    assert_eq!(edit_rows(&controller.render()), 1);
}

#[tokio::test]
async fn builder_mode_makes_the_widget_inert() {
    let portal = portal();
    let options = PortalOptions {
        editable_mode: true,
        ..PortalOptions::default()
    };
    let (mut controller, _) =
        controller_with(&portal, ScriptedPrompt::always(true), options).await;

    assert_eq!(controller.handle(Gesture::HeadingClicked).await, Outcome::Ignored);
    assert_eq!(
        controller.dispatch(Intent::EnterEdit(line(1))).await,
        Outcome::Ignored
    );
    assert_eq!(
        controller.dispatch(Intent::DeleteRow(line(1))).await,
        Outcome::Ignored
    );
    assert!(portal.mutations().is_empty());
    assert_eq!(controller.state(), &EditState::Viewing);
}

#[tokio::test]
async fn load_fails_without_widget_on_page() {
    let portal = portal();
    let options = PortalOptions {
        selectors: crate::markup::WidgetSelectors::new("div.not_the_widget"),
        ..PortalOptions::default()
    };
    let remote = Arc::new(portal);
    let result = PortalController::load(
        remote.clone(),
        remote,
        Arc::new(ScriptedPrompt::default()),
        SessionContext::new(UserId::new(ME)),
        options,
    )
    .await;

    assert!(matches!(result, Err(PortalError::MissingTable)));
}
