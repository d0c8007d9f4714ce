mod support;

use axum::http::StatusCode;
use support::{body_text, location, TestApp};
use tasklist_core::NewTask;

#[tokio::test]
async fn add_redirects_with_success_notice_and_lists_task() {
    let app = TestApp::new();

    let response = app.post_form("/add", "task=Buy+milk&priority=high").await;
    assert_eq!(
        location(&response),
        "/?notice=Task+added+successfully%21&kind=success"
    );

    let page = body_text(app.get(&location(&response)).await).await;
    assert!(page.contains("Task added successfully!"));
    assert!(page.contains("Buy milk"));
    assert_eq!(app.store.get(1).unwrap().priority, "high");
}

#[tokio::test]
async fn add_without_priority_defaults_to_medium() {
    let app = TestApp::new();

    app.post_form("/add", "task=plain").await;
    assert_eq!(app.store.get(1).unwrap().priority, "medium");
}

#[tokio::test]
async fn add_rejects_empty_and_long_text_without_creating() {
    let app = TestApp::new();

    let empty = app.post_form("/add", "task=").await;
    assert!(location(&empty).contains("Task+cannot+be+empty%21"));
    assert!(location(&empty).ends_with("kind=error"));

    let missing = app.post_form("/add", "priority=low").await;
    assert!(location(&missing).contains("kind=error"));

    let long = app
        .post_form("/add", &format!("task={}", "x".repeat(201)))
        .await;
    assert!(location(&long).contains("too+long"));

    assert_eq!(app.store.stats().unwrap().total, 0);
}

#[tokio::test]
async fn toggle_reports_completed_then_reopened() {
    let app = TestApp::new();
    app.store.create(&NewTask::new("A")).unwrap();

    let first = app.get("/toggle/1").await;
    assert!(location(&first).contains("Task+completed%21"));
    assert!(app.store.get(1).unwrap().completed);

    let second = app.get("/toggle/1").await;
    assert!(location(&second).contains("Task+reopened%21"));
    assert!(!app.store.get(1).unwrap().completed);
}

#[tokio::test]
async fn toggle_and_delete_missing_task_redirect_with_not_found() {
    let app = TestApp::new();

    for uri in ["/toggle/9", "/delete/9", "/edit/9"] {
        let response = app.get(uri).await;
        assert_eq!(
            location(&response),
            "/?notice=Task+not+found%21&kind=error",
            "uri {uri}"
        );
    }
}

#[tokio::test]
async fn non_integer_ids_redirect_with_not_found() {
    let app = TestApp::new();
    app.store.create(&NewTask::new("keep")).unwrap();

    for uri in [
        "/toggle/abc",
        "/delete/abc",
        "/edit/abc",
        "/toggle/99999999999999999999",
    ] {
        let response = app.get(uri).await;
        assert_eq!(
            location(&response),
            "/?notice=Task+not+found%21&kind=error",
            "uri {uri}"
        );
    }

    let response = app.post_form("/edit/1.5", "task=changed").await;
    assert!(location(&response).contains("Task+not+found%21"));

    let task = app.store.get(1).unwrap();
    assert_eq!(task.task, "keep");
    assert!(!task.completed);
}

#[tokio::test]
async fn delete_removes_task() {
    let app = TestApp::new();
    app.store.create(&NewTask::new("A")).unwrap();

    let response = app.get("/delete/1").await;
    assert!(location(&response).contains("Task+deleted+successfully%21"));
    assert!(app.store.get(1).is_err());
}

#[tokio::test]
async fn edit_form_shows_current_values() {
    let app = TestApp::new();
    app.store
        .create(&NewTask::new("write report").with_priority("low"))
        .unwrap();

    let response = app.get("/edit/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("value=\"write report\""));
    assert!(page.contains("<option value=\"low\" selected>"));
}

#[tokio::test]
async fn edit_submit_updates_and_redirects() {
    let app = TestApp::new();
    app.store.create(&NewTask::new("draft")).unwrap();

    let response = app.post_form("/edit/1", "task=final&priority=high").await;
    assert!(location(&response).contains("Task+updated+successfully%21"));

    let task = app.store.get(1).unwrap();
    assert_eq!(task.task, "final");
    assert_eq!(task.priority, "high");
}

#[tokio::test]
async fn rejected_edit_rerenders_form_with_entered_values() {
    let app = TestApp::new();
    let original = app.store.create(&NewTask::new("keep")).unwrap();

    let response = app.post_form("/edit/1", "task=&priority=high").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Task cannot be empty!"));
    assert!(page.contains("value=\"\""));
    assert!(page.contains("<option value=\"high\" selected>"));
    assert!(page.contains("keep"));

    assert_eq!(app.store.get(1).unwrap(), original);
}

#[tokio::test]
async fn edit_submit_for_missing_task_redirects() {
    let app = TestApp::new();

    let response = app.post_form("/edit/4", "task=anything").await;
    assert!(location(&response).contains("Task+not+found%21"));
}

#[tokio::test]
async fn stats_page_shows_totals_and_breakdown() {
    let app = TestApp::new();
    app.store
        .create(&NewTask::new("A").with_priority("high"))
        .unwrap();
    app.store
        .create(&NewTask::new("B").with_priority("<low>"))
        .unwrap();
    app.store.toggle(1).unwrap();

    let response = app.get("/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Total: 2"));
    assert!(page.contains("Completed: 1"));
    assert!(page.contains("Pending: 1"));
    assert!(page.contains("<td>high</td><td>1</td>"));
    assert!(page.contains("<td>&lt;low&gt;</td><td>1</td>"));
}

#[tokio::test]
async fn index_escapes_task_text() {
    let app = TestApp::new();
    app.store
        .create(&NewTask::new("<img src=x onerror=alert(1)>"))
        .unwrap();

    let page = body_text(app.get("/").await).await;
    assert!(!page.contains("<img src=x"));
    assert!(page.contains("&lt;img src=x onerror=alert(1)&gt;"));
}
