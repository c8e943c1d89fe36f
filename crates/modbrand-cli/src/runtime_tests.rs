#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::time::Duration;

use modbrand_core::{Logger, User};

use super::*;
use crate::app::{App, Route, Tab};
use crate::fake_api::{FakeApi, SessionBehavior, image};

fn app() -> App {
    App::new(
        Logger::disabled(),
        "http://localhost:8080/login",
        Duration::from_secs(6),
    )
}

fn staff() -> User {
    let mut user = User::new(1, "octocat");
    user.is_staff = Some(true);
    user
}

#[tokio::test]
async fn staff_session_reaches_dashboard_with_pending_tab() {
    let api = FakeApi::new(staff());
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;

    let dash = app.dashboard().unwrap();
    assert_eq!(dash.user().unwrap().login, "octocat");
    assert!(dash.show_pending());
    assert_eq!(api.count("session"), 1);
    assert_eq!(api.count("list_images"), 1);
}

#[tokio::test]
async fn invalid_session_never_renders_dashboard() {
    let api = FakeApi::new(staff()).with_session(SessionBehavior::Invalid);
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    assert_eq!(app.route(), Route::Login);
    assert!(app.dashboard().is_none());
    assert_eq!(api.count("session"), 1);
    assert_eq!(api.count("list_images"), 0);
}

#[tokio::test]
async fn broken_session_lands_on_landing_without_loop() {
    let api = FakeApi::new(staff()).with_session(SessionBehavior::Broken);
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    assert_eq!(app.route(), Route::Landing);
    // Dashboard probe, then the landing page's own probe.
    assert_eq!(api.count("session"), 2);
}

#[tokio::test]
async fn landing_with_live_session_enters_dashboard() {
    let api = FakeApi::new(User::new(2, "modder"));
    let mut app = app();
    let effects = app.navigate(Route::Landing);
    settle(&mut app, &api, effects).await;
    assert_eq!(app.route(), Route::Dashboard);
    assert!(!app.dashboard().unwrap().show_pending());
}

#[tokio::test]
async fn accept_triggers_exactly_one_pending_refresh() {
    let api = FakeApi::new(staff()).with_pending(&["42", "43"]);
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;

    let effects = app.select_tab_at(2);
    settle(&mut app, &api, effects).await;
    assert_eq!(api.count("list_pending"), 1);

    let effects = app.accept_selected();
    settle(&mut app, &api, effects).await;
    assert_eq!(api.count("accept"), 1);
    assert_eq!(api.count("list_pending"), 2);
    let dash = app.dashboard().unwrap();
    assert_eq!(dash.review.items().len(), 1);
    assert_eq!(dash.review.items()[0].image.id, "43");
    assert_eq!(app.notices.current().unwrap().text, "Image 42 accepted");
}

#[tokio::test]
async fn rejected_accept_leaves_list_and_skips_refresh() {
    let api = FakeApi::new(staff())
        .with_pending(&["42"])
        .failing("accept", 500, "already approved");
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    let effects = app.select_tab_at(2);
    settle(&mut app, &api, effects).await;

    let effects = app.accept_selected();
    settle(&mut app, &api, effects).await;
    assert_eq!(api.count("list_pending"), 1);
    assert_eq!(
        app.notices.current().unwrap().text,
        "Failed to accept: already approved"
    );
    assert_eq!(app.dashboard().unwrap().review.items().len(), 1);
}

#[tokio::test]
async fn reject_deletes_submission_and_refetches_queue() {
    let api = FakeApi::new(staff()).with_pending(&["42", "43"]);
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    let effects = app.select_tab_at(2);
    settle(&mut app, &api, effects).await;

    let effects = app.reject_selected();
    settle(&mut app, &api, effects).await;
    assert_eq!(api.count("delete"), 1);
    assert_eq!(api.count("list_pending"), 2);
    let dash = app.dashboard().unwrap();
    assert_eq!(dash.review.items()[0].image.id, "43");
    assert!(!dash.review.is_deciding("42"));
    assert_eq!(app.notices.current().unwrap().text, "Image 42 rejected");
}

#[tokio::test]
async fn admin_verifies_submitter() {
    let mut admin = User::new(3, "hubot");
    admin.is_admin = Some(true);
    let api = FakeApi::new(admin).with_pending(&["42"]);
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    let effects = app.select_tab_at(2);
    settle(&mut app, &api, effects).await;

    let effects = app.verify_selected();
    settle(&mut app, &api, effects).await;
    assert_eq!(api.verified(), ["2"]);
    assert_eq!(api.count("list_pending"), 1);
    assert_eq!(app.notices.current().unwrap().text, "User 2 verified");
}

#[tokio::test]
async fn submitted_image_shows_up_after_reentering_overview() {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

    let api = FakeApi::new(User::new(2, "modder"));
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    assert!(app.dashboard().unwrap().images.items().is_empty());

    let effects = app.select_tab_at(1);
    settle(&mut app, &api, effects).await;
    app.begin_path_edit();
    app.path_input = file.path().display().to_string();
    let effects = app.commit_path();
    settle(&mut app, &api, effects).await;
    assert!(app.dashboard().unwrap().submission.can_submit());

    let effects = app.submit();
    settle(&mut app, &api, effects).await;
    assert_eq!(
        app.notices.current().unwrap().text,
        "Brand image submitted successfully!"
    );
    assert!(app.dashboard().unwrap().submission.staged().is_none());

    let effects = app.select_tab_at(0);
    settle(&mut app, &api, effects).await;
    let dash = app.dashboard().unwrap();
    assert_eq!(dash.tabs.selected(), Tab::Overview);
    assert_eq!(dash.images.items().len(), 1);
    assert!(dash.images.items()[0].is_pending());
}

#[tokio::test]
async fn rejected_upload_keeps_file_staged() {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&[1, 2, 3]).unwrap();

    let api = FakeApi::new(User::new(2, "modder")).failing("submit", 403, "User is banned");
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    app.select_tab_at(1);
    app.path_input = file.path().display().to_string();
    let effects = app.commit_path();
    settle(&mut app, &api, effects).await;
    let effects = app.submit();
    settle(&mut app, &api, effects).await;

    assert_eq!(
        app.notices.current().unwrap().text,
        "Upload failed: User is banned"
    );
    assert!(app.dashboard().unwrap().submission.can_submit());
}

#[tokio::test]
async fn missing_file_is_reported() {
    let api = FakeApi::new(User::new(2, "modder"));
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    app.select_tab_at(1);
    app.path_input = "/definitely/not/here.png".into();
    let effects = app.commit_path();
    settle(&mut app, &api, effects).await;
    let text = &app.notices.current().unwrap().text;
    assert!(text.starts_with("Could not read file: /definitely/not/here.png"));
}

#[tokio::test]
async fn delete_removes_image_and_refetches() {
    let api = FakeApi::new(User::new(2, "modder")).with_images(vec![image("9", "2", false)]);
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    let effects = app.delete_selected();
    settle(&mut app, &api, effects).await;
    assert!(api.images().is_empty());
    assert!(app.dashboard().unwrap().images.items().is_empty());
    assert_eq!(api.count("list_images"), 2);
}

#[tokio::test]
async fn logout_returns_to_landing() {
    let api = FakeApi::new(User::new(2, "modder"));
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    let effects = app.logout();
    // Landing re-probes; the fake still answers with a session, so stop
    // after the logout completion itself.
    let completion = execute(&api, effects.into_iter().next().unwrap()).await;
    app.handle_completion(completion);
    assert_eq!(app.route(), Route::Landing);
    assert!(app.user().is_none());
    assert_eq!(api.count("logout"), 1);
}

#[tokio::test]
async fn failed_logout_stays_on_dashboard() {
    let api = FakeApi::new(User::new(2, "modder")).failing("logout", 500, "db down");
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    settle(&mut app, &api, effects).await;
    let effects = app.logout();
    settle(&mut app, &api, effects).await;
    assert_eq!(app.route(), Route::Dashboard);
    assert_eq!(
        app.notices.current().unwrap().text,
        "Failed to log out: db down"
    );
}

#[tokio::test]
async fn spawned_effects_report_through_channel() {
    let api: Arc<dyn BrandApi> = Arc::new(FakeApi::new(User::new(2, "modder")));
    let (tx, mut rx) = mpsc::channel(8);
    let runtime = Runtime::new(api, tx, Logger::disabled());
    let mut app = app();
    let effects = app.navigate(Route::Dashboard);
    let mount = app.mount();
    runtime.spawn(effects);
    let completion = rx.recv().await.unwrap();
    assert_eq!(completion.mount, mount);
    assert!(matches!(completion.response, Response::Session(_, Ok(Some(_)))));
}

#[tokio::test]
async fn load_upload_names_file_after_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.webp");
    std::fs::write(&path, [1, 2, 3]).unwrap();
    let upload = load_upload(&path).await.unwrap();
    assert_eq!(upload.file_name, "logo.webp");
    assert_eq!(upload.mime, "image/webp");
    assert_eq!(upload.len(), 3);
}
