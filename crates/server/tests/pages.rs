use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tower::ServiceExt;

async fn setup() -> (DatabaseConnection, Router) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let app = server::app(db.clone());
    (db, app)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_dashboard_lists_pages() {
    let (_, app) = setup().await;

    let (status, html) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Welcome to College Management System"));
    assert!(html.contains(r#"<a href="/" class="active">Dashboard</a>"#));
}

#[tokio::test]
async fn test_empty_page_shows_empty_state() {
    let (_, app) = setup().await;

    let (status, html) = get(&app, "/courses").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No data available"));
    assert!(html.contains("Add New Course"));
}

#[tokio::test]
async fn test_create_through_form_redirects() {
    let (_, app) = setup().await;

    let (status, location, _) = post_form(
        &app,
        "/courses",
        "courseName=Data+Structures&department=Computer+Science&credit=4",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/courses?done=created"));

    let (_, html) = get(&app, "/courses?done=created").await;
    assert!(html.contains("Course created successfully"));
    assert!(html.contains("<td>Data Structures</td>"));
}

#[tokio::test]
async fn test_failed_submit_rerenders_form() {
    let (db, app) = setup().await;
    database::seed::seed(&db).await.unwrap();

    let (status, location, html) = post_form(
        &app,
        "/students",
        "name=Copy&dob=2004-01-01&department=CS&gender=Female&phone=123&email=priya.patel%40university.edu",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
    assert!(html.contains("Email already exists"));
    assert!(html.contains(r#"value="Copy""#));
    assert!(html.contains("Add New Student"));
}

#[tokio::test]
async fn test_edit_page_prefills_form() {
    let (db, app) = setup().await;
    database::seed::seed(&db).await.unwrap();

    let (_, html) = get(&app, "/enrollment?edit=1").await;
    assert!(html.contains("Edit Enrollment"));
    assert!(html.contains(r#"<input type="hidden" name="editing" value="1">"#));
    assert!(html.contains(">Update</button>"));
}

#[tokio::test]
async fn test_delete_with_dependents_shows_error() {
    let (db, app) = setup().await;
    database::seed::seed(&db).await.unwrap();

    let (status, _, html) = post_form(&app, "/courses/delete", "id=1&confirmed=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        html.contains("Cannot delete course with existing enrollments or teaching assignments")
    );
}

#[tokio::test]
async fn test_unconfirmed_delete_is_noop() {
    let (db, app) = setup().await;
    database::seed::seed(&db).await.unwrap();

    let (status, location, _) = post_form(&app, "/enrollment/delete", "id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);

    let (status, location, _) = post_form(&app, "/enrollment/delete", "id=1&confirmed=true").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/enrollment?done=deleted"));
}
