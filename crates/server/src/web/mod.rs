//! Server-rendered pages on top of the JSON API.

pub mod api;
pub mod controller;
pub mod html;
pub mod pages;
pub mod shell;
pub mod table;

use crate::web::{
    api::{InProcessApi, ResourceApi},
    controller::{Outcome, PageController},
    pages::{CoursesPage, EnrollmentPage, FacultyPage, Page, StudentsPage, TeachingPage},
};
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};

#[derive(Clone)]
pub struct WebState {
    pub api: Arc<dyn ResourceApi>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub new: Option<String>,
    pub edit: Option<String>,
    pub done: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: String,
    pub confirmed: Option<String>,
}

/// Page routes; `api` is the JSON router the pages read and write through
pub fn router(api: Router) -> Router {
    with_api(Arc::new(InProcessApi::new(api)))
}

pub fn with_api(api: Arc<dyn ResourceApi>) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .merge(page_routes::<StudentsPage>())
        .merge(page_routes::<FacultyPage>())
        .merge(page_routes::<CoursesPage>())
        .merge(page_routes::<EnrollmentPage>())
        .merge(page_routes::<TeachingPage>())
        .with_state(WebState { api })
}

fn page_routes<P: Page>() -> Router<WebState> {
    Router::new()
        .route(P::PATH, get(show::<P>).post(save::<P>))
        .route(&format!("{}/delete", P::PATH), post(remove::<P>))
}

async fn dashboard() -> Html<String> {
    Html(shell::layout("Dashboard", "/", &shell::dashboard()))
}

fn page<P: Page>(controller: &PageController<P>) -> Response {
    Html(shell::layout(P::TITLE, P::PATH, &controller.render())).into_response()
}

async fn show<P: Page>(State(state): State<WebState>, Query(query): Query<PageQuery>) -> Response {
    let mut controller = PageController::<P>::new(state.api);
    controller.mount().await;

    if let Some(outcome) = query.done.as_deref().and_then(Outcome::parse) {
        controller.announce(outcome);
    }

    if query.new.is_some() {
        controller.open_create();
    } else if let Some(id) = query.edit.as_deref().and_then(|id| id.parse::<i32>().ok()) {
        match controller.find(id).cloned() {
            Some(record) => controller.edit(&record),
            None => controller.error(format!("{} not found", P::NOUN)),
        }
    }

    page(&controller)
}

async fn save<P: Page>(
    State(state): State<WebState>,
    Form(mut form): Form<HashMap<String, String>>,
) -> Response {
    let editing = form
        .remove("editing")
        .and_then(|id| id.trim().parse::<i32>().ok());

    let mut controller = PageController::<P>::new(state.api);
    controller.mount().await;
    controller.restore(editing, form);

    match controller.submit().await {
        Some(outcome) => {
            Redirect::to(&format!("{}?done={}", P::PATH, outcome.as_str())).into_response()
        }
        None => page(&controller),
    }
}

async fn remove<P: Page>(State(state): State<WebState>, Form(form): Form<DeleteForm>) -> Response {
    let mut controller = PageController::<P>::new(state.api);
    controller.mount().await;

    let confirmed = matches!(form.confirmed.as_deref(), Some("true" | "on" | "1"));
    let outcome = match form.id.trim().parse::<i32>() {
        Ok(id) => controller.delete(id, confirmed).await,
        Err(_) => {
            controller.error(format!("Failed to delete {}", P::NOUN.to_lowercase()));
            None
        }
    };

    match outcome {
        Some(outcome) => {
            Redirect::to(&format!("{}?done={}", P::PATH, outcome.as_str())).into_response()
        }
        None => page(&controller),
    }
}
