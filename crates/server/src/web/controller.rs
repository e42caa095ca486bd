//! Per-request state of an entity page.
//!
//! A controller is built fresh for every page request, loads its data from
//! the JSON API and renders the page. Form and modal state survive a failed
//! submit so the page can be shown again with the user's input intact.

use crate::web::{
    api::{ApiFailure, ResourceApi, fetch_list},
    html::{escape, js_string},
    pages::{FieldKind, FormField, Page, Reference, SelectOption},
    table::Table,
};
use axum::http::Method;
use futures::future::join_all;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, marker::PhantomData, sync::Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient toast shown on the next render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// What a successful mutation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Deleted,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created" => Some(Self::Created),
            "updated" => Some(Self::Updated),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }
}

pub struct PageController<P: Page> {
    api: Arc<dyn ResourceApi>,
    records: Vec<P::Record>,
    options: BTreeMap<Reference, Vec<SelectOption>>,
    loading: bool,
    modal_open: bool,
    editing: Option<i32>,
    form: BTreeMap<&'static str, String>,
    notices: Vec<Notice>,
    _page: PhantomData<P>,
}

impl<P: Page> PageController<P> {
    pub fn new(api: Arc<dyn ResourceApi>) -> Self {
        Self {
            api,
            records: Vec::new(),
            options: BTreeMap::new(),
            loading: true,
            modal_open: false,
            editing: None,
            form: blank_form(P::fields()),
            notices: Vec::new(),
            _page: PhantomData,
        }
    }

    /// Loads the page's own list and every reference list concurrently
    pub async fn mount(&mut self) {
        self.loading = true;

        let api = self.api.as_ref();
        let (records, references) = futures::join!(
            fetch_list::<P::Record>(api, P::ENDPOINT),
            join_all(P::REFERENCES.iter().map(|reference| async move {
                (*reference, reference.fetch(api).await)
            })),
        );

        for (reference, result) in references {
            match result {
                Ok(options) => {
                    self.options.insert(reference, options);
                }
                Err(err) => log::error!("Error fetching {reference:?} options: {err}"),
            }
        }

        self.apply_records(records);
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        let records = fetch_list::<P::Record>(self.api.as_ref(), P::ENDPOINT).await;
        self.apply_records(records);
    }

    fn apply_records(&mut self, records: Result<Vec<P::Record>, ApiFailure>) {
        match records {
            Ok(records) => self.records = records,
            Err(err) => {
                log::error!("Error fetching {}: {err}", P::PLURAL);
                self.error(format!("Failed to fetch {}", P::PLURAL));
            }
        }
        self.loading = false;
    }

    pub fn open_create(&mut self) {
        self.form = blank_form(P::fields());
        self.editing = None;
        self.modal_open = true;
    }

    pub fn edit(&mut self, record: &P::Record) {
        self.form = blank_form(P::fields());
        for (name, value) in P::form_values(record) {
            self.form.insert(name, value);
        }
        self.editing = Some(P::id(record));
        self.modal_open = true;
    }

    /// Reopens the modal with values posted back by the browser
    pub fn restore<I>(&mut self, editing: Option<i32>, values: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.form = blank_form(P::fields());
        for (name, value) in values {
            self.set_field(&name, value);
        }
        self.editing = editing;
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.editing = None;
        self.form = blank_form(P::fields());
    }

    /// Sets a form value; names that are not fields of the page are ignored
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = P::fields().iter().find(|field| field.name == name) {
            self.form.insert(field.name, value.into());
        }
    }

    /// Request body for the current form: optional blanks become `null`
    fn payload(&self) -> Value {
        let mut body = Map::new();

        for field in P::fields() {
            let value = self.form.get(field.name).cloned().unwrap_or_default();
            let value = if !field.required && value.is_empty() {
                Value::Null
            } else {
                Value::String(value)
            };
            body.insert(field.name.to_string(), value);
        }

        if let Some(id) = self.editing {
            body.insert(P::ID_FIELD.to_string(), Value::from(id));
        }

        Value::Object(body)
    }

    /// PUT when editing, POST otherwise; `None` means the request failed
    pub async fn submit(&mut self) -> Option<Outcome> {
        let (method, outcome) = match self.editing {
            Some(_) => (Method::PUT, Outcome::Updated),
            None => (Method::POST, Outcome::Created),
        };

        let result = self
            .api
            .send(method, P::ENDPOINT, Some(self.payload()))
            .await;

        match result {
            Ok(_) => {
                self.announce(outcome);
                self.close_modal();
                self.refresh().await;
                Some(outcome)
            }
            Err(err) => {
                log::warn!("Saving {} failed: {err}", P::NOUN);
                self.error(err.server_message().unwrap_or("Operation failed").to_string());
                None
            }
        }
    }

    /// Deletes the record with `id`; nothing happens unless `confirmed`
    pub async fn delete(&mut self, id: i32, confirmed: bool) -> Option<Outcome> {
        if !confirmed {
            return None;
        }

        let uri = format!("{}?id={id}", P::ENDPOINT);
        match self.api.send(Method::DELETE, &uri, None).await {
            Ok(_) => {
                self.announce(Outcome::Deleted);
                self.refresh().await;
                Some(Outcome::Deleted)
            }
            Err(err) => {
                log::warn!("Deleting {} {id} failed: {err}", P::NOUN);
                let fallback = format!("Failed to delete {}", P::NOUN.to_lowercase());
                self.error(err.server_message().map(str::to_string).unwrap_or(fallback));
                None
            }
        }
    }

    pub fn find(&self, id: i32) -> Option<&P::Record> {
        self.records.iter().find(|record| P::id(record) == id)
    }

    pub fn records(&self) -> &[P::Record] {
        &self.records
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn editing(&self) -> Option<i32> {
        self.editing
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    /// Queues the success toast for `outcome`
    pub fn announce(&mut self, outcome: Outcome) {
        self.notices.push(Notice {
            kind: NoticeKind::Success,
            message: format!("{} {} successfully", P::NOUN, outcome.as_str()),
        });
    }

    pub fn error(&mut self, message: String) {
        self.notices.push(Notice {
            kind: NoticeKind::Error,
            message,
        });
    }

    pub fn render(&self) -> String {
        let table = Table::new(P::columns())
            .on_edit(|record| {
                format!(
                    r#"<a class="btn btn-edit" href="{}?edit={}">Edit</a>"#,
                    P::PATH,
                    P::id(record)
                )
            })
            .on_delete(|record| {
                format!(
                    r#"<form class="inline" method="post" action="{path}/delete" onsubmit="return confirm('{prompt}')"><input type="hidden" name="id" value="{id}"><input type="hidden" name="confirmed" value="true"><button class="btn btn-delete" type="submit">Delete</button></form>"#,
                    path = P::PATH,
                    prompt = escape(&js_string(&P::confirm_prompt(record))),
                    id = P::id(record),
                )
            })
            .loading(self.loading);

        let mut html = String::new();
        html.push_str(&self.render_notices());
        html.push_str(&format!(
            r#"<div class="page-header"><h1>{title}</h1><a class="btn btn-primary" href="{path}?new">Add New {label}</a></div>"#,
            title = escape(P::TITLE),
            path = P::PATH,
            label = escape(P::LABEL),
        ));
        html.push_str(&table.render(&self.records));

        if self.modal_open {
            html.push_str(&self.render_modal());
        }

        html
    }

    fn render_notices(&self) -> String {
        if self.notices.is_empty() {
            return String::new();
        }

        let toasts: String = self
            .notices
            .iter()
            .map(|notice| {
                let class = match notice.kind {
                    NoticeKind::Success => "toast-success",
                    NoticeKind::Error => "toast-error",
                };
                format!(
                    r#"<div class="toast {class}" role="alert">{}</div>"#,
                    escape(&notice.message)
                )
            })
            .collect();

        format!(r#"<div class="toasts">{toasts}</div>"#)
    }

    fn render_modal(&self) -> String {
        let (title, submit) = match self.editing {
            Some(_) => (format!("Edit {}", P::LABEL), "Update"),
            None => (format!("Add New {}", P::LABEL), "Create"),
        };

        let editing = self
            .editing
            .map(|id| format!(r#"<input type="hidden" name="editing" value="{id}">"#))
            .unwrap_or_default();

        let fields: String = P::fields()
            .iter()
            .map(|field| self.render_field(field))
            .collect();

        format!(
            r#"<div class="modal-backdrop"><div class="modal" role="dialog"><h2>{title}</h2><form method="post" action="{path}">{editing}{fields}<div class="modal-actions"><a class="btn btn-secondary" href="{path}">Cancel</a><button class="btn btn-primary" type="submit">{submit}</button></div></form></div></div>"#,
            title = escape(&title),
            path = P::PATH,
        )
    }

    fn render_field(&self, field: &FormField) -> String {
        let value = self.field(field.name).unwrap_or_default();
        let required = if field.required { " required" } else { "" };
        let placeholder = field
            .placeholder
            .map(|p| format!(r#" placeholder="{}""#, escape(p)))
            .unwrap_or_default();

        let control = match field.kind {
            FieldKind::Select(reference) => {
                let options: String = self
                    .options
                    .get(&reference)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .map(|option| {
                        let selected = if option.value == value { " selected" } else { "" };
                        format!(
                            r#"<option value="{}"{selected}>{}</option>"#,
                            escape(&option.value),
                            escape(&option.label)
                        )
                    })
                    .collect();

                format!(
                    r#"<select id="{name}" name="{name}"{required}><option value="">Select {label}</option>{options}</select>"#,
                    name = field.name,
                    label = escape(field.label),
                )
            }
            kind => {
                let input_type = match kind {
                    FieldKind::Email => "email",
                    FieldKind::Tel => "tel",
                    FieldKind::Date => "date",
                    FieldKind::Number => "number",
                    _ => "text",
                };
                format!(
                    r#"<input type="{input_type}" id="{name}" name="{name}" value="{value}"{placeholder}{required}>"#,
                    name = field.name,
                    value = escape(value),
                )
            }
        };

        format!(
            r#"<div class="field"><label for="{name}">{label}</label>{control}</div>"#,
            name = field.name,
            label = escape(field.label),
        )
    }
}

fn blank_form(fields: &[FormField]) -> BTreeMap<&'static str, String> {
    fields
        .iter()
        .map(|field| (field.name, String::new()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::{NoticeKind, Outcome, PageController};
    use crate::web::{
        api::{ApiFailure, ResourceApi},
        pages::{CoursesPage, EnrollmentPage},
    };
    use async_trait::async_trait;
    use axum::http::{Method, StatusCode};
    use serde_json::{Value, json};
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    type Call = (Method, String, Option<Value>);

    /// Answers GETs from canned lists and records every request
    #[derive(Default)]
    struct FakeApi {
        lists: HashMap<&'static str, Value>,
        reject_writes: Option<&'static str>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResourceApi for FakeApi {
        async fn send(
            &self,
            method: Method,
            uri: &str,
            body: Option<Value>,
        ) -> Result<Value, ApiFailure> {
            self.calls
                .lock()
                .unwrap()
                .push((method.clone(), uri.to_string(), body));

            if method == Method::GET {
                return Ok(self.lists.get(uri).cloned().unwrap_or_else(|| json!([])));
            }

            match self.reject_writes {
                Some(message) => Err(ApiFailure::Rejected {
                    status: StatusCode::CONFLICT,
                    message: Some(message.to_string()),
                }),
                None => Ok(json!({})),
            }
        }
    }

    fn courses() -> Value {
        json!([
            {"courseId": 2, "courseName": "Databases", "department": "CS", "credit": 4, "enrollments": [], "teachings": []},
            {"courseId": 1, "courseName": "Algorithms", "department": "CS", "credit": 3, "enrollments": [], "teachings": []}
        ])
    }

    fn api_with_courses(reject_writes: Option<&'static str>) -> Arc<FakeApi> {
        Arc::new(FakeApi {
            lists: HashMap::from([("/courses", courses())]),
            reject_writes,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_mount_loads_records() {
        let api = api_with_courses(None);
        let mut page = PageController::<CoursesPage>::new(api.clone());
        page.mount().await;

        assert_eq!(page.records().len(), 2);
        assert_eq!(page.find(1).unwrap().course.course_name, "Algorithms");

        let html = page.render();
        assert!(html.contains("<td>Databases</td>"));
        assert!(html.contains(r#"href="/courses?edit=2""#));
        assert!(!page.is_modal_open());
    }

    #[tokio::test]
    async fn test_delete_prompt_is_quoted_for_script() {
        let api = Arc::new(FakeApi {
            lists: HashMap::from([(
                "/courses",
                json!([{"courseId": 7, "courseName": "C:\\temp\nO'Neil", "department": "CS", "credit": 3, "enrollments": [], "teachings": []}]),
            )]),
            ..Default::default()
        });
        let mut page = PageController::<CoursesPage>::new(api);
        page.mount().await;

        let html = page.render();
        assert!(html.contains(
            r"confirm('Are you sure you want to delete C:\\temp\nO\&#39;Neil?')"
        ));
    }

    #[tokio::test]
    async fn test_failed_list_fetch_becomes_notice() {
        struct Down;

        #[async_trait]
        impl ResourceApi for Down {
            async fn send(
                &self,
                _: Method,
                _: &str,
                _: Option<Value>,
            ) -> Result<Value, ApiFailure> {
                Err(ApiFailure::Transport("connection refused".into()))
            }
        }

        let mut page = PageController::<CoursesPage>::new(Arc::new(Down));
        page.mount().await;

        assert_eq!(page.notices()[0].kind, NoticeKind::Error);
        assert_eq!(page.notices()[0].message, "Failed to fetch courses");
    }

    #[tokio::test]
    async fn test_create_posts_form_and_refetches() {
        let api = api_with_courses(None);
        let mut page = PageController::<CoursesPage>::new(api.clone());
        page.mount().await;

        page.open_create();
        page.set_field("courseName", "Compilers");
        page.set_field("department", "CS");
        page.set_field("credit", "4");
        page.set_field("bogus", "ignored");

        assert_eq!(page.submit().await, Some(Outcome::Created));
        assert!(!page.is_modal_open());
        assert_eq!(page.notices()[0].message, "Course created successfully");

        let calls = api.calls();
        let (method, uri, body) = &calls[1];
        assert_eq!((method, uri.as_str()), (&Method::POST, "/courses"));
        assert_eq!(
            body.as_ref().unwrap(),
            &json!({"courseName": "Compilers", "department": "CS", "credit": "4"})
        );
        assert_eq!(calls[2].0, Method::GET);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_modal_and_form() {
        let api = api_with_courses(Some("Course not found"));
        let mut page = PageController::<CoursesPage>::new(api.clone());
        page.mount().await;

        let record = page.find(2).cloned().unwrap();
        page.edit(&record);
        page.set_field("credit", "5");

        assert_eq!(page.submit().await, None);
        assert!(page.is_modal_open());
        assert_eq!(page.editing(), Some(2));
        assert_eq!(page.field("credit"), Some("5"));
        assert_eq!(page.field("courseName"), Some("Databases"));
        assert_eq!(page.notices()[0].message, "Course not found");

        let calls = api.calls();
        let (method, _, body) = &calls[1];
        assert_eq!(method, &Method::PUT);
        assert_eq!(body.as_ref().unwrap()["courseId"], json!(2));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let api = api_with_courses(None);
        let mut page = PageController::<CoursesPage>::new(api.clone());
        page.mount().await;

        assert_eq!(page.delete(2, false).await, None);
        assert_eq!(api.calls().len(), 1);

        assert_eq!(page.delete(2, true).await, Some(Outcome::Deleted));
        let calls = api.calls();
        assert_eq!(calls[1].0, Method::DELETE);
        assert_eq!(calls[1].1, "/courses?id=2");
    }

    #[tokio::test]
    async fn test_rejected_delete_falls_back_to_generic_message() {
        struct Reject;

        #[async_trait]
        impl ResourceApi for Reject {
            async fn send(
                &self,
                method: Method,
                _: &str,
                _: Option<Value>,
            ) -> Result<Value, ApiFailure> {
                if method == Method::GET {
                    return Ok(json!([]));
                }
                Err(ApiFailure::Rejected {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: None,
                })
            }
        }

        let mut page = PageController::<EnrollmentPage>::new(Arc::new(Reject));
        page.mount().await;

        assert_eq!(page.delete(3, true).await, None);
        assert_eq!(page.notices()[0].message, "Failed to delete enrollment");
    }

    #[tokio::test]
    async fn test_blank_optional_field_is_sent_as_null() {
        let api = Arc::new(FakeApi {
            lists: HashMap::from([
                ("/students", json!([{"studentId": 1, "name": "Ravi", "dob": "2003-05-15", "department": "CS", "gender": "Male", "phone": "1", "email": "r@x.edu", "enrollments": []}])),
                ("/courses", courses()),
            ]),
            ..Default::default()
        });
        let mut page = PageController::<EnrollmentPage>::new(api.clone());
        page.mount().await;

        page.restore(
            Some(9),
            [
                ("studentId".to_string(), "1".to_string()),
                ("courseId".to_string(), "2".to_string()),
                ("grade".to_string(), String::new()),
            ],
        );
        assert_eq!(page.submit().await, Some(Outcome::Updated));

        let put = api
            .calls()
            .into_iter()
            .find(|(method, _, _)| *method == Method::PUT)
            .unwrap();
        assert_eq!(
            put.2.unwrap(),
            json!({"enrollmentId": 9, "studentId": "1", "courseId": "2", "grade": null})
        );
    }

    #[tokio::test]
    async fn test_reference_options_render_in_selects() {
        let api = Arc::new(FakeApi {
            lists: HashMap::from([
                ("/students", json!([{"studentId": 1, "name": "Ravi", "dob": "2003-05-15", "department": "CS", "gender": "Male", "phone": "1", "email": "r@x.edu", "enrollments": []}])),
                ("/courses", courses()),
            ]),
            ..Default::default()
        });
        let mut page = PageController::<EnrollmentPage>::new(api);
        page.mount().await;
        page.open_create();

        let html = page.render();
        assert!(html.contains(r#"<option value="1">Ravi</option>"#));
        assert!(html.contains(r#"<option value="2">Databases</option>"#));
        assert!(html.contains("Add New Enrollment"));
        assert!(html.contains(">Create</button>"));
    }
}
