use crate::{
    dtos::student::{CreateStudentRequest, StudentRecord, StudentResponse, UpdateStudentRequest},
    error::{ApiError, ErrorBody, MessageBody, Operation, ResourceMessages},
    routes::IdQuery,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::student::{NewStudent, StudentService};

const MESSAGES: ResourceMessages = ResourceMessages {
    not_found: "Student not found",
    id_required: "Student ID is required",
    duplicate: "Email already exists",
    invalid_reference: "Invalid student reference",
    has_dependents: "Cannot delete student with existing enrollments",
    fetch_failed: "Failed to fetch students",
    create_failed: "Failed to create student",
    update_failed: "Failed to update student",
    delete_failed: "Failed to delete student",
};

/// List students (newest first) or fetch one by `id`, with enrollments and their courses
#[utoipa::path(
    get,
    path = "/api/students",
    params(IdQuery),
    responses(
        (status = 200, description = "A student, or every student", body = Vec<StudentResponse>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Students"
)]
pub async fn get_students(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let fail = |err| MESSAGES.store_error(Operation::Fetch, err);

    if let Some(id) = query.id()? {
        let student = StudentService::find_by_id(&state.db, id)
            .await
            .map_err(fail)?
            .ok_or_else(|| MESSAGES.not_found())?;

        return Ok(Json(StudentResponse::from(student)).into_response());
    }

    let students: Vec<StudentResponse> = StudentService::list(&state.db)
        .await
        .map_err(fail)?
        .into_iter()
        .map(StudentResponse::from)
        .collect();

    Ok(Json(students).into_response())
}

/// Create a student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentRecord),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentRecord>), ApiError> {
    let Json(request) = payload?;
    let student = NewStudent::try_from(request)?;

    let created = StudentService::create(&state.db, student)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Create, err))?;

    log::info!("Created student {}", created.student_id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update the provided fields of a student
#[utoipa::path(
    put,
    path = "/api/students",
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentRecord),
        (status = 400, description = "Student ID is required", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<Json<StudentRecord>, ApiError> {
    let Json(request) = payload?;
    let (id, changes) = request.into_changes()?;
    let id = id.ok_or_else(|| MESSAGES.id_required())?;

    let updated = StudentService::update(&state.db, id, changes)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Update, err))?;

    Ok(Json(updated.into()))
}

/// Delete a student that has no enrollments
#[utoipa::path(
    delete,
    path = "/api/students",
    params(IdQuery),
    responses(
        (status = 200, description = "Student deleted", body = MessageBody),
        (status = 400, description = "Student ID is required", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 409, description = "Student still has enrollments", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = query.id()?.ok_or_else(|| MESSAGES.id_required())?;

    StudentService::delete(&state.db, id)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Delete, err))?;

    log::info!("Deleted student {id}");
    Ok(Json(MessageBody {
        message: "Student deleted successfully".to_string(),
    }))
}
