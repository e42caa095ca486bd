use crate::{
    dtos::enrollment::{CreateEnrollmentRequest, EnrollmentResponse, UpdateEnrollmentRequest},
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
use database::services::enrollment::{EnrollmentService, NewEnrollment};

const MESSAGES: ResourceMessages = ResourceMessages {
    not_found: "Enrollment not found",
    id_required: "Enrollment ID is required",
    duplicate: "Student is already enrolled in this course",
    invalid_reference: "Invalid student or course ID",
    has_dependents: "Cannot delete enrollment with existing records",
    fetch_failed: "Failed to fetch enrollments",
    create_failed: "Failed to create enrollment",
    update_failed: "Failed to update enrollment",
    delete_failed: "Failed to delete enrollment",
};

/// List enrollments (newest first) or fetch one by `id`, with student and course
#[utoipa::path(
    get,
    path = "/api/enrollment",
    params(IdQuery),
    responses(
        (status = 200, description = "An enrollment, or every enrollment", body = Vec<EnrollmentResponse>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Enrollment not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Enrollment"
)]
pub async fn get_enrollments(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let fail = |err| MESSAGES.store_error(Operation::Fetch, err);

    if let Some(id) = query.id()? {
        let enrollment = EnrollmentService::find_by_id(&state.db, id)
            .await
            .map_err(fail)?
            .ok_or_else(|| MESSAGES.not_found())?;

        return Ok(Json(EnrollmentResponse::from(enrollment)).into_response());
    }

    let enrollments: Vec<EnrollmentResponse> = EnrollmentService::list(&state.db)
        .await
        .map_err(fail)?
        .into_iter()
        .map(EnrollmentResponse::from)
        .collect();

    Ok(Json(enrollments).into_response())
}

/// Enroll a student in a course
#[utoipa::path(
    post,
    path = "/api/enrollment",
    request_body = CreateEnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 400, description = "Missing ids, or they reference nothing", body = ErrorBody),
        (status = 409, description = "Student is already enrolled in this course", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Enrollment"
)]
pub async fn create_enrollment(
    State(state): State<AppState>,
    payload: Result<Json<CreateEnrollmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let Json(request) = payload?;
    let enrollment = NewEnrollment::try_from(request)?;

    let created = EnrollmentService::create(&state.db, enrollment)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Create, err))?;

    log::info!("Created enrollment {}", created.0.enrollment_id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update the provided fields of an enrollment; `grade: null` clears the grade
#[utoipa::path(
    put,
    path = "/api/enrollment",
    request_body = UpdateEnrollmentRequest,
    responses(
        (status = 200, description = "Enrollment updated", body = EnrollmentResponse),
        (status = 400, description = "Enrollment ID is required, or ids reference nothing", body = ErrorBody),
        (status = 404, description = "Enrollment not found", body = ErrorBody),
        (status = 409, description = "Student is already enrolled in this course", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Enrollment"
)]
pub async fn update_enrollment(
    State(state): State<AppState>,
    payload: Result<Json<UpdateEnrollmentRequest>, JsonRejection>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let Json(request) = payload?;
    let (id, changes) = request.into_changes()?;
    let id = id.ok_or_else(|| MESSAGES.id_required())?;

    let updated = EnrollmentService::update(&state.db, id, changes)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Update, err))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/enrollment",
    params(IdQuery),
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageBody),
        (status = 400, description = "Enrollment ID is required", body = ErrorBody),
        (status = 404, description = "Enrollment not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Enrollment"
)]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = query.id()?.ok_or_else(|| MESSAGES.id_required())?;

    EnrollmentService::delete(&state.db, id)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Delete, err))?;

    log::info!("Deleted enrollment {id}");
    Ok(Json(MessageBody {
        message: "Enrollment deleted successfully".to_string(),
    }))
}
