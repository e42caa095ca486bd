use crate::{
    dtos::faculty::{CreateFacultyRequest, FacultyRecord, FacultyResponse, UpdateFacultyRequest},
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
use database::services::faculty::{FacultyService, NewFaculty};

const MESSAGES: ResourceMessages = ResourceMessages {
    not_found: "Faculty not found",
    id_required: "Faculty ID is required",
    duplicate: "Email already exists",
    invalid_reference: "Invalid faculty reference",
    has_dependents: "Cannot delete faculty with existing teaching assignments",
    fetch_failed: "Failed to fetch faculty",
    create_failed: "Failed to create faculty",
    update_failed: "Failed to update faculty",
    delete_failed: "Failed to delete faculty",
};

/// List faculty (newest first) or fetch one by `id`, with teaching assignments and their courses
#[utoipa::path(
    get,
    path = "/api/faculty",
    params(IdQuery),
    responses(
        (status = 200, description = "A faculty member, or every faculty member", body = Vec<FacultyResponse>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Faculty not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Faculty"
)]
pub async fn get_faculty(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let fail = |err| MESSAGES.store_error(Operation::Fetch, err);

    if let Some(id) = query.id()? {
        let faculty = FacultyService::find_by_id(&state.db, id)
            .await
            .map_err(fail)?
            .ok_or_else(|| MESSAGES.not_found())?;

        return Ok(Json(FacultyResponse::from(faculty)).into_response());
    }

    let faculty: Vec<FacultyResponse> = FacultyService::list(&state.db)
        .await
        .map_err(fail)?
        .into_iter()
        .map(FacultyResponse::from)
        .collect();

    Ok(Json(faculty).into_response())
}

/// Create a faculty member
#[utoipa::path(
    post,
    path = "/api/faculty",
    request_body = CreateFacultyRequest,
    responses(
        (status = 201, description = "Faculty created", body = FacultyRecord),
        (status = 400, description = "Missing fields", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Faculty"
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    payload: Result<Json<CreateFacultyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FacultyRecord>), ApiError> {
    let Json(request) = payload?;
    let faculty = NewFaculty::try_from(request)?;

    let created = FacultyService::create(&state.db, faculty)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Create, err))?;

    log::info!("Created faculty {}", created.faculty_id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update the provided fields of a faculty member
#[utoipa::path(
    put,
    path = "/api/faculty",
    request_body = UpdateFacultyRequest,
    responses(
        (status = 200, description = "Faculty updated", body = FacultyRecord),
        (status = 400, description = "Faculty ID is required", body = ErrorBody),
        (status = 404, description = "Faculty not found", body = ErrorBody),
        (status = 409, description = "Email already exists", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Faculty"
)]
pub async fn update_faculty(
    State(state): State<AppState>,
    payload: Result<Json<UpdateFacultyRequest>, JsonRejection>,
) -> Result<Json<FacultyRecord>, ApiError> {
    let Json(request) = payload?;
    let (id, changes) = request.into_changes()?;
    let id = id.ok_or_else(|| MESSAGES.id_required())?;

    let updated = FacultyService::update(&state.db, id, changes)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Update, err))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/faculty",
    params(IdQuery),
    responses(
        (status = 200, description = "Faculty deleted", body = MessageBody),
        (status = 400, description = "Faculty ID is required", body = ErrorBody),
        (status = 404, description = "Faculty not found", body = ErrorBody),
        (status = 409, description = "Faculty still has teaching assignments", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Faculty"
)]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = query.id()?.ok_or_else(|| MESSAGES.id_required())?;

    FacultyService::delete(&state.db, id)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Delete, err))?;

    log::info!("Deleted faculty {id}");
    Ok(Json(MessageBody {
        message: "Faculty deleted successfully".to_string(),
    }))
}
