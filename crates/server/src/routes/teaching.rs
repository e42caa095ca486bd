use crate::{
    dtos::teaching::{CreateTeachingRequest, TeachingResponse, UpdateTeachingRequest},
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
use database::services::teaching::{NewTeaching, TeachingService};

const MESSAGES: ResourceMessages = ResourceMessages {
    not_found: "Teaching assignment not found",
    id_required: "Teaching ID is required",
    duplicate: "This faculty is already assigned to this course in this semester",
    invalid_reference: "Invalid faculty or course ID",
    has_dependents: "Cannot delete teaching assignment with existing records",
    fetch_failed: "Failed to fetch teaching assignments",
    create_failed: "Failed to create teaching assignment",
    update_failed: "Failed to update teaching assignment",
    delete_failed: "Failed to delete teaching assignment",
};

/// List teaching assignments (newest first) or fetch one by `id`, with faculty and course
#[utoipa::path(
    get,
    path = "/api/teaching",
    params(IdQuery),
    responses(
        (status = 200, description = "A teaching assignment, or every assignment", body = Vec<TeachingResponse>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Teaching assignment not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Teaching"
)]
pub async fn get_teachings(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let fail = |err| MESSAGES.store_error(Operation::Fetch, err);

    if let Some(id) = query.id()? {
        let teaching = TeachingService::find_by_id(&state.db, id)
            .await
            .map_err(fail)?
            .ok_or_else(|| MESSAGES.not_found())?;

        return Ok(Json(TeachingResponse::from(teaching)).into_response());
    }

    let teachings: Vec<TeachingResponse> = TeachingService::list(&state.db)
        .await
        .map_err(fail)?
        .into_iter()
        .map(TeachingResponse::from)
        .collect();

    Ok(Json(teachings).into_response())
}

/// Assign a faculty member to a course for a semester
#[utoipa::path(
    post,
    path = "/api/teaching",
    request_body = CreateTeachingRequest,
    responses(
        (status = 201, description = "Teaching assignment created", body = TeachingResponse),
        (status = 400, description = "Missing fields, or ids reference nothing", body = ErrorBody),
        (status = 409, description = "Already assigned for this semester", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Teaching"
)]
pub async fn create_teaching(
    State(state): State<AppState>,
    payload: Result<Json<CreateTeachingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TeachingResponse>), ApiError> {
    let Json(request) = payload?;
    let teaching = NewTeaching::try_from(request)?;

    let created = TeachingService::create(&state.db, teaching)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Create, err))?;

    log::info!("Created teaching assignment {}", created.0.teaching_id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/teaching",
    request_body = UpdateTeachingRequest,
    responses(
        (status = 200, description = "Teaching assignment updated", body = TeachingResponse),
        (status = 400, description = "Teaching ID is required, or ids reference nothing", body = ErrorBody),
        (status = 404, description = "Teaching assignment not found", body = ErrorBody),
        (status = 409, description = "Already assigned for this semester", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Teaching"
)]
pub async fn update_teaching(
    State(state): State<AppState>,
    payload: Result<Json<UpdateTeachingRequest>, JsonRejection>,
) -> Result<Json<TeachingResponse>, ApiError> {
    let Json(request) = payload?;
    let (id, changes) = request.into_changes()?;
    let id = id.ok_or_else(|| MESSAGES.id_required())?;

    let updated = TeachingService::update(&state.db, id, changes)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Update, err))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/teaching",
    params(IdQuery),
    responses(
        (status = 200, description = "Teaching assignment deleted", body = MessageBody),
        (status = 400, description = "Teaching ID is required", body = ErrorBody),
        (status = 404, description = "Teaching assignment not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Teaching"
)]
pub async fn delete_teaching(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = query.id()?.ok_or_else(|| MESSAGES.id_required())?;

    TeachingService::delete(&state.db, id)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Delete, err))?;

    log::info!("Deleted teaching assignment {id}");
    Ok(Json(MessageBody {
        message: "Teaching assignment deleted successfully".to_string(),
    }))
}
