use crate::{
    dtos::course::{CourseRecord, CourseResponse, CreateCourseRequest, UpdateCourseRequest},
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
use database::services::course::{CourseService, NewCourse};

const MESSAGES: ResourceMessages = ResourceMessages {
    not_found: "Course not found",
    id_required: "Course ID is required",
    duplicate: "Course already exists",
    invalid_reference: "Invalid course reference",
    has_dependents: "Cannot delete course with existing enrollments or teaching assignments",
    fetch_failed: "Failed to fetch courses",
    create_failed: "Failed to create course",
    update_failed: "Failed to update course",
    delete_failed: "Failed to delete course",
};

/// List courses (newest first) or fetch one by `id`
///
/// The list carries bare enrollment and teaching rows; a single course also
/// joins each enrollment's student and each assignment's faculty member.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(IdQuery),
    responses(
        (status = 200, description = "A course, or every course", body = Vec<CourseResponse>),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ApiError> {
    let fail = |err| MESSAGES.store_error(Operation::Fetch, err);

    if let Some(id) = query.id()? {
        let course = CourseService::find_by_id(&state.db, id)
            .await
            .map_err(fail)?
            .ok_or_else(|| MESSAGES.not_found())?;

        return Ok(Json(CourseResponse::from(course)).into_response());
    }

    let courses: Vec<CourseResponse> = CourseService::list(&state.db)
        .await
        .map_err(fail)?
        .into_iter()
        .map(CourseResponse::from)
        .collect();

    Ok(Json(courses).into_response())
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseRecord),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CourseRecord>), ApiError> {
    let Json(request) = payload?;
    let course = NewCourse::try_from(request)?;

    let created = CourseService::create(&state.db, course)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Create, err))?;

    log::info!("Created course {}", created.course_id);
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update the provided fields of a course
#[utoipa::path(
    put,
    path = "/api/courses",
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseRecord),
        (status = 400, description = "Course ID is required", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<Json<CourseRecord>, ApiError> {
    let Json(request) = payload?;
    let (id, changes) = request.into_changes()?;
    let id = id.ok_or_else(|| MESSAGES.id_required())?;

    let updated = CourseService::update(&state.db, id, changes)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Update, err))?;

    Ok(Json(updated.into()))
}

/// Delete a course nobody is enrolled in or teaching
#[utoipa::path(
    delete,
    path = "/api/courses",
    params(IdQuery),
    responses(
        (status = 200, description = "Course deleted", body = MessageBody),
        (status = 400, description = "Course ID is required", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 409, description = "Course still has enrollments or teaching assignments", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = query.id()?.ok_or_else(|| MESSAGES.id_required())?;

    CourseService::delete(&state.db, id)
        .await
        .map_err(|err| MESSAGES.store_error(Operation::Delete, err))?;

    log::info!("Deleted course {id}");
    Ok(Json(MessageBody {
        message: "Course deleted successfully".to_string(),
    }))
}
