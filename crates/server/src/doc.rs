use crate::{
    dtos::{
        course::{
            CourseEnrollment, CourseRecord, CourseResponse, CourseTeaching, CreateCourseRequest,
            UpdateCourseRequest,
        },
        enrollment::{
            CreateEnrollmentRequest, EnrollmentRecord, EnrollmentResponse,
            UpdateEnrollmentRequest,
        },
        faculty::{
            CreateFacultyRequest, FacultyRecord, FacultyResponse, FacultyTeaching,
            UpdateFacultyRequest,
        },
        input::Numeric,
        student::{
            CreateStudentRequest, StudentEnrollment, StudentRecord, StudentResponse,
            UpdateStudentRequest,
        },
        teaching::{
            CreateTeachingRequest, TeachingRecord, TeachingResponse, UpdateTeachingRequest,
        },
    },
    error::{ErrorBody, MessageBody},
    routes::{course, enrollment, faculty, health, student, teaching},
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        student::get_students,
        student::create_student,
        student::update_student,
        student::delete_student,
        faculty::get_faculty,
        faculty::create_faculty,
        faculty::update_faculty,
        faculty::delete_faculty,
        course::get_courses,
        course::create_course,
        course::update_course,
        course::delete_course,
        enrollment::get_enrollments,
        enrollment::create_enrollment,
        enrollment::update_enrollment,
        enrollment::delete_enrollment,
        teaching::get_teachings,
        teaching::create_teaching,
        teaching::update_teaching,
        teaching::delete_teaching
    ),
    components(schemas(
        Numeric,
        ErrorBody,
        MessageBody,
        StudentRecord,
        StudentEnrollment,
        StudentResponse,
        CreateStudentRequest,
        UpdateStudentRequest,
        FacultyRecord,
        FacultyTeaching,
        FacultyResponse,
        CreateFacultyRequest,
        UpdateFacultyRequest,
        CourseRecord,
        CourseEnrollment,
        CourseTeaching,
        CourseResponse,
        CreateCourseRequest,
        UpdateCourseRequest,
        EnrollmentRecord,
        EnrollmentResponse,
        CreateEnrollmentRequest,
        UpdateEnrollmentRequest,
        TeachingRecord,
        TeachingResponse,
        CreateTeachingRequest,
        UpdateTeachingRequest
    )),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Students", description = "Student records"),
        (name = "Faculty", description = "Faculty records"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Enrollment", description = "Students enrolled in courses"),
        (name = "Teaching", description = "Faculty teaching assignments"),
    ),
    info(
        title = "College API",
        version = "1.0.0",
        description = "College record management API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
