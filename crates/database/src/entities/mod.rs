pub mod course;
pub mod enrollment;
pub mod faculty;
pub mod student;
pub mod teaching;
