pub mod enrollments;
pub mod grades;
pub mod students;
pub mod subjects;
