pub mod grade_type;
pub mod grading;
