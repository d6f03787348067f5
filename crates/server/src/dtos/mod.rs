pub mod enrollment;
pub mod grade;
pub mod student;
pub mod subject;
