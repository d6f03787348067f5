pub mod enrollment;
pub mod grade;
pub mod report;
pub mod student;
pub mod subject;
