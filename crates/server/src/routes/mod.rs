pub mod enrollment;
pub mod grade;
pub mod health;
pub mod root;
pub mod student;
pub mod subject;
