pub mod backup_exchange;
pub mod core;
pub mod grades;
pub mod students;
pub mod summary;
pub mod weights;
