pub mod backup;
pub mod calc;
pub mod db;
pub mod ipc;
pub mod model;
pub mod store;
