pub mod capture_model;
pub mod engine;
pub mod label;
pub mod scanner;
pub mod scheduler;
pub mod selector;
pub mod visibility;
