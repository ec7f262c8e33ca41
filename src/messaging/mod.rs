pub mod message;
pub mod page_context;
