pub mod file_store;
pub mod kv_store;
