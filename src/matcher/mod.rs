pub mod fuzzy;
pub mod patcher;
