pub mod config;
pub mod failure;
pub mod value;
