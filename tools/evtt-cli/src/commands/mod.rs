pub mod config;
pub mod export;
pub mod info;
pub mod name;
pub mod validate;
