pub mod config;
pub mod domains;
pub mod health;
pub mod records;
