pub mod app;
pub mod auth;
pub mod config;
pub mod contact;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod extract;
pub mod memory;
pub mod state;
pub mod study_plan;
pub mod tasks;
