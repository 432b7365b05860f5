#![forbid(unsafe_code)]

pub mod app_services;
pub mod checklist_service;
pub mod error;

pub use app_services::AppServices;
pub use checklist_service::ChecklistService;
pub use error::{AppServicesError, ChecklistServiceError};
