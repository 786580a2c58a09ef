//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and engine runs into use-case level APIs.
//! - Keep host layers decoupled from storage details.
//!
//! # See also
//! - docs: DESIGN.md "Service"

pub mod schedule_service;

pub use schedule_service::{ScheduleReport, ScheduleService, ServiceError, ServiceResult};
