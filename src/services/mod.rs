pub mod attempt_service;
pub mod generation_service;
pub mod grading_service;
pub mod normalizer;
pub mod permission_listener;
pub mod quiz_service;

pub use attempt_service::AttemptService;
pub use generation_service::GenerationService;
pub use grading_service::{GradeReport, GradingService};
pub use permission_listener::{PermissionEvent, PermissionEvents};
pub use quiz_service::QuizService;
