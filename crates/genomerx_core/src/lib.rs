//! Core collaboration state engine for the GenomeRx dashboard.
//! This crate is the single source of truth for visibility and edit rules.

pub mod access;
pub mod backend;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use access::{
    assert_capability, can_edit_task, can_set_task_status, can_view_task, is_assignable,
    role_allows, AccessError, Capability, CALENDAR_ROLES,
};
pub use backend::{BackendError, HttpPredictionBackend, PredictionBackend};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{is_valid_email, normalize_email, parse_role, Account, Role, RoleParseError};
pub use model::annotation::{annotation_key, AnnotationEntry};
pub use model::chat::{
    direct_thread_id, Channel, ChannelKind, ChatMessage, MessageId, UserSnapshot,
    BROADCAST_CHANNEL_ID,
};
pub use model::event::{CalendarEvent, EventId};
pub use model::prediction::{AntibioticScore, Prediction, Recommendation};
pub use model::session::{LockoutState, Session, LOCKOUT_DURATION_MS, LOCKOUT_THRESHOLD};
pub use model::task::{Task, TaskId, TaskPriority, TaskStatus};
pub use repo::annotation_repo::AnnotationRepository;
pub use repo::calendar_repo::EventRepository;
pub use repo::chat_repo::{ChatRepository, ChatState};
pub use repo::identity_repo::AccountRepository;
pub use repo::preference_repo::{PreferenceRepository, DEFAULT_THEME};
pub use repo::task_repo::TaskRepository;
pub use repo::{MemoryStateStore, RepoError, SqliteStateStore, StateStore, StoreError};
pub use service::annotation_service::AnnotationService;
pub use service::calendar_service::{
    Calendar, CalendarError, EventDraft, EventPatch, MonthCell,
};
pub use service::chat_service::{ChatError, ChatService};
pub use service::identity_service::{
    IdentityService, IdentityError, MIN_PASSWORD_LEN, RECOVERY_PASSWORD,
};
pub use service::prediction_service::{
    validate_upload, HistorySummary, PredictionService, UploadError, ACCEPTED_EXTENSIONS,
    MAX_UPLOAD_BYTES,
};
pub use service::task_service::{TaskBoard, TaskBoardError, TaskDraft, TaskListQuery, TaskPatch};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
