/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (planning API, session storage,
/// file system, console).
pub mod absence_repository;
pub mod admin_repository;
pub mod auth_gateway;
pub mod backup_source;
pub mod event_repository;
pub mod formatter;
pub mod game_repository;
pub mod history_repository;
pub mod onboarding_repository;
pub mod output_presenter;
pub mod release_note_repository;
pub mod release_repository;
pub mod session_store;
pub mod settings_repository;
pub mod sprint_repository;

pub use absence_repository::{AbsenceRepository, DateRange};
pub use admin_repository::{AdminRepository, PermissionRepository};
pub use auth_gateway::{AuthGateway, Credentials, LoginResponse, RegisterResponse};
pub use backup_source::{BackupFile, BackupSource};
pub use event_repository::EventRepository;
pub use formatter::OutputFormatter;
pub use game_repository::GameRepository;
pub use history_repository::HistoryRepository;
pub use onboarding_repository::OnboardingRepository;
pub use output_presenter::OutputPresenter;
pub use release_note_repository::{MicroserviceRepository, ReleaseNoteRepository};
pub use release_repository::ReleaseRepository;
pub use session_store::{Session, SessionStore};
pub use settings_repository::SettingsRepository;
pub use sprint_repository::{ClosedDayRepository, SprintRepository};
