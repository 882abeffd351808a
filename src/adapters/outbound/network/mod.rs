/// Network adapters for the planning REST API
pub mod admin_api;
pub mod api_client;
pub mod auth_api;
pub mod caching_game_repository;
pub mod events_api;
pub mod games_api;
pub mod release_notes_api;
pub mod releases_api;
pub mod schedule_api;
pub mod settings_api;

pub use admin_api::{HttpAdminRepository, HttpPermissionRepository};
pub use api_client::{ApiClientConfig, HttpApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use auth_api::HttpAuthGateway;
pub use caching_game_repository::CachingGameRepository;
pub use events_api::HttpEventRepository;
pub use games_api::{HttpGameRepository, HttpOnboardingRepository};
pub use release_notes_api::{HttpMicroserviceRepository, HttpReleaseNoteRepository};
pub use releases_api::HttpReleaseRepository;
pub use schedule_api::{HttpAbsenceRepository, HttpClosedDayRepository, HttpSprintRepository};
pub use settings_api::{HttpHistoryRepository, HttpSettingsRepository};
