/// Mock implementations for testing
mod mock_absence_repository;
mod mock_auth_gateway;
mod mock_event_repository;
mod mock_game_repository;
mod mock_history_repository;
mod mock_microservice_repository;
mod mock_onboarding_repository;
mod mock_release_note_repository;
mod mock_release_repository;
mod mock_settings_repository;

pub use mock_absence_repository::MockAbsenceRepository;
pub use mock_auth_gateway::MockAuthGateway;
pub use mock_event_repository::MockEventRepository;
pub use mock_game_repository::MockGameRepository;
pub use mock_history_repository::MockHistoryRepository;
pub use mock_microservice_repository::MockMicroserviceRepository;
pub use mock_onboarding_repository::MockOnboardingRepository;
pub use mock_release_note_repository::MockReleaseNoteRepository;
pub use mock_release_repository::MockReleaseRepository;
pub use mock_settings_repository::MockSettingsRepository;
