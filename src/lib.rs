//! event-planner - typed client for the event planning service
//!
//! This library talks to the planning REST API (events, releases, release
//! notes, absences, sprints, history, permissions, games) and holds the
//! client-side state and calendar math around it, following hexagonal
//! architecture.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`planning`): entities, calendar math, filters and the access policy
//! - **Application Layer** (`application`): stores, UI services, use cases and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP client, session file, formatters, terminal
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use event_planner::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<()> {
//! let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
//! let api = Arc::new(HttpApiClient::new(ApiClientConfig::default(), session)?);
//!
//! let events = EventStore::new(HttpEventRepository::new(Arc::clone(&api)));
//! let loaded = events.load().await?;
//!
//! let output = MarkdownFormatter::new().format(&Report::Events(&loaded))?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod planning;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{
        ConsolePrompt, ConsoleToastRenderer, LoadingSpinner,
    };
    pub use crate::adapters::outbound::filesystem::{
        default_session_path, FileSessionStore, FileSystemReader, FileSystemWriter,
        MemorySessionStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        events_to_csv, JsonFormatter, MarkdownFormatter,
    };
    pub use crate::adapters::outbound::network::{
        ApiClientConfig, CachingGameRepository, HttpAbsenceRepository, HttpAdminRepository,
        HttpApiClient, HttpAuthGateway, HttpClosedDayRepository, HttpEventRepository,
        HttpGameRepository, HttpHistoryRepository, HttpMicroserviceRepository,
        HttpOnboardingRepository, HttpPermissionRepository, HttpReleaseNoteRepository,
        HttpReleaseRepository, HttpSettingsRepository, HttpSprintRepository,
    };
    pub use crate::application::dto::{AuthOutcome, ExportFormat, OutputFormat};
    pub use crate::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
    pub use crate::application::read_models::{DashboardSummary, Report};
    pub use crate::application::stores::{
        AbsenceStore, AuthService, ClosedDayStore, EventStore, FilterState, GameStore,
        HistoryStore, MicroserviceStore, OnboardingStore, PollHandle, ReleaseNoteStore,
        ReleaseStore, SettingsStore, SprintStore,
    };
    pub use crate::application::ui::{
        ConfirmationOptions, ConfirmationService, ErrorReporter, Toast, ToastKind, ToastService,
    };
    pub use crate::application::use_cases::{
        backup_file_name, BuildCalendarUseCase, DashboardUseCase, ExportDatabaseUseCase,
        ExportEventsUseCase, ImportDatabaseUseCase, ImportOutcome,
    };
    pub use crate::config::{CliOverrides, ResolvedConfig, SessionStorage};
    pub use crate::planning::domain::*;
    pub use crate::planning::policies::{AccessPolicy, Capability};
    pub use crate::planning::services::{
        absence_segments, working_days, EventFilter, Holiday, HolidayCalendar, Locale,
        SemesterGrid, YearGrid,
    };
    pub use crate::ports::outbound::*;
    pub use crate::shared::error::{ApiError, ExitCode, PlannerError};
    pub use crate::shared::Result;
}
