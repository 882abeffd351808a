pub mod absence;
pub mod admin;
pub mod event;
pub mod game;
pub mod history;
pub mod onboarding;
pub mod release;
pub mod release_note;
pub mod settings;
pub mod sprint;
pub mod user;

pub use absence::{Absence, AbsenceRequest, AbsenceType, AbsenceUser, Period};
pub use admin::{AdminStats, AdminUser, DatabaseExport, ImportSummary};
pub use event::{Event, EventCategory, EventDraft};
pub use game::{
    Game, GameScore, LeaderboardEntry, MyScores, ScoreSubmission, SubmitScoreResponse,
};
pub use history::{AuditEntry, HistoryAction, HistoryEntry, HistoryKind, ReleaseHistoryEntry};
pub use onboarding::ONBOARDING_KEYS;
pub use release::{
    Action, ActionPhase, ActionStatus, ActionType, CreateAction, CreateFeature, CreateRelease,
    Feature, FeatureFlipping, FlippingType, Release, ReleaseStatus, RuleAction, RuleState,
    Squad, TargetOs, UpdateAction, UpdateRelease, UpdateSquad, VersionCondition,
    VersionOperator,
};
pub use release_note::{
    sort_for_deployment, ChangeItem, CreateMicroservice, DeploymentStatus, Microservice,
    NoteExportFormat, ReleaseNoteEntry, ReleaseNoteRequest, UpdateMicroservice, SQUAD_OPTIONS,
};
pub use settings::{CustomCategory, CustomTag, Theme, UserPreferences};
pub use sprint::{ClosedDay, Sprint};
pub use user::{PermissionLevel, PermissionModule, User, UserPermissions};
