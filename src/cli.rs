use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use event_planner::prelude::{ExportFormat, Locale, NoteExportFormat, OutputFormat};
use std::path::PathBuf;

/// Client for the event planning service
#[derive(Parser, Debug)]
#[command(name = "event-planner")]
#[command(version)]
#[command(
    about = "Events, releases, absences and calendar of the planning service",
    long_about = None
)]
pub struct Cli {
    /// Path to the config file (defaults to ./event-planner.config.yml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the planning API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format: json or markdown
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Language of month and day names: fr or en
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// More logs: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a session
    Login(CredentialsArgs),
    /// Create an account
    Register(CredentialsArgs),
    /// Close the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Change the password of the signed-in user
    Password {
        #[arg(long, env = "EVENT_PLANNER_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    /// Home screen overview
    Dashboard,
    #[command(subcommand)]
    Events(EventsCommand),
    #[command(subcommand)]
    Releases(ReleasesCommand),
    #[command(subcommand)]
    Absences(AbsencesCommand),
    #[command(subcommand)]
    Sprints(ListOnly),
    #[command(subcommand)]
    ClosedDays(ListOnly),
    #[command(subcommand)]
    History(HistoryCommand),
    #[command(subcommand)]
    Settings(SettingsCommand),
    #[command(subcommand)]
    Calendar(CalendarCommand),
    #[command(subcommand)]
    Permissions(PermissionsCommand),
    #[command(subcommand)]
    Admin(AdminCommand),
    #[command(subcommand)]
    Games(GamesCommand),
}

#[derive(Args, Debug)]
pub struct CredentialsArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "EVENT_PLANNER_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum ListOnly {
    List,
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// List events, optionally filtered
    List {
        /// Matches title and description, case-insensitive
        #[arg(long)]
        search: Option<String>,
        /// Keep only these categories (repeatable)
        #[arg(long = "category", value_name = "ID")]
        categories: Vec<String>,
    },
    Show {
        id: String,
    },
    Create(EventFields),
    /// Change the given fields of an event
    Update {
        id: String,
        #[command(flatten)]
        fields: EventChanges,
    },
    Delete {
        id: String,
    },
    /// Copy an event, on the same day or on --date
    Duplicate {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Move an event, keeping its duration
    Move {
        id: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Create events from a JSON array of drafts
    Import {
        file: PathBuf,
    },
    Export {
        /// json or csv
        #[arg(long, default_value = "json")]
        as_format: ExportFormat,
    },
    /// Delete every event
    Clear,
}

#[derive(Args, Debug)]
pub struct EventFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub date: NaiveDate,
    /// mep, hotfix, maintenance, pi_planning, sprint_start, code_freeze, psi or a custom id
    #[arg(long, default_value = "mep")]
    pub category: String,
    #[command(flatten)]
    pub optional: EventOptionalFields,
}

#[derive(Args, Debug)]
pub struct EventChanges {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub category: Option<String>,
    #[command(flatten)]
    pub optional: EventOptionalFields,
}

#[derive(Args, Debug)]
pub struct EventOptionalFields {
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    /// HH:mm
    #[arg(long)]
    pub start_time: Option<String>,
    /// HH:mm
    #[arg(long)]
    pub end_time: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ReleasesCommand {
    List,
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        version: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        description: Option<String>,
    },
    /// Set the status: draft, in_progress, completed or cancelled
    Status {
        id: String,
        status: String,
    },
    /// Toggle an action of a release between pending and completed
    ToggleAction {
        release_id: String,
        action_id: String,
    },
    Delete {
        id: String,
    },
    /// Hand-over sheet of a release: Tontons MEP, then pre/post-MEP actions by type
    Export {
        id: String,
    },
    /// Microservices deployed by a release
    #[command(subcommand)]
    Notes(NotesCommand),
    #[command(subcommand)]
    Microservices(MicroservicesCommand),
}

#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    /// Entries in deployment order
    List {
        release_id: String,
        #[arg(long)]
        squad: Option<String>,
        /// Only the microservices that are part of the deployment
        #[arg(long)]
        deployed_only: bool,
    },
    Add {
        release_id: String,
        #[command(flatten)]
        entry: NoteEntryArgs,
    },
    Update {
        release_id: String,
        entry_id: String,
        #[command(flatten)]
        entry: NoteEntryArgs,
    },
    Delete {
        release_id: String,
        entry_id: String,
    },
    /// Release note document rendered by the server
    Download {
        release_id: String,
        /// markdown or html
        #[arg(long, default_value = "markdown")]
        as_format: NoteExportFormat,
    },
}

#[derive(Args, Debug)]
pub struct NoteEntryArgs {
    /// Squad 1 to Squad 6
    #[arg(long)]
    pub squad: String,
    /// Id of a registered microservice
    #[arg(long)]
    pub microservice_id: Option<String>,
    /// Free-text microservice name
    #[arg(long)]
    pub microservice: Option<String>,
    #[arg(long)]
    pub part_en_mep: bool,
    #[arg(long)]
    pub order: Option<i32>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long)]
    pub previous_tag: Option<String>,
    #[arg(long)]
    pub parent_version: Option<String>,
    /// JIRA-123:description (repeatable)
    #[arg(long = "change", value_name = "CHANGE")]
    pub changes: Vec<String>,
    #[arg(long)]
    pub comment: Option<String>,
    /// HOM2, IN_PROGRESS_PROD, DEPLOYED_PROD or ROLLBACK
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum MicroservicesCommand {
    List {
        /// Show the tag in production before this release
        #[arg(long)]
        release: Option<String>,
        #[arg(long, conflicts_with = "release")]
        squad: Option<String>,
        /// Include deactivated microservices
        #[arg(long, conflicts_with_all = ["release", "squad"])]
        all: bool,
    },
    Create {
        #[arg(long)]
        name: String,
        /// Squad 1 to Squad 6
        #[arg(long)]
        squad: String,
        #[arg(long)]
        solution: Option<String>,
        #[arg(long)]
        order: Option<i32>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove from the active list, keeping release notes intact
    Deactivate {
        id: String,
    },
    /// Delete for good
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AbsencesCommand {
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    List {
        /// Release history instead of event history
        #[arg(long)]
        releases: bool,
        /// Keep polling and print the history whenever it changes
        #[arg(long)]
        follow: bool,
    },
    /// Undo a change
    Rollback {
        id: String,
        #[arg(long)]
        releases: bool,
    },
    Clear {
        #[arg(long)]
        releases: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    Show,
    /// Set the theme: light, dark or toggle
    Theme {
        value: String,
    },
    /// Back to light theme without custom categories or tags
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum CalendarCommand {
    /// Six-month wall planner around --date (default today)
    Semester {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Year {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Public holidays, no session needed
    Holidays {
        #[arg(long)]
        year: Option<i32>,
        /// Also fetch the closed days declared by admins
        #[arg(long)]
        closed_days: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PermissionsCommand {
    Show {
        user_id: String,
    },
    /// Set MODULE to LEVEL (NONE, READ or WRITE) for a user
    Set {
        user_id: String,
        module: String,
        level: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    Users,
    Stats,
    DeleteUser {
        user_id: String,
    },
    /// Download a full backup (default file ma-banque-tools-backup-DATE.json)
    Export,
    /// Replace the database with a backup
    Import {
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum GamesCommand {
    List,
    Leaderboard { slug: String },
    MyScores { slug: String },
}
