//! Command handlers: wiring of adapters, stores and use cases per run

mod admin;
mod auth;
mod calendar;
mod events;
mod history;
mod releases;
mod schedule;
mod settings;

use crate::cli::{Cli, Command, GamesCommand, ListOnly};
use chrono::{Local, NaiveDate};
use event_planner::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a command needs, built once per run
pub struct Context {
    pub config: ResolvedConfig,
    pub api: Arc<HttpApiClient>,
    pub session: Arc<dyn SessionStore>,
    pub toasts: ToastService,
    pub confirmations: Arc<ConfirmationService>,
    pub formatter: Box<dyn OutputFormatter>,
    pub output: Option<PathBuf>,
    pub today: NaiveDate,
}

impl Context {
    pub fn new(cli: &Cli, config: ResolvedConfig) -> Result<Self> {
        let session = session_store(&config);
        let api = Arc::new(HttpApiClient::new(
            ApiClientConfig {
                base_url: config.api_url.clone(),
                timeout: config.timeout,
            },
            Arc::clone(&session),
        )?);
        tracing::debug!(api_url = %config.api_url, "client ready");

        Ok(Self {
            formatter: FormatterFactory::create(config.format, config.locale),
            config,
            api,
            session,
            toasts: ToastService::new(),
            confirmations: Arc::new(ConfirmationService::new()),
            output: cli.output.clone(),
            today: Local::now().date_naive(),
        })
    }

    pub fn auth(&self) -> AuthService<HttpAuthGateway> {
        AuthService::new(
            HttpAuthGateway::new(Arc::clone(&self.api)),
            Arc::clone(&self.session),
        )
    }

    /// Closes the local session, used when the server stops answering
    pub fn reporter(&self) -> ErrorReporter {
        let session = Arc::clone(&self.session);
        ErrorReporter::new(self.toasts.clone()).with_logout(move || {
            if let Err(error) = session.clear() {
                tracing::warn!(%error, "could not clear the session");
            }
        })
    }

    /// Renders a report to stdout or to `--output`
    pub fn print(&self, report: Report<'_>) -> Result<()> {
        let content = self.formatter.format(&report)?;
        self.present(&content)
    }

    /// Writes already rendered content to stdout or to `--output`
    pub fn present(&self, content: &str) -> Result<()> {
        PresenterFactory::create(PresenterType::from_output(self.output.clone())).present(content)
    }

    /// Guards a command with the current user's permissions
    ///
    /// The cached user is trusted when it carries permissions; otherwise it
    /// is fetched first.
    pub async fn require(&self, module: PermissionModule, level: PermissionLevel) -> Result<()> {
        let auth = self.auth();
        auth.require_session()?;
        let cached = auth
            .current_user()
            .is_some_and(|user| user.permissions.is_some());
        if !cached && auth.fetch_current_user().await.is_none() {
            return Err(PlannerError::NotAuthenticated.into());
        }
        auth.access_policy().require(module, level)
    }

    /// Fails with `PlannerError::ConfirmationDeclined` unless the user agrees
    pub async fn confirm(&self, options: ConfirmationOptions) -> Result<()> {
        if self.confirmations.confirm(options).await? {
            Ok(())
        } else {
            Err(PlannerError::ConfirmationDeclined.into())
        }
    }
}

fn session_store(config: &ResolvedConfig) -> Arc<dyn SessionStore> {
    if let Some(token) = &config.token {
        return Arc::new(MemorySessionStore::with_session(Session::new(
            token.clone(),
            None,
        )));
    }
    match config.session_storage {
        SessionStorage::Local => Arc::new(FileSessionStore::new(config.session_file.clone())),
        SessionStorage::Session => Arc::new(MemorySessionStore::new()),
    }
}

pub async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Login(args) => auth::login(ctx, &args.email, &args.password).await,
        Command::Register(args) => auth::register(ctx, &args.email, &args.password).await,
        Command::Logout => auth::logout(ctx),
        Command::Whoami => auth::whoami(ctx).await,
        Command::Password { new_password } => auth::change_password(ctx, &new_password).await,
        Command::Dashboard => dashboard(ctx).await,
        Command::Events(command) => events::run(ctx, command).await,
        Command::Releases(command) => releases::run(ctx, command).await,
        Command::Absences(command) => schedule::absences(ctx, command).await,
        Command::Sprints(ListOnly::List) => schedule::sprints(ctx).await,
        Command::ClosedDays(ListOnly::List) => schedule::closed_days(ctx).await,
        Command::History(command) => history::run(ctx, command).await,
        Command::Settings(command) => settings::run(ctx, command).await,
        Command::Calendar(command) => calendar::run(ctx, command).await,
        Command::Permissions(command) => admin::permissions(ctx, command).await,
        Command::Admin(command) => admin::run(ctx, command).await,
        Command::Games(command) => games(ctx, command).await,
    }
}

async fn dashboard(ctx: &Context) -> Result<()> {
    ctx.auth().require_session()?;
    let use_case = DashboardUseCase::new(
        HttpEventRepository::new(Arc::clone(&ctx.api)),
        HttpReleaseRepository::new(Arc::clone(&ctx.api)),
        HttpSettingsRepository::new(Arc::clone(&ctx.api)),
        HttpHistoryRepository::new(Arc::clone(&ctx.api)),
    );
    let summary = use_case.execute(ctx.today).await?;
    ctx.print(Report::Dashboard(&summary))
}

async fn games(ctx: &Context, command: GamesCommand) -> Result<()> {
    ctx.require(PermissionModule::Playground, PermissionLevel::Read)
        .await?;
    let store = GameStore::new(CachingGameRepository::new(HttpGameRepository::new(
        Arc::clone(&ctx.api),
    )));
    match command {
        GamesCommand::List => {
            let spinner = LoadingSpinner::follow(store.loading(), "Chargement des jeux...");
            let games = store.initialize().await;
            spinner.finish();
            ctx.print(Report::Games(&games?))
        }
        GamesCommand::Leaderboard { slug } => {
            let entries = store.leaderboard(&slug).await?;
            ctx.print(Report::Leaderboard {
                slug: &slug,
                entries: &entries,
            })
        }
        GamesCommand::MyScores { slug } => {
            let scores = store.my_scores(&slug).await?;
            ctx.print(Report::MyScores(&scores))
        }
    }
}
