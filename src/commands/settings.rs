use super::Context;
use crate::cli::SettingsCommand;
use event_planner::prelude::*;
use std::sync::Arc;

pub async fn run(ctx: &Context, command: SettingsCommand) -> Result<()> {
    let auth = ctx.auth();
    auth.require_session()?;
    let store = SettingsStore::new(HttpSettingsRepository::new(Arc::clone(&ctx.api)));
    store.load().await;

    match command {
        SettingsCommand::Show => ctx.print(Report::Settings(&store.snapshot())),
        SettingsCommand::Theme { value } => {
            let saved = match value.as_str() {
                "toggle" => store.toggle_theme().await?,
                "light" => store.set_theme(Theme::Light).await?,
                "dark" => store.set_theme(Theme::Dark).await?,
                other => {
                    return Err(ApiError::validation(
                        "theme",
                        format!("'{}' is not one of light, dark, toggle", other),
                    )
                    .into())
                }
            };
            // The user profile keeps its own copy of the theme
            if !auth.update_theme(saved.theme).await {
                tracing::warn!(theme = saved.theme.as_str(), "profile theme not updated");
            }
            ctx.toasts
                .success("Thème mis à jour", Some(saved.theme.as_str()), None);
            ctx.print(Report::Settings(&saved))
        }
        SettingsCommand::Reset => {
            ctx.confirm(
                ConfirmationOptions::new(
                    "Réinitialiser les paramètres ?",
                    "Les catégories et tags personnalisés seront supprimés.",
                )
                .with_confirm_text("Réinitialiser")
                .danger(),
            )
            .await?;
            let saved = store.reset_to_defaults().await?;
            ctx.toasts.success("Paramètres réinitialisés", None, None);
            ctx.print(Report::Settings(&saved))
        }
    }
}
