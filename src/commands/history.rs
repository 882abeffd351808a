use super::Context;
use crate::cli::HistoryCommand;
use event_planner::prelude::*;
use std::sync::Arc;

fn trail(releases: bool) -> (HistoryKind, PermissionModule) {
    if releases {
        (HistoryKind::Releases, PermissionModule::Releases)
    } else {
        (HistoryKind::Events, PermissionModule::Calendar)
    }
}

pub async fn run(ctx: &Context, command: HistoryCommand) -> Result<()> {
    ctx.auth().require_session()?;
    let repository = Arc::new(HttpHistoryRepository::new(Arc::clone(&ctx.api)));

    match command {
        HistoryCommand::List { releases, follow } => {
            let store = HistoryStore::new(repository, trail(releases).0);
            let entries = store.load().await;
            ctx.print(Report::History(&entries))?;
            if follow {
                watch_history(ctx, &store).await?;
            }
            Ok(())
        }
        HistoryCommand::Rollback { id, releases } => {
            let (kind, module) = trail(releases);
            ctx.require(module, PermissionLevel::Write).await?;
            let store = HistoryStore::new(repository, kind);
            store.rollback(&id).await?;
            ctx.toasts.success("Modification annulée", None, None);
            Ok(())
        }
        HistoryCommand::Clear { releases } => {
            let (kind, module) = trail(releases);
            ctx.require(module, PermissionLevel::Write).await?;
            ctx.confirm(
                ConfirmationOptions::new(
                    "Vider l'historique ?",
                    "Tout l'historique sera supprimé. Les modifications ne pourront plus être annulées.",
                )
                .with_confirm_text("Vider")
                .danger(),
            )
            .await?;
            let store = HistoryStore::new(repository, kind);
            store.clear().await?;
            ctx.toasts.success("Historique vidé", None, None);
            Ok(())
        }
    }
}

/// Prints the history again each time the poller sees a change; runs until killed
async fn watch_history(
    ctx: &Context,
    store: &HistoryStore<HttpHistoryRepository>,
) -> Result<()> {
    let mut updates = store.subscribe();
    let _poller = store.start_polling(ctx.config.history_poll)?;
    let mut last = store.snapshot();

    while updates.changed().await.is_ok() {
        let current = updates.borrow_and_update().clone();
        if current != last {
            ctx.print(Report::History(&current))?;
            last = current;
        }
    }
    Ok(())
}
