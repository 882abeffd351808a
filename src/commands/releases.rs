use super::Context;
use crate::cli::{MicroservicesCommand, NoteEntryArgs, NotesCommand, ReleasesCommand};
use event_planner::prelude::*;
use std::sync::Arc;

pub async fn run(ctx: &Context, command: ReleasesCommand) -> Result<()> {
    ctx.auth().require_session()?;
    let store = ReleaseStore::new(HttpReleaseRepository::new(Arc::clone(&ctx.api)));

    match command {
        ReleasesCommand::List => {
            let spinner = LoadingSpinner::follow(store.loading(), "Chargement des releases...");
            let releases = store.load().await;
            spinner.finish();
            ctx.print(Report::Releases(&releases?))
        }
        ReleasesCommand::Show { id } => {
            let release = store.open(&id).await?;
            ctx.print(Report::Release(&release))
        }
        ReleasesCommand::Create {
            name,
            version,
            date,
            description,
        } => {
            require_write(ctx).await?;
            let release = store
                .create(CreateRelease {
                    name,
                    version,
                    release_date: date,
                    description,
                })
                .await?;
            ctx.toasts.success("Release créée", Some(&release.name), None);
            ctx.print(Report::Release(&release))
        }
        ReleasesCommand::Status { id, status } => {
            let status = ReleaseStatus::parse(&status).ok_or_else(|| {
                ApiError::validation(
                    "status",
                    format!(
                        "'{}' is not one of draft, in_progress, completed, cancelled",
                        status
                    ),
                )
            })?;
            require_write(ctx).await?;
            let release = store.update(&id, UpdateRelease::status(status)).await?;
            ctx.toasts
                .success("Statut mis à jour", Some(status.label()), None);
            ctx.print(Report::Release(&release))
        }
        ReleasesCommand::ToggleAction {
            release_id,
            action_id,
        } => {
            require_write(ctx).await?;
            store.open(&release_id).await?;
            store.toggle_action_status(&action_id).await?;
            match store.current() {
                Some(release) => ctx.print(Report::Release(&release)),
                None => Ok(()),
            }
        }
        ReleasesCommand::Delete { id } => {
            require_write(ctx).await?;
            let release = store.open(&id).await?;
            ctx.confirm(
                ConfirmationOptions::new(
                    "Supprimer la release ?",
                    format!(
                        "La release « {} ({}) » et toutes ses squads seront supprimées.",
                        release.name, release.version
                    ),
                )
                .with_confirm_text("Supprimer")
                .danger(),
            )
            .await?;
            store.delete(&id).await?;
            ctx.toasts.success("Release supprimée", Some(&release.name), None);
            Ok(())
        }
        ReleasesCommand::Export { id } => {
            let release = store.open(&id).await?;
            ctx.print(Report::ReleaseExport(&release))
        }
        ReleasesCommand::Notes(command) => notes(ctx, command).await,
        ReleasesCommand::Microservices(command) => microservices(ctx, command).await,
    }
}

async fn notes(ctx: &Context, command: NotesCommand) -> Result<()> {
    let store = ReleaseNoteStore::new(HttpReleaseNoteRepository::new(Arc::clone(&ctx.api)));

    match command {
        NotesCommand::List {
            release_id,
            squad,
            deployed_only,
        } => {
            store.load(&release_id).await?;
            let entries = store.filtered(squad.as_deref(), deployed_only);
            ctx.print(Report::ReleaseNotes(&entries))
        }
        NotesCommand::Add { release_id, entry } => {
            let request = note_request(entry)?;
            require_write(ctx).await?;
            store.load(&release_id).await?;
            let created = store.create(request).await?;
            ctx.toasts
                .success("Microservice ajouté", Some(created.display_name()), None);
            ctx.print(Report::ReleaseNotes(&store.snapshot()))
        }
        NotesCommand::Update {
            release_id,
            entry_id,
            entry,
        } => {
            let request = note_request(entry)?;
            require_write(ctx).await?;
            store.load(&release_id).await?;
            let updated = store.update(&entry_id, request).await?;
            ctx.toasts
                .success("Release note mise à jour", Some(updated.display_name()), None);
            ctx.print(Report::ReleaseNotes(&store.snapshot()))
        }
        NotesCommand::Delete {
            release_id,
            entry_id,
        } => {
            require_write(ctx).await?;
            let entries = store.load(&release_id).await?;
            let name = entries
                .iter()
                .find(|e| e.id.as_deref() == Some(entry_id.as_str()))
                .map(|e| e.display_name().to_string())
                .ok_or_else(|| ApiError::NotFound {
                    message: format!("No release note entry {}", entry_id),
                })?;
            ctx.confirm(
                ConfirmationOptions::new(
                    "Retirer le microservice ?",
                    format!("« {} » sera retiré de la release note.", name),
                )
                .with_confirm_text("Retirer")
                .danger(),
            )
            .await?;
            store.delete(&entry_id).await?;
            ctx.toasts.success("Microservice retiré", Some(&name), None);
            Ok(())
        }
        NotesCommand::Download {
            release_id,
            as_format,
        } => {
            store.load(&release_id).await?;
            let content = store.export(as_format).await?;
            ctx.present(&content)
        }
    }
}

async fn microservices(ctx: &Context, command: MicroservicesCommand) -> Result<()> {
    let store = MicroserviceStore::new(HttpMicroserviceRepository::new(Arc::clone(&ctx.api)));

    match command {
        MicroservicesCommand::List {
            release,
            squad,
            all,
        } => {
            let microservices = match (release, squad, all) {
                (Some(release_id), _, _) => store.for_release(&release_id).await?,
                (None, Some(squad), _) => store.by_squad(&squad).await?,
                (None, None, true) => store.all().await?,
                (None, None, false) => store.load().await?,
            };
            ctx.print(Report::Microservices(&microservices))
        }
        MicroservicesCommand::Create {
            name,
            squad,
            solution,
            order,
            description,
        } => {
            require_write(ctx).await?;
            let created = store
                .create(CreateMicroservice {
                    name,
                    squad,
                    solution,
                    display_order: order,
                    description,
                })
                .await?;
            ctx.toasts
                .success("Microservice créé", Some(&created.name), None);
            ctx.print(Report::Microservices(&store.snapshot()))
        }
        MicroservicesCommand::Deactivate { id } => {
            require_write(ctx).await?;
            store.deactivate(&id).await?;
            ctx.toasts.success("Microservice désactivé", None, None);
            ctx.print(Report::Microservices(&store.snapshot()))
        }
        MicroservicesCommand::Delete { id } => {
            require_write(ctx).await?;
            ctx.confirm(
                ConfirmationOptions::new(
                    "Supprimer définitivement le microservice ?",
                    "Le microservice sera supprimé. Cette action est irréversible.",
                )
                .with_confirm_text("Supprimer")
                .danger(),
            )
            .await?;
            store.hard_delete(&id).await?;
            ctx.toasts.success("Microservice supprimé", None, None);
            Ok(())
        }
    }
}

fn note_request(entry: NoteEntryArgs) -> Result<ReleaseNoteRequest> {
    let status = match entry.status {
        Some(status) => Some(DeploymentStatus::parse(&status).ok_or_else(|| {
            ApiError::validation(
                "status",
                format!(
                    "'{}' is not one of HOM2, IN_PROGRESS_PROD, DEPLOYED_PROD, ROLLBACK",
                    status
                ),
            )
        })?),
        None => None,
    };
    Ok(ReleaseNoteRequest {
        microservice_id: entry.microservice_id,
        microservice: entry.microservice,
        squad: entry.squad,
        part_en_mep: entry.part_en_mep,
        deploy_order: entry.order,
        tag: entry.tag,
        previous_tag: entry.previous_tag,
        parent_version: entry.parent_version,
        changes: entry.changes.iter().map(|c| ChangeItem::parse(c)).collect(),
        comment: entry.comment,
        status,
    })
}

async fn require_write(ctx: &Context) -> Result<()> {
    ctx.require(PermissionModule::Releases, PermissionLevel::Write)
        .await
}
