use super::Context;
use crate::cli::{AdminCommand, PermissionsCommand};
use event_planner::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn permissions(ctx: &Context, command: PermissionsCommand) -> Result<()> {
    let repository = HttpPermissionRepository::new(Arc::clone(&ctx.api));
    match command {
        PermissionsCommand::Show { user_id } => {
            ctx.require(PermissionModule::Admin, PermissionLevel::Read)
                .await?;
            let permissions = repository.get(&user_id).await?;
            ctx.print(Report::Permissions {
                user_id: &user_id,
                permissions: &permissions,
            })
        }
        PermissionsCommand::Set {
            user_id,
            module,
            level,
        } => {
            let module = PermissionModule::parse(&module).ok_or_else(|| {
                ApiError::validation("module", format!("unknown module '{}'", module))
            })?;
            let level = PermissionLevel::parse(&level).ok_or_else(|| {
                ApiError::validation(
                    "level",
                    format!("'{}' is not one of NONE, READ, WRITE", level),
                )
            })?;
            ctx.require(PermissionModule::Admin, PermissionLevel::Write)
                .await?;

            let mut changes = UserPermissions::new();
            changes.insert(module, level);
            let permissions = repository.update(&user_id, &changes).await?;
            tracing::info!(%user_id, module = module.as_str(), level = level.as_str(), "permission updated");
            ctx.toasts.success(
                "Permissions mises à jour",
                Some(&format!("{} : {}", module.display_name(), level.as_str())),
                None,
            );
            ctx.print(Report::Permissions {
                user_id: &user_id,
                permissions: &permissions,
            })
        }
    }
}

pub async fn run(ctx: &Context, command: AdminCommand) -> Result<()> {
    let admin = || HttpAdminRepository::new(Arc::clone(&ctx.api));
    match command {
        AdminCommand::Users => {
            ctx.require(PermissionModule::Admin, PermissionLevel::Read)
                .await?;
            let users = admin().users().await?;
            ctx.print(Report::AdminUsers(&users))
        }
        AdminCommand::Stats => {
            ctx.require(PermissionModule::Admin, PermissionLevel::Read)
                .await?;
            let stats = admin().stats().await?;
            ctx.print(Report::AdminStats(&stats))
        }
        AdminCommand::DeleteUser { user_id } => {
            ctx.require(PermissionModule::Admin, PermissionLevel::Write)
                .await?;
            ctx.confirm(
                ConfirmationOptions::new(
                    "Supprimer l'utilisateur ?",
                    format!(
                        "L'utilisateur {} et toutes ses données seront supprimés définitivement.",
                        user_id
                    ),
                )
                .with_confirm_text("Supprimer")
                .danger(),
            )
            .await?;
            admin().delete_user(&user_id).await?;
            ctx.toasts.success("Utilisateur supprimé", None, None);
            Ok(())
        }
        AdminCommand::Export => {
            ctx.require(PermissionModule::Admin, PermissionLevel::Read)
                .await?;
            let path = ctx
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(backup_file_name(ctx.today)));
            let writer = FileSystemWriter::new(path);
            ExportDatabaseUseCase::new(admin(), ctx.toasts.clone())
                .execute(&writer)
                .await?;
            tracing::info!(path = %writer.output_path().display(), "backup written");
            Ok(())
        }
        AdminCommand::Import { file } => {
            ctx.require(PermissionModule::Admin, PermissionLevel::Write)
                .await?;
            let use_case = ImportDatabaseUseCase::new(
                admin(),
                FileSystemReader::new(),
                Arc::clone(&ctx.confirmations),
                ctx.toasts.clone(),
            );
            match use_case.execute(&file).await? {
                ImportOutcome::Imported { stats, .. } => ctx.print(Report::AdminStats(&stats)),
                ImportOutcome::Declined => Err(PlannerError::ConfirmationDeclined.into()),
            }
        }
    }
}
