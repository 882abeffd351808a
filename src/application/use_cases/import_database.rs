use crate::application::ui::{ConfirmationOptions, ConfirmationService, ToastService};
use crate::planning::domain::{AdminStats, ImportSummary};
use crate::ports::outbound::{AdminRepository, BackupFile, BackupSource};
use crate::shared::Result;
use std::path::Path;
use std::sync::Arc;

/// Result of an import attempt that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported {
        summary: ImportSummary,
        stats: AdminStats,
    },
    /// The user refused; nothing was sent
    Declined,
}

/// ImportDatabaseUseCase - Replaces the whole database with a backup
///
/// The file is checked before anything is asked: it must be a regular file
/// within the upload limit holding valid JSON. The upload only happens once
/// the user confirms.
///
/// # Type Parameters
/// * `A` - AdminRepository implementation
/// * `B` - BackupSource implementation
pub struct ImportDatabaseUseCase<A: AdminRepository, B: BackupSource> {
    admin: A,
    source: B,
    confirmations: Arc<ConfirmationService>,
    toasts: ToastService,
}

impl<A: AdminRepository, B: BackupSource> ImportDatabaseUseCase<A, B> {
    pub fn new(
        admin: A,
        source: B,
        confirmations: Arc<ConfirmationService>,
        toasts: ToastService,
    ) -> Self {
        Self {
            admin,
            source,
            confirmations,
            toasts,
        }
    }

    pub async fn execute(&self, path: &Path) -> Result<ImportOutcome> {
        let backup = self.source.read_backup(path)?;

        if !self.confirmations.confirm(confirmation_for(&backup)).await? {
            tracing::info!(file = %backup.file_name, "database import declined");
            return Ok(ImportOutcome::Declined);
        }

        let summary = match self.admin.import(&backup.data).await {
            Ok(summary) => summary,
            Err(error) => {
                tracing::error!(%error, "database import failed");
                self.toasts.error(
                    "Erreur",
                    Some("Impossible d'importer la base de données. Vérifiez le format du fichier."),
                    None,
                );
                return Err(error);
            }
        };
        self.toasts.success(
            "Import réussi",
            Some("La base de données a été importée avec succès"),
            None,
        );

        let stats = self.admin.stats().await?;
        Ok(ImportOutcome::Imported { summary, stats })
    }
}

fn confirmation_for(backup: &BackupFile) -> ConfirmationOptions {
    ConfirmationOptions::new(
        "Importer la base de données ?",
        format!(
            "ATTENTION: Cette action va ÉCRASER toutes les données existantes.\n\n\
             Fichier: {}\nTaille: {} KB\n\n\
             Cette action est irréversible. Voulez-vous continuer ?",
            backup.file_name,
            backup.size_kb()
        ),
    )
    .with_confirm_text("Importer")
    .danger()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::RecordingAdmin;
    use crate::planning::domain::DatabaseExport;
    use crate::shared::error::PlannerError;
    use std::path::PathBuf;

    struct FixedBackup;

    impl BackupSource for FixedBackup {
        fn read_backup(&self, path: &Path) -> Result<BackupFile> {
            Ok(BackupFile {
                file_name: path.display().to_string(),
                size_bytes: 2048,
                data: DatabaseExport(serde_json::json!({ "events": [] })),
            })
        }
    }

    struct BrokenBackup;

    impl BackupSource for BrokenBackup {
        fn read_backup(&self, _path: &Path) -> Result<BackupFile> {
            Err(PlannerError::FileReadError {
                path: PathBuf::from("backup.json"),
                details: "Invalid JSON: expected value".to_string(),
            }
            .into())
        }
    }

    fn use_case<B: BackupSource>(
        source: B,
    ) -> (Arc<ImportDatabaseUseCase<RecordingAdmin, B>>, Arc<ConfirmationService>) {
        let confirmations = Arc::new(ConfirmationService::new());
        let use_case = ImportDatabaseUseCase::new(
            RecordingAdmin::default(),
            source,
            Arc::clone(&confirmations),
            ToastService::new(),
        );
        (Arc::new(use_case), confirmations)
    }

    async fn answer(confirmations: &ConfirmationService, yes: bool) -> ConfirmationOptions {
        let mut rx = confirmations.subscribe();
        let shown = rx.wait_for(Option::is_some).await.unwrap().clone().unwrap();
        confirmations.respond(yes);
        shown
    }

    #[tokio::test]
    async fn test_confirmed_import_uploads_then_refreshes_stats() {
        let (use_case, confirmations) = use_case(FixedBackup);
        let running = Arc::clone(&use_case);
        let task = tokio::spawn(async move { running.execute(Path::new("backup.json")).await });

        let shown = answer(&confirmations, true).await;
        assert!(shown.danger);
        assert_eq!(shown.confirm_text, "Importer");
        assert!(shown.message.contains("Fichier: backup.json"));
        assert!(shown.message.contains("Taille: 2.00 KB"));

        let outcome = task.await.unwrap().unwrap();
        assert!(matches!(outcome, ImportOutcome::Imported { stats, .. } if stats.total_users == 2));
        assert_eq!(use_case.admin.calls(), vec!["import", "stats"]);
    }

    #[tokio::test]
    async fn test_declined_import_sends_nothing() {
        let (use_case, confirmations) = use_case(FixedBackup);
        let running = Arc::clone(&use_case);
        let task = tokio::spawn(async move { running.execute(Path::new("backup.json")).await });

        answer(&confirmations, false).await;

        assert_eq!(task.await.unwrap().unwrap(), ImportOutcome::Declined);
        assert!(use_case.admin.calls().is_empty());
        assert!(use_case.admin.imported.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected_before_asking() {
        let (use_case, confirmations) = use_case(BrokenBackup);
        let err = use_case.execute(Path::new("backup.json")).await.unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
        assert!(confirmations.current().is_none());
        assert!(use_case.admin.calls().is_empty());
    }
}
