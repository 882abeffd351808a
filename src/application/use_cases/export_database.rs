use crate::application::ui::ToastService;
use crate::planning::domain::DatabaseExport;
use crate::ports::outbound::{AdminRepository, OutputPresenter};
use crate::shared::Result;
use chrono::NaiveDate;

/// Default file name of a backup taken on `day`
pub fn backup_file_name(day: NaiveDate) -> String {
    format!("ma-banque-tools-backup-{}.json", day.format("%Y-%m-%d"))
}

/// ExportDatabaseUseCase - Downloads the full database dump
///
/// The dump is written as pretty JSON to whatever presenter the caller
/// picked. The outcome is announced with a toast either way.
pub struct ExportDatabaseUseCase<A: AdminRepository> {
    admin: A,
    toasts: ToastService,
}

impl<A: AdminRepository> ExportDatabaseUseCase<A> {
    pub fn new(admin: A, toasts: ToastService) -> Self {
        Self { admin, toasts }
    }

    pub async fn execute(&self, presenter: &dyn OutputPresenter) -> Result<DatabaseExport> {
        match self.write_export(presenter).await {
            Ok(export) => {
                self.toasts.success(
                    "Export réussi",
                    Some("La base de données a été exportée avec succès"),
                    None,
                );
                Ok(export)
            }
            Err(error) => {
                tracing::error!(%error, "database export failed");
                self.toasts.error(
                    "Erreur",
                    Some("Impossible d'exporter la base de données"),
                    None,
                );
                Err(error)
            }
        }
    }

    async fn write_export(&self, presenter: &dyn OutputPresenter) -> Result<DatabaseExport> {
        let export = self.admin.export().await?;
        let content = serde_json::to_string_pretty(&export)?;
        presenter.present(&content)?;
        Ok(export)
    }
}
