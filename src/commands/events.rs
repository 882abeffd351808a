use super::Context;
use crate::cli::{EventChanges, EventFields, EventOptionalFields, EventsCommand};
use event_planner::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub async fn run(ctx: &Context, command: EventsCommand) -> Result<()> {
    ctx.auth().require_session()?;
    let store = EventStore::new(HttpEventRepository::new(Arc::clone(&ctx.api)));

    match command {
        EventsCommand::List { search, categories } => {
            let spinner = LoadingSpinner::follow(store.loading(), "Chargement des événements...");
            let events = store.load().await;
            spinner.finish();
            let events = events?;

            let filter = FilterState::new();
            if let Some(text) = search {
                filter.set_search_text(&text);
            }
            for category in &categories {
                filter.toggle_category(category);
            }
            ctx.print(Report::Events(&filter.filtered(&events)))
        }
        EventsCommand::Show { id } => {
            let event = store.repository().get(&id).await?;
            ctx.print(Report::Event(&event))
        }
        EventsCommand::Create(fields) => {
            require_write(ctx).await?;
            let draft = new_draft(ctx, fields).await?;
            let event = store.create(draft).await?;
            ctx.toasts.success("Événement créé", Some(&event.title), None);
            ctx.print(Report::Event(&event))
        }
        EventsCommand::Update { id, fields } => {
            require_write(ctx).await?;
            let existing = store.repository().get(&id).await?;
            let draft = apply_changes(ctx, existing.to_draft(), fields).await?;
            let event = store.update(&id, draft).await?;
            ctx.toasts.success("Événement modifié", Some(&event.title), None);
            ctx.print(Report::Event(&event))
        }
        EventsCommand::Delete { id } => {
            require_write(ctx).await?;
            let event = store.repository().get(&id).await?;
            ctx.confirm(
                ConfirmationOptions::new(
                    "Supprimer l'événement ?",
                    format!("L'événement « {} » sera définitivement supprimé.", event.title),
                )
                .with_confirm_text("Supprimer")
                .danger(),
            )
            .await?;
            store.delete(&id).await?;
            ctx.toasts.success("Événement supprimé", Some(&event.title), None);
            Ok(())
        }
        EventsCommand::Duplicate { id, date } => {
            require_write(ctx).await?;
            let copy = store.duplicate(&id, date).await?;
            ctx.print(Report::Event(&copy))
        }
        EventsCommand::Move { id, date } => {
            require_write(ctx).await?;
            let moved = store.move_to(&id, date).await?;
            ctx.print(Report::Event(&moved))
        }
        EventsCommand::Import { file } => {
            require_write(ctx).await?;
            let drafts = read_drafts(&file)?;
            let count = store.import(drafts).await?;
            ctx.toasts.success(
                "Import réussi",
                Some(&format!("{} événement(s) importé(s)", count)),
                None,
            );
            Ok(())
        }
        EventsCommand::Export { as_format } => {
            let export = ExportEventsUseCase::new(HttpEventRepository::new(Arc::clone(&ctx.api)))
                .execute(as_format)
                .await?;
            let path = ctx
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(export.file_name));
            FileSystemWriter::new(path.clone()).present(&export.content)?;
            ctx.toasts.success(
                "Export réussi",
                Some(&format!("{} événement(s) dans {}", export.count, path.display())),
                None,
            );
            Ok(())
        }
        EventsCommand::Clear => {
            require_write(ctx).await?;
            ctx.confirm(
                ConfirmationOptions::new(
                    "Supprimer tous les événements ?",
                    "Tous les événements seront supprimés. Cette action est irréversible.",
                )
                .with_confirm_text("Tout supprimer")
                .danger(),
            )
            .await?;
            store.clear_all().await?;
            ctx.toasts.success("Événements supprimés", None, None);
            Ok(())
        }
    }
}

async fn require_write(ctx: &Context) -> Result<()> {
    ctx.require(PermissionModule::Calendar, PermissionLevel::Write)
        .await
}

fn read_drafts(path: &Path) -> Result<Vec<EventDraft>> {
    let (content, _) = FileSystemReader::new().read_checked(path, "events file")?;
    let drafts = serde_json::from_str(&content).map_err(|e| PlannerError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Invalid events JSON: {}", e),
    })?;
    Ok(drafts)
}

/// Built-in categories first, then the custom ones from the user's settings
async fn category_draft(
    ctx: &Context,
    title: String,
    date: chrono::NaiveDate,
    category: &str,
) -> Result<EventDraft> {
    if let Some(builtin) = EventCategory::from_id(category) {
        return Ok(EventDraft::new(title, date, builtin));
    }
    let settings = SettingsStore::new(HttpSettingsRepository::new(Arc::clone(&ctx.api)));
    settings.load().await;
    let catalog = settings.catalog();
    let entry = catalog
        .get(category)
        .ok_or_else(|| ApiError::validation("category", format!("unknown category '{}'", category)))?;

    let mut draft = EventDraft::new(title, date, EventCategory::Mep);
    draft.category = entry.id.clone();
    draft.color = entry.color.clone();
    draft.icon = entry.icon.clone();
    Ok(draft)
}

async fn new_draft(ctx: &Context, fields: EventFields) -> Result<EventDraft> {
    let draft = category_draft(ctx, fields.title, fields.date, &fields.category).await?;
    Ok(apply_optional(draft, fields.optional))
}

async fn apply_changes(
    ctx: &Context,
    mut draft: EventDraft,
    changes: EventChanges,
) -> Result<EventDraft> {
    if let Some(category) = changes.category {
        let recolored = category_draft(ctx, draft.title.clone(), draft.date, &category).await?;
        draft.category = recolored.category;
        draft.color = recolored.color;
        draft.icon = recolored.icon;
    }
    if let Some(title) = changes.title {
        draft.title = title;
    }
    if let Some(date) = changes.date {
        draft.date = date;
    }
    Ok(apply_optional(draft, changes.optional))
}

fn apply_optional(mut draft: EventDraft, optional: EventOptionalFields) -> EventDraft {
    if optional.end_date.is_some() {
        draft.end_date = optional.end_date;
    }
    if optional.start_time.is_some() {
        draft.start_time = optional.start_time;
    }
    if optional.end_time.is_some() {
        draft.end_time = optional.end_time;
    }
    if optional.description.is_some() {
        draft.description = optional.description;
    }
    if let Some(color) = optional.color {
        draft.color = color;
    }
    if let Some(icon) = optional.icon {
        draft.icon = icon;
    }
    if !optional.tags.is_empty() {
        draft.tags = optional.tags;
    }
    draft
}
