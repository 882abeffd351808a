/// Integration tests for the application layer
mod test_utilities;

use chrono::NaiveDate;
use event_planner::application::ui::Reported;
use event_planner::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use test_utilities::mocks::*;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn validation_field(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(ApiError::Validation { field, .. }) => field.clone(),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_event_reloads_list() {
    let repository = MockEventRepository::new().with_event("ev-a", "MEP", "2025-02-12");
    let store = EventStore::new(repository.clone());

    let created = store
        .create(EventDraft::new(
            "  Release 12  ",
            date("2025-03-04"),
            EventCategory::Hotfix,
        ))
        .await
        .unwrap();

    assert_eq!(created.title, "Release 12");
    assert_eq!(repository.calls(), vec!["create Release 12", "list"]);
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn test_invalid_draft_sends_nothing() {
    let repository = MockEventRepository::new();
    let store = EventStore::new(repository.clone());

    let err = store
        .create(EventDraft::new("   ", date("2025-03-04"), EventCategory::Mep))
        .await
        .unwrap_err();

    assert_eq!(validation_field(&err), "title");
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_failed_write_skips_reload() {
    let repository = MockEventRepository::new().with_failing_writes();
    let store = EventStore::new(repository.clone());

    let err = store
        .create(EventDraft::new("MEP", date("2025-03-04"), EventCategory::Mep))
        .await
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ApiError>().and_then(ApiError::status),
        Some(500)
    );
    assert_eq!(repository.calls(), vec!["create MEP"]);
}

#[tokio::test]
async fn test_import_rejects_batch_with_indexed_field() {
    let repository = MockEventRepository::new();
    let store = EventStore::new(repository.clone());

    let mut broken = EventDraft::new("Gel", date("2025-06-10"), EventCategory::CodeFreeze);
    broken.end_date = Some(date("2025-06-01"));
    let drafts = vec![
        EventDraft::new("MEP", date("2025-06-02"), EventCategory::Mep),
        broken,
    ];

    let err = store.import(drafts).await.unwrap_err();

    assert_eq!(validation_field(&err), "events[1].endDate");
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_import_sends_one_request() {
    let repository = MockEventRepository::new();
    let store = EventStore::new(repository.clone());
    let drafts = vec![
        EventDraft::new("MEP", date("2025-06-02"), EventCategory::Mep),
        EventDraft::new("Hotfix", date("2025-06-05"), EventCategory::Hotfix),
    ];

    let count = store.import(drafts).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(repository.calls(), vec!["bulk_import 2", "list"]);
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn test_duplicate_uses_loaded_event() {
    let repository = MockEventRepository::new().with_event("ev-a", "MEP", "2025-02-12");
    let store = EventStore::new(repository.clone());
    store.load().await.unwrap();

    let copy = store.duplicate("ev-a", Some(date("2025-02-19"))).await.unwrap();

    assert_eq!(copy.title, "MEP (copie)");
    assert_eq!(copy.date, date("2025-02-19"));
    assert_eq!(repository.calls(), vec!["list", "create MEP (copie)", "list"]);
}

#[tokio::test]
async fn test_login_stores_session_and_permissions() {
    let gateway = MockAuthGateway::new(&[
        (PermissionModule::Calendar, PermissionLevel::Write),
        (PermissionModule::Releases, PermissionLevel::Read),
    ]);
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = AuthService::new(gateway, Arc::clone(&session));

    let outcome = auth.login(" jane.doe@example.com ", "secret").await;

    assert!(outcome.success);
    assert!(auth.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("token-123"));
    assert_eq!(auth.display_name(), "Jane D.");

    let policy = auth.access_policy();
    assert!(policy.has_write(PermissionModule::Calendar));
    assert!(policy.has_read(PermissionModule::Releases));
    assert!(!policy.has_write(PermissionModule::Releases));
    assert!(policy
        .require(PermissionModule::Admin, PermissionLevel::Read)
        .is_err());
}

#[tokio::test]
async fn test_failed_login_keeps_state() {
    let gateway = MockAuthGateway::new(&[]);
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = AuthService::new(gateway.clone(), Arc::clone(&session));

    let outcome = auth.login("jane.doe@example.com", "wrong").await;

    assert!(!outcome.success);
    assert_eq!(outcome.message, "Identifiants invalides");
    assert!(!auth.is_authenticated());
    assert!(session.token().is_none());
    assert_eq!(gateway.login_count(), 1);
}

#[tokio::test]
async fn test_blank_credentials_never_reach_gateway() {
    let gateway = MockAuthGateway::new(&[]);
    let auth = AuthService::new(gateway.clone(), Arc::new(MemorySessionStore::new()));

    let outcome = auth.login("  ", "secret").await;

    assert!(!outcome.success);
    assert_eq!(gateway.login_count(), 0);
}

#[tokio::test]
async fn test_failed_profile_fetch_ends_session() {
    let gateway = MockAuthGateway::new(&[]).with_failing_me();
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_session(
        Session::new("stale", None),
    ));
    let auth = AuthService::new(gateway, Arc::clone(&session));
    assert!(auth.is_authenticated());

    assert!(auth.fetch_current_user().await.is_none());
    assert!(!auth.is_authenticated());
    assert!(session.token().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_history_polling_picks_up_new_entries() {
    let repository = Arc::new(MockHistoryRepository::new());
    let store = HistoryStore::new(Arc::clone(&repository), HistoryKind::Events);

    let handle = store.start_polling(Duration::from_millis(2000)).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(repository.list_count(), 1);
    assert!(store.snapshot().is_empty());

    repository.push("h1");
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(repository.list_count(), 2);
    assert_eq!(store.snapshot()[0].id(), "h1");

    handle.stop();
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(repository.list_count(), 2);
}

#[tokio::test]
async fn test_history_polling_rejects_zero_interval() {
    let repository = Arc::new(MockHistoryRepository::new());
    let store = HistoryStore::new(Arc::clone(&repository), HistoryKind::Events);

    let err = store.start_polling(Duration::ZERO).unwrap_err();

    assert_eq!(validation_field(&err), "interval");
    tokio::task::yield_now().await;
    assert_eq!(repository.list_count(), 0);
}

#[tokio::test]
async fn test_history_rollback_refreshes() {
    let repository = Arc::new(MockHistoryRepository::new());
    repository.push("h1");
    repository.push("h2");
    let store = HistoryStore::new(Arc::clone(&repository), HistoryKind::Events);
    assert_eq!(store.load().await.len(), 2);

    store.rollback("h2").await.unwrap();

    assert_eq!(*repository.rolled_back.lock().unwrap(), vec!["h2"]);
    let ids: Vec<_> = store.snapshot().iter().map(|e| e.id().to_string()).collect();
    assert_eq!(ids, vec!["h1"]);
}

#[tokio::test]
async fn test_only_one_confirmation_at_a_time() {
    let confirmations = Arc::new(ConfirmationService::new());
    let first = {
        let confirmations = Arc::clone(&confirmations);
        tokio::spawn(async move {
            confirmations
                .confirm(ConfirmationOptions::new("Supprimer ?", "Définitivement").danger())
                .await
        })
    };
    let mut requests = confirmations.subscribe();
    requests.wait_for(Option::is_some).await.unwrap();

    let err = confirmations
        .confirm(ConfirmationOptions::new("Autre", "Deuxième demande"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PlannerError>(),
        Some(PlannerError::ConfirmationPending)
    ));

    confirmations.respond(true);
    assert!(first.await.unwrap().unwrap());
    assert!(confirmations.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_toast_expires_after_its_duration() {
    let toasts = ToastService::new();
    toasts.success("Événement créé", None, None);
    let sticky = toasts.info("Lecture", None, Some(Duration::ZERO));

    tokio::time::sleep(Duration::from_millis(4_900)).await;
    assert_eq!(toasts.toasts().len(), 2);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let remaining = toasts.toasts();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, sticky);
}

#[tokio::test(start_paused = true)]
async fn test_network_failures_log_out_once_per_window() {
    let logouts = Arc::new(AtomicUsize::new(0));
    let toasts = ToastService::new();
    let reporter = {
        let logouts = Arc::clone(&logouts);
        ErrorReporter::new(toasts.clone()).with_logout(move || {
            logouts.fetch_add(1, Ordering::SeqCst);
        })
    };
    let network: anyhow::Error = ApiError::Network {
        message: "connection refused".to_string(),
    }
    .into();

    assert_eq!(reporter.report(&network), Reported::LoggedOut);
    assert_eq!(reporter.report(&network), Reported::Silent);
    assert_eq!(logouts.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(reporter.report(&network), Reported::LoggedOut);
    assert_eq!(logouts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_forbidden_is_silent() {
    let toasts = ToastService::new();
    let reporter = ErrorReporter::new(toasts.clone());
    let forbidden: anyhow::Error = ApiError::from_status(403, None).into();

    assert_eq!(reporter.report(&forbidden), Reported::Silent);
    assert!(toasts.toasts().is_empty());
}

fn not_found(error: &anyhow::Error) -> bool {
    matches!(error.downcast_ref::<ApiError>(), Some(ApiError::NotFound { .. }))
}

#[tokio::test]
async fn test_feature_change_refetches_opened_release() {
    let repository = MockReleaseRepository::new().with_release("r1", "Release 25.1");
    let store = ReleaseStore::new(repository.clone());
    store.open("r1").await.unwrap();

    let feature = store
        .add_feature(
            "s1",
            CreateFeature {
                title: " Connexion biométrique ".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(feature.title, "Connexion biométrique");
    assert_eq!(repository.calls(), vec!["get r1", "add_feature s1", "get r1"]);
    let current = store.current().unwrap();
    assert_eq!(current.squads[0].features.len(), 1);
}

#[tokio::test]
async fn test_release_update_replaces_opened_release() {
    let repository = MockReleaseRepository::new()
        .with_release("r1", "Release 25.1")
        .with_release("r2", "Release 25.2");
    let store = ReleaseStore::new(repository.clone());
    store.open("r1").await.unwrap();

    store
        .update(
            "r2",
            UpdateRelease {
                name: Some("Release 25.2 bis".to_string()),
                ..UpdateRelease::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(store.current().unwrap().name, "Release 25.1");

    store
        .update("r1", UpdateRelease::status(ReleaseStatus::Completed))
        .await
        .unwrap();

    let current = store.current().unwrap();
    assert_eq!(current.status, ReleaseStatus::Completed);
    assert_eq!(
        repository.calls(),
        vec!["get r1", "update r2", "list", "update r1", "list"]
    );
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn test_deleting_opened_release_closes_it() {
    let repository = MockReleaseRepository::new().with_release("r1", "Release 25.1");
    let store = ReleaseStore::new(repository.clone());
    store.open("r1").await.unwrap();

    store.delete("r1").await.unwrap();

    assert!(store.current().is_none());
    assert!(store.snapshot().is_empty());
    assert_eq!(repository.calls(), vec!["get r1", "delete r1", "list"]);
}

#[tokio::test]
async fn test_toggle_action_sends_flipped_status() {
    let repository = MockReleaseRepository::new().with_release("r1", "Release 25.1");
    let store = ReleaseStore::new(repository.clone());
    store.open("r1").await.unwrap();

    let action = store.toggle_action_status("a1").await.unwrap();

    assert_eq!(action.status, ActionStatus::Completed);
    assert_eq!(
        repository.calls(),
        vec!["get r1", "update_action a1 Some(Completed)", "get r1"]
    );
    let current = store.current().unwrap();
    assert_eq!(
        current.find_action("a1").unwrap().status,
        ActionStatus::Completed
    );
}

#[tokio::test]
async fn test_toggle_action_needs_an_opened_release() {
    let repository = MockReleaseRepository::new().with_release("r1", "Release 25.1");
    let store = ReleaseStore::new(repository.clone());

    let err = store.toggle_action_status("a1").await.unwrap_err();

    assert!(not_found(&err));
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_settings_load_falls_back_to_defaults() {
    let stored = UserPreferences {
        theme: Theme::Dark,
        ..UserPreferences::defaults()
    };
    let store = SettingsStore::new(MockSettingsRepository::new(stored).with_failing_get());

    let loaded = store.load().await;

    assert_eq!(loaded, UserPreferences::defaults());
    assert_eq!(store.snapshot().theme, Theme::Light);
}

#[tokio::test]
async fn test_settings_reset_keeps_document_identity() {
    let stored = UserPreferences {
        id: Some("pref-1".to_string()),
        theme: Theme::Dark,
        custom_tags: vec![CustomTag {
            id: "t1".to_string(),
            name: "urgent".to_string(),
            label: "Urgent".to_string(),
            color: "#ef4444".to_string(),
            icon: None,
        }],
        created_at: Some("2025-01-01T08:00:00Z".to_string()),
        updated_at: None,
        ..UserPreferences::defaults()
    };
    let repository = MockSettingsRepository::new(stored);
    let store = SettingsStore::new(repository.clone());
    store.load().await;

    let reset = store.reset_to_defaults().await.unwrap();

    let sent = repository.puts();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id.as_deref(), Some("pref-1"));
    assert_eq!(sent[0].created_at.as_deref(), Some("2025-01-01T08:00:00Z"));
    assert_eq!(sent[0].theme, Theme::Light);
    assert!(sent[0].custom_tags.is_empty());
    assert_eq!(reset, store.snapshot());
}

#[tokio::test]
async fn test_unknown_category_is_not_sent() {
    let repository = MockSettingsRepository::new(UserPreferences::defaults());
    let store = SettingsStore::new(repository.clone());
    store.load().await;

    let err = store
        .update_category("missing", "Démo", "#22c55e", "star")
        .await
        .unwrap_err();

    assert!(not_found(&err));
    assert!(repository.puts().is_empty());
}

fn absence_request(day: &str, start: Period, end: Period) -> AbsenceRequest {
    AbsenceRequest {
        user_id: None,
        start_date: date(day),
        end_date: date(day),
        absence_type: AbsenceType::Absence,
        start_period: start,
        end_period: end,
    }
}

#[tokio::test]
async fn test_inverted_half_day_absence_sends_nothing() {
    let repository = MockAbsenceRepository::new();
    let store = AbsenceStore::new(repository.clone());

    let err = store
        .create(absence_request("2025-03-10", Period::Afternoon, Period::Morning))
        .await
        .unwrap_err();

    assert_eq!(validation_field(&err), "endPeriod");
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_absence_reload_reuses_window() {
    let repository = MockAbsenceRepository::new();
    let store = AbsenceStore::new(repository.clone());
    let window = DateRange::new(Some(date("2025-03-01")), Some(date("2025-03-31")));
    store.load(window).await.unwrap();

    store
        .create(absence_request("2025-03-10", Period::Morning, Period::Afternoon))
        .await
        .unwrap();

    assert_eq!(repository.calls(), vec!["list", "create", "list"]);
    assert_eq!(repository.ranges(), vec![window, window]);
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn test_failed_game_seeding_still_loads_catalog() {
    let repository = MockGameRepository::new().with_failing_init();
    let store = GameStore::new(repository.clone());

    let games = store.initialize().await.unwrap();

    assert_eq!(games.len(), 1);
    assert_eq!(repository.calls(), vec!["init", "list"]);
    assert_eq!(store.snapshot()[0].slug, "typing-fr");
}

#[tokio::test]
async fn test_onboarding_hidden_until_loaded() {
    let store = OnboardingStore::new(MockOnboardingRepository::new(&["WELCOME"]));
    assert!(!store.should_show("TOUR_HOME"));

    store.load().await.unwrap();

    assert!(store.should_show("TOUR_HOME"));
    assert!(!store.should_show("WELCOME"));
}

#[tokio::test]
async fn test_onboarding_step_hidden_even_if_request_fails() {
    let repository = MockOnboardingRepository::new(&[]).with_failing_writes();
    let store = OnboardingStore::new(repository.clone());
    store.load().await.unwrap();

    store.mark_seen("FEATURE_RELEASES").await;

    assert!(!store.should_show("FEATURE_RELEASES"));
    assert!(store.should_show("WELCOME"));
    assert_eq!(
        repository.calls(),
        vec!["seen_keys", "mark_seen FEATURE_RELEASES"]
    );
}

fn note_request(name: &str, squad: &str, order: Option<i32>) -> ReleaseNoteRequest {
    ReleaseNoteRequest {
        microservice: Some(name.to_string()),
        squad: squad.to_string(),
        part_en_mep: order.is_some(),
        deploy_order: order,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_release_note_create_reloads_in_deployment_order() {
    let repository = MockReleaseNoteRepository::new();
    let store = ReleaseNoteStore::new(repository.clone());
    store.load("r1").await.unwrap();

    store
        .create(note_request("notification-service", "Squad 2", None))
        .await
        .unwrap();
    store
        .create(note_request("payment-service", "Squad 3", Some(2)))
        .await
        .unwrap();
    store
        .create(note_request("gateway", "Squad 1", Some(1)))
        .await
        .unwrap();

    let names: Vec<String> = store
        .snapshot()
        .iter()
        .map(|e| e.display_name().to_string())
        .collect();
    assert_eq!(names, vec!["gateway", "payment-service", "notification-service"]);
    assert_eq!(store.filtered(None, true).len(), 2);
    assert_eq!(store.filtered(Some("Squad 2"), false).len(), 1);
    assert_eq!(
        repository.calls(),
        vec![
            "list r1", "create r1", "list r1", "create r1", "list r1", "create r1", "list r1"
        ]
    );
}

#[tokio::test]
async fn test_release_note_without_microservice_sends_nothing() {
    let repository = MockReleaseNoteRepository::new();
    let store = ReleaseNoteStore::new(repository.clone());
    store.load("r1").await.unwrap();

    let err = store
        .create(note_request("   ", "Squad 1", Some(1)))
        .await
        .unwrap_err();

    assert_eq!(validation_field(&err), "microservice");
    assert_eq!(repository.calls(), vec!["list r1"]);
}

#[tokio::test]
async fn test_release_note_needs_a_loaded_release() {
    let repository = MockReleaseNoteRepository::new();
    let store = ReleaseNoteStore::new(repository.clone());

    let err = store
        .export(NoteExportFormat::Markdown)
        .await
        .unwrap_err();

    assert!(not_found(&err));
    assert!(repository.calls().is_empty());
}

#[tokio::test]
async fn test_release_note_export_uses_loaded_release() {
    let repository = MockReleaseNoteRepository::new();
    let store = ReleaseNoteStore::new(repository.clone());
    store.load("r7").await.unwrap();

    let content = store.export(NoteExportFormat::Html).await.unwrap();

    assert_eq!(content, "# Release note r7");
    assert_eq!(repository.calls(), vec!["list r7", "export r7 html"]);
}

#[tokio::test]
async fn test_deactivated_microservice_leaves_active_list() {
    let repository = MockMicroserviceRepository::new()
        .with_microservice("ms-1", "payment-service", "Squad 3", 2)
        .with_microservice("ms-2", "gateway", "Squad 1", 1)
        .with_microservice("ms-3", "billing", "Squad 3", 1);
    let store = MicroserviceStore::new(repository.clone());

    let loaded = store.load().await.unwrap();
    let ids: Vec<&str> = loaded.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["ms-2", "ms-3", "ms-1"]);

    store.deactivate("ms-3").await.unwrap();

    assert_eq!(store.snapshot().len(), 2);
    assert_eq!(store.all().await.unwrap().len(), 3);
    assert_eq!(
        repository.calls(),
        vec!["list_active", "delete ms-3", "list_active", "list_all"]
    );
}

#[tokio::test]
async fn test_microservice_outside_squads_is_not_sent() {
    let repository = MockMicroserviceRepository::new();
    let store = MicroserviceStore::new(repository.clone());

    let err = store
        .create(CreateMicroservice {
            name: "payment-service".to_string(),
            squad: "Squad 9".to_string(),
            solution: None,
            display_order: None,
            description: None,
        })
        .await
        .unwrap_err();

    assert_eq!(validation_field(&err), "squad");
    assert!(repository.calls().is_empty());
}
