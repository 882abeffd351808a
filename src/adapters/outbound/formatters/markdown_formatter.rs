use crate::application::read_models::{DashboardSummary, Report};
use crate::planning::domain::{
    Absence, Action, ActionPhase, ActionStatus, ActionType, AdminStats, AdminUser, AuditEntry,
    ClosedDay, Event, EventCategory, Game, LeaderboardEntry, Microservice, MyScores,
    PermissionLevel, PermissionModule, Release, ReleaseNoteEntry, Sprint, User, UserPermissions,
    UserPreferences,
};
use crate::planning::services::calendar::{day_name, month_name, Locale};
use crate::planning::services::flipping_display::{
    action_type_label, caisses_display, clients_display, flipping_summary, os_display,
    rule_action_label, versions_display,
};
use chrono::Datelike;
use crate::planning::services::{working_days, Holiday, HolidayCalendar, SemesterGrid, YearGrid};
use crate::ports::outbound::OutputFormatter;
use crate::shared::Result;

/// MarkdownFormatter renders reports as Markdown tables
pub struct MarkdownFormatter {
    locale: Locale,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self {
            locale: Locale::Fr,
        }
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self { locale }
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn table(output: &mut String, headers: &[&str], rows: Vec<Vec<String>>) {
        output.push_str(&format!("| {} |\n", headers.join(" | ")));
        output.push_str(&format!(
            "|{}|\n",
            headers
                .iter()
                .map(|h| "-".repeat(h.chars().count() + 2))
                .collect::<Vec<_>>()
                .join("|")
        ));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| Self::cell(c)).collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        output.push('\n');
    }

    fn empty(output: &mut String, what: &str) {
        output.push_str(&format!("_Aucun {}._\n\n", what));
    }

    fn category_label(category: &str) -> String {
        EventCategory::from_id(category)
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| category.to_string())
    }

    fn time_range(event: &Event) -> String {
        match (&event.start_time, &event.end_time) {
            (Some(start), Some(end)) => format!("{} - {}", start, end),
            (Some(start), None) => start.clone(),
            _ => String::new(),
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Section renderers
impl MarkdownFormatter {
    fn render_events(&self, output: &mut String, events: &[Event]) {
        if events.is_empty() {
            return Self::empty(output, "événement");
        }
        let rows = events
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.end_date.map(|d| d.to_string()).unwrap_or_default(),
                    Self::time_range(e),
                    e.title.clone(),
                    Self::category_label(&e.category),
                    e.tags.join(", "),
                    e.id.clone(),
                ]
            })
            .collect();
        Self::table(
            output,
            &["Date", "Fin", "Heure", "Titre", "Catégorie", "Tags", "Id"],
            rows,
        );
    }

    fn render_event(&self, output: &mut String, event: &Event) {
        let mut rows = vec![
            vec!["Date".to_string(), event.date.to_string()],
            vec!["Catégorie".to_string(), Self::category_label(&event.category)],
            vec!["Couleur".to_string(), event.color.clone()],
            vec!["Icône".to_string(), event.icon.clone()],
        ];
        if let Some(end) = event.end_date {
            rows.insert(1, vec!["Fin".to_string(), end.to_string()]);
        }
        let time = Self::time_range(event);
        if !time.is_empty() {
            rows.push(vec!["Heure".to_string(), time]);
        }
        if !event.tags.is_empty() {
            rows.push(vec!["Tags".to_string(), event.tags.join(", ")]);
        }
        if let Some(description) = &event.description {
            rows.push(vec!["Description".to_string(), description.clone()]);
        }
        rows.push(vec!["Id".to_string(), event.id.clone()]);
        Self::table(output, &["Champ", "Valeur"], rows);
    }

    fn render_releases(&self, output: &mut String, releases: &[Release]) {
        if releases.is_empty() {
            return Self::empty(output, "release");
        }
        let rows = releases
            .iter()
            .map(|r| {
                vec![
                    r.release_date.to_string(),
                    r.name.clone(),
                    r.version.clone(),
                    r.status.label().to_string(),
                    format!("{:.0}%", r.completion() * 100.0),
                    r.id.clone(),
                ]
            })
            .collect();
        Self::table(
            output,
            &["Date", "Nom", "Version", "Statut", "Squads terminées", "Id"],
            rows,
        );
    }

    fn render_release(&self, output: &mut String, release: &Release) {
        output.push_str(&format!(
            "- Date : {}\n- Statut : {}\n- Avancement : {:.0}%\n",
            release.release_date,
            release.status.label(),
            release.completion() * 100.0
        ));
        if let Some(description) = &release.description {
            output.push_str(&format!("- Description : {}\n", description));
        }
        output.push('\n');

        for squad in &release.squads {
            let state = if squad.is_completed { "✅" } else { "⏳" };
            output.push_str(&format!("### Squad {} {}\n\n", squad.squad_number, state));
            if let Some(tonton) = &squad.tonton_mep {
                output.push_str(&format!("Tonton MEP : {}\n\n", tonton));
            }
            if !squad.features.is_empty() {
                output.push_str("**Fonctionnalités**\n\n");
                for feature in &squad.features {
                    output.push_str(&format!("- {}\n", feature.title));
                }
                output.push('\n');
            }
            for phase in [ActionPhase::PreMep, ActionPhase::PostMep] {
                let rows: Vec<Vec<String>> = squad
                    .actions_in(phase)
                    .map(|a| {
                        let done = if a.status == ActionStatus::Completed { "x" } else { " " };
                        vec![
                            format!("[{}]", done),
                            action_type_label(a.action_type).to_string(),
                            a.title.clone().unwrap_or_else(|| a.description.clone()),
                            a.flipping.as_ref().map(flipping_summary).unwrap_or_default(),
                            a.id.clone(),
                        ]
                    })
                    .collect();
                if rows.is_empty() {
                    continue;
                }
                output.push_str(&format!("**{}**\n\n", phase.label()));
                Self::table(output, &["Fait", "Type", "Action", "Flipping", "Id"], rows);
            }
        }
    }

    fn render_release_export(&self, output: &mut String, release: &Release) {
        let date = release.release_date;
        output.push_str(&format!(
            "**Date de MEP:** {:02} {} {}\n\n",
            date.day(),
            month_name(date.month(), self.locale),
            date.year()
        ));
        if let Some(description) = &release.description {
            output.push_str(&format!("## Description\n\n{}\n\n", description));
        }

        output.push_str("## Tontons MEP\n\n");
        let mut squads: Vec<_> = release.squads.iter().collect();
        squads.sort_by_key(|s| s.squad_number);
        let rows: Vec<Vec<String>> = squads
            .iter()
            .map(|s| {
                vec![
                    format!("Squad {}", s.squad_number),
                    s.tonton_mep.clone().unwrap_or_else(|| "-".to_string()),
                    if s.is_completed { "✅ Validé" } else { "⏳ En cours" }.to_string(),
                ]
            })
            .collect();
        if !rows.is_empty() {
            Self::table(output, &["Squad", "Tonton MEP", "Statut"], rows);
        }

        for phase in [ActionPhase::PreMep, ActionPhase::PostMep] {
            output.push_str(&format!("## Actions {}\n\n", phase.label()));
            let actions: Vec<&Action> = release
                .squads
                .iter()
                .flat_map(|s| s.actions_in(phase))
                .collect();
            if actions.is_empty() {
                output.push_str("_Aucune action renseignée_\n\n");
                continue;
            }
            Self::render_actions_by_type(output, release, &actions);
        }
    }

    fn render_actions_by_type(output: &mut String, release: &Release, actions: &[&Action]) {
        let squad_of = |action: &Action| {
            release
                .squads
                .iter()
                .find(|s| s.id == action.squad_id)
                .map(|s| format!("S{}", s.squad_number))
                .unwrap_or_else(|| "S?".to_string())
        };

        for (action_type, rule_header) in [
            (ActionType::MemoryFlipping, "Nom du MF"),
            (ActionType::FeatureFlipping, "Nom du FF"),
        ] {
            let rows: Vec<Vec<String>> = actions
                .iter()
                .filter(|a| a.action_type == action_type)
                .map(|a| {
                    let mut row = vec![squad_of(a)];
                    match &a.flipping {
                        Some(f) => row.extend([
                            f.rule_name.clone(),
                            a.description.clone(),
                            f.theme.clone(),
                            rule_action_label(f.rule_action).to_string(),
                            clients_display(&f.target_clients),
                            caisses_display(f.target_caisses.as_deref()),
                            os_display(&f.target_os),
                            versions_display(&f.target_versions),
                        ]),
                        None => {
                            row.extend([String::new(), a.description.clone()]);
                            row.resize(9, String::new());
                        }
                    }
                    row
                })
                .collect();
            if rows.is_empty() {
                continue;
            }
            output.push_str(&format!("#### {}\n\n", action_type_label(action_type)));
            Self::table(
                output,
                &[
                    "Squad",
                    rule_header,
                    "Description",
                    "Thème",
                    "Action",
                    "Clients",
                    "Caisses",
                    "OS",
                    "Versions",
                ],
                rows,
            );
        }

        let rows: Vec<Vec<String>> = actions
            .iter()
            .filter(|a| a.action_type == ActionType::Other)
            .map(|a| vec![squad_of(a), a.description.clone()])
            .collect();
        if !rows.is_empty() {
            output.push_str("#### Autres Actions\n\n");
            Self::table(output, &["Squad", "Description"], rows);
        }
    }

    fn render_release_notes(&self, output: &mut String, entries: &[ReleaseNoteEntry]) {
        if entries.is_empty() {
            return Self::empty(output, "microservice déployé");
        }
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.deploy_order.map(|o| o.to_string()).unwrap_or_default(),
                    e.squad.clone(),
                    e.display_name().to_string(),
                    e.solution.clone().unwrap_or_default(),
                    e.tag.clone().unwrap_or_default(),
                    e.previous_tag.clone().unwrap_or_default(),
                    if e.part_en_mep { "oui" } else { "non" }.to_string(),
                    e.status.map(|s| s.label().to_string()).unwrap_or_default(),
                    e.changes
                        .iter()
                        .map(|c| match c.jira_id.as_str() {
                            "" => c.description.clone(),
                            jira => format!("{} {}", jira, c.description),
                        })
                        .collect::<Vec<_>>()
                        .join(" / "),
                    e.id.clone().unwrap_or_default(),
                ]
            })
            .collect();
        Self::table(
            output,
            &[
                "Ordre",
                "Squad",
                "Microservice",
                "Solution",
                "Tag",
                "Tag N-1",
                "Part en MEP",
                "Statut",
                "Changements",
                "Id",
            ],
            rows,
        );
    }

    fn render_microservices(&self, output: &mut String, microservices: &[Microservice]) {
        if microservices.is_empty() {
            return Self::empty(output, "microservice");
        }
        let rows = microservices
            .iter()
            .map(|m| {
                vec![
                    m.squad.clone(),
                    m.name.clone(),
                    m.solution.clone().unwrap_or_default(),
                    m.previous_tag.clone().unwrap_or_default(),
                    if m.is_active { "oui" } else { "non" }.to_string(),
                    m.id.clone(),
                ]
            })
            .collect();
        Self::table(
            output,
            &["Squad", "Nom", "Solution", "Tag en production", "Actif", "Id"],
            rows,
        );
    }

    fn render_absences(
        &self,
        output: &mut String,
        absences: &[Absence],
        calendar: &HolidayCalendar,
    ) {
        if absences.is_empty() {
            return Self::empty(output, "absence");
        }
        let rows = absences
            .iter()
            .map(|a| {
                vec![
                    a.user_name(),
                    a.absence_type.label().to_string(),
                    format!("{} ({})", a.start_date, a.start_period.label()),
                    format!("{} ({})", a.end_date, a.end_period.label()),
                    format!("{}", working_days(a, calendar)),
                    a.id.clone(),
                ]
            })
            .collect();
        Self::table(
            output,
            &["Personne", "Type", "Début", "Fin", "Jours ouvrés", "Id"],
            rows,
        );
    }

    fn render_sprints(&self, output: &mut String, sprints: &[Sprint]) {
        if sprints.is_empty() {
            return Self::empty(output, "sprint");
        }
        let rows = sprints
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.start_date.to_string(),
                    s.end_date.to_string(),
                    s.code_freeze_date.to_string(),
                    s.release_date_back.to_string(),
                    s.release_date_front.to_string(),
                ]
            })
            .collect();
        Self::table(
            output,
            &["Sprint", "Début", "Fin", "Code freeze", "MEP back", "MEP front"],
            rows,
        );
    }

    fn render_closed_days(&self, output: &mut String, days: &[ClosedDay]) {
        if days.is_empty() {
            return Self::empty(output, "jour fermé");
        }
        let rows = days
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    d.reason.clone(),
                    d.id.clone().unwrap_or_default(),
                ]
            })
            .collect();
        Self::table(output, &["Date", "Motif", "Id"], rows);
    }

    fn render_history(&self, output: &mut String, entries: &[AuditEntry]) {
        if entries.is_empty() {
            return Self::empty(output, "historique");
        }
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.timestamp().to_string(),
                    e.action().as_str().to_string(),
                    e.subject().unwrap_or_default(),
                    e.author().to_string(),
                    e.id().to_string(),
                ]
            })
            .collect();
        Self::table(output, &["Date", "Action", "Élément", "Auteur", "Id"], rows);
    }

    fn render_games(&self, output: &mut String, games: &[Game]) {
        if games.is_empty() {
            return Self::empty(output, "jeu");
        }
        let rows = games
            .iter()
            .map(|g| {
                vec![
                    g.slug.clone(),
                    g.name.clone(),
                    g.description.clone().unwrap_or_default(),
                    if g.is_active { "oui" } else { "non" }.to_string(),
                ]
            })
            .collect();
        Self::table(output, &["Slug", "Nom", "Description", "Actif"], rows);
    }

    fn render_leaderboard(&self, output: &mut String, entries: &[LeaderboardEntry]) {
        if entries.is_empty() {
            return Self::empty(output, "score");
        }
        let rows = entries
            .iter()
            .map(|e| {
                vec![
                    e.rank.to_string(),
                    e.score.player_name(),
                    e.score.score.to_string(),
                    e.score.wpm.map(|w| format!("{:.0}", w)).unwrap_or_default(),
                    e.score
                        .accuracy
                        .map(|a| format!("{:.1}%", a))
                        .unwrap_or_default(),
                ]
            })
            .collect();
        Self::table(output, &["Rang", "Joueur", "Score", "MPM", "Précision"], rows);
    }

    fn render_my_scores(&self, output: &mut String, scores: &MyScores) {
        output.push_str(&format!(
            "- Meilleur score : {}\n- Parties jouées : {}\n\n",
            scores.best_score, scores.games_played
        ));
        let rows = scores
            .scores
            .iter()
            .map(|s| vec![s.created_at.clone(), s.score.to_string()])
            .collect();
        Self::table(output, &["Date", "Score"], rows);
    }

    fn render_semester(&self, output: &mut String, grid: &SemesterGrid) {
        let headers: Vec<&str> = grid.months.iter().map(|m| m.name.as_str()).collect();
        let rows = (0..31)
            .map(|row| {
                grid.months
                    .iter()
                    .map(|month| {
                        let cell = &month.cells[row];
                        if !cell.is_valid {
                            return String::new();
                        }
                        let mut text = format!("{:02} {}", cell.day_number, cell.day_letter);
                        if cell.is_holiday {
                            text.push_str(" 🎉");
                        } else if cell.is_weekend {
                            text.push_str(" ·");
                        }
                        for event in &cell.events {
                            text.push_str(&format!(" {}", event.title));
                        }
                        if cell.is_today {
                            text = format!("**{}**", text);
                        }
                        text
                    })
                    .collect()
            })
            .collect();
        Self::table(output, &headers, rows);
    }

    fn render_year(&self, output: &mut String, grid: &YearGrid) {
        let rows = grid
            .months
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    m.days_in_month.to_string(),
                    day_name(m.first_weekday, self.locale).to_string(),
                    m.event_count.to_string(),
                    m.holidays
                        .iter()
                        .map(|h| format!("{} {}", h.date.format("%d/%m"), h.label))
                        .collect::<Vec<_>>()
                        .join(", "),
                ]
            })
            .collect();
        Self::table(
            output,
            &["Mois", "Jours", "Premier jour", "Événements", "Fériés"],
            rows,
        );
    }

    fn render_holidays(&self, output: &mut String, holidays: &[Holiday]) {
        let rows = holidays
            .iter()
            .map(|h| {
                vec![
                    h.date.to_string(),
                    day_name(h.date.weekday(), self.locale).to_string(),
                    h.label.clone(),
                ]
            })
            .collect();
        Self::table(output, &["Date", "Jour", "Libellé"], rows);
    }

    fn render_settings(&self, output: &mut String, preferences: &UserPreferences) {
        output.push_str(&format!("- Thème : {}\n\n", preferences.theme.as_str()));
        if !preferences.custom_categories.is_empty() {
            output.push_str("**Catégories personnalisées**\n\n");
            let rows = preferences
                .custom_categories
                .iter()
                .map(|c| vec![c.id.clone(), c.label.clone(), c.color.clone(), c.icon.clone()])
                .collect();
            Self::table(output, &["Id", "Libellé", "Couleur", "Icône"], rows);
        }
        if !preferences.custom_tags.is_empty() {
            output.push_str("**Tags**\n\n");
            let rows = preferences
                .custom_tags
                .iter()
                .map(|t| vec![t.id.clone(), t.label.clone(), t.color.clone()])
                .collect();
            Self::table(output, &["Id", "Libellé", "Couleur"], rows);
        }
    }

    fn render_user(&self, output: &mut String, user: &User) {
        output.push_str(&format!(
            "- Email : {}\n- Thème : {}\n",
            user.email,
            user.theme_preference.as_str()
        ));
        output.push('\n');
        if let Some(permissions) = &user.permissions {
            self.render_permissions(output, permissions);
        }
    }

    fn render_permissions(&self, output: &mut String, permissions: &UserPermissions) {
        let rows = PermissionModule::ALL
            .iter()
            .map(|module| {
                let level = permissions
                    .get(module)
                    .copied()
                    .unwrap_or(PermissionLevel::None);
                vec![module.display_name().to_string(), level.as_str().to_string()]
            })
            .collect();
        Self::table(output, &["Module", "Niveau"], rows);
    }

    fn render_admin_users(&self, output: &mut String, users: &[AdminUser]) {
        if users.is_empty() {
            return Self::empty(output, "utilisateur");
        }
        let rows = users
            .iter()
            .map(|u| {
                vec![
                    format!("{} {}", u.first_name, u.last_name),
                    u.email.clone(),
                    u.histories_count.to_string(),
                    u.id.clone(),
                ]
            })
            .collect();
        Self::table(output, &["Nom", "Email", "Modifications", "Id"], rows);
    }

    fn render_stats(&self, output: &mut String, stats: &AdminStats) {
        let rows = vec![
            vec!["Utilisateurs".to_string(), stats.total_users.to_string()],
            vec!["Événements".to_string(), stats.total_events.to_string()],
            vec!["Releases".to_string(), stats.total_releases.to_string()],
            vec!["Historique".to_string(), stats.total_history_entries.to_string()],
        ];
        Self::table(output, &["Collection", "Total"], rows);
    }

    fn render_dashboard(&self, output: &mut String, summary: &DashboardSummary) {
        output.push_str(&format!(
            "- Événements : {}\n- Releases : {}\n- Modifications : {}\n\n",
            summary.event_count, summary.release_count, summary.history_count
        ));
        output.push_str("## Prochains événements\n\n");
        self.render_events(output, &summary.upcoming_events);
        output.push_str("## Prochaines releases\n\n");
        self.render_releases(output, &summary.upcoming_releases);
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, report: &Report<'_>) -> Result<String> {
        let mut output = format!("# {}\n\n", report.title());

        match *report {
            Report::Events(events) => self.render_events(&mut output, events),
            Report::Event(event) => self.render_event(&mut output, event),
            Report::Releases(releases) => self.render_releases(&mut output, releases),
            Report::Release(release) => self.render_release(&mut output, release),
            Report::ReleaseExport(release) => self.render_release_export(&mut output, release),
            Report::ReleaseNotes(entries) => self.render_release_notes(&mut output, entries),
            Report::Microservices(list) => self.render_microservices(&mut output, list),
            Report::Absences { absences, calendar } => {
                self.render_absences(&mut output, absences, calendar)
            }
            Report::Sprints(sprints) => self.render_sprints(&mut output, sprints),
            Report::ClosedDays(days) => self.render_closed_days(&mut output, days),
            Report::History(entries) => self.render_history(&mut output, entries),
            Report::Games(games) => self.render_games(&mut output, games),
            Report::Leaderboard { entries, .. } => self.render_leaderboard(&mut output, entries),
            Report::MyScores(scores) => self.render_my_scores(&mut output, scores),
            Report::Semester(grid) => self.render_semester(&mut output, grid),
            Report::Year(grid) => self.render_year(&mut output, grid),
            Report::Holidays { holidays, .. } => self.render_holidays(&mut output, holidays),
            Report::Settings(preferences) => self.render_settings(&mut output, preferences),
            Report::User(user) => self.render_user(&mut output, user),
            Report::Permissions { permissions, .. } => {
                self.render_permissions(&mut output, permissions)
            }
            Report::AdminUsers(users) => self.render_admin_users(&mut output, users),
            Report::AdminStats(stats) => self.render_stats(&mut output, stats),
            Report::Dashboard(summary) => self.render_dashboard(&mut output, summary),
        }

        Ok(output)
    }
}
