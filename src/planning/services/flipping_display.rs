//! Display helpers for feature/memory flipping rules.

use crate::planning::domain::{
    ActionType, FeatureFlipping, FlippingType, RuleAction, RuleState, TargetOs, VersionCondition,
};

pub fn clients_display(clients: &[String]) -> String {
    if clients.is_empty() || clients.iter().any(|c| c == "all") {
        return "ALL".to_string();
    }
    clients.join(", ")
}

pub fn caisses_display(caisses: Option<&str>) -> String {
    match caisses {
        None | Some("") | Some("Toutes") => "ALL".to_string(),
        Some(caisses) => caisses.to_string(),
    }
}

pub fn os_display(targets: &[TargetOs]) -> String {
    let both = targets.contains(&TargetOs::Ios) && targets.contains(&TargetOs::Android);
    if targets.is_empty() || both {
        return "ALL".to_string();
    }
    targets
        .iter()
        .map(|os| match os {
            TargetOs::Ios => "IOS",
            TargetOs::Android => "ANDROID",
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn versions_display(versions: &[VersionCondition]) -> String {
    if versions.is_empty() {
        return "ALL".to_string();
    }
    versions
        .iter()
        .map(|v| format!("{} {}", v.operator.symbol(), v.version))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of the rule and its targets.
pub fn flipping_summary(flipping: &FeatureFlipping) -> String {
    format!(
        "{} {} ({}) - clients: {}, caisses: {}, OS: {}, versions: {}",
        flipping_type_label(flipping.flipping_type),
        flipping.rule_name,
        flipping.theme,
        clients_display(&flipping.target_clients),
        caisses_display(flipping.target_caisses.as_deref()),
        os_display(&flipping.target_os),
        versions_display(&flipping.target_versions),
    )
}

pub fn action_type_label(action_type: ActionType) -> &'static str {
    match action_type {
        ActionType::FeatureFlipping => "Feature Flipping",
        ActionType::MemoryFlipping => "Memory Flipping",
        ActionType::Other => "Autre",
    }
}

pub fn flipping_type_label(flipping_type: FlippingType) -> &'static str {
    match flipping_type {
        FlippingType::FeatureFlipping => "Feature Flipping",
        FlippingType::MemoryFlipping => "Memory Flipping",
    }
}

pub fn rule_action_label(action: RuleAction) -> &'static str {
    match action {
        RuleAction::CreateRule => "Créer le FF/MF dans le référentiel",
        RuleAction::ObsoleteRule => "Rendre obsolète le FF/MF dans le référentiel",
        RuleAction::DisableRule => "Ajouter une règle pour désactiver le FF/MF",
        RuleAction::EnableRule => "Ajouter une règle pour activer le FF/MF",
    }
}

pub fn rule_state_label(state: RuleState) -> &'static str {
    match state {
        RuleState::Enabled => "Activé",
        RuleState::Disabled => "Désactivé",
    }
}
