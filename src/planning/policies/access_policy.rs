use crate::planning::domain::{PermissionLevel, PermissionModule, UserPermissions};
use crate::shared::error::ApiError;
use crate::shared::Result;
use serde::Serialize;

/// What the user may do with a module, evaluated once per view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Hidden,
    ReadOnly,
    Editable,
}

/// Kind of operation a control triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessAction {
    View,
    Edit,
}

/// AccessPolicy decides what the current user may see and change
///
/// This policy fails closed: without a permission record, or without an
/// entry for a module, the user has no access to that module.
///
/// Level rules:
/// 1. `READ` or `WRITE` grants read access
/// 2. only `WRITE` grants write access
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    permissions: Option<UserPermissions>,
}

impl AccessPolicy {
    /// Builds the policy from the current user's permissions, if known.
    pub fn from_permissions(permissions: Option<&UserPermissions>) -> Self {
        Self {
            permissions: permissions.cloned(),
        }
    }

    /// Effective level for a module, `None` when nothing is recorded
    pub fn level(&self, module: PermissionModule) -> PermissionLevel {
        self.permissions
            .as_ref()
            .and_then(|p| p.get(&module).copied())
            .unwrap_or(PermissionLevel::None)
    }

    pub fn has_read(&self, module: PermissionModule) -> bool {
        self.level(module) >= PermissionLevel::Read
    }

    pub fn has_write(&self, module: PermissionModule) -> bool {
        self.level(module) == PermissionLevel::Write
    }

    pub fn capability(&self, module: PermissionModule) -> Capability {
        match self.level(module) {
            PermissionLevel::None => Capability::Hidden,
            PermissionLevel::Read => Capability::ReadOnly,
            PermissionLevel::Write => Capability::Editable,
        }
    }

    /// Guards an operation that needs at least `level` on `module`
    ///
    /// # Errors
    /// Returns `ApiError::PermissionDenied` carrying the tooltip text shown
    /// on disabled controls.
    pub fn require(&self, module: PermissionModule, level: PermissionLevel) -> Result<()> {
        if self.level(module) >= level {
            return Ok(());
        }
        let action = if level == PermissionLevel::Write {
            AccessAction::Edit
        } else {
            AccessAction::View
        };
        Err(ApiError::PermissionDenied {
            message: disabled_tooltip(module, action),
        }
        .into())
    }
}

/// Tooltip explaining why a control is disabled.
pub fn disabled_tooltip(module: PermissionModule, action: AccessAction) -> String {
    let verb = match action {
        AccessAction::Edit => "modifier",
        AccessAction::View => "consulter",
    };
    format!(
        "Vous n'avez pas les permissions pour {} le module {}",
        verb,
        module.display_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(entries: &[(PermissionModule, PermissionLevel)]) -> AccessPolicy {
        let permissions: UserPermissions = entries.iter().copied().collect();
        AccessPolicy::from_permissions(Some(&permissions))
    }

    #[test]
    fn test_no_record_denies_everything() {
        let policy = AccessPolicy::from_permissions(None);
        for module in PermissionModule::ALL {
            assert!(!policy.has_read(module));
            assert!(!policy.has_write(module));
            assert_eq!(policy.capability(module), Capability::Hidden);
        }
    }

    #[test]
    fn test_missing_module_denies() {
        let policy = policy(&[(PermissionModule::Calendar, PermissionLevel::Write)]);
        assert!(policy.has_write(PermissionModule::Calendar));
        assert!(!policy.has_read(PermissionModule::Releases));
    }

    #[test]
    fn test_levels() {
        let policy = policy(&[
            (PermissionModule::Calendar, PermissionLevel::Read),
            (PermissionModule::Releases, PermissionLevel::Write),
            (PermissionModule::Admin, PermissionLevel::None),
        ]);
        assert!(policy.has_read(PermissionModule::Calendar));
        assert!(!policy.has_write(PermissionModule::Calendar));
        assert_eq!(policy.capability(PermissionModule::Calendar), Capability::ReadOnly);
        assert_eq!(policy.capability(PermissionModule::Releases), Capability::Editable);
        assert_eq!(policy.capability(PermissionModule::Admin), Capability::Hidden);
    }

    #[test]
    fn test_require() {
        let policy = policy(&[(PermissionModule::Releases, PermissionLevel::Read)]);
        assert!(policy
            .require(PermissionModule::Releases, PermissionLevel::Read)
            .is_ok());

        let err = policy
            .require(PermissionModule::Releases, PermissionLevel::Write)
            .unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::PermissionDenied { message }) => assert_eq!(
                message,
                "Vous n'avez pas les permissions pour modifier le module Préparation des MEP"
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_tooltip_for_view() {
        assert_eq!(
            disabled_tooltip(PermissionModule::Absence, AccessAction::View),
            "Vous n'avez pas les permissions pour consulter le module Absences"
        );
    }
}
