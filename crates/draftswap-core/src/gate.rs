//! Access gating
//!
//! Whether the override is permitted for the current user under the
//! resolved settings. Checks run deny-first in a fixed order.

use crate::settings::Settings;
use std::collections::BTreeSet;

/// Snapshot of the user/session facts the gate needs.
///
/// Built by the engine from the host's session accessor on every pass, so
/// a login/logout mid-session is picked up by the next reconciliation.
#[derive(Debug, Clone, Default)]
pub struct UserFacts {
    /// Whether the user holds an elevated (staff) role
    pub elevated: bool,
    /// Group names the user belongs to
    pub groups: BTreeSet<String>,
    /// Whether the host's shared-drafts feature is enabled; `None` when the
    /// host cannot verify it (e.g. the site settings record is not loaded)
    pub shared_drafts_enabled: Option<bool>,
}

impl UserFacts {
    /// Facts for an elevated user with no group memberships.
    #[must_use]
    pub fn staff() -> Self {
        Self {
            elevated: true,
            ..Self::default()
        }
    }
}

/// Decide whether the override is permitted for this user.
///
/// Role and group checks fail closed: they gate a privileged action, and an
/// absent membership is a denial. The shared-drafts capability check fails
/// open when the host reports it as unverifiable (`None`): the check itself
/// being unreliable must not block legitimate use, and the host re-validates
/// on submission anyway. Keep that asymmetry — it is deliberate, not an
/// oversight.
#[must_use]
pub fn permitted(settings: &Settings, user: &UserFacts) -> bool {
    if settings.staff_only && !user.elevated {
        return false;
    }

    if !settings.allowed_groups.is_empty() && disjoint(&settings.allowed_groups, &user.groups) {
        return false;
    }

    if settings.require_shared_drafts_feature {
        match user.shared_drafts_enabled {
            Some(false) => return false,
            // fail open: capability unverifiable
            Some(true) | None => {}
        }
    }

    true
}

fn disjoint(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    a.intersection(b).next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn open_settings_permit_everyone() {
        let settings = Settings {
            require_shared_drafts_feature: false,
            ..Settings::default()
        };
        assert!(permitted(&settings, &UserFacts::default()));
    }

    #[test]
    fn staff_only_denies_regular_users() {
        let settings = Settings {
            staff_only: true,
            require_shared_drafts_feature: false,
            ..Settings::default()
        };
        assert!(!permitted(&settings, &UserFacts::default()));
        assert!(permitted(&settings, &UserFacts::staff()));
    }

    #[test]
    fn group_restriction_requires_intersection() {
        let settings = Settings {
            allowed_groups: groups(&["editors", "moderators"]),
            require_shared_drafts_feature: false,
            ..Settings::default()
        };

        let outsider = UserFacts {
            groups: groups(&["lurkers"]),
            ..UserFacts::default()
        };
        assert!(!permitted(&settings, &outsider));

        let member = UserFacts {
            groups: groups(&["editors", "lurkers"]),
            ..UserFacts::default()
        };
        assert!(permitted(&settings, &member));
    }

    #[test]
    fn group_restriction_denies_empty_membership() {
        let settings = Settings {
            allowed_groups: groups(&["editors"]),
            require_shared_drafts_feature: false,
            ..Settings::default()
        };
        assert!(!permitted(&settings, &UserFacts::default()));
    }

    #[test]
    fn feature_check_fails_closed_when_disabled() {
        let settings = Settings::default();
        let user = UserFacts {
            shared_drafts_enabled: Some(false),
            ..UserFacts::default()
        };
        assert!(!permitted(&settings, &user));
    }

    #[test]
    fn feature_check_fails_open_when_unverifiable() {
        let settings = Settings::default();
        let user = UserFacts {
            shared_drafts_enabled: None,
            ..UserFacts::default()
        };
        assert!(permitted(&settings, &user));
    }

    #[test]
    fn feature_check_skipped_when_not_required() {
        let settings = Settings {
            require_shared_drafts_feature: false,
            ..Settings::default()
        };
        let user = UserFacts {
            shared_drafts_enabled: Some(false),
            ..UserFacts::default()
        };
        assert!(permitted(&settings, &user));
    }
}
