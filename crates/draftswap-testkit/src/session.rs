//! Fake user session

use draftswap_host::UserSession;

/// Plain-data session facts.
#[derive(Debug, Clone, Default)]
pub struct FakeSession {
    pub elevated: bool,
    pub groups: Vec<String>,
    pub shared_drafts_enabled: Option<bool>,
}

impl FakeSession {
    /// An elevated user with the shared-drafts feature verified on.
    pub fn staff() -> Self {
        Self {
            elevated: true,
            groups: Vec::new(),
            shared_drafts_enabled: Some(true),
        }
    }

    /// A regular user in the given groups.
    pub fn in_groups(groups: &[&str]) -> Self {
        Self {
            elevated: false,
            groups: groups.iter().map(|g| g.to_string()).collect(),
            shared_drafts_enabled: Some(true),
        }
    }
}

impl UserSession for FakeSession {
    fn elevated(&self) -> bool {
        self.elevated
    }

    fn group_names(&self) -> Vec<String> {
        self.groups.clone()
    }

    fn shared_drafts_enabled(&self) -> Option<bool> {
        self.shared_drafts_enabled
    }
}
