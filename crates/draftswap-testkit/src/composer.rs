//! Scriptable fake composer

use async_trait::async_trait;
use draftswap_host::{
    Composer, ComposerAccess, ComposerModel, ComposerPath, HostError, OpenRequest,
};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Fake composer model recording every `set_field` attempt.
#[derive(Debug, Default)]
pub struct FakeModel {
    failing_fields: BTreeSet<String>,
    attempts: Mutex<Vec<String>>,
    accepted: Mutex<Vec<(String, serde_json::Value)>>,
}

impl FakeModel {
    /// Field names whose `set_field` was attempted, in order.
    pub fn attempted_fields(&self) -> Vec<String> {
        self.attempts.lock().clone()
    }

    /// Fields the model accepted, in order.
    pub fn accepted_fields(&self) -> Vec<(String, serde_json::Value)> {
        self.accepted.lock().clone()
    }
}

impl ComposerModel for FakeModel {
    fn set_field(&self, name: &str, value: serde_json::Value) -> Result<(), HostError> {
        self.attempts.lock().push(name.to_string());
        if self.failing_fields.contains(name) {
            return Err(HostError::CallFailed(format!("field {name} rejected")));
        }
        self.accepted.lock().push((name.to_string(), value));
        Ok(())
    }
}

/// Behavior switches for one fake composer.
#[derive(Debug, Clone, Default)]
struct Script {
    direct_capability: bool,
    direct_fails: bool,
    reject_shared_draft_open: bool,
    reject_all_opens: bool,
}

/// Scriptable fake composer.
///
/// Defaults to the least capable host: no direct shared-draft capability,
/// but all opens accepted. Builder methods tighten or loosen that.
#[derive(Debug)]
pub struct FakeComposer {
    script: Script,
    model: Arc<FakeModel>,
    open_flag: Mutex<bool>,
    direct_calls: Mutex<usize>,
    close_calls: Mutex<usize>,
    opens: Mutex<Vec<OpenRequest>>,
}

impl Default for FakeComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeComposer {
    pub fn new() -> Self {
        Self {
            script: Script::default(),
            model: Arc::new(FakeModel::default()),
            open_flag: Mutex::new(false),
            direct_calls: Mutex::new(0),
            close_calls: Mutex::new(0),
            opens: Mutex::new(Vec::new()),
        }
    }

    /// Host exposes the direct create-shared-draft capability.
    #[must_use]
    pub fn with_direct_capability(mut self) -> Self {
        self.script.direct_capability = true;
        self
    }

    /// Direct capability exists but fails when invoked.
    #[must_use]
    pub fn with_failing_direct(mut self) -> Self {
        self.script.direct_capability = true;
        self.script.direct_fails = true;
        self
    }

    /// Reject opens that ask for the shared-draft action.
    #[must_use]
    pub fn rejecting_shared_draft_open(mut self) -> Self {
        self.script.reject_shared_draft_open = true;
        self
    }

    /// Reject every open.
    #[must_use]
    pub fn rejecting_all_opens(mut self) -> Self {
        self.script.reject_all_opens = true;
        self
    }

    /// Start with a model already open.
    #[must_use]
    pub fn initially_open(mut self) -> Self {
        *self.open_flag.get_mut() = true;
        self
    }

    /// Make the model reject one field name.
    #[must_use]
    pub fn with_failing_field(mut self, name: &str) -> Self {
        let model = Arc::get_mut(&mut self.model).expect("configure before sharing");
        model.failing_fields.insert(name.to_string());
        self
    }

    pub fn model(&self) -> Arc<FakeModel> {
        self.model.clone()
    }

    pub fn open_requests(&self) -> Vec<OpenRequest> {
        self.opens.lock().clone()
    }

    pub fn direct_calls(&self) -> usize {
        *self.direct_calls.lock()
    }

    pub fn close_calls(&self) -> usize {
        *self.close_calls.lock()
    }
}

#[async_trait]
impl Composer for FakeComposer {
    fn is_open(&self) -> bool {
        *self.open_flag.lock()
    }

    fn close(&self) {
        *self.close_calls.lock() += 1;
        *self.open_flag.lock() = false;
    }

    fn create_shared_draft(&self) -> Result<(), HostError> {
        *self.direct_calls.lock() += 1;
        if !self.script.direct_capability {
            return Err(HostError::Unsupported);
        }
        if self.script.direct_fails {
            return Err(HostError::CallFailed("direct capability failed".to_string()));
        }
        *self.open_flag.lock() = true;
        Ok(())
    }

    async fn open(&self, request: OpenRequest) -> Result<Arc<dyn ComposerModel>, HostError> {
        use draftswap_host::ComposerAction;

        self.opens.lock().push(request.clone());

        if self.script.reject_all_opens {
            return Err(HostError::OpenRejected("open rejected".to_string()));
        }
        if self.script.reject_shared_draft_open
            && request.action == ComposerAction::CreateSharedDraft
        {
            return Err(HostError::OpenRejected("unknown action".to_string()));
        }

        *self.open_flag.lock() = true;
        Ok(self.model.clone() as Arc<dyn ComposerModel>)
    }
}

/// Fake composer registry, recording which lookup paths were probed.
#[derive(Default)]
pub struct FakeComposerAccess {
    entries: Vec<(ComposerPath, Arc<FakeComposer>)>,
    lookups: Mutex<Vec<ComposerPath>>,
}

impl FakeComposerAccess {
    /// No composer anywhere.
    pub fn empty() -> Self {
        Self::default()
    }

    /// One composer reachable at one path.
    pub fn with(path: ComposerPath, composer: Arc<FakeComposer>) -> Self {
        Self::default().and(path, composer)
    }

    /// Add another reachable composer.
    #[must_use]
    pub fn and(mut self, path: ComposerPath, composer: Arc<FakeComposer>) -> Self {
        self.entries.push((path, composer));
        self
    }

    /// Paths probed so far, in order.
    pub fn probed_paths(&self) -> Vec<ComposerPath> {
        self.lookups.lock().clone()
    }
}

impl ComposerAccess for FakeComposerAccess {
    fn lookup(&self, path: ComposerPath) -> Option<Arc<dyn Composer>> {
        self.lookups.lock().push(path);
        self.entries
            .iter()
            .find(|(entry_path, _)| *entry_path == path)
            .map(|(_, composer)| composer.clone() as Arc<dyn Composer>)
    }
}
