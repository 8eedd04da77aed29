//! In-memory document and controls

use draftswap_host::{Activation, Control, DocumentView, HostError, PageLocation};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Observable state of a control, for exact before/after comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub id: String,
    pub label: String,
    pub title: String,
    pub visible: bool,
    pub markers: BTreeMap<String, String>,
    pub activation: Activation,
}

#[derive(Debug, Clone)]
struct ControlData {
    id: String,
    label: String,
    title: String,
    visible: bool,
    markers: BTreeMap<String, String>,
    activation: Activation,
}

/// One fake control element.
#[derive(Debug)]
pub struct FakeControl {
    data: Mutex<ControlData>,
}

impl FakeControl {
    pub fn new(id: &str, label: &str, title: &str) -> Arc<Self> {
        Arc::new(Self {
            data: Mutex::new(ControlData {
                id: id.to_string(),
                label: label.to_string(),
                title: title.to_string(),
                visible: true,
                markers: BTreeMap::new(),
                activation: Activation::HostDefault,
            }),
        })
    }

    /// The host's stock create-topic button.
    pub fn new_create() -> Arc<Self> {
        Self::new("create-topic", "New Topic", "Create a new topic")
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        let data = self.data.lock();
        ControlSnapshot {
            id: data.id.clone(),
            label: data.label.clone(),
            title: data.title.clone(),
            visible: data.visible,
            markers: data.markers.clone(),
            activation: data.activation,
        }
    }

    pub fn id(&self) -> String {
        self.data.lock().id.clone()
    }

    pub fn label(&self) -> String {
        self.data.lock().label.clone()
    }

    pub fn set_label(&self, text: &str) {
        self.data.lock().label = text.to_string();
    }

    pub fn title(&self) -> String {
        self.data.lock().title.clone()
    }

    pub fn set_title(&self, text: &str) {
        self.data.lock().title = text.to_string();
    }

    pub fn visible(&self) -> bool {
        self.data.lock().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.data.lock().visible = visible;
    }

    pub fn marker(&self, key: &str) -> Option<String> {
        self.data.lock().markers.get(key).cloned()
    }

    pub fn set_marker(&self, key: &str, value: &str) {
        self.data.lock().markers.insert(key.to_string(), value.to_string());
    }

    pub fn remove_marker(&self, key: &str) {
        self.data.lock().markers.remove(key);
    }

    pub fn activation(&self) -> Activation {
        self.data.lock().activation
    }

    pub fn set_activation(&self, activation: Activation) {
        self.data.lock().activation = activation;
    }

    fn cloned_as(&self, new_id: &str) -> Arc<Self> {
        let mut data = self.data.lock().clone();
        data.id = new_id.to_string();
        Arc::new(Self {
            data: Mutex::new(data),
        })
    }
}

impl Control for FakeControl {
    fn id(&self) -> String {
        FakeControl::id(self)
    }

    fn label(&self) -> String {
        FakeControl::label(self)
    }

    fn set_label(&self, text: &str) {
        FakeControl::set_label(self, text);
    }

    fn title(&self) -> String {
        FakeControl::title(self)
    }

    fn set_title(&self, text: &str) {
        FakeControl::set_title(self, text);
    }

    fn visible(&self) -> bool {
        FakeControl::visible(self)
    }

    fn set_visible(&self, visible: bool) {
        FakeControl::set_visible(self, visible);
    }

    fn marker(&self, key: &str) -> Option<String> {
        FakeControl::marker(self, key)
    }

    fn set_marker(&self, key: &str, value: &str) {
        FakeControl::set_marker(self, key, value);
    }

    fn remove_marker(&self, key: &str) {
        FakeControl::remove_marker(self, key);
    }

    fn activation(&self) -> Activation {
        FakeControl::activation(self)
    }

    fn set_activation(&self, activation: Activation) {
        FakeControl::set_activation(self, activation);
    }
}

#[derive(Debug, Default)]
struct DocState {
    location: PageLocation,
    /// Category-hint attributes, keyed by attribute name. The fake serves
    /// `attribute("[x]", "x")` lookups straight from this map.
    attributes: BTreeMap<String, String>,
    root_classes: String,
    meta: BTreeMap<String, String>,
    /// Controls in document order
    controls: Vec<Arc<FakeControl>>,
    fail_next_insert: bool,
}

/// In-memory stand-in for the host document.
#[derive(Debug, Default)]
pub struct FakeDocument {
    state: Mutex<DocState>,
}

impl FakeDocument {
    /// Document with no controls at all (host has not rendered yet).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Document with the stock create-topic control in place.
    pub fn with_create_control() -> Self {
        let document = Self::default();
        document.state.lock().controls.push(FakeControl::new_create());
        document
    }

    pub fn set_path(&self, path: &str) {
        self.state.lock().location.path = path.to_string();
    }

    pub fn set_hash(&self, hash: &str) {
        self.state.lock().location.hash = hash.to_string();
    }

    pub fn set_query(&self, query: &str) {
        self.state.lock().location.query = query.to_string();
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.state.lock().attributes.insert(name.to_string(), value.to_string());
    }

    pub fn set_root_classes(&self, classes: &str) {
        self.state.lock().root_classes = classes.to_string();
    }

    pub fn set_meta(&self, name: &str, content: &str) {
        self.state.lock().meta.insert(name.to_string(), content.to_string());
    }

    /// Simulate the host rendering the create control after startup.
    pub fn insert_create_control(&self) {
        self.state.lock().controls.push(FakeControl::new_create());
    }

    /// Simulate a host re-render: the create control is replaced with a
    /// fresh node carrying none of our markers.
    pub fn replace_create_control(&self) {
        let mut state = self.state.lock();
        state.controls.retain(|control| control.id() != "create-topic");
        state.controls.push(FakeControl::new_create());
    }

    /// Make the next clone-insert fail, as a host render race would.
    pub fn fail_next_insert(&self) {
        self.state.lock().fail_next_insert = true;
    }

    /// Concrete-typed lookup for assertions.
    pub fn control(&self, id: &str) -> Option<Arc<FakeControl>> {
        self.state.lock().controls.iter().find(|control| control.id() == id).cloned()
    }

    /// Remove a control by id; `true` if something was removed.
    pub fn remove_control(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        let before = state.controls.len();
        state.controls.retain(|control| control.id() != id);
        state.controls.len() != before
    }

    /// Ids of currently visible controls, in document order.
    pub fn visible_control_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .controls
            .iter()
            .filter(|control| control.visible())
            .map(|control| control.id())
            .collect()
    }

    pub fn control_count(&self) -> usize {
        self.state.lock().controls.len()
    }
}

impl DocumentView for FakeDocument {
    fn location(&self) -> PageLocation {
        self.state.lock().location.clone()
    }

    fn attribute(&self, _selector: &str, name: &str) -> Option<String> {
        self.state.lock().attributes.get(name).cloned()
    }

    fn root_classes(&self) -> String {
        self.state.lock().root_classes.clone()
    }

    fn meta_content(&self, name: &str) -> Option<String> {
        self.state.lock().meta.get(name).cloned()
    }

    fn control(&self, id: &str) -> Option<Arc<dyn Control>> {
        FakeDocument::control(self, id).map(|control| control as Arc<dyn Control>)
    }

    fn clone_after(&self, anchor_id: &str, new_id: &str) -> Result<Arc<dyn Control>, HostError> {
        let mut state = self.state.lock();

        if state.fail_next_insert {
            state.fail_next_insert = false;
            return Err(HostError::CallFailed("insert rejected by host".to_string()));
        }

        let position = state
            .controls
            .iter()
            .position(|control| control.id() == anchor_id)
            .ok_or_else(|| HostError::LookupFailed(format!("no control #{anchor_id}")))?;

        let clone = state.controls[position].cloned_as(new_id);
        state.controls.insert(position + 1, clone.clone());
        Ok(clone as Arc<dyn Control>)
    }

    fn remove_control(&self, id: &str) -> bool {
        FakeDocument::remove_control(self, id)
    }
}
