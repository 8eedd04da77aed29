//! Document and control seams
//!
//! The engine's entire view of the page. Control handles are re-acquired
//! through [`DocumentView::control`] on every reconciliation pass; nothing
//! in the engine holds one across passes, because the host may re-render
//! the node underneath it at any time.

use crate::error::HostError;
use std::sync::Arc;

/// Location snapshot: path, hash fragment, and query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    /// Path component, e.g. `/c/announcements/170`
    pub path: String,
    /// Hash fragment without the leading `#`
    pub hash: String,
    /// Query string without the leading `?`
    pub query: String,
}

/// What activating (clicking) a control does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Activation {
    /// The host's own behavior, untouched
    #[default]
    HostDefault,
    /// Route the activation into the shared-draft launch sequence
    SharedDraft,
}

/// Handle to one interactive control element.
///
/// Mutations through this trait are the only writes the library performs
/// on the host page: label text, title, visibility, marker attributes, and
/// the activation route.
pub trait Control: Send + Sync {
    /// Stable element id
    fn id(&self) -> String;

    /// Visible label text
    fn label(&self) -> String;

    /// Replace the visible label text
    fn set_label(&self, text: &str);

    /// Hover title
    fn title(&self) -> String;

    /// Replace the hover title
    fn set_title(&self, text: &str);

    /// Whether the control is currently visible
    fn visible(&self) -> bool;

    /// Show or hide the control
    fn set_visible(&self, visible: bool);

    /// Read a data-marker attribute
    fn marker(&self, key: &str) -> Option<String>;

    /// Write a data-marker attribute
    fn set_marker(&self, key: &str, value: &str);

    /// Remove a data-marker attribute
    fn remove_marker(&self, key: &str);

    /// Current activation route
    fn activation(&self) -> Activation;

    /// Set the activation route
    fn set_activation(&self, activation: Activation);
}

/// Read/write view of the host document.
pub trait DocumentView: Send + Sync {
    /// Current location snapshot
    fn location(&self) -> PageLocation;

    /// Attribute value of the first element matching a CSS selector
    fn attribute(&self, selector: &str, name: &str) -> Option<String>;

    /// Space-separated class list of the root container
    fn root_classes(&self) -> String;

    /// Content of a named metadata tag
    fn meta_content(&self, name: &str) -> Option<String>;

    /// Look up a control by element id. Fresh handle on every call.
    fn control(&self, id: &str) -> Option<Arc<dyn Control>>;

    /// Deep-copy the anchor control (styling and semantics preserved) into
    /// a new sibling inserted immediately after it, under the given id,
    /// and return the attached copy.
    ///
    /// # Errors
    /// Fails if the anchor is not in the document or the insert is
    /// rejected.
    fn clone_after(&self, anchor_id: &str, new_id: &str) -> Result<Arc<dyn Control>, HostError>;

    /// Remove a control by id; `true` if something was removed.
    fn remove_control(&self, id: &str) -> bool;
}

/// One batch of observed childList mutations, already reduced by the host
/// adapter to the element ids that appeared and disappeared.
///
/// The adapter reports an added id when an element with that id was added
/// directly or inside an added subtree. Attribute and text mutations are
/// never reported; reacting to those would re-trigger on the engine's own
/// writes.
#[derive(Debug, Clone, Default)]
pub struct MutationRecord {
    /// Element ids that appeared
    pub added_ids: Vec<String>,
    /// Element ids that disappeared
    pub removed_ids: Vec<String>,
}

impl MutationRecord {
    /// Record with a single added id.
    #[must_use]
    pub fn added(id: &str) -> Self {
        Self {
            added_ids: vec![id.to_string()],
            removed_ids: Vec::new(),
        }
    }

    /// Record with a single removed id.
    #[must_use]
    pub fn removed(id: &str) -> Self {
        Self {
            added_ids: Vec::new(),
            removed_ids: vec![id.to_string()],
        }
    }
}
