//! Settings resolution
//!
//! The host hands us configuration from up to three places: the explicit
//! settings object, a fallback storage value saved by an earlier session,
//! and the compiled-in defaults. [`resolve`] merges them in that priority
//! order with "first source that provides the field wins" semantics per
//! field, not per whole object, and always produces a fully-populated
//! [`Settings`].

use crate::context::CategoryId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Default label for the override control.
pub const DEFAULT_BUTTON_TEXT: &str = "New Shared Draft";

/// Default hover title for the override control.
pub const DEFAULT_BUTTON_TITLE: &str = "Create a new shared draft for staff collaboration";

/// Canonical, fully-resolved configuration.
///
/// Produced once at startup by [`resolve`] and passed by reference to every
/// other component; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Visible label for the override control
    pub button_text: String,
    /// Hover title for the override control
    pub button_title: String,
    /// Category the override is restricted to; `None` disables the feature
    pub enabled_category: Option<CategoryId>,
    /// Require the host's shared-drafts feature before showing the override
    pub require_shared_drafts_feature: bool,
    /// Restrict the override to elevated (staff) users
    pub staff_only: bool,
    /// If non-empty, restrict the override to members of these groups
    pub allowed_groups: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            button_text: DEFAULT_BUTTON_TEXT.to_string(),
            button_title: DEFAULT_BUTTON_TITLE.to_string(),
            enabled_category: None,
            require_shared_drafts_feature: true,
            staff_only: false,
            allowed_groups: BTreeSet::new(),
        }
    }
}

impl Settings {
    /// True when a target category is configured at all.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled_category.is_some()
    }
}

/// One partial configuration source.
///
/// Field types are permissive on purpose: admin UIs serialize numbers as
/// strings, booleans as `"true"`/`"false"`, and group lists as one
/// comma-separated field. Anything unusable deserializes to `None` rather
/// than failing the whole source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsSource {
    /// Visible label, if this source sets one
    #[serde(deserialize_with = "stringish")]
    pub button_text: Option<String>,
    /// Hover title, if this source sets one
    #[serde(deserialize_with = "stringish")]
    pub button_title: Option<String>,
    /// Raw category value; `""` and `"0"` mean "not configured here"
    #[serde(deserialize_with = "stringish")]
    pub enabled_category: Option<String>,
    /// Shared-drafts feature requirement flag
    #[serde(deserialize_with = "boolish")]
    pub require_shared_drafts_feature: Option<bool>,
    /// Staff-only flag
    #[serde(deserialize_with = "boolish")]
    pub staff_only: Option<bool>,
    /// Comma-separated group names
    #[serde(deserialize_with = "stringish")]
    pub allowed_groups: Option<String>,
}

impl SettingsSource {
    /// Parse a source from the host's loosely-typed settings map.
    ///
    /// Unknown keys are ignored; a map that is not an object yields an
    /// empty source. This never fails: a malformed source contributes
    /// nothing rather than aborting initialization.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Source providing only a raw category value, e.g. from fallback
    /// storage.
    #[must_use]
    pub fn category_only(raw: &str) -> Self {
        Self {
            enabled_category: Some(raw.to_string()),
            ..Self::default()
        }
    }

    fn category(&self) -> Option<CategoryId> {
        self.enabled_category.as_deref().and_then(normalize_category)
    }
}

/// Normalize a configured category value.
///
/// `""` and `"0"` are the admin UI's "disabled" sentinels, so neither names
/// a category; numeric values are kept in trimmed string form.
fn normalize_category(raw: &str) -> Option<CategoryId> {
    let trimmed = raw.trim();
    if trimmed == "0" {
        return None;
    }
    CategoryId::new(trimmed)
}

/// Merge sources in priority order into canonical [`Settings`].
///
/// For each field independently, the first source that provides a usable
/// value wins; sources later in the slice are consulted only for fields the
/// earlier ones left unset. Never fails: with no sources at all the result
/// is `Settings::default()` (feature disabled, default label).
#[must_use]
pub fn resolve(sources: &[SettingsSource]) -> Settings {
    let defaults = Settings::default();

    let button_text = first(sources, |s| {
        s.button_text.as_deref().map(str::trim).filter(|t| !t.is_empty()).map(String::from)
    })
    .unwrap_or(defaults.button_text);

    let button_title = first(sources, |s| {
        s.button_title.as_deref().map(str::trim).filter(|t| !t.is_empty()).map(String::from)
    })
    .unwrap_or(defaults.button_title);

    let enabled_category = first(sources, SettingsSource::category);

    let require_shared_drafts_feature = first(sources, |s| s.require_shared_drafts_feature)
        .unwrap_or(defaults.require_shared_drafts_feature);

    let staff_only = first(sources, |s| s.staff_only).unwrap_or(defaults.staff_only);

    let allowed_groups = first(sources, |s| {
        s.allowed_groups.as_deref().map(parse_groups).filter(|g| !g.is_empty())
    })
    .unwrap_or(defaults.allowed_groups);

    let settings = Settings {
        button_text,
        button_title,
        enabled_category,
        require_shared_drafts_feature,
        staff_only,
        allowed_groups,
    };

    match &settings.enabled_category {
        Some(category) => tracing::debug!(%category, "settings resolved"),
        None => tracing::debug!("settings resolved with no target category; override disabled"),
    }

    settings
}

fn first<T>(sources: &[SettingsSource], get: impl Fn(&SettingsSource) -> Option<T>) -> Option<T> {
    sources.iter().find_map(get)
}

fn parse_groups(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}

/// Accept strings and numbers; anything else is `None`.
fn stringish<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept booleans, `"true"`/`"false"`, and 0/1; anything else is `None`.
fn boolish<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    })
}
