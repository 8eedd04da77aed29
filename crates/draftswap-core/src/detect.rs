//! Category detection
//!
//! Six independent probes over the [`PageContext`] snapshot, tried in a
//! fixed order with first-match-wins semantics (a short-circuit, not a
//! vote). URL-derived signals come first because they are authoritative for
//! routed pages; DOM and meta hints are best-effort fallbacks for pages
//! that have not finished rendering. Precedence is:
//!
//! 1. location path (`/c/<slug>/<id>` or `/c/<id>`)
//! 2. hash fragment numeric segment (hash-based routing)
//! 3. `category` query parameter
//! 4. `data-category-id` DOM attribute
//! 5. `category-<id>` class on the root container
//! 6. category metadata tag
//!
//! Every probe is a side-effect-free read over the snapshot, cheap enough
//! to run many times per second; the regexes are compiled once.

use crate::context::{CategoryId, PageContext};
use once_cell::sync::Lazy;
use regex::Regex;

/// `/c/<slug>/<id>`, `/c/<id>`, or deeper `/c/<parent>/<child>/<id>`
static PATH_CATEGORY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/c(?:/[^/]+)*/(\d+)(?:/|$)").unwrap());

/// Any numeric path segment inside a hash fragment
static HASH_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(\d+)(?:/|$)").unwrap());

/// `category-<id>` among the root container's classes
static ROOT_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)category-(\d+)(?:\s|$)").unwrap());

type Probe = fn(&PageContext) -> Option<CategoryId>;

/// Ordered detection strategies; earlier entries win.
static STRATEGIES: &[(&str, Probe)] = &[
    ("path", from_path),
    ("hash", from_hash),
    ("query", from_query),
    ("dom-attribute", from_attribute),
    ("root-class", from_root_class),
    ("meta", from_meta),
];

/// Detect the current category from a page snapshot.
///
/// Returns `None` only when every strategy fails; callers treat that as
/// "unknown", not as "no category page".
#[must_use]
pub fn detect(ctx: &PageContext) -> Option<CategoryId> {
    for (name, probe) in STRATEGIES {
        if let Some(category) = probe(ctx) {
            tracing::debug!(strategy = *name, %category, "category detected");
            return Some(category);
        }
    }
    tracing::debug!(path = %ctx.path, "no category detected");
    None
}

fn from_path(ctx: &PageContext) -> Option<CategoryId> {
    PATH_CATEGORY
        .captures(&ctx.path)
        .and_then(|caps| CategoryId::new(&caps[1]))
}

fn from_hash(ctx: &PageContext) -> Option<CategoryId> {
    HASH_SEGMENT
        .captures(&ctx.hash)
        .and_then(|caps| CategoryId::new(&caps[1]))
}

fn from_query(ctx: &PageContext) -> Option<CategoryId> {
    url::form_urlencoded::parse(ctx.query.as_bytes())
        .find(|(key, _)| key == "category")
        .and_then(|(_, value)| CategoryId::new(&value))
}

fn from_attribute(ctx: &PageContext) -> Option<CategoryId> {
    ctx.category_attr.as_deref().and_then(CategoryId::new)
}

fn from_root_class(ctx: &PageContext) -> Option<CategoryId> {
    ROOT_CLASS
        .captures(&ctx.root_classes)
        .and_then(|caps| CategoryId::new(&caps[1]))
}

fn from_meta(ctx: &PageContext) -> Option<CategoryId> {
    ctx.category_meta.as_deref().and_then(CategoryId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    #[test]
    fn path_with_slug_and_id() {
        let ctx = PageContext::with_path("/c/announcements/170");
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn path_with_bare_id() {
        let ctx = PageContext::with_path("/c/170");
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn path_with_subcategory() {
        let ctx = PageContext::with_path("/c/parent/child/42");
        assert_eq!(detect(&ctx), Some(id("42")));
    }

    #[test]
    fn path_ignores_non_category_routes() {
        for path in ["/t/some-topic/99", "/latest", "/u/12/summary", "/c/announcements"] {
            let ctx = PageContext::with_path(path);
            assert_eq!(from_path(&ctx), None, "path {path:?}");
        }
    }

    #[test]
    fn hash_routing() {
        let ctx = PageContext {
            hash: "/c/announcements/170".to_string(),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn query_parameter() {
        let ctx = PageContext {
            query: "filter=latest&category=170".to_string(),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn query_parameter_percent_decoded() {
        let ctx = PageContext {
            query: "category=%31%37%30".to_string(),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn dom_attribute_hint() {
        let ctx = PageContext {
            category_attr: Some("170".to_string()),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn root_class_hint() {
        let ctx = PageContext {
            root_classes: "archetype-regular category-170 has-sidebar".to_string(),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn root_class_requires_word_boundary() {
        let ctx = PageContext {
            root_classes: "subcategory-170".to_string(),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), None);
    }

    #[test]
    fn meta_hint() {
        let ctx = PageContext {
            category_meta: Some("170".to_string()),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn path_wins_over_dom_attribute() {
        // The two signals disagree mid-transition; the routed URL is
        // authoritative.
        let ctx = PageContext {
            path: "/c/announcements/170".to_string(),
            category_attr: Some("12".to_string()),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn dom_attribute_wins_over_root_class() {
        let ctx = PageContext {
            category_attr: Some("170".to_string()),
            root_classes: "category-12".to_string(),
            ..PageContext::default()
        };
        assert_eq!(detect(&ctx), Some(id("170")));
    }

    #[test]
    fn empty_snapshot_is_unknown() {
        assert_eq!(detect(&PageContext::default()), None);
    }
}
