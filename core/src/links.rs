//! Hypermedia links and the envelope that carries them.
//!
//! Link targets are built from an explicit template, `<base_url>/<resource>/<id>`,
//! rather than discovered from routes. The base URL is empty by default, which
//! yields relative links such as `/passengers/7`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Addressable resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// `/drivers`
    Drivers,
    /// `/passengers`
    Passengers,
    /// `/travelRequests`
    TravelRequests,
}

impl Resource {
    /// Collection path, with a leading slash.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Drivers => "/drivers",
            Self::Passengers => "/passengers",
            Self::TravelRequests => "/travelRequests",
        }
    }
}

/// A named reference to a related resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target address.
    pub href: String,
    /// Human-readable label for the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Create an untitled link.
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
        }
    }

    /// Attach a title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Builds link targets from a configurable base URL.
///
/// ```
/// use ride_request_core::links::{LinkBuilder, Resource};
///
/// let relative = LinkBuilder::default();
/// assert_eq!(relative.href(Resource::Passengers, 7), "/passengers/7");
///
/// let absolute = LinkBuilder::new("https://rides.example.com/");
/// assert_eq!(
///     absolute.href(Resource::Passengers, 7),
///     "https://rides.example.com/passengers/7"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// Create a builder that prefixes every target with `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Address of a single item in `resource`.
    #[must_use]
    pub fn href(&self, resource: Resource, id: impl fmt::Display) -> String {
        format!("{}{}/{id}", self.base_url, resource.path())
    }

    /// Untitled link to a single item in `resource`.
    #[must_use]
    pub fn link(&self, resource: Resource, id: impl fmt::Display) -> Link {
        Link::new(self.href(resource, id))
    }
}

/// A representation plus its named links.
///
/// Serializes the content's fields inline with a `_links` object:
///
/// ```json
/// {
///   "id": 1,
///   "origin": "A",
///   "_links": { "passenger": { "href": "/passengers/1", "title": "Ana" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityModel<T> {
    /// Wrapped representation.
    #[serde(flatten)]
    pub content: T,
    /// Links keyed by relation name.
    #[serde(rename = "_links", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, Link>,
}

impl<T> EntityModel<T> {
    /// Wrap `content` with no links.
    #[must_use]
    pub const fn new(content: T) -> Self {
        Self {
            content,
            links: BTreeMap::new(),
        }
    }

    /// Add a link under relation `rel`, replacing any previous one.
    #[must_use]
    pub fn with_link(mut self, rel: impl Into<String>, link: Link) -> Self {
        self.links.insert(rel.into(), link);
        self
    }

    /// Look up a link by relation name.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel)
    }
}
