//! Header-derived metadata attached to accounts, containers and objects.
//!
//! Only two kinds of headers are ever persisted: the recognized system
//! headers of a [`MetadataPolicy`] and custom `X-<Kind>-Meta-*` headers for
//! the resource kind being written.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// System headers persisted for every resource kind unless configured
/// otherwise.
pub const DEFAULT_SYSTEM_HEADERS: [&str; 4] = [
    "Content-Type",
    "Content-Encoding",
    "Content-Disposition",
    "X-Object-Manifest",
];

/// The kind of resource a metadata set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Account,
    Container,
    Object,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Account => "account",
            ResourceKind::Container => "container",
            ResourceKind::Object => "object",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which inbound headers the metadata layer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataPolicy {
    /// Canonical names of headers stored regardless of the resource prefix.
    pub system_headers: BTreeSet<String>,
}

impl Default for MetadataPolicy {
    fn default() -> Self {
        Self::with_system_headers(DEFAULT_SYSTEM_HEADERS)
    }
}

impl MetadataPolicy {
    pub fn with_system_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            system_headers: headers
                .into_iter()
                .map(|h| canonical_header_key(h.as_ref().trim()))
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    /// `X-Account-Meta-`, `X-Container-Meta-` or `X-Object-Meta-`.
    pub fn custom_prefix(kind: ResourceKind) -> String {
        format!("X-{}-Meta-", title_case(kind.as_str()))
    }

    /// Whether a canonical header name is persisted for `kind`.
    pub fn accepts(&self, kind: ResourceKind, canonical: &str) -> bool {
        self.system_headers.contains(canonical)
            || canonical.starts_with(&Self::custom_prefix(kind))
    }
}

/// Ordered mapping of canonical header name to its values. Values are kept
/// as the raw header bytes and replayed unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<HeaderValue>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge accepted request headers into this set.
    ///
    /// An empty first value deletes the key, except on objects where the
    /// empty value is stored as-is.
    pub fn set_metadata(
        &mut self,
        kind: ResourceKind,
        headers: &HeaderMap,
        policy: &MetadataPolicy,
    ) {
        for name in headers.keys() {
            let key = canonical_header_key(name.as_str());
            if !policy.accepts(kind, &key) {
                continue;
            }

            let values: Vec<HeaderValue> = headers.get_all(name).iter().cloned().collect();

            let first_empty = values.first().is_none_or(|v| v.is_empty());
            if !first_empty || kind == ResourceKind::Object {
                self.entries.insert(key, values);
            } else {
                self.entries.remove(&key);
            }
        }
    }

    /// Copy every stored entry into `out`, replacing headers of the same name.
    pub fn get_metadata(&self, out: &mut HeaderMap) {
        for (name, values) in &self.entries {
            let Ok(header) = HeaderName::from_bytes(name.as_bytes()) else {
                continue;
            };
            out.remove(&header);
            for value in values {
                out.append(header.clone(), value.clone());
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[HeaderValue]> {
        self.entries
            .get(&canonical_header_key(name))
            .map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&canonical_header_key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HeaderValue])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical MIME header form: `x-container-meta-foo` → `X-Container-Meta-Foo`.
pub fn canonical_header_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
