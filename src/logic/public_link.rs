//! Public directory links
//!
//! A link looks like `https://host/d/<uuid>#<key>`. The key never leaves the
//! fragment; the worker needs it to decrypt the shared tree.

use uuid::{Uuid, Variant};

use crate::api::{PublicLinkInfo, PublicLinkStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    pub uuid: String,
    pub key: String,
}

/// What the status lookup allows next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAccess {
    Invalid,
    NeedsPassword { uuid: String, key: String },
    /// No password: the info can be fetched right away
    Open { uuid: String, key: String },
}

/// Where resolving a link ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Invalid,
    NeedsPassword { uuid: String, key: String },
    Ready {
        uuid: String,
        key: String,
        password: Option<String>,
        info: PublicLinkInfo,
    },
}

impl LinkState {
    pub fn needs_password(&self) -> bool {
        matches!(self, LinkState::NeedsPassword { .. })
    }
}

/// Hyphenated RFC 4122 uuid (version 1-8), or the nil and max uuids
///
/// # Examples
/// ```
/// use drivetui::logic::public_link::is_valid_uuid;
///
/// assert!(is_valid_uuid("3f2a0c1e-9b7d-4e21-a5c3-0d9e8f7a6b54"));
/// assert!(!is_valid_uuid("3f2a0c1e9b7d4e21a5c30d9e8f7a6b54"));
/// assert!(!is_valid_uuid("not-a-uuid"));
/// ```
pub fn is_valid_uuid(value: &str) -> bool {
    if value.len() != 36 {
        return false;
    }
    let Ok(parsed) = Uuid::try_parse(value) else {
        return false;
    };

    parsed.is_nil()
        || parsed.as_u128() == u128::MAX
        || ((1..=8).contains(&parsed.get_version_num()) && parsed.get_variant() == Variant::RFC4122)
}

/// Extract uuid and key from a link.
///
/// Returns `None` without a `/d/` segment or without a non-empty key. The
/// uuid is not validated here so a malformed one can be reported as an
/// invalid link after the status lookup, as the web client does.
pub fn parse_link(url: &str) -> Option<ParsedLink> {
    let (before_fragment, key) = url.split_once('#')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let (_, after) = before_fragment.rsplit_once("/d/")?;
    let uuid = after.split(['/', '?']).next().unwrap_or_default().trim();
    if uuid.is_empty() {
        return None;
    }

    Some(ParsedLink {
        uuid: uuid.to_string(),
        key: key.to_string(),
    })
}

/// Decide what the worker's status response allows
pub fn resolve_status(link: &ParsedLink, status: &PublicLinkStatus) -> LinkAccess {
    if !status.enabled {
        return LinkAccess::Invalid;
    }

    // The status response carries the canonical uuid of the shared directory
    let uuid = if status.uuid.is_empty() {
        link.uuid.clone()
    } else {
        status.uuid.clone()
    };

    if !is_valid_uuid(&uuid) {
        return LinkAccess::Invalid;
    }

    let key = link.key.clone();
    if status.has_password {
        LinkAccess::NeedsPassword { uuid, key }
    } else {
        LinkAccess::Open { uuid, key }
    }
}
