//! Compact representations that other resources embed.
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A mini file, folder or enterprise.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// `file`, `folder`, `enterprise`, ...
    #[serde(rename = "type")]
    pub typ: Option<String>,
    /// Identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Changes every time the item is modified.
    pub etag: Option<String>,
    /// Sequence number, for files and folders.
    pub sequence_id: Option<String>,
}

/// A mini user, as embedded in webhooks and memberships.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniUser {
    /// Always `user`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    /// Identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Primary login (email).
    pub login: Option<String>,
}

/// A mini group.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Always `group`.
    #[serde(rename = "type")]
    pub typ: Option<String>,
    /// Identifier.
    pub id: Option<String>,
    /// Group name.
    pub name: Option<String>,
    /// `managed_group` or `all_users_group`.
    pub group_type: Option<String>,
}
