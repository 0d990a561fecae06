//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chicadish_core::types::RoleId;

/// Prefix carried by role names in storage (`ROLE_CLIENT`, `ROLE_ADMIN`).
const STORAGE_PREFIX: &str = "ROLE_";

/// The two authorization roles known to the system.
///
/// On the wire a role is its bare uppercase name (`"CLIENT"`, `"ADMIN"`);
/// the prefixed form is accepted on input and used as the stored name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// A regular customer account.
    Client,
    /// An administrator.
    Admin,
}

impl Role {
    /// Every role, in seeding order.
    pub const ALL: [Role; 2] = [Role::Client, Role::Admin];

    /// Return the bare wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Admin => "ADMIN",
        }
    }

    /// Return the prefixed name used for stored role rows.
    pub fn storage_name(&self) -> &'static str {
        match self {
            Self::Client => "ROLE_CLIENT",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    /// Render a role set the way API responses report it: `"CLIENT, ADMIN"`.
    pub fn describe_set(roles: &BTreeSet<Role>) -> String {
        roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = chicadish_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let bare = upper.strip_prefix(STORAGE_PREFIX).unwrap_or(&upper);
        match bare {
            "CLIENT" => Ok(Self::Client),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(chicadish_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: CLIENT, ADMIN"
            ))),
        }
    }
}

/// A seeded role row: the enumerated name plus its generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Generated identifier.
    pub id: RoleId,
    /// The role this row represents.
    pub name: Role,
}

impl RoleRecord {
    /// Creates a fresh row for the given role.
    pub fn new(name: Role) -> Self {
        Self {
            id: RoleId::new(),
            name,
        }
    }
}
