use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The named collections held by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Users,
    Tickets,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Users, Collection::Tickets];

    /// Path segment / collection name, e.g. `tickets`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Tickets => "tickets",
        }
    }

    /// Singular label used in error messages, e.g. `Ticket`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "User",
            Self::Tickets => "Ticket",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Self::Users),
            "tickets" => Ok(Self::Tickets),
            other => Err(format!("unknown collection: {other}")),
        }
    }
}
