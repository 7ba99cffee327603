//! Team model

use serde::{Deserialize, Serialize};
use tb_core::traits::{Entity, Id, Identifiable};

/// A team. Teams are fixed reference data with no create or update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: Id,
    pub name: String,
    /// URL-safe unique key
    pub slug: String,
    /// Display value; not kept in sync with user memberships
    pub members_count: u32,
}

impl Team {
    pub fn new(id: Id, name: impl Into<String>, slug: impl Into<String>, members_count: u32) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            members_count,
        }
    }
}

impl Identifiable for Team {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Team {
    const COLLECTION: &'static str = "teams";
    const TYPE_NAME: &'static str = "Team";
}
