//! Project model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tb_core::traits::{Entity, Id, Identifiable};
use validator::Validate;

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Project {
    pub id: Id,

    #[validate(length(min = 3, message = "is too short (minimum is 3 characters)"))]
    pub name: String,

    pub description: Option<String>,

    pub active: bool,

    pub team_id: Option<Id>,

    /// Creator's user id
    pub created_by: Id,

    pub created_at: DateTime<Utc>,
}

impl Identifiable for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for Project {
    const COLLECTION: &'static str = "projects";
    const TYPE_NAME: &'static str = "Project";
}

/// Input for creating a project
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub team_id: Option<Id>,
    pub created_by: Id,
}

impl NewProject {
    pub fn new(name: impl Into<String>, created_by: Id) -> Self {
        Self {
            name: name.into(),
            description: None,
            team_id: None,
            created_by,
        }
    }

    pub fn with_team(mut self, team_id: Id) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// New projects always start active
    pub fn into_project(self, id: Id, created_at: DateTime<Utc>) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            active: true,
            team_id: self.team_id,
            created_by: self.created_by,
            created_at,
        }
    }
}

/// Partial update for a project.
///
/// `id`, `created_by` and `created_at` are not patchable; unknown keys in a
/// JSON body are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub description: Option<Option<String>>,
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub team_id: Option<Option<Id>>,
}

impl ProjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn apply_to(&self, project: &Project) -> Project {
        let mut merged = project.clone();
        if let Some(ref name) = self.name {
            merged.name = name.clone();
        }
        tb_core::apply_nullable(&mut merged.description, self.description.clone());
        if let Some(active) = self.active {
            merged.active = active;
        }
        tb_core::apply_nullable(&mut merged.team_id, self.team_id);
        merged
    }
}
