//! User model

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tb_core::traits::{Entity, Id, Identifiable};
use validator::Validate;

use crate::UnknownVariant;

/// Role of a user. Only used as a UI hint; no operation enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Supervisor,
    Volunteer,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Supervisor, UserRole::Volunteer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Supervisor => "supervisor",
            Self::Volunteer => "volunteer",
        }
    }

    /// User administration screens are shown to admins only
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn can_manage_projects(&self) -> bool {
        matches!(self, Self::Admin | Self::Supervisor)
    }

    /// Volunteers may only assign tasks to themselves
    pub fn can_assign_others(&self) -> bool {
        matches!(self, Self::Admin | Self::Supervisor)
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "role",
                value: s.to_string(),
                expected: &["admin", "supervisor", "volunteer"],
            })
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Id,

    #[validate(length(min = 2, message = "is too short (minimum is 2 characters)"))]
    pub name: String,

    #[validate(email(message = "is not a valid email"))]
    pub email: String,

    pub role: UserRole,

    /// Active flag
    pub status: bool,

    pub telegram_id: Option<String>,
    pub job_field: Option<String>,

    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub experience_years: Option<i32>,

    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub age: Option<i32>,

    pub country: Option<String>,

    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub weekly_hours: Option<f64>,

    /// Team memberships. Not checked against the team collection.
    #[serde(default)]
    pub teams: Vec<Id>,
}

impl Identifiable for User {
    fn id(&self) -> Id {
        self.id
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const TYPE_NAME: &'static str = "User";
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status
    }

    pub fn is_member_of(&self, team_id: Id) -> bool {
        self.teams.contains(&team_id)
    }
}

/// Input for creating a user
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default)]
    pub telegram_id: Option<String>,
    #[serde(default)]
    pub job_field: Option<String>,
    #[serde(default)]
    pub experience_years: Option<i32>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub weekly_hours: Option<f64>,
    #[serde(default)]
    pub teams: Vec<Id>,
}

fn default_true() -> bool {
    true
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            status: true,
            telegram_id: None,
            job_field: None,
            experience_years: None,
            age: None,
            country: None,
            weekly_hours: None,
            teams: Vec::new(),
        }
    }

    pub fn with_teams(mut self, teams: Vec<Id>) -> Self {
        self.teams = teams;
        self
    }

    /// Build the entity this input describes under the given id
    pub fn into_user(self, id: Id) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            status: self.status,
            telegram_id: self.telegram_id,
            job_field: self.job_field,
            experience_years: self.experience_years,
            age: self.age,
            country: self.country,
            weekly_hours: self.weekly_hours,
            teams: self.teams,
        }
    }
}

/// Partial update for a user. `id` is not patchable.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<bool>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub telegram_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub job_field: Option<Option<String>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub experience_years: Option<Option<i32>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "tb_core::deserialize_some")]
    pub weekly_hours: Option<Option<f64>>,
    pub teams: Option<Vec<Id>>,
}

impl UserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_status(mut self, active: bool) -> Self {
        self.status = Some(active);
        self
    }

    pub fn with_teams(mut self, teams: Vec<Id>) -> Self {
        self.teams = Some(teams);
        self
    }

    /// Merge whitelisted fields onto a copy of `user`
    pub fn apply_to(&self, user: &User) -> User {
        let mut merged = user.clone();
        if let Some(ref name) = self.name {
            merged.name = name.clone();
        }
        if let Some(ref email) = self.email {
            merged.email = email.clone();
        }
        if let Some(role) = self.role {
            merged.role = role;
        }
        if let Some(status) = self.status {
            merged.status = status;
        }
        tb_core::apply_nullable(&mut merged.telegram_id, self.telegram_id.clone());
        tb_core::apply_nullable(&mut merged.job_field, self.job_field.clone());
        tb_core::apply_nullable(&mut merged.experience_years, self.experience_years);
        tb_core::apply_nullable(&mut merged.age, self.age);
        tb_core::apply_nullable(&mut merged.country, self.country.clone());
        tb_core::apply_nullable(&mut merged.weekly_hours, self.weekly_hours);
        if let Some(ref teams) = self.teams {
            merged.teams = teams.clone();
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hints() {
        assert!(UserRole::Admin.can_manage_users());
        assert!(!UserRole::Supervisor.can_manage_users());
        assert!(UserRole::Supervisor.can_assign_others());
        assert!(!UserRole::Volunteer.can_manage_projects());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("supervisor".parse::<UserRole>(), Ok(UserRole::Supervisor));
        let err = "owner".parse::<UserRole>().unwrap_err();
        assert!(err.to_string().contains("admin, supervisor, volunteer"));
    }

    #[test]
    fn test_new_user_defaults() {
        let input: NewUser = serde_json::from_str(
            r#"{"name": "Omar", "email": "omar@example.com", "role": "volunteer"}"#,
        )
        .unwrap();
        assert!(input.status);
        assert!(input.teams.is_empty());

        let user = input.into_user(16);
        assert_eq!(user.id, 16);
        assert_eq!(user.telegram_id, None);
    }

    #[test]
    fn test_patch_keeps_id_and_clears_nullable() {
        let user = NewUser::new("Sara", "sara@example.com", UserRole::Volunteer)
            .with_teams(vec![1])
            .into_user(7);
        let mut user = user;
        user.country = Some("Jordan".to_string());

        let patch: UserPatch =
            serde_json::from_str(r#"{"id": 99, "country": null, "status": false}"#).unwrap();
        let merged = patch.apply_to(&user);

        assert_eq!(merged.id, 7);
        assert_eq!(merged.country, None);
        assert!(!merged.status);
        assert_eq!(merged.teams, vec![1]);
    }
}
