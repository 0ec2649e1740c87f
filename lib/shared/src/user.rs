use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Student => "Student",
            UserRole::Instructor => "Instructor",
            UserRole::Admin => "Admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Upper-cased first letters of first and last name, e.g. "AL" for Ada Lovelace.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Field-update set for a profile update. Only the fields that are `Some`
/// are sent to the backend and merged into the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserUpdate {
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn avatar(mut self, value: impl Into<String>) -> Self {
        self.avatar = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merges every present field into `user`, leaving the others untouched.
    pub fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = Some(avatar.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ada() -> User {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "email": "ada@example.com",
            "firstName": "ada",
            "lastName": "lovelace",
            "role": "INSTRUCTOR",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_backend_identity() {
        let user = ada();
        assert_eq!(user.role, UserRole::Instructor);
        assert_eq!(user.avatar, None);
        assert_eq!(user.full_name(), "ada lovelace");
        assert_eq!(user.initials(), "AL");
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = UserUpdate::default().first_name("New");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "firstName": "New" })
        );
        assert!(UserUpdate::default().is_empty());
    }

    #[test]
    fn update_merges_field_by_field() {
        let mut user = ada();
        UserUpdate::default()
            .first_name("Augusta")
            .avatar("https://cdn.example.com/a.png")
            .apply(&mut user);

        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.last_name, "lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.avatar.as_deref(), Some("https://cdn.example.com/a.png"));
    }
}
