use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String, // argon2 PHC string
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Input for `UserRepository::create`. `password` is plaintext and lives only until it is hashed.
pub struct NewUser<'a> {
    pub username: &'a str,
    pub name: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Partial update. Only these columns are updatable; `password` goes through
/// `update_password` and `id`/`created_at` are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserChanges {
    pub username: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.name.is_none()
            && self.lastname.is_none()
            && self.email.is_none()
    }
}

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(User),
    /// Nothing to change; the store was not touched.
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn empty_changes() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            lastname: Some("Doe".into()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let changes: UserChanges =
            serde_json::from_str(r#"{"password":"x","id":7,"name":"Jane"}"#).unwrap();
        assert_eq!(
            changes,
            UserChanges {
                name: Some("Jane".into()),
                ..Default::default()
            }
        );

        let none: UserChanges = serde_json::from_str(r#"{"created_at":"now"}"#).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            username: "jdoe".into(),
            name: "John".into(),
            lastname: "Doe".into(),
            email: "j@x.com".into(),
            password: "$argon2id$v=19$secret".into(),
            created_at: datetime!(2024-05-01 12:00 UTC),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(json.contains("2024-05-01T12:00:00Z"));
    }
}
