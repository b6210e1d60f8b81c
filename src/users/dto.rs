use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::users::model::{NewUser, UserChanges};

pub const MAX_USERNAME: usize = 50;
pub const MAX_NAME: usize = 100;
pub const MAX_EMAIL: usize = 255;
pub const MIN_PASSWORD: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for user creation.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    /// Trims the text fields and checks them against the column limits.
    pub fn validate(&mut self) -> Result<(), String> {
        self.username = self.username.trim().to_string();
        self.name = self.name.trim().to_string();
        self.lastname = self.lastname.trim().to_string();
        self.email = self.email.trim().to_string();

        check_text("username", &self.username, MAX_USERNAME)?;
        check_text("name", &self.name, MAX_NAME)?;
        check_text("lastname", &self.lastname, MAX_NAME)?;
        check_email(&self.email)?;
        check_password(&self.password)
    }

    pub fn as_new_user(&self) -> NewUser<'_> {
        NewUser {
            username: &self.username,
            name: &self.name,
            lastname: &self.lastname,
            email: &self.email,
            password: &self.password,
        }
    }
}

/// Validates and trims a PATCH body in place.
pub fn validate_changes(changes: &mut UserChanges) -> Result<(), String> {
    if let Some(v) = changes.username.as_mut() {
        *v = v.trim().to_string();
        check_text("username", v, MAX_USERNAME)?;
    }
    if let Some(v) = changes.name.as_mut() {
        *v = v.trim().to_string();
        check_text("name", v, MAX_NAME)?;
    }
    if let Some(v) = changes.lastname.as_mut() {
        *v = v.trim().to_string();
        check_text("lastname", v, MAX_NAME)?;
    }
    if let Some(v) = changes.email.as_mut() {
        *v = v.trim().to_string();
        check_email(v)?;
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} is required"));
    }
    if value.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), String> {
    check_text("email", email, MAX_EMAIL)?;
    if !is_valid_email(email) {
        return Err("Invalid email".into());
    }
    Ok(())
}

pub(crate) fn check_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD {
        return Err("Password too short".into());
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct VerifyPasswordRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPasswordResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}
fn default_limit() -> u32 {
    20
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: String,
}
