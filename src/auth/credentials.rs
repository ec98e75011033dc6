use subtle::ConstantTimeEq;

use crate::models::{AuthError, Role};

/// Maps a submitted username and password to a role.
pub trait CredentialCheck: Send + Sync {
    fn check(&self, username: &str, password: &str) -> Result<Role, AuthError>;
}

struct CredentialEntry {
    username: String,
    password: String,
    role: Role,
}

/// Fixed in-memory credential table
pub struct StaticCredentials {
    entries: Vec<CredentialEntry>,
}

impl StaticCredentials {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, Role)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(username, password, role)| CredentialEntry {
                    username: username.to_string(),
                    password: password.to_string(),
                    role,
                })
                .collect(),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new([
            ("admin", "admin_password", Role::Admin),
            ("moderator", "moderator_password", Role::Moderator),
        ])
    }
}

impl CredentialCheck for StaticCredentials {
    fn check(&self, username: &str, password: &str) -> Result<Role, AuthError> {
        // Every entry is compared so the time taken does not reveal which one matched.
        let mut found = None;
        for entry in &self.entries {
            let matched =
                constant_time_eq(username, &entry.username) & constant_time_eq(password, &entry.password);
            if matched && found.is_none() {
                found = Some(entry.role);
            }
        }
        found.ok_or(AuthError::InvalidCredentials)
    }
}

fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    // `ct_eq` on slices of different lengths is false without touching the bytes.
    provided.ct_eq(expected).into()
}
