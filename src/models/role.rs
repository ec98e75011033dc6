use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted to a credential and carried in the `sub` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
}

impl Role {
    /// Roles allowed to create and update products
    pub const EDITORS: &'static [Role] = &[Role::Admin, Role::Moderator];
    /// Roles allowed to delete products
    pub const ADMINS: &'static [Role] = &[Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_serialized_form() {
        for role in [Role::Admin, Role::Moderator] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(serde_json::from_str::<Role>(&json).unwrap(), role);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"viewer\"").is_err());
        assert!(serde_json::from_str::<Role>("\"Admin\"").is_err());
    }
}
