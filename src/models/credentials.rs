use serde::Deserialize;
use std::fmt;

/// Username and password submitted to `/token`. Never stored.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_password() {
        let creds = Credentials {
            username: "admin".to_string(),
            password: "admin_password".to_string(),
        };
        let printed = format!("{:?}", creds);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("admin_password"));
    }
}
