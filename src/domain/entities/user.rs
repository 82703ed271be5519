use serde::{Deserialize, Serialize};

/// Payload accepted by the legacy users endpoints. Nothing is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Both fields must be present and non-empty.
    pub fn into_user(self) -> Option<User> {
        match (self.name, self.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(User { name, email })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserAddedResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HttpsResponse {
    pub message: String,
    pub code: u16,
}

/// Error body of the legacy users endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserErrorResponse {
    pub message: String,
    pub detail: String,
    pub https_response: HttpsResponse,
}

impl UserErrorResponse {
    pub fn missing_fields() -> Self {
        UserErrorResponse {
            message: "Name and email are required".to_string(),
            detail: "Please provide both name and email".to_string(),
            https_response: HttpsResponse {
                message: "Bad Request".to_string(),
                code: 400,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_requires_both_fields() {
        let only_name = NewUser { name: Some("Ada".into()), email: None };
        let empty_email = NewUser { name: Some("Ada".into()), email: Some(String::new()) };

        assert!(only_name.into_user().is_none());
        assert!(empty_email.into_user().is_none());
    }

    #[test]
    fn complete_user_is_accepted() {
        let user = NewUser {
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
        }
        .into_user()
        .unwrap();

        assert_eq!(user.email, "ada@example.com");
    }
}
