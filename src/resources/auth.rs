//! Authentication and user profile endpoints.

use serde::Serialize;
use serde_json::{json, Value};

use crate::clients::{ApiError, HttpClient};
use crate::resources::de::{self, FromValue};

/// The authenticated user's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    /// Account id.
    pub id: String,
    /// Account email.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// Remaining account credits.
    pub credits: Option<f64>,
}

impl FromValue for User {
    fn from_value(value: &Value) -> Self {
        Self {
            id: de::string_at(value, &["id", "uid"]),
            email: de::opt_string_at(value, &["email"]),
            first_name: de::opt_string_at(value, &["first_name", "firstName"]),
            last_name: de::opt_string_at(value, &["last_name", "lastName"]),
            company: de::opt_string_at(value, &["company"]),
            credits: de::opt_f64_at(value, &["credits"]),
        }
    }
}

/// Authentication endpoints, obtained from
/// [`Handwrytten::auth`](crate::Handwrytten::auth).
#[derive(Debug, Clone, Copy)]
pub struct Auth<'a> {
    pub(crate) http: &'a HttpClient,
}

impl Auth<'_> {
    /// Gets the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure; an invalid key surfaces as
    /// [`ApiError::Authentication`].
    pub async fn get_user(&self) -> Result<User, ApiError> {
        let data = self.http.get("auth/getUser", None).await?;
        Ok(User::from_value(&data))
    }

    /// Authenticates with email/password and retrieves a UID.
    ///
    /// Most integrations should use an API key instead.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any API failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        self.http
            .post(
                "auth/authorization",
                json!({"login": email, "password": password}),
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_value_prefers_id_over_uid() {
        let user = User::from_value(&json!({"id": 7, "uid": 8, "email": "d@example.com"}));
        assert_eq!(user.id, "7");
        assert_eq!(user.email.as_deref(), Some("d@example.com"));
    }

    #[test]
    fn test_user_from_value_falls_back_to_uid() {
        let user = User::from_value(&json!({"uid": "abc123"}));
        assert_eq!(user.id, "abc123");
    }

    #[test]
    fn test_user_from_value_accepts_camel_case_names() {
        let user = User::from_value(&json!({"firstName": "David", "lastName": "Wachs"}));
        assert_eq!(user.first_name.as_deref(), Some("David"));
        assert_eq!(user.last_name.as_deref(), Some("Wachs"));
    }
}
