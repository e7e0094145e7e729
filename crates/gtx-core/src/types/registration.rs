//! Account registration payload.

use std::fmt;

use serde::Serialize;

/// Everything the API accepts when opening an account.
///
/// `email`, `username`, `phone` and `password` are required; the remaining
/// fields are optional and left out of the request body when unset.
///
/// # Example
///
/// ```
/// use gtx_core::Registration;
///
/// let registration = Registration::new("bob@example.com", "bob", "+15550100", "S3cure!pass")
///     .first_name("Bob")
///     .country("NZ")
///     .agree_to_terms(true);
/// assert_eq!(registration.username(), "bob");
/// ```
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    email: String,
    username: String,
    phone: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    agree_to_terms: bool,
}

impl Registration {
    /// Create a registration with the required fields.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            phone: phone.into(),
            password: password.into(),
            first_name: None,
            last_name: None,
            country: None,
            city: None,
            agree_to_terms: false,
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Record whether the user accepted the terms of service.
    pub fn agree_to_terms(mut self, agreed: bool) -> Self {
        self.agree_to_terms = agreed;
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("phone", &self.phone)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("country", &self.country)
            .field("city", &self.city)
            .field("agree_to_terms", &self.agree_to_terms)
            .finish()
    }
}
