/// User profile model
///
/// A user is identified by email. Profiles are created by registration, read
/// back on login, and mutated by profile updates. They are never deleted.
///
/// # Wire Format
///
/// ```json
/// {
///   "email": "demo@taskboard.dev",
///   "name": "Demo User",
///   "avatar": "https://api.dicebear.com/7.x/avataaars/svg?seed=demo@taskboard.dev"
/// }
/// ```
///
/// # Example
///
/// ```
/// use taskboard_shared::models::user::User;
///
/// let user = User::new("Alex Kim", "alex@taskboard.dev");
/// assert!(user.avatar.ends_with("seed=alex@taskboard.dev"));
/// ```

use serde::{Deserialize, Serialize};

/// Base URI of the generated avatar service
pub const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Returns the deterministic avatar URI for an email address
///
/// The same email always yields the same URI.
pub fn avatar_url_for(email: &str) -> String {
    format!("{}?seed={}", AVATAR_BASE_URL, email)
}

/// User profile as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Email address, unique across users
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar image URI
    #[serde(default)]
    pub avatar: String,
}

impl User {
    /// Creates a profile with the generated avatar for `email`
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        User {
            avatar: avatar_url_for(&email),
            name: name.into(),
            email,
        }
    }

    /// Replaces the avatar URI
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }
}
