//! [`Details`] and [`Credentials`] definitions.

use std::fmt;

use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Authentication;

/// Metadata of the request an [`Authentication`] has been established by.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    /// Remote address the request came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// ID of the HTTP session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// ID of the client application acting on behalf of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Secret proving an [`Authentication`], such as a password or an upstream
/// token.
///
/// Should be kept inside a [`secrecy::SecretBox`].
#[derive(Clone, Eq, PartialEq)]
pub struct Credentials(String);

impl Credentials {
    /// Creates new [`Credentials`].
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the raw secret of these [`Credentials`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Credentials {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Credentials {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials([REDACTED])")
    }
}

impl CloneableSecret for Credentials {}
impl Zeroize for Credentials {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod spec {
    use super::{Credentials, Details};

    #[test]
    fn credentials_are_redacted() {
        let creds = Credentials::new("koala");

        assert_eq!(format!("{creds:?}"), "Credentials([REDACTED])");
        assert_eq!(creds.as_str(), "koala");
    }

    #[test]
    fn details_skip_absent_fields() {
        let details = Details {
            origin: Some("127.0.0.1".to_owned()),
            ..Details::default()
        };

        assert_eq!(
            serde_json::to_string(&details).unwrap(),
            r#"{"origin":"127.0.0.1"}"#,
        );
    }
}
