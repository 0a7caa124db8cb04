//! [`Report`] definitions.

use std::{collections::BTreeMap, fmt};

use authentication::Authentication;
use common::DateTimeOf;
use itertools::Itertools as _;
use serde::Serialize;

use crate::config::Format;

/// Summary of an [`Authentication`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Display name of the principal.
    pub name: String,

    /// ID of the principal.
    pub principal_id: String,

    /// Identity provider of the principal.
    pub origin: String,

    /// Zone of the principal.
    pub zone_id: String,

    /// Granted authorities, in their original order.
    pub authorities: Vec<String>,

    /// Indicator whether the [`Authentication`] was valid when this
    /// [`Report`] was made.
    pub valid: bool,

    /// [RFC 3339] time of the authentication, if recorded.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub authenticated_at: Option<String>,

    /// [RFC 3339] time of the expiration, if any.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub expires_at: Option<String>,

    /// External groups of the principal.
    pub external_groups: Vec<String>,

    /// User attributes, unless excluded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_attributes: Option<BTreeMap<String, Vec<String>>>,
}

impl Report {
    /// Makes a new [`Report`] of the provided [`Authentication`] as of `now`.
    #[must_use]
    pub fn new<Of: ?Sized>(
        auth: &Authentication,
        now: DateTimeOf<Of>,
        with_attributes: bool,
    ) -> Self {
        let principal = auth.principal();
        Self {
            name: auth.name().to_owned(),
            principal_id: principal.id.to_string(),
            origin: principal.origin.clone(),
            zone_id: principal.zone_id.clone(),
            authorities: auth
                .authorities()
                .iter()
                .map(ToString::to_string)
                .collect(),
            valid: auth.is_valid_at(now),
            authenticated_at: auth
                .authenticated_time()
                .to_datetime()
                .map(|dt| dt.to_rfc3339()),
            expires_at: auth
                .expires_at()
                .to_datetime()
                .map(|dt| dt.to_rfc3339()),
            external_groups: auth
                .external_groups()
                .map(|groups| groups.iter().cloned().collect())
                .unwrap_or_default(),
            user_attributes: with_attributes
                .then(|| auth.user_attributes_as_map()),
        }
    }

    /// Renders this [`Report`] in the provided [`Format`].
    ///
    /// # Errors
    ///
    /// If JSON serialization fails.
    pub fn render(&self, format: Format) -> Result<String, serde_json::Error> {
        match format {
            Format::Text => Ok(self.to_string()),
            Format::Json => serde_json::to_string_pretty(self),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Placeholder of an absent value.
        const NONE: &str = "-";

        let Self {
            name,
            principal_id,
            origin,
            zone_id,
            authorities,
            valid,
            authenticated_at,
            expires_at,
            external_groups,
            user_attributes,
        } = self;

        writeln!(f, "principal:      {name} ({principal_id})")?;
        writeln!(f, "origin:         {origin}@{zone_id}")?;
        writeln!(f, "authorities:    {}", authorities.iter().join(", "))?;
        writeln!(f, "valid:          {valid}")?;
        writeln!(
            f,
            "authenticated:  {}",
            authenticated_at.as_deref().unwrap_or(NONE),
        )?;
        writeln!(
            f,
            "expires:        {}",
            expires_at.as_deref().unwrap_or(NONE),
        )?;
        write!(f, "groups:         {}", external_groups.iter().join(", "))?;
        if let Some(attrs) = user_attributes {
            for (key, values) in attrs {
                write!(f, "\n  {key} = [{}]", values.iter().join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use authentication::{Authentication, Authority, Principal, Prototype};
    use common::DateTime;
    use serde_json::{json, Value};

    use crate::config::Format;

    use super::Report;

    fn auth(expires_at: i64) -> Authentication {
        let mut auth = Prototype::already_authenticated()
            .with_principal(Principal::new("7f791f2c", "marissa"))
            .with_authorities(vec![
                Authority::from("uaa.user"),
                Authority::from("openid"),
            ])
            .with_authenticated_time(1_700_000_000_000)
            .with_expires_at(expires_at)
            .with_external_groups(["admins"])
            .build()
            .unwrap();
        auth.set_user_attributes([("cost_center", ["b", "a"])]);
        auth
    }

    #[test]
    fn reports_validity_as_of_given_time() {
        let auth = auth(1_700_000_060_000);
        let issued = DateTime::from_unix_timestamp_millis(1_700_000_000_000)
            .unwrap();

        assert!(Report::new(&auth, issued, true).valid);
        let expired = issued + Duration::from_secs(60);
        assert!(!Report::new(&auth, expired, true).valid);
    }

    #[test]
    fn renders_text() {
        let report = Report::new(&auth(0), DateTime::now(), true);

        assert_eq!(
            report.render(Format::Text).unwrap(),
            "principal:      marissa (7f791f2c)\n\
             origin:         uaa@uaa\n\
             authorities:    uaa.user, openid\n\
             valid:          true\n\
             authenticated:  2023-11-14T22:13:20Z\n\
             expires:        -\n\
             groups:         admins\n  \
             cost_center = [b, a]",
        );
    }

    #[test]
    fn renders_json_without_attributes() {
        let report = Report::new(&auth(0), DateTime::now(), false);

        let json: Value =
            serde_json::from_str(&report.render(Format::Json).unwrap())
                .unwrap();

        assert_eq!(json["name"], "marissa");
        assert_eq!(json["authorities"], json!(["uaa.user", "openid"]));
        assert_eq!(json["expiresAt"], Value::Null);
        assert_eq!(json["authenticatedAt"], "2023-11-14T22:13:20Z");
        assert!(json.get("userAttributes").is_none());
    }
}
