//! Serialized shape of an [`Authentication`].

use std::{collections::BTreeSet, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::domain::{Authority, Details, Principal};

use super::{
    AuthenticatedTime, Authentication, ExpirationTime, Prototype,
    UserAttributes, ValidationError,
};

/// Serialized [`Authentication`].
///
/// [`Credentials`] are never serialized.
///
/// [`Credentials`]: crate::domain::Credentials
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Record {
    /// [`Authentication::principal()`].
    principal: Option<Principal>,

    /// [`Authentication::authorities()`].
    authorities: Option<Vec<Authority>>,

    /// Indicator whether the [`Principal`] is authenticated.
    #[serde(default = "Record::default_authenticated")]
    authenticated: bool,

    /// [`Authentication::authenticated_time()`].
    #[serde(default)]
    authenticated_time: AuthenticatedTime,

    /// [`Authentication::expires_at()`].
    #[serde(default)]
    expires_at: ExpirationTime,

    /// [`Authentication::external_groups()`].
    #[serde(default)]
    external_groups: Option<BTreeSet<String>>,

    /// [`Authentication::user_attributes()`].
    #[serde(default)]
    user_attributes: Option<UserAttributes>,

    /// [`Authentication::details()`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Details>,
}

impl Record {
    /// Records missing the indicator are considered authenticated.
    const fn default_authenticated() -> bool {
        true
    }
}

impl From<Authentication> for Record {
    fn from(auth: Authentication) -> Self {
        let Authentication {
            principal,
            authorities,
            credentials: _,
            details,
            authenticated,
            authenticated_time,
            expires_at,
            external_groups,
            user_attributes,
        } = auth;

        Self {
            principal: Some(Arc::unwrap_or_clone(principal)),
            authorities: Some(authorities),
            authenticated,
            authenticated_time,
            expires_at,
            external_groups: Some(external_groups.unwrap_or_default()),
            user_attributes: Some(user_attributes.unwrap_or_default()),
            details,
        }
    }
}

impl TryFrom<Record> for Authentication {
    type Error = ValidationError;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let Record {
            principal,
            authorities,
            authenticated,
            authenticated_time,
            expires_at,
            external_groups,
            user_attributes,
            details,
        } = record;

        Authentication::new(Prototype {
            principal: principal.map(Arc::new),
            authorities,
            credentials: None,
            details,
            authenticated,
            authenticated_time: authenticated_time.millis(),
            expires_at: expires_at.millis(),
            external_groups,
            attributes: user_attributes,
        })
    }
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeMap;

    use serde_json::json;

    use crate::domain::{
        authentication::Prototype, Authentication, Authority, Details,
        Principal,
    };

    fn sample() -> Authentication {
        let mut principal = Principal::new("7f791f2c", "marissa");
        principal.email = "marissa@test.org".to_owned();

        let mut auth = Prototype::already_authenticated()
            .with_principal(principal)
            .with_authorities(vec![
                Authority::from("uaa.user"),
                Authority::from("openid"),
            ])
            .with_credentials("koala")
            .with_details(Details {
                origin: Some("127.0.0.1".to_owned()),
                ..Details::default()
            })
            .with_authenticated_time(1_485_314_400_000)
            .with_expires_at(1_485_318_000_000)
            .with_external_groups(["admins"])
            .build()
            .unwrap();
        auth.set_user_attributes([("cost_center", ["b", "a"])]);
        auth
    }

    #[test]
    fn serializes_wire_shape() {
        assert_eq!(
            serde_json::to_value(sample()).unwrap(),
            json!({
                "principal": {
                    "id": "7f791f2c",
                    "name": "marissa",
                    "email": "marissa@test.org",
                    "origin": "uaa",
                    "externalId": null,
                    "zoneId": "uaa"
                },
                "authorities": ["uaa.user", "openid"],
                "authenticated": true,
                "authenticatedTime": 1_485_314_400_000_i64,
                "expiresAt": 1_485_318_000_000_i64,
                "externalGroups": ["admins"],
                "userAttributes": {"cost_center": ["b", "a"]},
                "details": {"origin": "127.0.0.1"}
            }),
        );
    }

    #[test]
    fn serializes_absent_collections_as_empty() {
        let auth = Prototype::already_authenticated()
            .with_principal(Principal::new("1", "marissa"))
            .with_authorities(vec![])
            .build()
            .unwrap();

        let value = serde_json::to_value(auth).unwrap();

        assert_eq!(value["externalGroups"], json!([]));
        assert_eq!(value["userAttributes"], json!({}));
        assert_eq!(value["authenticatedTime"], json!(-1));
        assert_eq!(value["expiresAt"], json!(-1));
        assert!(value.get("details").is_none());
        assert!(value.get("credentials").is_none());
    }

    #[test]
    fn round_trips() {
        let original = sample();

        let json = serde_json::to_string(&original).unwrap();
        let restored: Authentication = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
        assert_eq!(restored.principal(), original.principal());
        assert_eq!(restored.authorities(), original.authorities());
        assert_eq!(
            restored.authenticated_time(),
            original.authenticated_time(),
        );
        assert_eq!(restored.expires_at(), original.expires_at());
        assert_eq!(restored.external_groups(), original.external_groups());
        assert_eq!(
            restored.user_attributes_as_map(),
            BTreeMap::from([(
                "cost_center".to_owned(),
                vec!["b".to_owned(), "a".to_owned()],
            )]),
        );
        assert_eq!(restored.details(), original.details());
        assert!(restored.credentials().is_none());
    }

    #[test]
    fn deserializes_with_defaults() {
        let auth: Authentication = serde_json::from_value(json!({
            "principal": {"id": "1", "name": "marissa"},
            "authorities": ["uaa.user"],
            "authenticatedTime": 0
        }))
        .unwrap();

        assert!(auth.is_valid());
        assert_eq!(auth.authenticated_time().millis(), -1);
        assert_eq!(auth.expires_at().millis(), -1);
        assert!(auth.external_groups().is_none());
        assert!(auth.user_attributes().is_empty());
        assert!(auth.details().is_none());
    }

    #[test]
    fn rejects_incomplete_records() {
        let err = serde_json::from_value::<Authentication>(json!({
            "authorities": ["uaa.user"]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("`Principal` must be provided"));

        let err = serde_json::from_value::<Authentication>(json!({
            "principal": {"id": "1", "name": "marissa"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("`Authority`s must be provided"));
    }
}
