use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Social platform a link is filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Instagram,
    Twitter,
    Facebook,
}

impl Platform {
    /// Every platform, in display order.
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Twitter, Platform::Facebook];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instagram" => Ok(Self::Instagram),
            "twitter" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            other => Err(ValidationError::InvalidPlatform(other.to_string())),
        }
    }
}

/// A saved link as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: Uuid,
    pub url: String,
    pub platform: Platform,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated, not yet persisted link.
///
/// The only way to build one is [`NewLink::parse`], so every value reaching
/// the store satisfies the record invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    url: String,
    platform: Platform,
    user_id: String,
}

impl NewLink {
    /// Validate raw input fields.
    ///
    /// A field that is absent, empty or only whitespace counts as missing.
    /// The url is stored trimmed.
    pub fn parse(
        url: Option<&str>,
        platform: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let url = non_blank(url);
        let platform = non_blank(platform);
        let user_id = non_blank(user_id);

        let (Some(url), Some(platform), Some(user_id)) = (url, platform, user_id) else {
            return Err(ValidationError::MissingFields);
        };

        Ok(Self {
            url: url.to_string(),
            platform: platform.parse()?,
            user_id: user_id.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips_through_str() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn platform_rejects_unknown_and_wrong_case() {
        assert!(matches!(
            "myspace".parse::<Platform>(),
            Err(ValidationError::InvalidPlatform(p)) if p == "myspace"
        ));
        assert!("Twitter".parse::<Platform>().is_err());
    }

    #[test]
    fn new_link_trims_url() {
        let link = NewLink::parse(Some("  https://x.com/a \n"), Some("twitter"), Some("u1")).unwrap();
        assert_eq!(link.url(), "https://x.com/a");
        assert_eq!(link.platform(), Platform::Twitter);
        assert_eq!(link.user_id(), "u1");
    }

    #[test]
    fn new_link_requires_every_field() {
        let cases = [
            (None, Some("twitter"), Some("u1")),
            (Some(""), Some("twitter"), Some("u1")),
            (Some("   "), Some("twitter"), Some("u1")),
            (Some("https://x.com"), None, Some("u1")),
            (Some("https://x.com"), Some(""), Some("u1")),
            (Some("https://x.com"), Some("twitter"), None),
            (Some("https://x.com"), Some("twitter"), Some("")),
        ];
        for (url, platform, user_id) in cases {
            assert_eq!(
                NewLink::parse(url, platform, user_id),
                Err(ValidationError::MissingFields),
                "url={url:?} platform={platform:?} user_id={user_id:?}"
            );
        }
    }

    #[test]
    fn new_link_rejects_unknown_platform() {
        let err = NewLink::parse(Some("https://x.com"), Some("tiktok"), Some("u1")).unwrap_err();
        assert_eq!(err, ValidationError::InvalidPlatform("tiktok".into()));
    }

    #[test]
    fn link_json_uses_camel_case() {
        let link = Link {
            id: Uuid::new_v4(),
            url: "https://instagram.com/p/1".into(),
            platform: Platform::Instagram,
            user_id: "u1".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["platform"], "instagram");
        assert_eq!(value["userId"], "u1");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn link_requires_uuid_id() {
        // Document-store records carry a 24-hex ObjectId under `_id`.
        let json = serde_json::json!({
            "_id": "65a1b2c3d4e5f6a7b8c9d0e1",
            "url": "https://facebook.com/x",
            "platform": "facebook",
            "userId": "u1",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z",
            "__v": 0,
        });
        assert!(serde_json::from_value::<Link>(json).is_err());
    }
}
