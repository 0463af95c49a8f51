pub mod platform;
pub mod profile;
pub mod stat;

pub use self::{
    platform::Platform,
    profile::{
        GameModeStats,
        LifetimeStats,
        Profile,
        ProfileData,
    },
    stat::RawStat,
};
use serde::Deserialize;
use std::collections::HashMap;

/// The error tag the api uses for a missing player
const PLAYER_NOT_FOUND_ERROR: &str = "Player Not Found";

/// The message the api uses for a rejected key
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid authentication credentials";

/// A json response from the profile api.
///
/// The api signals semantic failures in the body, not the http status, so
/// a successful request still has to be split into these two cases.
#[derive(Debug)]
pub enum ApiResponse {
    /// The payload for an existing player
    Profile(ProfileData),

    /// An api-reported failure
    Error(ApiError),
}

impl<'de> serde::Deserialize<'de> for ApiResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = serde_json::Map::deserialize(deserializer)?;

        if map.contains_key("error") || map.contains_key("message") {
            return ApiError::deserialize(serde_json::Value::Object(map))
                .map(Self::Error)
                .map_err(serde::de::Error::custom);
        }

        ProfileData::deserialize(serde_json::Value::Object(map))
            .map(Self::Profile)
            .map_err(serde::de::Error::custom)
    }
}

impl ApiResponse {
    /// Consume self and return the profile payload, or None.
    pub fn take_profile(self) -> Option<ProfileData> {
        match self {
            Self::Profile(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// Consume self and return the api error, or None.
    pub fn take_error(self) -> Option<ApiError> {
        match self {
            Self::Profile(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

/// An error reported by the api in an otherwise successful response.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ApiError {
    /// Short error tag, e.g. "Player Not Found"
    pub error: Option<String>,

    /// Human readable message
    pub message: Option<String>,

    /// Unknown k/vs
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

impl ApiError {
    /// Whether the queried player does not exist.
    pub fn is_player_not_found(&self) -> bool {
        self.error.as_deref() == Some(PLAYER_NOT_FOUND_ERROR)
    }

    /// Whether the api rejected the key.
    pub fn is_invalid_credentials(&self) -> bool {
        self.message.as_deref() == Some(INVALID_CREDENTIALS_MESSAGE)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message.as_deref().or(self.error.as_deref()) {
            Some(reason) => write!(f, "api error ({})", reason),
            None => write!(f, "api error"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Returned when the queried player does not exist.
#[derive(Debug, Clone, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PlayerNotFound {
    /// Status-like code, always 404
    pub code: u16,

    /// The api's error tag
    pub error: String,
}

impl From<ApiError> for PlayerNotFound {
    fn from(error: ApiError) -> Self {
        PlayerNotFound {
            code: 404,
            error: error
                .error
                .unwrap_or_else(|| PLAYER_NOT_FOUND_ERROR.to_string()),
        }
    }
}

/// The outcome of a profile lookup.
#[derive(Debug)]
pub enum FindResult {
    /// The normalized profile
    Profile(Profile),

    /// The queried player does not exist
    NotFound(PlayerNotFound),

    /// Any other api-reported failure, passed through for inspection
    Error(ApiError),
}

impl FindResult {
    /// Consume self and return the profile, or None.
    pub fn into_profile(self) -> Option<Profile> {
        match self {
            Self::Profile(profile) => Some(profile),
            Self::NotFound(_) | Self::Error(_) => None,
        }
    }

    /// Whether the player was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// The rate limit values the api last reported.
///
/// Advisory only; nothing in this crate enforces it. Headers the api did
/// not send are `None`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct RateLimit {
    /// Requests allowed per minute
    pub limit: Option<u64>,

    /// Requests left this minute
    pub remaining: Option<u64>,
}

#[cfg(test)]
mod test {
    use super::*;

    const NOT_FOUND: &str = r#"{"error":"Player Not Found"}"#;
    const INVALID_KEY: &str = r#"{"message":"Invalid authentication credentials"}"#;
    const THROTTLED: &str = r#"{"error":"Throttled","retryAfter":9}"#;
    const MINIMAL_PROFILE: &str = r#"{
        "accountId": "b5a4ea0a-640b-4da7-b3b1-6e4f087461d5",
        "platformName": "epic",
        "epicUserHandle": "Ninja",
        "stats": {},
        "lifeTimeStats": []
    }"#;

    #[test]
    fn a_missing_player_classifies_as_an_error() {
        let response: ApiResponse = serde_json::from_str(NOT_FOUND).expect("invalid response");
        let error = response.take_error().expect("not an error");
        assert!(error.is_player_not_found());
        assert!(!error.is_invalid_credentials());

        let not_found = PlayerNotFound::from(error);
        assert_eq!(not_found.code, 404);
        assert_eq!(not_found.error, "Player Not Found");
    }

    #[test]
    fn a_rejected_key_classifies_as_invalid_credentials() {
        let response: ApiResponse = serde_json::from_str(INVALID_KEY).expect("invalid response");
        let error = response.take_error().expect("not an error");
        assert!(error.is_invalid_credentials());
        assert!(!error.is_player_not_found());
    }

    #[test]
    fn other_errors_keep_their_payload() {
        let response: ApiResponse = serde_json::from_str(THROTTLED).expect("invalid response");
        let error = response.take_error().expect("not an error");
        assert!(!error.is_player_not_found());
        assert_eq!(error.error.as_deref(), Some("Throttled"));
        assert_eq!(
            error.unknown.get("retryAfter"),
            Some(&serde_json::Value::from(9))
        );
    }

    #[test]
    fn a_profile_payload_classifies_as_a_profile() {
        let response: ApiResponse =
            serde_json::from_str(MINIMAL_PROFILE).expect("invalid response");
        let data = response.take_profile().expect("not a profile");
        assert_eq!(data.epic_user_handle, "Ninja");
    }

    #[test]
    fn a_payload_with_missing_fields_fails_to_parse() {
        let error = serde_json::from_str::<ApiResponse>(r#"{"accountId":"a"}"#).unwrap_err();
        assert!(error.to_string().contains("platformName"));
    }
}
