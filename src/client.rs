use crate::{
    types::{
        ApiResponse,
        FindResult,
        Platform,
        PlayerNotFound,
        Profile,
        RateLimit,
    },
    Error,
    FortniteResult,
};
use reqwest::header::HeaderMap;
use std::sync::{
    Arc,
    Mutex,
};
use url::Url;

/// The base url for profile lookups
const PROFILE_API_URL: &str = "https://api.fortnitetracker.com/v1/profile";

/// The header the api reads the key from
const API_KEY_HEADER: &str = "TRN-Api-Key";

const USER_AGENT_VALUE: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A Fortnite Tracker Client
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    api_key: Arc<str>,
    rate_limit: Arc<Mutex<RateLimit>>,
}

impl Client {
    /// Make a new [`Client`] from an api key.
    ///
    /// The key is attached to every request, so an empty key is rejected
    /// here before any request can be made.
    pub fn new(api_key: &str) -> FortniteResult<Self> {
        if api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()?;

        Ok(Client {
            client,
            api_key: Arc::from(api_key),
            // The documented per-minute quota, until the api reports real numbers.
            rate_limit: Arc::new(Mutex::new(RateLimit {
                limit: Some(30),
                remaining: Some(30),
            })),
        })
    }

    /// Look up a player's profile.
    ///
    /// A missing player is a [`FindResult::NotFound`] value, not an error,
    /// so routine lookups need no error handling. A rejected api key is
    /// [`Error::InvalidApiKey`]. Any other api-reported failure is passed
    /// through as [`FindResult::Error`].
    pub async fn find(&self, username: &str, platform: Platform) -> FortniteResult<FindResult> {
        let response = self.find_raw(username, platform).await?;
        classify_response(response)
    }

    /// Look up a player and return the classified api payload without
    /// reshaping it.
    pub async fn find_raw(&self, username: &str, platform: Platform) -> FortniteResult<ApiResponse> {
        if username.is_empty() {
            return Err(Error::EmptyUsername);
        }

        let url = profile_url(username, platform)?;
        self.get_api_response(url.as_str()).await
    }

    /// Get the rate limit values the api last reported.
    ///
    /// Advisory only. The snapshot is overwritten after every response, so
    /// with concurrent lookups it reflects whichever response landed last.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .map(|rate_limit| *rate_limit)
            .unwrap_or_default()
    }

    /// Get a url and parse the response.
    async fn get_api_response(&self, url: &str) -> FortniteResult<ApiResponse> {
        let res = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &*self.api_key)
            .send()
            .await?;

        self.store_rate_limit(res.headers());

        let status = res.status();
        if !status.is_success() {
            return Err(Error::InvalidStatus(status));
        }

        let text = res.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Overwrite the rate limit snapshot from response headers.
    fn store_rate_limit(&self, headers: &HeaderMap) {
        let snapshot = RateLimit {
            limit: header_as_u64(headers, "x-ratelimit-limit-minute"),
            remaining: header_as_u64(headers, "x-ratelimit-remaining-minute"),
        };

        if let Ok(mut rate_limit) = self.rate_limit.lock() {
            *rate_limit = snapshot;
        }
    }
}

/// Sort a parsed payload into the lookup outcome.
///
/// A rejected key is the only payload error that raises; a missing player
/// and anything else the api reports are ordinary return values.
fn classify_response(response: ApiResponse) -> FortniteResult<FindResult> {
    match response {
        ApiResponse::Profile(data) => Ok(FindResult::Profile(Profile::from(data))),
        ApiResponse::Error(error) => {
            if error.is_invalid_credentials() {
                return Err(Error::InvalidApiKey(error));
            }

            if error.is_player_not_found() {
                return Ok(FindResult::NotFound(PlayerNotFound::from(error)));
            }

            Ok(FindResult::Error(error))
        }
    }
}

/// Build the profile endpoint url for a username and platform.
///
/// The username is appended as a path segment, which percent-encodes
/// anything a segment cannot carry raw (spaces, slashes).
fn profile_url(username: &str, platform: Platform) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(PROFILE_API_URL)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .push(platform.as_str())
        .push(username);
    Ok(url)
}

/// Read a header as an integer, if present and numeric.
fn header_as_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let error = Client::new("").unwrap_err();
        assert!(matches!(error, Error::MissingApiKey));
    }

    #[tokio::test]
    async fn empty_username_is_rejected_before_any_request() {
        let client = Client::new("key").expect("failed to build client");
        let error = client.find("", Platform::Pc).await.unwrap_err();
        assert!(matches!(error, Error::EmptyUsername));
    }

    #[test]
    fn usernames_are_percent_encoded() {
        let url = profile_url("two words/slash", Platform::Pc).expect("invalid url");
        assert_eq!(
            url.as_str(),
            "https://api.fortnitetracker.com/v1/profile/pc/two%20words%2Fslash"
        );
    }

    #[test]
    fn the_platform_picks_the_path_segment() {
        let url = profile_url("ninja", Platform::Xbl).expect("invalid url");
        assert_eq!(
            url.as_str(),
            "https://api.fortnitetracker.com/v1/profile/xbl/ninja"
        );
    }

    #[test]
    fn the_initial_rate_limit_is_the_documented_quota() {
        let client = Client::new("key").expect("failed to build client");
        let rate_limit = client.rate_limit();
        assert_eq!(rate_limit.limit, Some(30));
        assert_eq!(rate_limit.remaining, Some(30));
    }

    #[test]
    fn a_missing_player_is_a_result_not_an_error() {
        let response: ApiResponse = serde_json::from_str(r#"{"error":"Player Not Found"}"#)
            .expect("invalid response");
        let result = classify_response(response).expect("lookup failed");

        assert!(result.is_not_found());
        match result {
            FindResult::NotFound(not_found) => {
                assert_eq!(not_found.code, 404);
                assert_eq!(not_found.error, "Player Not Found");
            }
            result => panic!("unexpected result: {:?}", result),
        }
    }

    #[test]
    fn a_rejected_key_raises() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"message":"Invalid authentication credentials"}"#)
                .expect("invalid response");
        let error = classify_response(response).unwrap_err();

        match error {
            Error::InvalidApiKey(inner) => {
                assert_eq!(
                    inner.message.as_deref(),
                    Some("Invalid authentication credentials")
                );
            }
            error => panic!("unexpected error: {:?}", error),
        }
    }

    #[test]
    fn other_api_errors_pass_through() {
        let response: ApiResponse = serde_json::from_str(r#"{"error":"Throttled"}"#)
            .expect("invalid response");
        let result = classify_response(response).expect("lookup failed");

        match result {
            FindResult::Error(error) => assert_eq!(error.error.as_deref(), Some("Throttled")),
            result => panic!("unexpected result: {:?}", result),
        }
    }
}
