use crate::types::stat::RawStat;
use std::collections::HashMap;

/// Renames applied when a per-mode stat bucket is flattened.
///
/// Source keys missing from this table never reach the output.
const MODE_STAT_FIELDS: &[(&str, &str)] = &[
    ("top1", "wins"),
    ("top3", "top3"),
    ("top5", "top5"),
    ("top6", "top6"),
    ("top12", "top12"),
    ("top25", "top25"),
    ("score", "score"),
    ("matches", "matches"),
    ("winRatio", "winRatio"),
    ("minutesPlayed", "minutesPlayed"),
    ("scorePerMin", "scorePerMin"),
    ("kills", "kills"),
    ("kd", "kd"),
];

/// Labels projected out of the lifetime stat list.
const LIFETIME_FIELDS: &[(&str, &str)] = &[
    ("Top 3s", "top3"),
    ("Top 5s", "top5"),
    ("Top 6s", "top6"),
    ("Top 12s", "top12"),
    ("Top 25s", "top25"),
    ("Score", "score"),
    ("Matches Played", "matches"),
    ("Wins", "wins"),
    ("Win%", "winPercent"),
    ("Kills", "kills"),
    ("K/d", "kd"),
];

/// Apply a rename table to a keyed source.
///
/// Each `(source, output)` pair is looked up by source key; hits land in
/// the result under the output key, misses are skipped.
fn project_fields<T>(
    fields: &[(&str, &'static str)],
    lookup: impl Fn(&str) -> Option<T>,
) -> HashMap<&'static str, T> {
    fields
        .iter()
        .filter_map(|&(source, output)| lookup(source).map(|value| (output, value)))
        .collect()
}

/// The raw payload for an existing player.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ProfileData {
    /// Unique account id
    #[serde(rename = "accountId")]
    pub account_id: String,

    /// Platform slug, e.g. "epic"
    #[serde(rename = "platformName")]
    pub platform_name: String,

    /// The player's handle
    #[serde(rename = "epicUserHandle")]
    pub epic_user_handle: String,

    /// Per-mode stat buckets
    pub stats: StatBuckets,

    /// Career totals as label/value pairs
    #[serde(rename = "lifeTimeStats")]
    pub life_time_stats: Vec<LifetimeEntry>,

    /// Unknown k/vs
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

/// The per-mode stat buckets, keyed by the api's playlist ids.
///
/// A player who never queued a mode has no bucket for it.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct StatBuckets {
    /// Solo
    pub p2: Option<HashMap<String, RawStat>>,

    /// Duo
    pub p10: Option<HashMap<String, RawStat>>,

    /// Squad
    pub p9: Option<HashMap<String, RawStat>>,

    /// Unknown k/vs
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

/// One entry of the lifetime stat list.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct LifetimeEntry {
    /// Human readable label, e.g. "Matches Played"
    pub key: String,

    /// The value, as served
    pub value: String,
}

/// A player's normalized profile.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique account id
    pub account_id: String,

    /// Platform slug
    pub platform_name: String,

    /// The player's handle
    pub display_name: String,

    /// Solo stats
    pub solo: GameModeStats,

    /// Duo stats
    pub duo: GameModeStats,

    /// Squad stats
    pub squad: GameModeStats,

    /// Career totals
    pub lifetime: LifetimeStats,
}

impl Profile {
    /// The player's page on fortnitetracker.com.
    pub fn tracker_url(&self) -> String {
        format!(
            "https://fortnitetracker.com/profile/{}/{}",
            self.platform_name, self.display_name
        )
    }
}

impl From<ProfileData> for Profile {
    fn from(data: ProfileData) -> Self {
        Profile {
            solo: data
                .stats
                .p2
                .as_ref()
                .map(GameModeStats::from_bucket)
                .unwrap_or_default(),
            duo: data
                .stats
                .p10
                .as_ref()
                .map(GameModeStats::from_bucket)
                .unwrap_or_default(),
            squad: data
                .stats
                .p9
                .as_ref()
                .map(GameModeStats::from_bucket)
                .unwrap_or_default(),
            lifetime: LifetimeStats::from_entries(&data.life_time_stats),
            account_id: data.account_id,
            platform_name: data.platform_name,
            display_name: data.epic_user_handle,
        }
    }
}

/// Flattened stats for one game mode.
///
/// Stats the api did not serve for a platform stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameModeStats {
    /// Times in the top 3
    pub top3: Option<f64>,

    /// Times in the top 5
    pub top5: Option<f64>,

    /// Times in the top 6
    pub top6: Option<f64>,

    /// Times in the top 12
    pub top12: Option<f64>,

    /// Times in the top 25
    pub top25: Option<f64>,

    /// Total score
    pub score: Option<f64>,

    /// Matches played
    pub matches: Option<f64>,

    /// Matches won
    pub wins: Option<f64>,

    /// Percentage of matches won
    pub win_ratio: Option<f64>,

    /// Minutes in game
    pub minutes_played: Option<f64>,

    /// Score per minute
    pub score_per_min: Option<f64>,

    /// Total kills
    pub kills: Option<f64>,

    /// Kill/death ratio
    pub kd: Option<f64>,
}

impl GameModeStats {
    /// Flatten a raw stat bucket.
    ///
    /// Consults [`MODE_STAT_FIELDS`], so unrecognized stat names are
    /// dropped and missing ones stay `None`.
    pub fn from_bucket(bucket: &HashMap<String, RawStat>) -> Self {
        let mut fields = project_fields(MODE_STAT_FIELDS, |key| {
            bucket.get(key).map(|stat| stat.value)
        });

        GameModeStats {
            top3: fields.remove("top3"),
            top5: fields.remove("top5"),
            top6: fields.remove("top6"),
            top12: fields.remove("top12"),
            top25: fields.remove("top25"),
            score: fields.remove("score"),
            matches: fields.remove("matches"),
            wins: fields.remove("wins"),
            win_ratio: fields.remove("winRatio"),
            minutes_played: fields.remove("minutesPlayed"),
            score_per_min: fields.remove("scorePerMin"),
            kills: fields.remove("kills"),
            kd: fields.remove("kd"),
        }
    }
}

/// Career totals across all modes.
///
/// Values stay the strings the api serves.
#[derive(Debug, Clone, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeStats {
    /// Times in the top 3
    pub top3: Option<String>,

    /// Times in the top 5
    pub top5: Option<String>,

    /// Times in the top 6
    pub top6: Option<String>,

    /// Times in the top 12
    pub top12: Option<String>,

    /// Times in the top 25
    pub top25: Option<String>,

    /// Total score
    pub score: Option<String>,

    /// Matches played
    pub matches: Option<String>,

    /// Matches won
    pub wins: Option<String>,

    /// Percentage of matches won
    pub win_percent: Option<String>,

    /// Total kills
    pub kills: Option<String>,

    /// Kill/death ratio
    pub kd: Option<String>,
}

impl LifetimeStats {
    /// Project the lifetime entry list.
    ///
    /// Labels outside [`LIFETIME_FIELDS`] are ignored. A label that
    /// repeats keeps its last value.
    pub fn from_entries(entries: &[LifetimeEntry]) -> Self {
        let by_label: HashMap<&str, &str> = entries
            .iter()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
            .collect();

        let mut fields = project_fields(LIFETIME_FIELDS, |label| {
            by_label.get(label).map(|value| (*value).to_string())
        });

        LifetimeStats {
            top3: fields.remove("top3"),
            top5: fields.remove("top5"),
            top6: fields.remove("top6"),
            top12: fields.remove("top12"),
            top25: fields.remove("top25"),
            score: fields.remove("score"),
            matches: fields.remove("matches"),
            wins: fields.remove("wins"),
            win_percent: fields.remove("winPercent"),
            kills: fields.remove("kills"),
            kd: fields.remove("kd"),
        }
    }
}
