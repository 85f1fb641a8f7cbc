use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::{oid::ObjectId, Bson};
use serde::{de, Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

pub const DEFAULT_OVERS: &str = "0.0";

fn default_overs() -> String {
    DEFAULT_OVERS.to_string()
}

fn default_batting_team() -> u8 {
    1
}

// Where a player stands in the current innings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PlayerStatus {
    Batting,
    Bowling,
    Out,
    #[default]
    YetToBat,
}

/// Match lifecycle tag. Parsed case-insensitively so `"live"`, `"Live"` and
/// `"LIVE"` all land on the same variant; always written back capitalized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(try_from = "String")]
#[strum(ascii_case_insensitive)]
pub enum MatchStatus {
    #[default]
    Live,
    Completed,
    Upcoming,
}

impl TryFrom<String> for MatchStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub balls: u32,
    #[serde(default)]
    pub wickets: u32,
    // Partial overs as "overs.balls", e.g. "3.2"
    #[serde(default = "default_overs")]
    #[validate(custom(function = "validate_overs"))]
    pub overs_bowled: String,
    #[serde(default)]
    pub status: PlayerStatus,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            name: String::new(),
            role: String::new(),
            runs: 0,
            balls: 0,
            wickets: 0,
            overs_bowled: default_overs(),
            status: PlayerStatus::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    // Squad order doubles as batting order
    #[serde(default)]
    #[validate(nested)]
    pub players: Vec<Player>,
}

/// Which of the two embedded teams is currently at the crease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattingSide {
    Team1,
    Team2,
}

/// One persisted match document.
///
/// The current bowler and batsmen are not stored here; they are derived from
/// each player's `status` whenever a view is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub team1: Team,
    #[serde(default)]
    pub team2: Team,
    #[serde(default)]
    pub score1: u32,
    #[serde(default)]
    pub score2: u32,
    #[serde(default)]
    pub wickets1: u32,
    #[serde(default)]
    pub wickets2: u32,
    #[serde(default = "default_overs")]
    pub overs1: String,
    #[serde(default = "default_overs")]
    pub overs2: String,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub venue: String,
    // BSON Date in the store, RFC 3339 on the JSON wire
    #[serde(
        default,
        deserialize_with = "deserialize_stored_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(default = "default_batting_team")]
    pub batting_team: u8,
}

impl Match {
    pub fn batting_side(&self) -> BattingSide {
        if self.batting_team == 1 {
            BattingSide::Team1
        } else {
            BattingSide::Team2
        }
    }
}

// For creating new matches
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    #[serde(default)]
    #[validate(nested)]
    pub team1: Team,
    #[serde(default)]
    #[validate(nested)]
    pub team2: Team,
    #[serde(default)]
    pub score1: u32,
    #[serde(default)]
    pub score2: u32,
    #[serde(default)]
    pub wickets1: u32,
    #[serde(default)]
    pub wickets2: u32,
    #[serde(default = "default_overs")]
    #[validate(custom(function = "validate_overs"))]
    pub overs1: String,
    #[serde(default = "default_overs")]
    #[validate(custom(function = "validate_overs"))]
    pub overs2: String,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default = "default_batting_team")]
    #[validate(range(min = 1, max = 2))]
    pub batting_team: u8,
}

impl From<NewMatch> for Match {
    fn from(new_match: NewMatch) -> Self {
        Match {
            id: None,
            team1: new_match.team1,
            team2: new_match.team2,
            score1: new_match.score1,
            score2: new_match.score2,
            wickets1: new_match.wickets1,
            wickets2: new_match.wickets2,
            overs1: new_match.overs1,
            overs2: new_match.overs2,
            status: new_match.status,
            venue: new_match.venue,
            date: Some(new_match.date.unwrap_or_else(Utc::now)),
            batting_team: new_match.batting_team,
        }
    }
}

/// Field-by-field update applied while a game progresses. Only the fields
/// present in the payload are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub team1: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub team2: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score1: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wickets1: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wickets2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_overs"))]
    pub overs1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_overs"))]
    pub overs2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 2))]
    pub batting_team: Option<u8>,
}

impl MatchUpdate {
    pub fn is_empty(&self) -> bool {
        *self == MatchUpdate::default()
    }
}

/// Accepts a BSON Date (documents written by the store or by ingestion
/// scripts) as well as an RFC 3339 string (API responses).
fn deserialize_stored_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::DateTime(date)) => Utc
            .timestamp_millis_opt(date.timestamp_millis())
            .single()
            .map(Some)
            .ok_or_else(|| de::Error::custom("date out of range")),
        Some(Bson::String(raw)) => DateTime::parse_from_rfc3339(&raw)
            .map(|date| Some(date.with_timezone(&Utc)))
            .map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!(
            "expected a date, got {:?}",
            other.element_type()
        ))),
    }
}

fn validate_overs(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(overs) if overs.is_finite() && overs >= 0.0 => Ok(()),
        _ => Err(ValidationError::new("invalid_overs")),
    }
}

/// Numeric value of an overs string, read the way a lenient float parser
/// would: the longest leading numeric prefix counts, anything unreadable is 0.
pub fn overs_value(overs: &str) -> f64 {
    let trimmed = overs.trim_start();
    let end = trimmed
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    let mut candidate = &trimmed[..end];
    while !candidate.is_empty() {
        if let Ok(value) = candidate.parse::<f64>() {
            return value;
        }
        candidate = &candidate[..candidate.len() - 1];
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_defaults_when_fields_missing() {
        let player: Player = serde_json::from_value(json!({ "name": "Rohit Sharma" })).unwrap();

        assert_eq!(player.runs, 0);
        assert_eq!(player.balls, 0);
        assert_eq!(player.wickets, 0);
        assert_eq!(player.overs_bowled, "0.0");
        assert_eq!(player.status, PlayerStatus::YetToBat);
    }

    #[test]
    fn test_player_status_wire_names() {
        let player: Player =
            serde_json::from_value(json!({ "name": "A", "status": "yet-to-bat" })).unwrap();
        assert_eq!(player.status, PlayerStatus::YetToBat);

        let value = serde_json::to_value(PlayerStatus::Bowling).unwrap();
        assert_eq!(value, json!("bowling"));
    }

    #[test]
    fn test_unknown_player_status_rejected() {
        let result: Result<Player, _> =
            serde_json::from_value(json!({ "name": "A", "status": "retired" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_match_status_parsed_case_insensitively() {
        for raw in ["live", "Live", "LIVE"] {
            let status: MatchStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(status, MatchStatus::Live);
        }
        let status: MatchStatus = serde_json::from_value(json!("completed")).unwrap();
        assert_eq!(status, MatchStatus::Completed);
        assert_eq!(serde_json::to_value(status).unwrap(), json!("Completed"));
    }

    #[test]
    fn test_unknown_match_status_rejected() {
        let result: Result<MatchStatus, _> = serde_json::from_value(json!("abandoned"));
        assert!(result.is_err());
    }

    #[test]
    fn test_match_defaults_and_missing_teams() {
        let parsed: Match = serde_json::from_value(json!({ "venue": "Eden Gardens" })).unwrap();

        assert_eq!(parsed.status, MatchStatus::Live);
        assert_eq!(parsed.batting_team, 1);
        assert_eq!(parsed.overs1, "0.0");
        assert!(parsed.team1.players.is_empty());
        assert!(parsed.team2.players.is_empty());
        assert!(parsed.date.is_none());
    }

    #[test]
    fn test_missing_date_stays_missing_across_reads() {
        let first: Match = serde_json::from_value(json!({ "venue": "Chepauk" })).unwrap();
        let second: Match = serde_json::from_value(json!({ "venue": "Chepauk" })).unwrap();

        assert_eq!(first.date, second.date);
        assert!(serde_json::to_value(&first).unwrap().get("date").is_none());
    }

    #[test]
    fn test_decodes_bson_date_from_store() {
        use mongodb::bson::{doc, from_document, DateTime as BsonDateTime};

        let stored = BsonDateTime::from_millis(1_711_900_800_000);
        let parsed: Match = from_document(doc! {
            "status": "Live",
            "venue": "Wankhede",
            "date": stored,
        })
        .unwrap();

        assert_eq!(parsed.date.unwrap().timestamp_millis(), 1_711_900_800_000);
        assert_eq!(
            serde_json::to_value(&parsed).unwrap()["date"],
            "2024-03-31T16:00:00Z"
        );
    }

    #[test]
    fn test_decodes_current_bson_date() {
        use mongodb::bson::{doc, from_document, DateTime as BsonDateTime};

        let now = BsonDateTime::now();
        let parsed: Match = from_document(doc! { "date": now }).unwrap();

        assert_eq!(parsed.date.unwrap().timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn test_decodes_rfc3339_date_from_api() {
        let parsed: Match =
            serde_json::from_value(json!({ "date": "2024-03-31T16:00:00Z" })).unwrap();
        assert_eq!(parsed.date.unwrap().timestamp_millis(), 1_711_900_800_000);

        let bad: Result<Match, _> = serde_json::from_value(json!({ "date": 42 }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_legacy_denormalized_fields_are_ignored() {
        let parsed: Match = serde_json::from_value(json!({
            "currentBowler": "Jasprit Bumrah",
            "currentBatsmen": ["Virat Kohli", "Faf du Plessis"],
            "battingTeam": 2
        }))
        .unwrap();

        assert_eq!(parsed.batting_side(), BattingSide::Team2);
        let value = serde_json::to_value(&parsed).unwrap();
        assert!(value.get("currentBowler").is_none());
        assert!(value.get("currentBatsmen").is_none());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let team = Team {
            name: "Mumbai Indians".to_string(),
            short_name: "MI".to_string(),
            players: vec![Player {
                overs_bowled: "3.2".to_string(),
                ..Player::default()
            }],
        };
        let value = serde_json::to_value(&team).unwrap();

        assert_eq!(value["shortName"], "MI");
        assert_eq!(value["players"][0]["oversBowled"], "3.2");
    }

    #[test]
    fn test_new_match_validation() {
        let valid: NewMatch = serde_json::from_value(json!({ "battingTeam": 2 })).unwrap();
        assert!(valid.validate().is_ok());

        let bad_side: NewMatch = serde_json::from_value(json!({ "battingTeam": 3 })).unwrap();
        assert!(bad_side.validate().is_err());

        let bad_overs: NewMatch = serde_json::from_value(json!({ "overs1": "three" })).unwrap();
        assert!(bad_overs.validate().is_err());

        let bad_player: NewMatch = serde_json::from_value(json!({
            "team1": { "players": [{ "name": "A", "oversBowled": "-1" }] }
        }))
        .unwrap();
        assert!(bad_player.validate().is_err());
    }

    #[test]
    fn test_new_match_date_defaults_to_now() {
        let before = Utc::now();
        let created: Match = serde_json::from_value::<NewMatch>(json!({}))
            .map(Match::from)
            .unwrap();

        assert!(created.id.is_none());
        assert!(created.date.unwrap() >= before);
    }

    #[test]
    fn test_match_update_skips_absent_fields() {
        let update = MatchUpdate {
            score1: Some(150),
            overs1: Some("17.4".to_string()),
            ..MatchUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();

        assert_eq!(value, json!({ "score1": 150, "overs1": "17.4" }));
        assert!(!update.is_empty());
        assert!(MatchUpdate::default().is_empty());
    }

    #[test]
    fn test_overs_value() {
        assert_eq!(overs_value("3.2"), 3.2);
        assert_eq!(overs_value("0.0"), 0.0);
        assert_eq!(overs_value(" 4"), 4.0);
        assert_eq!(overs_value("3.2.1"), 3.2);
        assert_eq!(overs_value("12ov"), 12.0);
        assert_eq!(overs_value(""), 0.0);
        assert_eq!(overs_value("n/a"), 0.0);
    }
}
