//! Activity log records (JSON lines)
//!
//! A log file is parsed into an [`EventBatch`]: the plays it contains, in
//! file order, plus the records that had to be skipped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sparkify_common::db::{SongArtistLookupKey, SongplayRow, TimeRow, UserRow};
use thiserror::Error;

/// Page value marking an actual song play
pub const NEXT_SONG: &str = "NextSong";

/// Why a single event record was left out of its batch
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SkipReason {
    /// Line is not valid UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidEncoding(String),

    /// Line is not a JSON object
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// `ts` or `userId` has the wrong type
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// A required field is absent or empty
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// Timestamp does not map to a calendar date
    #[error("unparseable timestamp {0}")]
    BadTimestamp(i64),
}

/// Integer as logged: a number in some exports, a numeric string in others
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawInteger {
    Number(i64),
    Text(String),
}

impl RawInteger {
    fn value(&self) -> Option<i64> {
        match self {
            RawInteger::Number(n) => Some(*n),
            RawInteger::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One raw activity record
///
/// Only `ts` and `userId` are checked strictly. Every other field is read
/// leniently: a value of the wrong type is stored as `None` and the play
/// is still loaded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub page: Option<String>,
    pub ts: Option<i64>,
    pub user_id: Option<RawInteger>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub song: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub session_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_agent: Option<String>,
}

/// Wrong-typed values read as `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawInteger> = lenient(deserializer)?;
    Ok(raw.as_ref().and_then(RawInteger::value))
}

impl EventRecord {
    /// Validate the required scalars and derive the rows of one play
    pub fn into_play(self) -> Result<PlayEvent, SkipReason> {
        let ts = self.ts.ok_or(SkipReason::MissingField("ts"))?;
        let time = TimeRow::from_epoch_millis(ts).ok_or(SkipReason::BadTimestamp(ts))?;
        let user_id = self
            .user_id
            .as_ref()
            .and_then(RawInteger::value)
            .ok_or(SkipReason::MissingField("userId"))?;

        let lookup_key = match (self.song, self.artist, self.length) {
            (Some(title), Some(artist_name), Some(duration)) => Some(SongArtistLookupKey {
                title,
                artist_name,
                duration,
            }),
            _ => None,
        };

        Ok(PlayEvent {
            time,
            user: UserRow {
                user_id,
                first_name: self.first_name,
                last_name: self.last_name,
                gender: self.gender,
                level: self.level.clone(),
            },
            lookup_key,
            level: self.level,
            session_id: self.session_id,
            location: self.location,
            user_agent: self.user_agent,
        })
    }
}

/// A validated song play
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    pub time: TimeRow,
    pub user: UserRow,
    /// `None` when the record lacks title, artist or length
    pub lookup_key: Option<SongArtistLookupKey>,
    pub level: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl PlayEvent {
    /// Build the fact row once song/artist ids are resolved
    pub fn songplay(&self, song_id: Option<String>, artist_id: Option<String>) -> SongplayRow {
        SongplayRow {
            start_time: self.time.start_time,
            user_id: self.user.user_id,
            level: self.level.clone(),
            song_id,
            artist_id,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Record skipped while parsing, with its 1-based line number
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEvent {
    pub line: usize,
    pub reason: SkipReason,
}

/// Plays parsed from one log file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBatch {
    /// Non-blank lines read
    pub records_read: usize,
    /// Valid plays, in file order
    pub plays: Vec<PlayEvent>,
    /// NextSong records (or unreadable lines) left out
    pub skipped: Vec<SkippedEvent>,
}

impl EventBatch {
    /// Parse JSON-lines content, keeping only valid NextSong records
    pub fn parse(content: &str) -> Self {
        Self::parse_bytes(content.as_bytes())
    }

    /// Parse raw file bytes, decoding each line on its own
    ///
    /// A line that is not UTF-8 is skipped like any other unreadable
    /// record; the rest of the file still loads.
    pub fn parse_bytes(content: &[u8]) -> Self {
        let mut batch = EventBatch::default();

        for (idx, line) in content.split(|&b| b == b'\n').enumerate() {
            let line = line.trim_ascii();
            if line.is_empty() {
                continue;
            }
            batch.records_read += 1;

            let parsed = std::str::from_utf8(line)
                .map_err(|e| SkipReason::InvalidEncoding(e.to_string()))
                .and_then(parse_line);

            match parsed {
                Ok(Some(play)) => batch.plays.push(play),
                Ok(None) => {}
                Err(reason) => batch.skipped.push(SkippedEvent {
                    line: idx + 1,
                    reason,
                }),
            }
        }

        batch
    }
}

/// `Ok(None)` for records that are not plays
fn parse_line(line: &str) -> Result<Option<PlayEvent>, SkipReason> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;

    if value.get("page").and_then(Value::as_str) != Some(NEXT_SONG) {
        return Ok(None);
    }

    let record: EventRecord =
        serde_json::from_value(value).map_err(|e| SkipReason::InvalidField(e.to_string()))?;
    record.into_play().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAY: &str = r#"{"artist":"Gary Burton","auth":"Logged In","firstName":"Kaylee","gender":"F","itemInSession":0,"lastName":"Summers","length":182.857,"level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","method":"PUT","page":"NextSong","registration":1540344794796.0,"sessionId":139,"song":"Fancy Dancer","status":200,"ts":1542837407796,"userAgent":"Mozilla/5.0","userId":"8"}"#;
    const HOME: &str = r#"{"artist":null,"auth":"Logged In","firstName":"Kaylee","gender":"F","itemInSession":1,"lastName":"Summers","length":null,"level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","method":"GET","page":"Home","registration":1540344794796.0,"sessionId":139,"song":null,"status":200,"ts":1542837500000,"userAgent":"Mozilla/5.0","userId":"8"}"#;

    #[test]
    fn test_next_song_record_becomes_play() {
        let batch = EventBatch::parse(PLAY);
        assert_eq!(batch.records_read, 1);
        assert!(batch.skipped.is_empty());

        let play = &batch.plays[0];
        assert_eq!(play.user.user_id, 8);
        assert_eq!(play.user.first_name.as_deref(), Some("Kaylee"));
        assert_eq!(play.level.as_deref(), Some("free"));
        assert_eq!(play.session_id, Some(139));
        assert_eq!(play.time.hour, 21);
        assert_eq!(
            play.lookup_key,
            Some(SongArtistLookupKey {
                title: "Fancy Dancer".to_string(),
                artist_name: "Gary Burton".to_string(),
                duration: 182.857,
            })
        );
    }

    #[test]
    fn test_other_pages_dropped_silently() {
        let content = format!("{HOME}\n{PLAY}\n{HOME}\n");
        let batch = EventBatch::parse(&content);
        assert_eq!(batch.records_read, 3);
        assert_eq!(batch.plays.len(), 1);
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_numeric_user_id_accepted() {
        let batch = EventBatch::parse(r#"{"page":"NextSong","ts":1542837407796,"userId":26}"#);
        assert_eq!(batch.plays[0].user.user_id, 26);
        assert_eq!(batch.plays[0].lookup_key, None);
    }

    #[test]
    fn test_missing_user_id_skipped() {
        let content = format!(
            "{}\n{}\n",
            r#"{"page":"NextSong","ts":1542837407796,"userId":""}"#, PLAY
        );
        let batch = EventBatch::parse(&content);
        assert_eq!(batch.plays.len(), 1);
        assert_eq!(
            batch.skipped,
            vec![SkippedEvent {
                line: 1,
                reason: SkipReason::MissingField("userId"),
            }]
        );
    }

    #[test]
    fn test_missing_and_bad_timestamps_skipped() {
        let content = concat!(
            r#"{"page":"NextSong","userId":"8"}"#,
            "\n",
            r#"{"page":"NextSong","ts":9223372036854775807,"userId":"8"}"#,
            "\n",
            r#"{"page":"NextSong","ts":"yesterday","userId":"8"}"#,
        );
        let batch = EventBatch::parse(content);
        assert!(batch.plays.is_empty());
        assert_eq!(batch.skipped.len(), 3);
        assert_eq!(batch.skipped[0].reason, SkipReason::MissingField("ts"));
        assert_eq!(batch.skipped[1].reason, SkipReason::BadTimestamp(i64::MAX));
        assert!(matches!(batch.skipped[2].reason, SkipReason::InvalidField(_)));
    }

    #[test]
    fn test_garbage_line_skipped_blank_lines_ignored() {
        let content = format!("\n{PLAY}\nnot json\n\n");
        let batch = EventBatch::parse(&content);
        assert_eq!(batch.records_read, 2);
        assert_eq!(batch.plays.len(), 1);
        assert_eq!(batch.skipped[0].line, 3);
        assert!(matches!(batch.skipped[0].reason, SkipReason::InvalidJson(_)));
    }

    #[test]
    fn test_mistyped_optional_fields_do_not_drop_play() {
        let content = concat!(
            r#"{"page":"NextSong","ts":1542837407796,"userId":"8","sessionId":"139","level":"free"}"#,
            "\n",
            r#"{"page":"NextSong","ts":1542837500000,"userId":"8","sessionId":{"id":1},"location":42,"length":"long","song":"Fancy Dancer","artist":"Gary Burton"}"#,
        );
        let batch = EventBatch::parse(content);
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.plays.len(), 2);

        assert_eq!(batch.plays[0].session_id, Some(139));
        assert_eq!(batch.plays[0].level.as_deref(), Some("free"));

        let second = &batch.plays[1];
        assert_eq!(second.session_id, None);
        assert_eq!(second.location, None);
        // Without a usable length there is nothing to look up
        assert_eq!(second.lookup_key, None);
    }

    #[test]
    fn test_non_utf8_line_skipped_alone() {
        let mut content = Vec::new();
        content.extend_from_slice(PLAY.as_bytes());
        content.extend_from_slice(b"\n{\"page\":\"Home\",\"artist\":\"\xe3\"}\n");
        content.extend_from_slice(PLAY.as_bytes());
        content.push(b'\n');

        let batch = EventBatch::parse_bytes(&content);
        assert_eq!(batch.records_read, 3);
        assert_eq!(batch.plays.len(), 2);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].line, 2);
        assert!(matches!(batch.skipped[0].reason, SkipReason::InvalidEncoding(_)));
    }

    #[test]
    fn test_songplay_carries_resolved_ids() {
        let play = EventBatch::parse(PLAY).plays.remove(0);
        let row = play.songplay(Some("SO1".to_string()), None);
        assert_eq!(row.start_time, play.time.start_time);
        assert_eq!(row.user_id, 8);
        assert_eq!(row.song_id.as_deref(), Some("SO1"));
        assert_eq!(row.artist_id, None);
        assert_eq!(row.user_agent.as_deref(), Some("Mozilla/5.0"));
    }
}
