//! Data file fixtures

use serde_json::json;
use std::path::{Path, PathBuf};

/// Song data file for "Fancy Dancer" by Gary Burton
pub const FANCY_DANCER_SONG: &str = r#"{"num_songs": 1, "artist_id": "AR2IHYW1187FB40E41", "artist_latitude": null, "artist_longitude": null, "artist_location": "", "artist_name": "Gary Burton", "song_id": "SOSCRER12A8C133DC2", "title": "Fancy Dancer", "duration": 182.857, "year": 0}"#;

/// Song data file content
pub fn song_json(song_id: &str, title: &str, artist_id: &str, artist_name: &str, duration: f64) -> String {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 2004
    })
    .to_string()
}

/// One activity log line
///
/// `song` is (title, artist, length); `None` writes nulls as the logs do
/// for non-play pages.
pub fn event_line(page: &str, ts: i64, user_id: &str, level: &str, song: Option<(&str, &str, f64)>) -> String {
    let (title, artist, length) = match song {
        Some((title, artist, length)) => (json!(title), json!(artist), json!(length)),
        None => (json!(null), json!(null), json!(null)),
    };
    json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Kaylee",
        "gender": "F",
        "itemInSession": 0,
        "lastName": "Summers",
        "length": length,
        "level": level,
        "location": "Phoenix-Mesa-Scottsdale, AZ",
        "method": "PUT",
        "page": page,
        "registration": 1540344794796.0,
        "sessionId": 139,
        "song": title,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0 (Windows NT 6.1; WOW64)",
        "userId": user_id
    })
    .to_string()
}

/// Write a data file under `root`, creating parent folders
pub fn write_data_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}
