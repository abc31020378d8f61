use std::path::Path;

use serde::{Deserialize, Serialize};

const SCORE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCORE_VERSION
}

/// Best total captures across games, kept next to the executable as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    #[serde(default = "default_version")]
    pub version: u32,
    pub best: u32,
    #[serde(default)]
    pub games_played: u32,
}

impl Default for HighScore {
    fn default() -> Self {
        Self {
            version: SCORE_VERSION,
            best: 0,
            games_played: 0,
        }
    }
}

impl HighScore {
    /// Count a finished game. Returns true if it set a new best.
    pub fn record(&mut self, total_captures: u32) -> bool {
        self.games_played += 1;
        if total_captures > self.best {
            self.best = total_captures;
            true
        } else {
            false
        }
    }
}

pub fn save_to_file(score: &HighScore, path: &str) -> Result<(), String> {
    let out = HighScore {
        version: SCORE_VERSION,
        ..score.clone()
    };
    let json = serde_json::to_string_pretty(&out).map_err(|e| format!("Serialize error: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("Write error: {e}"))?;
    Ok(())
}

/// A missing file is a fresh install, not an error.
pub fn load_from_file(path: &str) -> Result<HighScore, String> {
    if !Path::new(path).exists() {
        return Ok(HighScore::default());
    }
    let text = std::fs::read_to_string(path).map_err(|e| format!("Read error: {e}"))?;
    let score: HighScore =
        serde_json::from_str(&text).map_err(|e| format!("Deserialize error: {e}"))?;
    if score.version > SCORE_VERSION {
        return Err(format!(
            "Unsupported high score version {} (expected <= {SCORE_VERSION})",
            score.version
        ));
    }
    Ok(score)
}

/// Load, or start from zero if the file is unreadable.
pub fn load_or_default(path: &str) -> HighScore {
    match load_from_file(path) {
        Ok(score) => {
            log::info!("loaded high score {} from {path}", score.best);
            score
        }
        Err(e) => {
            log::warn!("could not load high score from {path}: {e}");
            HighScore::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(name: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("{name}_{nanos}.json"))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn saved_score_loads_back() {
        let path = temp_file("highscore_roundtrip");
        let mut score = HighScore::default();
        assert!(score.record(14));
        assert!(!score.record(3));
        save_to_file(&score, &path).unwrap();

        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded.best, 14);
        assert_eq!(loaded.games_played, 2);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_zero() {
        let path = temp_file("highscore_missing");
        assert_eq!(load_from_file(&path).unwrap(), HighScore::default());
    }

    #[test]
    fn corrupt_file_is_an_error_and_defaults_to_zero() {
        let path = temp_file("highscore_corrupt");
        std::fs::write(&path, "not json").unwrap();
        assert!(load_from_file(&path).is_err());
        assert_eq!(load_or_default(&path).best, 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn bare_best_field_is_accepted() {
        let path = temp_file("highscore_minimal");
        std::fs::write(&path, r#"{ "best": 7 }"#).unwrap();
        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded.best, 7);
        assert_eq!(loaded.version, SCORE_VERSION);
        assert_eq!(loaded, HighScore { best: 7, ..HighScore::default() });
        let _ = std::fs::remove_file(path);
    }
}
