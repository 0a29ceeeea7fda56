use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collaborators::{ScoreStore, Settings};

const APP_DIR_NAME: &str = "combo-snake";
const STATS_FILE_NAME: &str = "stats.json";

/// Failures reading or writing the stats file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stats file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stats file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persisted aggregates plus settings.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub best_score: u32,
    pub total_games: u32,
    pub total_score: u64,
    pub max_level: u32,
    pub settings: Settings,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            best_score: 0,
            total_games: 0,
            total_score: 0,
            max_level: 1,
            settings: Settings::default(),
        }
    }
}

impl Stats {
    /// Rounded mean score, 0 before the first game.
    #[must_use]
    pub fn average_score(&self) -> u32 {
        if self.total_games == 0 {
            return 0;
        }

        let games = u64::from(self.total_games);
        u32::try_from((self.total_score + games / 2) / games).unwrap_or(u32::MAX)
    }

    fn update_best_score(&mut self, score: u32) -> bool {
        if score <= self.best_score {
            return false;
        }
        self.best_score = score;
        true
    }

    fn record_game(&mut self, score: u32, level: u32) {
        self.total_games += 1;
        self.total_score += u64::from(score);
        self.max_level = self.max_level.max(level);
    }
}

/// Returns the platform-correct stats file path.
#[must_use]
pub fn stats_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(STATS_FILE_NAME);
    base
}

/// JSON-file backed [`ScoreStore`]. Every change is written through; write
/// failures are logged and the in-memory values stay authoritative.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
    stats: Stats,
    muted: bool,
}

impl FileScoreStore {
    /// Loads stats from `path`.
    ///
    /// A missing file yields defaults (first run). Unreadable or malformed
    /// files return `Err` so the caller can decide to fall back.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let stats = load_stats(&path)?;
        Ok(Self {
            path,
            stats,
            muted: false,
        })
    }

    /// Like [`FileScoreStore::open`] but falls back to defaults on error.
    #[must_use]
    pub fn open_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match load_stats(&path) {
            Ok(stats) => Self {
                path,
                stats,
                muted: false,
            },
            Err(error) => {
                warn!("ignoring stats at {}: {error}", path.display());
                Self {
                    path,
                    stats: Stats::default(),
                    muted: false,
                }
            }
        }
    }

    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.stats.settings = settings;
        self.persist();
    }

    /// Reports sound as off for this session without touching the saved
    /// setting.
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Wipes every statistic and setting.
    pub fn reset(&mut self) {
        self.stats = Stats::default();
        self.persist();
    }

    fn persist(&self) {
        if let Err(error) = save_stats(&self.path, &self.stats) {
            warn!("failed to save stats to {}: {error}", self.path.display());
        }
    }
}

impl ScoreStore for FileScoreStore {
    fn best_score(&self) -> u32 {
        self.stats.best_score
    }

    fn update_best_score(&mut self, score: u32) -> bool {
        let is_record = self.stats.update_best_score(score);
        if is_record {
            self.persist();
        }
        is_record
    }

    fn record_game(&mut self, score: u32, level: u32) {
        self.stats.record_game(score, level);
        self.persist();
    }

    fn settings(&self) -> Settings {
        let mut settings = self.stats.settings.clone();
        settings.sound &= !self.muted;
        settings
    }
}

/// Volatile [`ScoreStore`] for tests and `--no-save` style sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub stats: Stats,
}

impl ScoreStore for MemoryScoreStore {
    fn best_score(&self) -> u32 {
        self.stats.best_score
    }

    fn update_best_score(&mut self, score: u32) -> bool {
        self.stats.update_best_score(score)
    }

    fn record_game(&mut self, score: u32, level: u32) {
        self.stats.record_game(score, level);
    }

    fn settings(&self) -> Settings {
        self.stats.settings.clone()
    }
}

fn load_stats(path: &Path) -> Result<Stats, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Stats::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str::<Stats>(&raw)?)
}

fn save_stats(path: &Path, stats: &Stats) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(stats)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::collaborators::ScoreStore;

    use super::{FileScoreStore, MemoryScoreStore, Stats, StoreError};

    #[test]
    fn stats_survive_reopen() {
        let path = unique_test_path("reopen");

        let mut store = FileScoreStore::open(&path).expect("fresh store should open");
        assert!(store.update_best_score(42));
        store.record_game(42, 9);

        let reopened = FileScoreStore::open(&path).expect("saved store should open");
        assert_eq!(reopened.best_score(), 42);
        assert_eq!(reopened.stats().total_games, 1);
        assert_eq!(reopened.stats().max_level, 9);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_stats_file_yields_defaults() {
        let path = unique_test_path("missing");

        let store = FileScoreStore::open(&path).expect("missing file should open");

        assert_eq!(store.stats(), &Stats::default());
    }

    #[test]
    fn malformed_stats_file_is_a_parse_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(matches!(
            FileScoreStore::open(&path),
            Err(StoreError::Parse(_))
        ));
        assert_eq!(FileScoreStore::open_or_default(&path).best_score(), 0);

        cleanup_test_path(&path);
    }

    #[test]
    fn mute_is_not_persisted() {
        let path = unique_test_path("mute");

        let mut store = FileScoreStore::open(&path).expect("fresh store should open");
        store.mute();
        assert!(!store.settings().sound);
        store.record_game(1, 1);

        let reopened = FileScoreStore::open(&path).expect("saved store should open");
        assert!(reopened.settings().sound);
        cleanup_test_path(&path);
    }

    #[test]
    fn lower_score_is_not_a_record() {
        let mut store = MemoryScoreStore::default();

        assert!(store.update_best_score(10));
        assert!(!store.update_best_score(10));
        assert!(!store.update_best_score(3));
        assert_eq!(store.best_score(), 10);
    }

    #[test]
    fn average_score_rounds() {
        let mut store = MemoryScoreStore::default();
        store.record_game(3, 1);
        store.record_game(4, 1);

        assert_eq!(store.stats.average_score(), 4);
        assert_eq!(store.stats.total_score, 7);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("combo-snake-stats-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
