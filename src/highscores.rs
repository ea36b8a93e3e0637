//! Best score tracking
//!
//! The best score is kept in memory and mirrored to a key-value store on
//! every improvement. Store failures are logged and otherwise ignored: the
//! game keeps playing with whatever it has in memory.

use std::collections::HashMap;
use std::fmt;

use crate::consts::HIGH_SCORE_KEY;

/// Error from a persistence backend
#[derive(Debug)]
pub enum StoreError {
    /// Backend not present (no storage on this platform, denied access)
    Unavailable,
    Io(std::io::Error),
    /// Backend holds data it cannot decode
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage unavailable"),
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
            StoreError::Corrupt(what) => write!(f, "storage corrupt: {}", what),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// String key-value persistence capability
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-lifetime store (also the fallback when nothing else exists)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parse a stored score leniently: leading whitespace, optional sign, then
/// leading decimal digits. Trailing junk is ignored. Values with no leading
/// digits, negative values and overflow all read as `None`.
pub fn parse_high_score(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: u32 = digits[..end].parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

/// Owns the best score and its store
pub struct HighScoreKeeper {
    best: u32,
    store: Box<dyn KeyValueStore>,
}

impl fmt::Debug for HighScoreKeeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighScoreKeeper")
            .field("best", &self.best)
            .finish_non_exhaustive()
    }
}

impl HighScoreKeeper {
    /// Wrap a store and read the persisted best from it
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let mut keeper = Self { best: 0, store };
        keeper.best = keeper.read_stored();
        log::info!("High score loaded: {}", keeper.best);
        keeper
    }

    #[inline]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Re-read the store. The in-memory best never goes down, so a store that
    /// lost writes cannot roll the session back.
    pub fn reload(&mut self) {
        self.best = self.best.max(self.read_stored());
    }

    /// Record a score. Returns true (and persists) if it beats the best.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            log::warn!("Failed to persist high score {}: {}", score, e);
        }
        true
    }

    fn read_stored(&self) -> u32 {
        match self.store.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => parse_high_score(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unparseable high score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("High score store unavailable: {}", e);
                0
            }
        }
    }
}
