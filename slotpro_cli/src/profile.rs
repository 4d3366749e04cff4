use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Bankroll carried between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub balance: u64,
    pub lifetime_spins: u64,
    pub lifetime_bet: u64,
    pub lifetime_won: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Missing or unreadable profiles start fresh.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str(&text).map_err(anyhow::Error::from))
        {
            Ok(profile) => profile,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable profile");
                Self::default()
            }
        }
    }

    pub fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        self.updated_at = Some(Utc::now());
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing profile {}", path.display()))?;
        Ok(())
    }

    pub fn net(&self) -> i128 {
        self.lifetime_won as i128 - self.lifetime_bet as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_profile_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let profile = Profile::load(&dir.path().join("missing.json"));
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn corrupt_profile_is_fresh() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert_eq!(Profile::load(file.path()), Profile::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut profile = Profile {
            balance: 250,
            lifetime_spins: 4,
            lifetime_bet: 40,
            lifetime_won: 90,
            updated_at: None,
        };
        profile.save(&path).unwrap();
        assert!(profile.updated_at.is_some());
        assert_eq!(Profile::load(&path), profile);
        assert_eq!(profile.net(), 50);
    }

    #[test]
    fn legacy_profile_without_timestamp() {
        let profile: Profile = serde_json::from_str(
            r#"{"balance": 10, "lifetime_spins": 1, "lifetime_bet": 5, "lifetime_won": 0}"#,
        )
        .unwrap();
        assert_eq!(profile.balance, 10);
        assert_eq!(profile.updated_at, None);
        assert_eq!(profile.net(), -5);
    }
}
