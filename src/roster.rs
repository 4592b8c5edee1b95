//! Static marker metadata for known runners, joined onto scraped participants.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::models::{MarkerStyle, Participant};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl RosterEntry {
    fn new(name: &str, icon: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            entries: vec![
                RosterEntry::new("Richard Bijecek", "male", "darkgreen"),
                RosterEntry::new("Karla Fejfarova", "female", "orange"),
                RosterEntry::new("Pavlina Polaskova", "female", "pink"),
                RosterEntry::new("Petr Simecek", "male", "darkpurple"),
            ],
        }
    }
}

impl Roster {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        let roster: Roster = toml::from_str(&content).context("Failed to parse roster file")?;
        info!("Loaded {} roster entries from {}", roster.entries.len(), path.display());
        Ok(roster)
    }

    /// Left join on name: runners without an entry keep the default marker
    pub fn apply(&self, participants: &mut [Participant]) {
        let by_name: HashMap<&str, &RosterEntry> = self
            .entries
            .iter()
            .map(|e| (e.name.as_str(), e))
            .collect();

        for participant in participants.iter_mut() {
            match by_name.get(participant.name.as_str()) {
                Some(entry) => {
                    participant.style = Some(MarkerStyle::new(&entry.icon, &entry.color));
                }
                None => warn!("No roster entry for {}", participant.name),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let roster = Roster::default();
        assert_eq!(roster.entries.len(), 4);
        assert_eq!(
            roster.entries[3],
            RosterEntry::new("Petr Simecek", "male", "darkpurple")
        );
    }

    #[test]
    fn test_left_join() {
        let mut participants = vec![
            Participant::new("Karla Fejfarova", "CZ", 100.0),
            Participant::new("Jan Novak", "CZ", 50.0),
        ];
        Roster::default().apply(&mut participants);

        assert_eq!(
            participants[0].style,
            Some(MarkerStyle::new("female", "orange"))
        );
        assert_eq!(participants[1].style, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        fs::write(
            &path,
            r#"
[[entries]]
name = "Jan Novak"
icon = "male"
color = "blue"
"#,
        )
        .unwrap();

        let roster = Roster::load_from_file(&path).unwrap();
        assert_eq!(
            roster.entries,
            vec![RosterEntry::new("Jan Novak", "male", "blue")]
        );
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");
        fs::write(&path, "entries = 3").unwrap();
        assert!(Roster::load_from_file(&path).is_err());
    }
}
