//! Manager identity resolution
//!
//! Resolves which configured manager identity held a roster slot in a given
//! year, and produces the display info (avatar, team name, real name) for an
//! identity from the season's live user profiles.

use crate::config::{LeagueConfig, ManagerConfig, ManagerStatus};
use crate::error::{Result, SettingsError};
use serde::{Deserialize, Serialize};
use sleeper_client::{LeagueUser, Roster};
use std::collections::HashMap;

const AVATAR_BASE_URL: &str = "https://sleepercdn.com/avatars/thumbs/";
const DEFAULT_AVATAR_URL: &str = "https://sleepercdn.com/images/v2/icons/player_default.webp";

/// Display info for a manager in one season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagerDisplay {
    pub avatar: String,

    /// Team name if set, else the Sleeper display name
    pub name: String,

    /// Real-life name from the league configuration
    pub real_name: String,
}

impl ManagerDisplay {
    /// Placeholder shown when a roster has no associated user that season
    pub fn unknown(real_name: &str) -> Self {
        Self {
            avatar: DEFAULT_AVATAR_URL.to_string(),
            name: "Unknown Manager".to_string(),
            real_name: real_name.to_string(),
        }
    }
}

/// Roster-slot-indexed view of the configured manager identities
#[derive(Debug, Clone)]
pub struct LeagueManagers {
    by_roster: HashMap<u64, Vec<ManagerConfig>>,
    active: Vec<u64>,
}

impl LeagueManagers {
    /// Build the resolver from league configuration
    pub fn from_config(config: &LeagueConfig) -> Self {
        let mut by_roster: HashMap<u64, Vec<ManagerConfig>> = HashMap::new();
        let mut active = Vec::new();

        for manager in &config.managers {
            by_roster.entry(manager.roster).or_default().push(manager.clone());
            if manager.status == ManagerStatus::Active {
                active.push(manager.manager_id);
            }
        }

        Self { by_roster, active }
    }

    /// Resolve the identity that held a roster slot in a given year
    pub fn resolve(&self, roster: u64, year: u16) -> Result<&ManagerConfig> {
        self.by_roster
            .get(&roster)
            .and_then(|candidates| candidates.iter().find(|m| m.years_active.contains(&year)))
            .ok_or(SettingsError::UnknownManager { roster, year })
    }

    /// Manager IDs currently marked active
    pub fn active_manager_ids(&self) -> &[u64] {
        &self.active
    }

    /// Total number of configured identities
    pub fn len(&self) -> usize {
        self.by_roster.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_roster.is_empty()
    }

    /// Display info for an identity, preferring the season's live profile
    pub fn display(
        &self,
        identity: &ManagerConfig,
        roster: &Roster,
        users: &HashMap<String, LeagueUser>,
    ) -> ManagerDisplay {
        let user = roster.owner_id.as_ref().and_then(|owner| users.get(owner));

        match user {
            Some(user) => {
                let avatar = match &user.avatar {
                    Some(avatar) => format!("{}{}", AVATAR_BASE_URL, avatar),
                    None => DEFAULT_AVATAR_URL.to_string(),
                };
                let name = user
                    .metadata
                    .team_name
                    .clone()
                    .unwrap_or_else(|| user.display_name.clone());
                ManagerDisplay { avatar, name, real_name: identity.name.clone() }
            }
            None => ManagerDisplay::unknown(&identity.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleeper_client::models::UserMetadata;

    fn config_with_handover() -> LeagueConfig {
        LeagueConfig {
            league_id: "league".to_string(),
            managers: vec![
                ManagerConfig {
                    manager_id: 1,
                    roster: 3,
                    name: "Alex".to_string(),
                    status: ManagerStatus::Inactive,
                    years_active: vec![2018, 2019],
                },
                ManagerConfig {
                    manager_id: 2,
                    roster: 3,
                    name: "Sam".to_string(),
                    status: ManagerStatus::Active,
                    years_active: vec![2020, 2021, 2022],
                },
            ],
        }
    }

    #[test]
    fn test_resolve_picks_identity_active_that_year() {
        let managers = LeagueManagers::from_config(&config_with_handover());

        assert_eq!(managers.resolve(3, 2019).unwrap().manager_id, 1);
        assert_eq!(managers.resolve(3, 2021).unwrap().manager_id, 2);
    }

    #[test]
    fn test_resolve_errors_on_uncovered_year() {
        let managers = LeagueManagers::from_config(&config_with_handover());

        match managers.resolve(3, 2017) {
            Err(SettingsError::UnknownManager { roster: 3, year: 2017 }) => {}
            other => panic!("expected UnknownManager, got {:?}", other.map(|m| m.manager_id)),
        }
    }

    #[test]
    fn test_active_manager_ids() {
        let managers = LeagueManagers::from_config(&config_with_handover());
        assert_eq!(managers.active_manager_ids(), &[2]);
    }

    #[test]
    fn test_display_prefers_team_name_then_display_name() {
        let managers = LeagueManagers::from_config(&config_with_handover());
        let identity = managers.resolve(3, 2021).unwrap().clone();

        let roster = Roster {
            roster_id: 3,
            owner_id: Some("u1".to_string()),
            settings: Default::default(),
        };

        let mut users = HashMap::new();
        users.insert(
            "u1".to_string(),
            LeagueUser {
                user_id: "u1".to_string(),
                display_name: "sam_sleeper".to_string(),
                avatar: Some("abc123".to_string()),
                metadata: UserMetadata { team_name: Some("Gridiron Gang".to_string()) },
            },
        );

        let display = managers.display(&identity, &roster, &users);
        assert_eq!(display.name, "Gridiron Gang");
        assert_eq!(display.real_name, "Sam");
        assert!(display.avatar.ends_with("abc123"));

        users.get_mut("u1").unwrap().metadata.team_name = None;
        let display = managers.display(&identity, &roster, &users);
        assert_eq!(display.name, "sam_sleeper");
    }

    #[test]
    fn test_display_falls_back_to_placeholder() {
        let managers = LeagueManagers::from_config(&config_with_handover());
        let identity = managers.resolve(3, 2021).unwrap().clone();

        let roster = Roster { roster_id: 3, owner_id: None, settings: Default::default() };
        let display = managers.display(&identity, &roster, &HashMap::new());

        assert_eq!(display.name, "Unknown Manager");
        assert_eq!(display.real_name, "Sam");
    }
}
