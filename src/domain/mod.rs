use std::cmp::Ordering;

use chrono::NaiveDate;
use uuid::Uuid;

pub mod ranking;

pub use ranking::{RankingCalculator, TieBreak};

/// Placeholder position given to a freshly created record
///
/// Larger than any real position. It is always replaced by a recompute pass before the record
/// reaches a caller.
pub const SENTINEL_POSITION: u32 = 999_999_999;

/// Player as seen by callers of the ranking service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub rank: Rank,
}

/// Position of a player in the ranking, along with the points it was computed from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rank {
    /// 1-based position, dense across all players
    pub position: u32,
    pub points: u32,
}

/// Input for creating or updating a player
///
/// There is no rank here: ranks are always computed from points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerToSave {
    pub first_name: String,
    /// Case-insensitive key of the player
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub points: u32,
}

/// Player as held by the player store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Store identifier
    ///
    /// Assigned on creation and kept across updates.
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub points: u32,
    /// Rank position, or [`SENTINEL_POSITION`] before the first recompute pass
    pub rank: u32,
}

impl PlayerRecord {
    /// New record awaiting its first ranking
    pub fn unranked(player: &PlayerToSave) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            birth_date: player.birth_date,
            points: player.points,
            rank: SENTINEL_POSITION,
        }
    }

    /// Overwrite everything but the last name, which is the key
    pub fn apply(&mut self, player: &PlayerToSave) {
        self.first_name = player.first_name.clone();
        self.birth_date = player.birth_date;
        self.points = player.points;
    }
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        Self {
            first_name: record.first_name,
            last_name: record.last_name,
            birth_date: record.birth_date,
            rank: Rank {
                position: record.rank,
                points: record.points,
            },
        }
    }
}

/// Order last names alphabetically, ignoring case
pub fn compare_last_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    fn to_save() -> PlayerToSave {
        PlayerToSave {
            first_name: "Rafael".to_string(),
            last_name: "Nadal".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1986, 6, 3).unwrap(),
            points: 5000,
        }
    }

    #[test]
    fn test_unranked_uses_sentinel() {
        let record = PlayerRecord::unranked(&to_save());

        assert_that!(record.rank).is_equal_to(SENTINEL_POSITION);
        assert_that!(record.points).is_equal_to(5000);
    }

    #[test]
    fn test_apply_keeps_key_and_id() {
        let mut record = PlayerRecord::unranked(&to_save());
        let id = record.id;
        let update = PlayerToSave {
            first_name: "Rafa".to_string(),
            last_name: "NADAL".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1986, 6, 4).unwrap(),
            points: 1200,
        };

        record.apply(&update);

        assert_that!(record.id).is_equal_to(id);
        assert_that!(record.last_name.as_str()).is_equal_to("Nadal");
        assert_that!(record.first_name.as_str()).is_equal_to("Rafa");
        assert_that!(record.points).is_equal_to(1200);
    }

    #[test]
    fn test_compare_last_names_ignores_case() {
        assert_that!(compare_last_names("nADAL", "Nadal")).is_equal_to(Ordering::Equal);
        assert_that!(compare_last_names("alcaraz", "Zverev")).is_equal_to(Ordering::Less);
        assert_that!(compare_last_names("Nadals", "nadal")).is_equal_to(Ordering::Greater);
    }

    #[test]
    fn test_into_player() {
        let mut record = PlayerRecord::unranked(&to_save());
        record.rank = 2;

        let player = Player::from(record);

        assert_that!(player.rank).is_equal_to(Rank {
            position: 2,
            points: 5000,
        });
    }
}
