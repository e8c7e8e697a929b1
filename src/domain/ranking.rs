use std::cmp::Ordering;

use serde::Deserialize;

use super::{compare_last_names, PlayerRecord};

/// How players with equal points are ordered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Last name ascending (case-insensitive), then first name
    #[default]
    LastName,
    /// Keep the order in which the store enumerated the players
    ///
    /// This depends on the store implementation and is not stable across stores.
    StoreOrder,
}

impl TieBreak {
    fn compare(&self, a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
        match self {
            TieBreak::LastName => compare_last_names(&a.last_name, &b.last_name)
                .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase())),
            TieBreak::StoreOrder => Ordering::Equal,
        }
    }
}

/// Computes a fresh ranking over a full set of players
pub struct RankingCalculator {
    players: Vec<PlayerRecord>,
    tie_break: TieBreak,
}

impl RankingCalculator {
    pub fn new(players: Vec<PlayerRecord>, tie_break: TieBreak) -> Self {
        Self { players, tie_break }
    }

    /// All players, ordered by descending points, with positions 1..=N
    ///
    /// Every player gets a position even if it did not change, as the store only supports
    /// writing the full set back.
    pub fn new_players_ranking(mut self) -> Vec<PlayerRecord> {
        let tie_break = self.tie_break;
        // `sort_by` is stable, which `TieBreak::StoreOrder` relies on
        self.players.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| tie_break.compare(a, b))
        });

        for (index, player) in self.players.iter_mut().enumerate() {
            player.rank = index as u32 + 1;
        }

        self.players
    }
}
