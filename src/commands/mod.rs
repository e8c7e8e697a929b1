use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::{
    config::RankingConfig,
    domain::{PlayerRecord, RankingCalculator},
    ports::store::{self, PlayerStorePort},
};

pub mod create_player;
pub mod delete_player;
pub mod get_all_players;
pub mod get_player;
pub mod update_player;

pub use create_player::CreatePlayerRequest;
pub use delete_player::DeletePlayerRequest;
pub use get_all_players::GetAllPlayersRequest;
pub use get_player::GetPlayerRequest;
pub use update_player::UpdatePlayerRequest;

/// Player roster with a ranking kept dense after every change
///
/// Each operation is also a [`tower::Service`] over its request type. As the service accepts
/// several request types, name the one you want when using [`tower::ServiceExt`], e.g.
/// `ServiceExt::<CreatePlayerRequest>::ready(&mut service)`, or use `oneshot(request)`.
pub struct RankingService<S> {
    store: Arc<S>,
    config: RankingConfig,
    /// Held for the whole read-recompute-write cycle of a mutation
    ///
    /// Without it, two concurrent mutations could both read the same set and the later write
    /// would discard the ranking of the earlier one.
    mutations: Arc<Mutex<()>>,
}

impl<S> RankingService<S> {
    pub fn new(store: Arc<S>, config: RankingConfig) -> Self {
        Self {
            store,
            config,
            mutations: Arc::new(Mutex::new(())),
        }
    }
}

impl<S> Clone for RankingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            mutations: self.mutations.clone(),
        }
    }
}

impl<S> RankingService<S>
where
    S: PlayerStorePort,
{
    /// Rank the full set of players and write all of them back
    async fn persist_ranking(&self, players: Vec<PlayerRecord>) -> Result<(), store::Error> {
        let ranking =
            RankingCalculator::new(players, self.config.tie_break).new_players_ranking();
        debug!(players = ranking.len(), "persisting new ranking");
        self.store.save_all(ranking).await?;
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The player store could not be read or written
    #[error("could not retrieve player data: {0}")]
    DataRetrieval(#[from] store::Error),

    #[error("player with last name {0} could not be found")]
    PlayerNotFound(String),

    #[error("player with last name {0} already exists")]
    PlayerAlreadyExists(String),
}

/// Log a store failure and turn it into [`Error::DataRetrieval`]
fn store_failure(operation: &'static str) -> impl FnOnce(store::Error) -> Error {
    move |err| {
        error!(operation, error = %err, "could not access player data");
        Error::DataRetrieval(err)
    }
}
