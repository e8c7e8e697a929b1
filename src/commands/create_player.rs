use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use tracing::{info, warn};

use crate::{
    domain::{Player, PlayerRecord, PlayerToSave},
    ports::store::PlayerStorePort,
};

use super::{store_failure, Error, RankingService};

/// Register a new player and rank them
#[derive(Clone, Debug)]
pub struct CreatePlayerRequest {
    pub player: PlayerToSave,
}

impl<S> RankingService<S>
where
    S: PlayerStorePort,
{
    pub async fn create(&self, player: PlayerToSave) -> Result<Player, Error> {
        info!(last_name = %player.last_name, points = player.points, "invoking create");
        let _guard = self.mutations.lock().await;

        let existing = self
            .store
            .find_one_by_last_name_ignore_case(&player.last_name)
            .await
            .map_err(store_failure("create"))?;
        if existing.is_some() {
            warn!(last_name = %player.last_name, "player to create already exists");
            return Err(Error::PlayerAlreadyExists(player.last_name));
        }

        // The sentinel only lives in memory: the new record is written together with the
        // ranking that replaces it.
        let new_player = PlayerRecord::unranked(&player);
        let mut players = self
            .store
            .find_all()
            .await
            .map_err(store_failure("create"))?;
        players.push(new_player);
        self.persist_ranking(players)
            .await
            .map_err(store_failure("create"))?;

        self.get_by_last_name(&player.last_name).await
    }
}

impl<S> Service<CreatePlayerRequest> for RankingService<S>
where
    S: PlayerStorePort + Send + Sync + 'static,
{
    type Response = Player;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CreatePlayerRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.create(req.player).await })
    }
}
