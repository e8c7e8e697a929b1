use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use tracing::{info, warn};

use crate::{
    domain::{Player, PlayerToSave},
    ports::store::PlayerStorePort,
};

use super::{store_failure, Error, RankingService};

/// Change an existing player and re-rank everybody
#[derive(Clone, Debug)]
pub struct UpdatePlayerRequest {
    /// The last name selects the player to update and is never changed
    pub player: PlayerToSave,
}

impl<S> RankingService<S>
where
    S: PlayerStorePort,
{
    pub async fn update(&self, player: PlayerToSave) -> Result<Player, Error> {
        info!(last_name = %player.last_name, points = player.points, "invoking update");
        let _guard = self.mutations.lock().await;

        let mut existing = match self
            .store
            .find_one_by_last_name_ignore_case(&player.last_name)
            .await
            .map_err(store_failure("update"))?
        {
            Some(existing) => existing,
            None => {
                warn!(last_name = %player.last_name, "could not find player to update");
                return Err(Error::PlayerNotFound(player.last_name));
            }
        };
        existing.apply(&player);

        let mut players = self
            .store
            .find_all()
            .await
            .map_err(store_failure("update"))?;
        match players.iter_mut().find(|p| p.id == existing.id) {
            Some(stored) => *stored = existing.clone(),
            None => players.push(existing.clone()),
        }
        self.persist_ranking(players)
            .await
            .map_err(store_failure("update"))?;

        self.get_by_last_name(&existing.last_name).await
    }
}

impl<S> Service<UpdatePlayerRequest> for RankingService<S>
where
    S: PlayerStorePort + Send + Sync + 'static,
{
    type Response = Player;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: UpdatePlayerRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.update(req.player).await })
    }
}
