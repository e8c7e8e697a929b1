use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use tracing::{error, info, warn};

use crate::{domain::PlayerRecord, ports::store::PlayerStorePort};

use super::{store_failure, Error, RankingService};

/// Remove a player and close the gap in the ranking
#[derive(Clone, Debug)]
pub struct DeletePlayerRequest {
    pub last_name: String,
}

impl<S> RankingService<S>
where
    S: PlayerStorePort,
{
    pub async fn delete(&self, last_name: &str) -> Result<(), Error> {
        info!(last_name, "invoking delete");
        let _guard = self.mutations.lock().await;

        let player = match self
            .store
            .find_one_by_last_name_ignore_case(last_name)
            .await
            .map_err(store_failure("delete"))?
        {
            Some(player) => player,
            None => {
                warn!(last_name, "could not find player to delete");
                return Err(Error::PlayerNotFound(last_name.to_string()));
            }
        };

        self.store
            .delete(player.clone())
            .await
            .map_err(store_failure("delete"))?;

        if let Err(err) = self.rerank_remaining().await {
            self.restore(player).await;
            return Err(store_failure("delete")(err));
        }

        Ok(())
    }

    async fn rerank_remaining(&self) -> Result<(), crate::ports::store::Error> {
        let players = self.store.find_all().await?;
        self.persist_ranking(players).await
    }

    /// Put back a deleted player whose removal could not be ranked
    ///
    /// The restored record keeps its old position, which is still valid for the previous set.
    async fn restore(&self, player: PlayerRecord) {
        let last_name = player.last_name.clone();
        match self.store.save(player).await {
            Ok(_) => warn!(%last_name, "restored player after failed ranking"),
            Err(err) => error!(%last_name, error = %err, "could not restore deleted player"),
        }
    }
}

impl<S> Service<DeletePlayerRequest> for RankingService<S>
where
    S: PlayerStorePort + Send + Sync + 'static,
{
    type Response = ();
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: DeletePlayerRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.delete(&req.last_name).await })
    }
}
