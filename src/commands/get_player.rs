use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use tracing::{info, warn};

use crate::{domain::Player, ports::store::PlayerStorePort};

use super::{store_failure, Error, RankingService};

/// Look up a single player
#[derive(Clone, Debug)]
pub struct GetPlayerRequest {
    /// Matched regardless of case
    pub last_name: String,
}

impl<S> RankingService<S>
where
    S: PlayerStorePort,
{
    pub async fn get_by_last_name(&self, last_name: &str) -> Result<Player, Error> {
        info!(last_name, "invoking get_by_last_name");
        let player = self
            .store
            .find_one_by_last_name_ignore_case(last_name)
            .await
            .map_err(store_failure("get_by_last_name"))?;

        match player {
            Some(player) => Ok(player.into()),
            None => {
                warn!(last_name, "could not find player");
                Err(Error::PlayerNotFound(last_name.to_string()))
            }
        }
    }
}

impl<S> Service<GetPlayerRequest> for RankingService<S>
where
    S: PlayerStorePort + Send + Sync + 'static,
{
    type Response = Player;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: GetPlayerRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.get_by_last_name(&req.last_name).await })
    }
}
