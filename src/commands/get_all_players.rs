use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;
use tracing::info;

use crate::{
    domain::{compare_last_names, Player},
    ports::store::PlayerStorePort,
};

use super::{store_failure, Error, RankingService};

/// List every player in ranking order
#[derive(Clone, Copy, Debug, Default)]
pub struct GetAllPlayersRequest;

impl<S> RankingService<S>
where
    S: PlayerStorePort,
{
    /// All players, ordered by ascending rank position
    pub async fn get_all_players(&self) -> Result<Vec<Player>, Error> {
        info!("invoking get_all_players");
        let mut players = self
            .store
            .find_all()
            .await
            .map_err(store_failure("get_all_players"))?;

        // Last names only matter if the stored positions are not dense
        players.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| compare_last_names(&a.last_name, &b.last_name))
        });

        Ok(players.into_iter().map(Player::from).collect())
    }
}

impl<S> Service<GetAllPlayersRequest> for RankingService<S>
where
    S: PlayerStorePort + Send + Sync + 'static,
{
    type Response = Vec<Player>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: GetAllPlayersRequest) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { service.get_all_players().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::test_utils::{adapter_error, big_four, record},
        config::RankingConfig,
        ports::store::MockPlayerStorePort,
    };
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    fn last_names(players: &[Player]) -> Vec<&str> {
        players.iter().map(|p| p.last_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_call() -> Result<(), BoxError> {
        // GIVEN a store returning players in arbitrary order
        let mut store = MockPlayerStorePort::new();
        store
            .expect_find_all()
            .times(1)
            .returning(|| Ok(big_four()));
        let mut service = RankingService::new(Arc::new(store), RankingConfig::default());

        // WHEN calling the service
        let res = ServiceExt::<GetAllPlayersRequest>::ready(&mut service)
            .await?
            .call(GetAllPlayersRequest)
            .await;

        // THEN players come back in ranking order
        assert_that!(res)
            .is_ok()
            .matches(|players| last_names(players) == ["Nadal", "Djokovic", "Federer", "Murray"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_idempotent() {
        let mut store = MockPlayerStorePort::new();
        store.expect_find_all().times(2).returning(|| Ok(big_four()));
        let service = RankingService::new(Arc::new(store), RankingConfig::default());

        let first = service.get_all_players().await.unwrap();
        let second = service.get_all_players().await.unwrap();

        assert_that!(second).is_equal_to(first);
    }

    #[tokio::test]
    async fn test_shared_positions_ignore_case() {
        // GIVEN positions that were not written by a recompute pass
        let mut store = MockPlayerStorePort::new();
        store.expect_find_all().times(1).returning(|| {
            Ok(vec![
                record("Alexander", "Zverev", 100, 1),
                record("Carlos", "alcaraz", 100, 1),
                record("Rafael", "Nadal", 50, 2),
            ])
        });
        let service = RankingService::new(Arc::new(store), RankingConfig::default());

        // WHEN listing players
        let res = service.get_all_players().await;

        // THEN players sharing a position are ordered by last name, whatever the case
        assert_that!(res)
            .is_ok()
            .matches(|players| last_names(players) == ["alcaraz", "Zverev", "Nadal"]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let mut store = MockPlayerStorePort::new();
        store.expect_find_all().returning(|| Ok(Vec::new()));
        let service = RankingService::new(Arc::new(store), RankingConfig::default());

        let res = service.get_all_players().await;

        assert_that!(res).is_ok().is_empty();
    }

    #[tokio::test]
    async fn test_store_failure() {
        // GIVEN a store that cannot be reached
        let mut store = MockPlayerStorePort::new();
        store
            .expect_find_all()
            .times(1)
            .returning(|| Err(adapter_error()));
        let service = RankingService::new(Arc::new(store), RankingConfig::default());

        // WHEN listing players
        let res = service.get_all_players().await;

        // THEN a data retrieval error is returned instead of a partial list
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::DataRetrieval(_)));
        assert_that!(res.unwrap_err().to_string().as_str())
            .starts_with("could not retrieve player data");
    }
}
