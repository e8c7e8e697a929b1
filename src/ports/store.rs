use crate::domain::PlayerRecord;

#[mockall::automock]
#[async_trait::async_trait]
pub trait PlayerStorePort {
    /// All stored players, in no particular order
    async fn find_all(&self) -> Result<Vec<PlayerRecord>, Error>;
    async fn find_one_by_last_name_ignore_case(
        &self,
        last_name: &str,
    ) -> Result<Option<PlayerRecord>, Error>;
    async fn save(&self, player: PlayerRecord) -> Result<PlayerRecord, Error>;
    async fn save_all(&self, players: Vec<PlayerRecord>) -> Result<Vec<PlayerRecord>, Error>;
    async fn delete(&self, player: PlayerRecord) -> Result<(), Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Another record already holds this last name
    ///
    /// Only raised by stores that enforce uniqueness themselves.
    #[error("last name {0} is already taken by another record")]
    Conflict(String),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
