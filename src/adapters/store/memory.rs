use crate::{
    domain::PlayerRecord,
    ports::store::{Error, PlayerStorePort},
};
use std::{
    collections::{hash_map::Entry, HashMap},
    sync::{Arc, Mutex, PoisonError},
};

/// Player store kept in process memory
///
/// Records are keyed by their lowercased last name, so enumeration order is whatever the
/// `HashMap` gives.
#[derive(Clone, Debug)]
pub struct MemoryPlayerStore {
    players: Arc<Mutex<HashMap<String, PlayerRecord>>>,
}

fn key(last_name: &str) -> String {
    last_name.to_lowercase()
}

/// Insert or replace a record, refusing to let a different record take over a last name
fn upsert(players: &mut HashMap<String, PlayerRecord>, player: PlayerRecord) -> Result<(), Error> {
    match players.entry(key(&player.last_name)) {
        Entry::Occupied(entry) if entry.get().id != player.id => {
            Err(Error::Conflict(player.last_name))
        }
        Entry::Occupied(mut entry) => {
            entry.insert(player);
            Ok(())
        }
        Entry::Vacant(entry) => {
            entry.insert(player);
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl PlayerStorePort for MemoryPlayerStore {
    async fn find_all(&self) -> Result<Vec<PlayerRecord>, Error> {
        let players = self.players.lock()?.values().cloned().collect();

        Ok(players)
    }

    async fn find_one_by_last_name_ignore_case(
        &self,
        last_name: &str,
    ) -> Result<Option<PlayerRecord>, Error> {
        let player = self.players.lock()?.get(&key(last_name)).cloned();

        Ok(player)
    }

    async fn save(&self, player: PlayerRecord) -> Result<PlayerRecord, Error> {
        upsert(&mut *self.players.lock()?, player.clone())?;

        Ok(player)
    }

    async fn save_all(&self, players: Vec<PlayerRecord>) -> Result<Vec<PlayerRecord>, Error> {
        let mut stored = self.players.lock()?;
        // Work on a copy so that a conflict halfway through leaves the store untouched
        let mut updated = stored.clone();
        for player in players.iter().cloned() {
            upsert(&mut updated, player)?;
        }
        *stored = updated;

        Ok(players)
    }

    async fn delete(&self, player: PlayerRecord) -> Result<(), Error> {
        let mut players = self.players.lock()?;
        // Only remove the record if it is still the same player
        if let Entry::Occupied(entry) = players.entry(key(&player.last_name)) {
            if entry.get().id == player.id {
                entry.remove();
            }
        }

        Ok(())
    }
}

impl Default for MemoryPlayerStore {
    fn default() -> Self {
        Self {
            players: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
