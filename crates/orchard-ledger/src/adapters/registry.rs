use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use orchard_core::{Address, ChannelId};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::traits::OwnershipRegistry;

/// Descriptive metadata of the channel NFT collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub name: String,
    pub symbol: String,
    /// Prefix of every token URI; the token id is appended.
    pub base_token_uri: String,
}

impl Default for CollectionMetadata {
    fn default() -> Self {
        Self {
            name: "Merkle Orchard Channel".into(),
            symbol: "ORCHARD".into(),
            base_token_uri: String::new(),
        }
    }
}

/// In-memory NFT collection used as the channel ownership substrate.
///
/// Thread-safe: uses `DashMap` so it can be shared between the ledger and
/// whoever transfers channel ownership.
pub struct InMemoryRegistry {
    metadata: CollectionMetadata,
    owners: DashMap<ChannelId, Address>,
    next_id: AtomicU64,
}

impl InMemoryRegistry {
    pub fn new(metadata: CollectionMetadata) -> Self {
        Self {
            metadata,
            owners: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// `base_token_uri ‖ token_id` for an existing token.
    pub fn token_uri(&self, token_id: ChannelId) -> Result<String, RegistryError> {
        if !self.owners.contains_key(&token_id) {
            return Err(RegistryError::NonExistentToken(token_id));
        }
        Ok(format!("{}{}", self.metadata.base_token_uri, token_id))
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new(CollectionMetadata::default())
    }
}

impl OwnershipRegistry for InMemoryRegistry {
    fn mint(&self, to: Address) -> Result<ChannelId, RegistryError> {
        let token_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.owners.insert(token_id, to);
        tracing::debug!(token_id, owner = ?to, "channel token minted");
        Ok(token_id)
    }

    fn owner_of(&self, token_id: ChannelId) -> Result<Address, RegistryError> {
        self.owners
            .get(&token_id)
            .map(|owner| *owner)
            .ok_or(RegistryError::NonExistentToken(token_id))
    }

    fn transfer(&self, from: Address, to: Address, token_id: ChannelId) -> Result<(), RegistryError> {
        let mut owner = self
            .owners
            .get_mut(&token_id)
            .ok_or(RegistryError::NonExistentToken(token_id))?;

        if *owner != from {
            return Err(RegistryError::NotTokenOwner {
                token_id,
                caller: from,
            });
        }

        *owner = to;
        tracing::info!(token_id, from = ?from, to = ?to, "channel token transferred");
        Ok(())
    }

    fn total_supply(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }

    fn balance_of(&self, owner: Address) -> u64 {
        self.owners.iter().filter(|entry| *entry.value() == owner).count() as u64
    }
}
