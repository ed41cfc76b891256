use crate::domain::document::MatchDocument;
use crate::error::RepositoryError;
use crate::ports::MatchRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::MatchId;
use std::collections::HashMap;

/// In-memory document store for tests and single-process runs.
#[derive(Default)]
pub struct InMemoryMatchRepository {
    documents: RwLock<HashMap<MatchId, MatchDocument>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn get(&self, match_id: MatchId) -> Result<Option<MatchDocument>, RepositoryError> {
        Ok(self.documents.read().get(&match_id).cloned())
    }

    async fn put(
        &self,
        match_id: MatchId,
        document: &MatchDocument,
    ) -> Result<(), RepositoryError> {
        self.documents.write().insert(match_id, document.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<MatchId>, RepositoryError> {
        let mut ids: Vec<MatchId> = self.documents.read().keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
