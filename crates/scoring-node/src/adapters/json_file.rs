use async_trait::async_trait;
use cs_04_match_store::{MatchDocument, MatchRepository, RepositoryError};
use shared_types::MatchId;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// One pretty-printed JSON document per match, `<dir>/<match_id>.json`.
///
/// Writes go to a temp file which is synced and renamed over the old
/// document, so a reader never sees a torn document.
pub struct JsonFileRepository {
    dir: PathBuf,
}

fn io_error(err: std::io::Error) -> RepositoryError {
    RepositoryError::Io(err.to_string())
}

impl JsonFileRepository {
    pub async fn open<P: AsRef<Path>>(dir: P) -> Result<Self, RepositoryError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(io_error)?;
        Ok(Self { dir })
    }

    fn path(&self, match_id: MatchId) -> PathBuf {
        self.dir.join(format!("{match_id}.json"))
    }
}

#[async_trait]
impl MatchRepository for JsonFileRepository {
    async fn get(&self, match_id: MatchId) -> Result<Option<MatchDocument>, RepositoryError> {
        let bytes = match tokio::fs::read(self.path(match_id)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(err)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| RepositoryError::Codec(format!("{match_id}: {e}")))
    }

    async fn put(
        &self,
        match_id: MatchId,
        document: &MatchDocument,
    ) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| RepositoryError::Codec(e.to_string()))?;

        let path = self.path(match_id);
        let temp_path = path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(io_error)?;
        file.write_all(&bytes).await.map_err(io_error)?;
        file.sync_all().await.map_err(io_error)?;
        drop(file);
        tokio::fs::rename(&temp_path, &path).await.map_err(io_error)?;

        debug!(%match_id, version = document.state.version, seq = document.ledger_seq, "Document written");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<MatchId>, RepositoryError> {
        let mut ids = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.dir).await.map_err(io_error)?;
        while let Some(item) = dir.next_entry().await.map_err(io_error)? {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match Uuid::parse_str(stem) {
                Ok(uuid) => ids.push(MatchId(uuid)),
                Err(_) => warn!(path = %path.display(), "Ignoring unrecognised document"),
            }
        }
        ids.sort();
        Ok(ids)
    }
}
