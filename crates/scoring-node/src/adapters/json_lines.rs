use async_trait::async_trait;
use cs_03_ball_ledger::{BallLedger, BallLedgerEntry, LedgerError, LedgerResult};
use shared_types::MatchId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Append-only ledger, one JSON entry per line in `<dir>/<match_id>.jsonl`.
///
/// Each append is synced before it returns. A final line without a newline
/// is a torn write from a crash and is ignored on read.
pub struct JsonLinesLedger {
    dir: PathBuf,
    /// Per-match append lock guarding the last known head of the file.
    heads: parking_lot::Mutex<HashMap<MatchId, Arc<Mutex<Option<Head>>>>>,
}

/// End of the valid part of one match's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Head {
    seq: u64,
    len: u64,
}

fn storage(err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(err.to_string())
}

impl JsonLinesLedger {
    pub async fn open<P: AsRef<Path>>(dir: P) -> LedgerResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(storage)?;
        Ok(Self {
            dir,
            heads: parking_lot::Mutex::new(HashMap::new()),
        })
    }

    fn head_cell(&self, match_id: MatchId) -> Arc<Mutex<Option<Head>>> {
        Arc::clone(self.heads.lock().entry(match_id).or_default())
    }

    fn path(&self, match_id: MatchId) -> PathBuf {
        self.dir.join(format!("{match_id}.jsonl"))
    }

    async fn read_entries(&self, match_id: MatchId) -> LedgerResult<Vec<BallLedgerEntry>> {
        Ok(self.read_log(match_id).await?.entries)
    }

    async fn read_log(&self, match_id: MatchId) -> LedgerResult<Log> {
        let text = match tokio::fs::read_to_string(self.path(match_id)).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Log::default());
            }
            Err(err) => return Err(storage(err)),
        };

        let complete = match text.rfind('\n') {
            Some(end) => &text[..=end],
            None => "",
        };
        let torn = complete.len() < text.len();
        if torn {
            warn!(%match_id, bytes = text.len() - complete.len(), "Ignoring torn ledger tail");
        }

        let entries = complete
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .map_err(|e| storage(format!("{match_id} line {}: {e}", i + 1)))
            })
            .collect::<LedgerResult<Vec<BallLedgerEntry>>>()?;

        Ok(Log {
            entries,
            valid_len: complete.len() as u64,
            torn,
        })
    }

    /// Last sequence number on disk, cutting off a torn tail so the next
    /// append starts on a fresh line.
    async fn head_from_disk(&self, match_id: MatchId) -> LedgerResult<Head> {
        let log = self.read_log(match_id).await?;
        if log.torn {
            let file = tokio::fs::OpenOptions::new()
                .write(true)
                .open(self.path(match_id))
                .await
                .map_err(storage)?;
            file.set_len(log.valid_len).await.map_err(storage)?;
            file.sync_all().await.map_err(storage)?;
        }
        Ok(Head {
            seq: log.entries.last().map_or(0, |e| e.seq),
            len: log.valid_len,
        })
    }
}

async fn write_line(file: &mut File, line: &[u8]) -> LedgerResult<()> {
    file.write_all(line).await.map_err(storage)?;
    file.sync_data().await.map_err(storage)
}

#[derive(Default)]
struct Log {
    entries: Vec<BallLedgerEntry>,
    valid_len: u64,
    torn: bool,
}

#[async_trait]
impl BallLedger for JsonLinesLedger {
    async fn append(&self, match_id: MatchId, entry: BallLedgerEntry) -> LedgerResult<()> {
        let cell = self.head_cell(match_id);
        let mut head = cell.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(match_id))
            .await
            .map_err(storage)?;
        let on_disk = file.metadata().await.map_err(storage)?.len();
        // The file changed underneath the cached head: trust the disk.
        let current = match *head {
            Some(cached) if cached.len == on_disk => cached,
            _ => self.head_from_disk(match_id).await?,
        };
        *head = Some(current);
        if entry.seq != current.seq + 1 {
            return Err(LedgerError::OutOfOrder {
                expected: current.seq + 1,
                got: entry.seq,
            });
        }

        let mut line = serde_json::to_vec(&entry).map_err(storage)?;
        line.push(b'\n');
        if let Err(err) = write_line(&mut file, &line).await {
            *head = None;
            if let Err(rollback) = file.set_len(current.len).await {
                warn!(%match_id, seq = entry.seq, error = %rollback, "Ledger rollback failed");
            }
            return Err(err);
        }

        *head = Some(Head {
            seq: entry.seq,
            len: current.len + line.len() as u64,
        });
        debug!(%match_id, seq = entry.seq, kind = %entry.kind(), "Ledger entry appended");
        Ok(())
    }

    async fn entries(&self, match_id: MatchId) -> LedgerResult<Vec<BallLedgerEntry>> {
        self.read_entries(match_id).await
    }
}
