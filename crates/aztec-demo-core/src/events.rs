use alloy::primitives::{Address, Log, B256};
use alloy::sol_types::SolEvent;
use serde::Serialize;

use crate::contracts::IZkAsset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoteEventKind {
    CreateNote,
    DestroyNote,
}

/// A note created or destroyed by a ZkAsset transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEvent {
    pub event: NoteEventKind,
    pub owner: Address,
    pub hash: B256,
}

/// Pick the `CreateNote` / `DestroyNote` events out of a receipt's logs.
///
/// Logs from other events, or that fail to decode, are skipped.
pub fn note_events(logs: &[Log]) -> Vec<NoteEvent> {
    logs.iter().filter_map(decode).collect()
}

fn decode(log: &Log) -> Option<NoteEvent> {
    match log.topics().first()? {
        t if *t == IZkAsset::CreateNote::SIGNATURE_HASH => {
            let e = IZkAsset::CreateNote::decode_log_data(&log.data).ok()?;
            Some(NoteEvent {
                event: NoteEventKind::CreateNote,
                owner: e.owner,
                hash: e.noteHash,
            })
        }
        t if *t == IZkAsset::DestroyNote::SIGNATURE_HASH => {
            let e = IZkAsset::DestroyNote::decode_log_data(&log.data).ok()?;
            Some(NoteEvent {
                event: NoteEventKind::DestroyNote,
                owner: e.owner,
                hash: e.noteHash,
            })
        }
        _ => None,
    }
}
