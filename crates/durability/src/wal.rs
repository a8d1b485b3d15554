//! Write-ahead log
//!
//! One record per committed transaction. On-disk frame layout:
//!
//! ```text
//! +-----------+-------------+----------------+------------------------+
//! | len: u32  | crc32: u32  | hdr_crc32: u32 | payload: [u8; len]     |
//! +-----------+-------------+----------------+------------------------+
//! ```
//!
//! All header fields are little-endian. `crc32` covers the payload;
//! `hdr_crc32` covers the first eight header bytes, so a damaged length is
//! detected before it is trusted. Payloads are bincode-encoded `WalRecord`s.
//!
//! Replay stops cleanly only at an incomplete final frame (a torn write from
//! a crash mid-append): a partial header, or a verified header whose payload
//! runs past end of file. Any other damage fails the replay, so a valid
//! suffix is never discarded.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use popreg_core::{CommitId, Key, StoreError, StoreResult, Timestamp, Value};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_LEN: usize = 12;
/// Largest payload a frame may carry
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// How commits are made durable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurabilityMode {
    /// fsync after every commit
    #[default]
    Strict,
    /// Flush to the OS after every commit, no fsync
    Buffered,
    /// No WAL; data lives only in memory
    None,
}

impl DurabilityMode {
    /// Whether commits are written to a log at all
    pub fn requires_wal(&self) -> bool {
        !matches!(self, DurabilityMode::None)
    }
}

/// One committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalRecord {
    /// Commit version
    pub version: u64,
    /// Commit time
    pub timestamp: Timestamp,
    /// Committing transaction
    pub commit_id: CommitId,
    /// Keys written and their new values
    pub writes: Vec<(Key, Value)>,
}

/// Outcome of reading a log file
#[derive(Debug, Default)]
pub struct WalReplay {
    /// Records in commit order
    pub records: Vec<WalRecord>,
    /// Length of the prefix made of complete, valid frames
    pub valid_len: u64,
    /// Bytes of an incomplete trailing frame, if any
    pub torn_bytes: u64,
}

/// Append-only log writer
#[derive(Debug)]
pub struct Wal {
    writer: BufWriter<File>,
    mode: DurabilityMode,
}

impl Wal {
    /// Open (or create) a log for appending
    pub fn open(path: impl AsRef<Path>, mode: DurabilityMode) -> StoreResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| StoreError::storage(format!("open wal {}", path.display()), e))?;
        Ok(Self {
            writer: BufWriter::new(file),
            mode,
        })
    }

    /// Append one record and make it durable per the mode
    pub fn append(&mut self, record: &WalRecord) -> StoreResult<()> {
        let frame = encode_frame(record)?;
        self.writer
            .write_all(&frame)
            .map_err(|e| StoreError::storage("wal append", e))?;
        self.writer
            .flush()
            .map_err(|e| StoreError::storage("wal flush", e))?;
        if self.mode == DurabilityMode::Strict {
            self.writer
                .get_ref()
                .sync_data()
                .map_err(|e| StoreError::storage("wal sync", e))?;
        }
        Ok(())
    }

    /// Flush buffers and fsync regardless of mode
    pub fn sync(&mut self) -> StoreResult<()> {
        self.writer
            .flush()
            .map_err(|e| StoreError::storage("wal flush", e))?;
        self.writer
            .get_ref()
            .sync_all()
            .map_err(|e| StoreError::storage("wal sync", e))
    }

    /// Read every complete record of a log file
    ///
    /// A missing file replays as empty.
    pub fn replay(path: impl AsRef<Path>) -> StoreResult<WalReplay> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(WalReplay::default()),
            Err(e) => return Err(StoreError::storage(format!("read wal {}", path.display()), e)),
        };
        decode_frames(&bytes)
    }

    /// Cut a log file back to its valid prefix
    pub fn truncate(path: impl AsRef<Path>, valid_len: u64) -> StoreResult<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| StoreError::storage(format!("open wal {}", path.display()), e))?;
        file.set_len(valid_len)
            .map_err(|e| StoreError::storage("truncate wal", e))?;
        file.sync_all()
            .map_err(|e| StoreError::storage("wal sync", e))
    }
}

fn encode_frame(record: &WalRecord) -> StoreResult<Vec<u8>> {
    let payload =
        bincode::serialize(record).map_err(|e| StoreError::serialization(e.to_string()))?;
    if payload.len() > MAX_FRAME_LEN {
        return Err(StoreError::serialization(format!(
            "wal record is {} bytes, limit is {}",
            payload.len(),
            MAX_FRAME_LEN
        )));
    }
    let len = u32::try_from(payload.len())
        .map_err(|_| StoreError::serialization("wal record exceeds 4 GiB"))?;

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame
        .write_u32::<LittleEndian>(len)
        .map_err(|e| StoreError::storage("encode wal header", e))?;
    frame
        .write_u32::<LittleEndian>(crc32fast::hash(&payload))
        .map_err(|e| StoreError::storage("encode wal header", e))?;
    let header_crc = crc32fast::hash(&frame);
    frame
        .write_u32::<LittleEndian>(header_crc)
        .map_err(|e| StoreError::storage("encode wal header", e))?;
    frame.extend_from_slice(&payload);
    Ok(frame)
}

fn corrupt(offset: usize, what: impl std::fmt::Display) -> StoreError {
    StoreError::Storage {
        message: format!("wal {} at offset {}", what, offset),
        source: None,
    }
}

fn decode_frames(bytes: &[u8]) -> StoreResult<WalReplay> {
    let mut replay = WalReplay::default();
    let mut offset = 0usize;

    while offset < bytes.len() {
        let remaining = &bytes[offset..];
        if remaining.len() < HEADER_LEN {
            break;
        }
        let mut header = &remaining[..HEADER_LEN];
        let (len, crc, header_crc) = match (
            header.read_u32::<LittleEndian>(),
            header.read_u32::<LittleEndian>(),
            header.read_u32::<LittleEndian>(),
        ) {
            (Ok(len), Ok(crc), Ok(header_crc)) => (len, crc, header_crc),
            _ => return Err(corrupt(offset, "unreadable frame header")),
        };
        if crc32fast::hash(&remaining[..HEADER_LEN - 4]) != header_crc {
            return Err(corrupt(offset, "header checksum mismatch"));
        }
        let len = usize::try_from(len)
            .ok()
            .filter(|len| *len <= MAX_FRAME_LEN)
            .ok_or_else(|| corrupt(offset, format!("frame length {} out of range", len)))?;

        // Verified header, payload cut off by end of file: the torn final frame
        if remaining.len() < HEADER_LEN + len {
            break;
        }

        let payload = &remaining[HEADER_LEN..HEADER_LEN + len];
        if crc32fast::hash(payload) != crc {
            return Err(corrupt(offset, "checksum mismatch"));
        }
        let record: WalRecord = bincode::deserialize(payload)
            .map_err(|e| corrupt(offset, format!("undecodable record ({})", e)))?;
        replay.records.push(record);
        offset += HEADER_LEN + len;
    }

    replay.valid_len = offset as u64;
    replay.torn_bytes = (bytes.len() - offset) as u64;
    if replay.torn_bytes > 0 {
        tracing::warn!(
            target: "popreg::wal",
            valid_len = replay.valid_len,
            torn_bytes = replay.torn_bytes,
            "Incomplete trailing wal frame"
        );
    }
    Ok(replay)
}
