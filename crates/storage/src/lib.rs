#![forbid(unsafe_code)]

pub mod flag_codec;
pub mod repository;
pub mod sqlite;

pub use flag_codec::{decode_flags, encode_flags};
pub use repository::{InMemoryRepository, ProgressRepository, Storage, StorageError, StorageKey};
