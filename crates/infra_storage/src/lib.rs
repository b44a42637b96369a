//! Infrastructure Storage Layer
//!
//! Adapters behind the [`core_kernel::KeyValueStore`] port.
//!
//! - [`FileStore`] keeps every key in one JSON object on disk. A batch is
//!   written to a sibling temp file and renamed over the original, so a
//!   crash leaves either the old file or the new one.
//! - [`MemoryStore`] keeps keys in a map and is what tests inject.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_storage::FileStore;
//!
//! let store = FileStore::open("/home/me/.config/claims-portal/session.json")?;
//! store.set("role", "insurer")?;
//! ```

pub mod error;
pub mod file;
pub mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
