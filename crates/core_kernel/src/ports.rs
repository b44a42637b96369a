//! Ports for durable client-side state
//!
//! The session store persists a handful of string keys (token, role, email)
//! so a restart reconstructs the same session. It talks to storage only
//! through [`KeyValueStore`], which lets tests swap in an in-memory fake.
//!
//! ```text
//! ┌──────────────────────┐
//! │     SessionStore     │  domain_session
//! └──────────┬───────────┘
//!            │ KeyValueStore
//!      ┌─────┴──────┐
//!      ▼            ▼
//!  FileStore   MemoryStore   infra_storage
//! ```

use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The backing medium could not be read or written
    #[error("Storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persisted data could not be decoded
    #[error("Corrupt storage data: {message}")]
    Corrupt {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PortError {
    /// Creates an Unavailable error wrapping its cause
    pub fn unavailable(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Corrupt error
    pub fn corrupt(message: impl Into<String>) -> Self {
        PortError::Corrupt {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }
}

/// One mutation in a storage batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    Set { key: String, value: String },
    Delete { key: String },
}

impl StorageOp {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        StorageOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        StorageOp::Delete { key: key.into() }
    }

    /// The key this operation touches
    pub fn key(&self) -> &str {
        match self {
            StorageOp::Set { key, .. } | StorageOp::Delete { key } => key,
        }
    }
}

/// Durable string key-value storage
///
/// Implementations must make [`KeyValueStore::apply`] all-or-nothing: either
/// every operation in the batch is visible afterwards or none is. The
/// default implementation applies operations one by one and is only suitable
/// for stores whose single writes cannot fail halfway.
pub trait KeyValueStore: Send + Sync {
    /// Reads a key
    fn get(&self, key: &str) -> Result<Option<String>, PortError>;

    /// Writes a key
    fn set(&self, key: &str, value: &str) -> Result<(), PortError>;

    /// Removes a key; removing an absent key is not an error
    fn delete(&self, key: &str) -> Result<(), PortError>;

    /// Applies a batch of operations
    fn apply(&self, ops: &[StorageOp]) -> Result<(), PortError> {
        for op in ops {
            match op {
                StorageOp::Set { key, value } => self.set(key, value)?,
                StorageOp::Delete { key } => self.delete(key)?,
            }
        }
        Ok(())
    }
}
