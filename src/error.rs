//! Error types for the scattering center properties registry.
//!
//! Every fallible query or construction reports one of these kinds at the
//! point of failure. Nothing is retried or substituted internally; the only
//! soft substitution path is nearest-match temperature resolution, which the
//! caller opts into explicitly.

use thiserror::Error;

/// Errors raised by the properties registry and database.
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// Construction data is invalid (e.g. a non-positive atomic weight ratio).
    #[error("invalid scattering center properties data: {0}")]
    InvalidData(String),

    /// The requested key is absent from the relevant map.
    ///
    /// For temperature categories this is also raised when the
    /// (file type, version) bucket holds no temperatures, even in
    /// nearest-match mode.
    #[error("{category} data properties not found: {detail}")]
    RecordNotFound {
        /// Data category that was queried.
        category: &'static str,
        /// The key tuple that failed.
        detail: String,
    },

    /// An exact-match temperature query found no record at that temperature.
    #[error("{category} data properties request cannot be satisfied: {detail}")]
    RequestNotSatisfiable {
        /// Data category that was queried.
        category: &'static str,
        /// The key tuple that failed.
        detail: String,
    },

    /// A record does not belong to the nuclide or atom it was given to.
    #[error("{category} data properties for ZAID {record} cannot be stored on {owner}")]
    ZaidMismatch {
        /// Data category of the rejected record.
        category: &'static str,
        /// ZAID reported by the record.
        record: String,
        /// ZAID of the owning properties.
        owner: String,
    },

    /// An entry with this key already exists in the database.
    #[error("duplicate database entry: {0}")]
    DuplicateEntry(String),

    /// No ZAID is registered under this alias.
    #[error("unknown properties alias '{0}'")]
    UnknownAlias(String),

    /// A ZAID string could not be parsed.
    #[error("invalid ZAID '{0}'")]
    InvalidZaid(String),

    /// Reading or writing an archive failed.
    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An archive could not be (de)serialized.
    #[error("archive format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, PropertiesError>;
