//! # Protocol Configuration & Constants
//!
//! Every fixed value the chain depends on lives here. Changing any of the
//! hashing constants changes every block hash produced afterwards, so treat
//! them as part of the data format.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// Version of the block hashing format.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Identifiers & Digests
// ---------------------------------------------------------------------------

/// Separator placed between a book's name and its ISBN when deriving the
/// catalog identifier.
pub const BOOK_ID_SEPARATOR: &str = ",";

/// Number of digest bytes kept for a catalog identifier.
pub const BOOK_ID_BYTES: usize = 16;

/// Length of a catalog identifier once hex-encoded.
pub const BOOK_ID_HEX_LENGTH: usize = BOOK_ID_BYTES * 2;

/// Length of a hex-encoded SHA-256 block hash.
pub const BLOCK_HASH_HEX_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Position of the genesis block.
pub const GENESIS_POSITION: u64 = 0;

/// Previous-hash value carried by the genesis block. It has no predecessor.
pub const GENESIS_PREV_HASH: &str = "";

// ---------------------------------------------------------------------------
// Network Parameters
// ---------------------------------------------------------------------------

/// Default HTTP API port.
pub const DEFAULT_API_PORT: u16 = 3000;

/// Default metrics (Prometheus) port.
pub const DEFAULT_METRICS_PORT: u16 = 3001;

/// Default bind address for both listeners.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
