//! Request archive subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (head + buffered body)
//!     → builder.rs (flatten headers/query/cookies, measure sizes)
//!     → entry.rs (ArchiveRequest, HTTP-archive request shape)
//!     → to_json() (value stored in the `request` column)
//! ```
//!
//! # Design Decisions
//! - One record per request; never cached or reused
//! - Multi-valued headers and query parameters stay flat name/value pairs
//! - `headersSize` comes from a canonical re-encoding, not the wire bytes

pub mod builder;
pub mod entry;

pub use builder::{canonical_header_block, CaptureOptions};
pub use entry::{ArchiveRequest, Cookie, NameValuePair, PostData};
