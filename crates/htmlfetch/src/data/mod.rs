//! Immutable data types for fetching.
//!
//! Response snapshots, outcomes, and configuration. Nothing in here performs
//! I/O.

pub mod head;
pub mod options;
pub mod outcome;

pub use head::ResponseHead;
pub use options::{ClientSetting, DEFAULT_MAX_REDIRECTS, FetchOptions, Timeouts};
pub use outcome::{Outcome, Unavailable};
