//! Storage abstractions for run-to-run state.
//!
//! Three newline-delimited text files carry state between runs:
//!
//! ```text
//! {state_dir}/
//! ├── p2000.new     # Rendered block of this run
//! ├── p2000.old     # Rendered block of the previous run
//! └── p2000.diff    # Last computed delta
//! ```
//!
//! Every run rewrites `p2000.new`, diffs it against `p2000.old`, then
//! replaces `p2000.old` with the content of `p2000.new`.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for state storage backends.
#[async_trait]
pub trait StateStorage: Send + Sync {
    /// Create any missing state file empty. Existing files are left alone.
    async fn ensure(&self) -> Result<()>;

    /// Replace the current block.
    async fn write_current(&self, lines: &[String]) -> Result<()>;

    /// Load the current block.
    async fn read_current(&self) -> Result<Vec<String>>;

    /// Load the previous run's block.
    async fn read_previous(&self) -> Result<Vec<String>>;

    /// Replace the stored delta.
    async fn write_delta(&self, lines: &[String]) -> Result<()>;

    /// Load the stored delta.
    async fn read_delta(&self) -> Result<Vec<String>>;

    /// Overwrite the previous block with the current one.
    async fn promote_current(&self) -> Result<()>;
}
