//! Pipeline stages and the run entry point.
//!
//! - `render`: Rendered line block assembly
//! - `diff`: Line diff of the previous and current block
//! - `iconize`: Pictogram tagging of the delta
//! - `dispatch`: Stdout or Telegram delivery
//! - `run`: Fetch, process and deliver in one pass

pub mod diff;
pub mod dispatch;
pub mod iconize;
pub mod render;
pub mod run;

pub use diff::{DiffResult, LineOp, calculate_delta, line_diff};
pub use dispatch::{DispatchOutcome, dispatch};
pub use iconize::{Iconizer, Pictogram};
pub use render::{SEPARATOR, render, render_block};
pub use run::{Pipeline, RunReport, run_once};
