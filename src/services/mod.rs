//! Service layer for the notifier.
//!
//! This module contains the business logic for:
//! - Record extraction from feed markup (`Extractor`)
//! - Relevance filtering (`RelevanceFilter`)
//! - Chat delivery (`ChatSender`, `TelegramClient`)

mod extractor;
mod filter;
mod telegram;

pub use extractor::Extractor;
pub use filter::RelevanceFilter;
pub use telegram::{ChatSender, TelegramClient};
