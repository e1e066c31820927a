// src/pipeline/run.rs

//! One complete notifier run.

use std::io::Write;

use chrono::{Local, NaiveDate};

use crate::error::Result;
use crate::models::{Config, FilterConfig, RunSettings};
use crate::services::{ChatSender, Extractor, RelevanceFilter, TelegramClient};
use crate::storage::{LocalStorage, StateStorage};
use crate::utils::http;

use super::diff::calculate_delta;
use super::dispatch::{DispatchOutcome, dispatch};
use super::iconize::Iconizer;
use super::render::render_block;

/// Counters describing a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub records: usize,
    pub rendered_lines: usize,
    pub delta_lines: usize,
    pub report_count: usize,
    pub outcome: DispatchOutcome,
}

/// The compiled processing stages of a run.
pub struct Pipeline {
    extractor: Extractor,
    filter: RelevanceFilter,
    iconizer: Iconizer,
}

impl Pipeline {
    /// Build the stages for the given filter rules and calendar date.
    pub fn new(filter: &FilterConfig, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new(today)?,
            filter: RelevanceFilter::from_config(filter)?,
            iconizer: Iconizer::new()?,
        })
    }

    /// Build the stages using the local calendar date.
    pub fn for_today(filter: &FilterConfig) -> Result<Self> {
        Self::new(filter, Local::now().date_naive())
    }

    /// Process fetched markup against the stored state and deliver the result.
    pub async fn process<W: Write>(
        &self,
        markup: &str,
        settings: &RunSettings,
        storage: &dyn StateStorage,
        sender: &dyn ChatSender,
        out: &mut W,
    ) -> Result<RunReport> {
        let records = self.extractor.extract(markup);
        log::info!("Extracted {} records", records.len());

        let block = render_block(&records, settings.lines, &self.filter)?;

        storage.ensure().await?;
        storage.write_current(&block).await?;

        let previous = storage.read_previous().await?;
        let current = storage.read_current().await?;
        let diff = calculate_delta(&previous, &current);
        if diff.has_changes() {
            log::debug!("Diff: {} added, {} removed", diff.added, diff.removed);
        } else {
            log::debug!("Diff: block unchanged since the last run");
        }

        storage.write_delta(&diff.delta).await?;
        storage.promote_current().await?;

        let delta = storage.read_delta().await?;
        let notification = self.iconizer.iconize(&delta);
        let outcome = dispatch(&notification, settings.telegram, sender, out).await?;

        Ok(RunReport {
            records: records.len(),
            rendered_lines: block.len(),
            delta_lines: delta.len(),
            report_count: notification.report_count,
            outcome,
        })
    }
}

/// Run the notifier once: fetch, process and deliver.
pub async fn run_once(config: &Config, settings: &RunSettings) -> Result<RunReport> {
    let client = http::create_client(&config.http)?;

    log::info!("Fetching {}", settings.url);
    let markup = http::fetch_markup(&client, &settings.url).await?;

    let pipeline = Pipeline::for_today(&config.filter)?;
    let storage = LocalStorage::new(&settings.state_dir);
    let sender = TelegramClient::new(
        client,
        &config.http.telegram_api,
        &settings.token,
        &settings.chat_id,
    );

    let mut stdout = std::io::stdout().lock();
    pipeline
        .process(&markup, settings, &storage, &sender, &mut stdout)
        .await
}
