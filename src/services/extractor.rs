// src/services/extractor.rs

//! Pager record extraction.
//!
//! Selects the tagged `div` fragments of a feed page in document order and
//! folds them into [`Record`]s. The page lists every event as
//! date, call type, message, called units, so a `called` fragment closes
//! the record opened by the preceding `date`.

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Node, Selector};

use crate::error::{AppError, Result};
use crate::models::{Fragment, FragmentKind, Record};
use crate::utils::normalize_whitespace;

/// Service turning feed markup into pager records.
pub struct Extractor {
    selector: Selector,
    date_prefix: String,
}

impl Extractor {
    /// Create an extractor that prefixes report times with `today`.
    pub fn new(today: NaiveDate) -> Result<Self> {
        let source = FragmentKind::CLASS_LABELS
            .iter()
            .map(|class| format!("div.{class}"))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            selector: Self::parse_selector(&source)?,
            date_prefix: today.format("%a %d %B %Y, ").to_string(),
        })
    }

    /// Parse markup into records, in page order.
    pub fn extract(&self, markup: &str) -> Vec<Record> {
        let document = Html::parse_document(markup);
        let fragments = self.fragments(&document);
        log::debug!("Found {} tagged fragments", fragments.len());
        self.fold(fragments)
    }

    /// Collect every recognised fragment in document order.
    pub fn fragments(&self, document: &Html) -> Vec<Fragment> {
        document
            .select(&self.selector)
            .filter_map(Self::to_fragment)
            .collect()
    }

    /// Assemble records from an ordered fragment stream.
    pub fn fold(&self, fragments: impl IntoIterator<Item = Fragment>) -> Vec<Record> {
        let mut records = Vec::new();
        let mut open: Option<PartialRecord> = None;

        for fragment in fragments {
            match fragment.kind {
                FragmentKind::Date => {
                    if let Some(previous) = open.take() {
                        records.extend(previous.finish());
                    }
                    let time = fragment.lines().collect::<Vec<_>>().join(" ");
                    open = Some(PartialRecord::new(format!("{}{}", self.date_prefix, time)));
                }
                FragmentKind::CallType(_) => match open.as_mut() {
                    Some(partial) => {
                        partial.call_type = Some(fragment.lines().collect::<Vec<_>>().join(" "))
                    }
                    None => log::debug!("Dropping call type outside a record"),
                },
                FragmentKind::Message => match open.as_mut() {
                    Some(partial) => {
                        partial.message = Some(fragment.lines().collect::<Vec<_>>().join("\n"))
                    }
                    None => log::debug!("Dropping message outside a record"),
                },
                FragmentKind::Called => match open.take() {
                    Some(mut partial) => {
                        partial.called.extend(fragment.lines().map(String::from));
                        records.extend(partial.finish());
                    }
                    None => log::debug!("Dropping called units outside a record"),
                },
            }
        }

        if let Some(partial) = open {
            records.extend(partial.finish());
        }

        records
    }

    fn to_fragment(element: ElementRef<'_>) -> Option<Fragment> {
        let kind = element
            .value()
            .classes()
            .find_map(FragmentKind::from_class)?;

        Some(Fragment {
            kind,
            text: Self::flatten_text(element),
        })
    }

    /// Concatenate text nodes, turning `<br>` into `\n` and dropping all
    /// other tags.
    fn flatten_text(element: ElementRef<'_>) -> String {
        let mut raw = String::new();
        for node in element.descendants() {
            match node.value() {
                Node::Text(text) => raw.push_str(text),
                Node::Element(el) if el.name() == "br" => raw.push('\n'),
                _ => {}
            }
        }

        raw.split('\n')
            .map(normalize_whitespace)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

/// A record under construction.
#[derive(Debug)]
struct PartialRecord {
    date: String,
    call_type: Option<String>,
    message: Option<String>,
    called: Vec<String>,
}

impl PartialRecord {
    fn new(date: String) -> Self {
        Self {
            date,
            call_type: None,
            message: None,
            called: Vec::new(),
        }
    }

    fn finish(self) -> Option<Record> {
        match (self.call_type, self.message) {
            (Some(call_type), Some(message)) => Some(Record {
                date: self.date,
                call_type,
                message,
                called: self.called,
            }),
            _ => {
                log::debug!("Dropping incomplete record dated '{}'", self.date);
                None
            }
        }
    }
}
