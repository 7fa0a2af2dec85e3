// src/extract/strategy.rs
//
// Per-revision row layouts. Every strategy slices a row into fixed-size cell
// groups; validation of the resulting candidates is shared.

use super::baseline::BaselineTargets;
use super::date_parser::{parse_short_date, ShortDate};
use super::record::{Record, PERCENT_UNPUBLISHED};
use super::text::{clean, parse_percent, parse_percent_below, parse_riders};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unvalidated text taken from one cell group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub date: String,
    pub riders: String,
    pub percent: Option<String>,
}

/// How a published percentage column is to be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PercentKind {
    #[default]
    OfBaseline,
    BelowBaseline,
}

impl PercentKind {
    /// Header detection: a row carrying a "% of/below baseline" caption.
    pub fn from_row(cells: &[String]) -> Option<Self> {
        cells.iter().find_map(|c| {
            let c = clean(c).to_ascii_lowercase();
            if c.starts_with("% below baseline") {
                Some(Self::BelowBaseline)
            } else if c.starts_with("% of baseline") {
                Some(Self::OfBaseline)
            } else {
                None
            }
        })
    }
}

/// Why a candidate did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Date,
    Riders,
    Percent,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self {
            Rejection::Date => "date",
            Rejection::Riders => "ridership",
            Rejection::Percent => "percent",
        };
        write!(f, "invalid {}", field)
    }
}

pub trait ExtractionStrategy: Send + Sync {
    /// Cells consumed per candidate.
    fn group_size(&self) -> usize;

    /// Turn one group of `group_size()` cells into a candidate. Missing
    /// cells read as empty text and fail validation.
    fn candidate(&self, group: &[String]) -> Candidate {
        Candidate {
            date: cell(group, 0),
            riders: cell(group, 1),
            percent: None,
        }
    }

    /// Produce the baseline percentage for an otherwise valid candidate.
    fn percent(
        &self,
        candidate: &Candidate,
        date: ShortDate,
        riders: u64,
        kind: PercentKind,
    ) -> Result<i32, Rejection>;

    /// Split a row into candidates. Rows whose width is not a multiple of the
    /// group size produce nothing.
    fn candidates(&self, cells: &[String]) -> Vec<Candidate> {
        let size = self.group_size();
        if size == 0 || cells.is_empty() || cells.len() % size != 0 {
            return Vec::new();
        }
        cells.chunks_exact(size).map(|g| self.candidate(g)).collect()
    }

    /// Validate a candidate into a record.
    fn normalize(&self, candidate: &Candidate, kind: PercentKind) -> Result<Record, Rejection> {
        let date = parse_short_date(&candidate.date).ok_or(Rejection::Date)?;
        let riders = parse_riders(&candidate.riders).ok_or(Rejection::Riders)?;
        let percent_baseline = self.percent(candidate, date, riders, kind)?;
        Ok(Record {
            date,
            riders,
            percent_baseline,
        })
    }
}

fn cell(group: &[String], i: usize) -> String {
    group.get(i).map(|c| clean(c).to_string()).unwrap_or_default()
}

/// `[date, riders, percent]` triples; percent is mandatory.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedPercent;

impl ExtractionStrategy for GroupedPercent {
    fn group_size(&self) -> usize {
        3
    }

    fn candidate(&self, group: &[String]) -> Candidate {
        Candidate {
            date: cell(group, 0),
            riders: cell(group, 1),
            percent: Some(cell(group, 2)),
        }
    }

    fn percent(
        &self,
        candidate: &Candidate,
        _date: ShortDate,
        _riders: u64,
        kind: PercentKind,
    ) -> Result<i32, Rejection> {
        let text = candidate.percent.as_deref().ok_or(Rejection::Percent)?;
        match kind {
            PercentKind::OfBaseline => parse_percent(text),
            PercentKind::BelowBaseline => parse_percent_below(text),
        }
        .ok_or(Rejection::Percent)
    }
}

/// `[date, riders]` pairs; percent is never published.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedNoPercent;

impl ExtractionStrategy for GroupedNoPercent {
    fn group_size(&self) -> usize {
        2
    }

    fn percent(&self, _: &Candidate, _: ShortDate, _: u64, _: PercentKind) -> Result<i32, Rejection> {
        Ok(PERCENT_UNPUBLISHED)
    }
}

/// `[date, riders]` pairs with the percentage derived from weekday targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputedBaseline {
    pub targets: BaselineTargets,
}

impl ExtractionStrategy for ComputedBaseline {
    fn group_size(&self) -> usize {
        2
    }

    fn percent(&self, _: &Candidate, date: ShortDate, riders: u64, _: PercentKind) -> Result<i32, Rejection> {
        let day = date.weekday().ok_or(Rejection::Date)?;
        self.targets.percent(day, riders).ok_or(Rejection::Percent)
    }
}

/// Page revision selector, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    GroupedPercent,
    GroupedNoPercent,
    ComputedBaseline,
}

impl Layout {
    pub fn strategy(self, targets: BaselineTargets) -> Box<dyn ExtractionStrategy> {
        match self {
            Layout::GroupedPercent => Box::new(GroupedPercent),
            Layout::GroupedNoPercent => Box::new(GroupedNoPercent),
            Layout::ComputedBaseline => Box::new(ComputedBaseline { targets }),
        }
    }
}

impl std::str::FromStr for Layout {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "grouped_percent" | "a" => Ok(Layout::GroupedPercent),
            "grouped_no_percent" | "b" => Ok(Layout::GroupedNoPercent),
            "computed_baseline" | "c" => Ok(Layout::ComputedBaseline),
            other => Err(anyhow::anyhow!("unknown layout {:?}", other)),
        }
    }
}
