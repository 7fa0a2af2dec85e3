// src/extract/mod.rs
//
// Ridership table extraction: rows in, date → record map out. Nothing here
// performs IO and nothing here fails; unusable rows and cells are skipped.

pub mod baseline;
pub mod date_parser;
pub mod document;
pub mod record;
pub mod strategy;
pub mod text;

pub use baseline::BaselineTargets;
pub use date_parser::{parse_short_date, ShortDate};
pub use document::{HtmlTable, RowSource};
pub use record::{Record, ResultSet, PERCENT_UNPUBLISHED};
pub use strategy::{Candidate, ExtractionStrategy, Layout, PercentKind, Rejection};

use tracing::{debug, trace};

pub struct Extractor {
    strategy: Box<dyn ExtractionStrategy>,
}

impl Extractor {
    pub fn new(strategy: Box<dyn ExtractionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn for_layout(layout: Layout, targets: BaselineTargets) -> Self {
        Self::new(layout.strategy(targets))
    }

    /// All records one row yields, in cell order.
    pub fn extract_row(&self, cells: &[String], kind: PercentKind) -> Vec<(String, Record)> {
        let candidates = self.strategy.candidates(cells);
        if candidates.is_empty() && !cells.is_empty() {
            debug!(cells = cells.len(), "row skipped: width does not match layout");
        }
        candidates
            .into_iter()
            .filter_map(|c| match self.strategy.normalize(&c, kind) {
                Ok(record) => Some((c.date, record)),
                Err(why) => {
                    trace!(date = %c.date, riders = %c.riders, "{}", why);
                    None
                }
            })
            .collect()
    }

    /// Fold every row of `source`, in document order, into one result set
    /// keyed by the published date text; see [`ResultSet::iso_keyed`] for
    /// `YYYY-MM-DD` keys. Within a table, header rows announcing
    /// "% below baseline" flip how later percentages are read; each table
    /// starts out as "% of baseline".
    pub fn extract<S: RowSource + ?Sized>(&self, source: &S) -> ResultSet {
        source
            .tables()
            .iter()
            .fold(ResultSet::new(), |mut set, rows| {
                let mut kind = PercentKind::default();
                for cells in rows {
                    kind = PercentKind::from_row(cells).unwrap_or(kind);
                    set.extend(self.extract_row(cells, kind));
                }
                set
            })
    }
}
