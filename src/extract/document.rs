// src/extract/document.rs

use super::text::clean;
use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

/// Anything that can hand over table rows in document order, each row being
/// the trimmed text of its cells in order.
pub trait RowSource {
    fn rows(&self) -> Vec<Vec<String>>;

    /// Rows grouped by the table they belong to, tables in document order.
    /// Sources without table boundaries report a single table.
    fn tables(&self) -> Vec<Vec<Vec<String>>> {
        vec![self.rows()]
    }
}

impl RowSource for [Vec<String>] {
    fn rows(&self) -> Vec<Vec<String>> {
        self.to_vec()
    }
}

impl RowSource for Vec<Vec<String>> {
    fn rows(&self) -> Vec<Vec<String>> {
        self.clone()
    }
}

pub const DEFAULT_ROW_SELECTOR: &str = "tr";

/// A parsed page plus the selector that picks its data rows.
pub struct HtmlTable {
    doc: Html,
    rows: Selector,
}

impl HtmlTable {
    pub fn new(doc: Html, row_selector: &str) -> Result<Self> {
        let rows = Selector::parse(row_selector)
            .map_err(|e| anyhow!("invalid row selector {:?}: {:?}", row_selector, e))?;
        Ok(Self { doc, rows })
    }

    pub fn parse(html: &str, row_selector: Option<&str>) -> Result<Self> {
        Self::new(
            Html::parse_document(html),
            row_selector.unwrap_or(DEFAULT_ROW_SELECTOR),
        )
    }
}

fn cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .map(|cell| clean(&cell.text().collect::<String>()).to_string())
        .collect()
}

impl RowSource for HtmlTable {
    fn rows(&self) -> Vec<Vec<String>> {
        self.doc.select(&self.rows).map(cells).collect()
    }

    /// Consecutive matched rows sharing the nearest enclosing `<table>` form
    /// one group; rows outside any table get a group each.
    fn tables(&self) -> Vec<Vec<Vec<String>>> {
        let mut tables: Vec<(Option<ElementRef<'_>>, Vec<Vec<String>>)> = Vec::new();
        for row in self.doc.select(&self.rows) {
            let table = row
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|e| e.value().name() == "table");
            match tables.last_mut() {
                Some((id, rows)) if table.is_some() && *id == table => rows.push(cells(row)),
                _ => tables.push((table, vec![cells(row)])),
            }
        }
        tables.into_iter().map(|(_, rows)| rows).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_element_children_in_order() {
        let html = r#"<table>
            <tr><th>Date</th><th>Riders</th></tr>
            <tr>
              <td> 3/15/23 </td>
              <td><strong>350,000</strong></td>
            </tr>
        </table>"#;
        let table = HtmlTable::parse(html, None).unwrap();
        assert_eq!(
            table.rows(),
            vec![
                vec!["Date".to_string(), "Riders".to_string()],
                vec!["3/15/23".to_string(), "350,000".to_string()],
            ]
        );
    }

    #[test]
    fn selector_restricts_rows() {
        let html = r#"
            <table summary="Other"><tr><td>1/1/20</td><td>9</td><td>9%</td></tr></table>
            <table summary="Ridership during COVID-19"><tr><td>3/1/20</td><td>400,000</td><td>98%</td></tr></table>
        "#;
        let table =
            HtmlTable::parse(html, Some(r#"table[summary="Ridership during COVID-19"] tr"#)).unwrap();
        let rows = table.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "3/1/20");
    }

    #[test]
    fn rows_grouped_by_table() {
        let html = r#"
            <table><tr><td>a</td></tr><tr><td>b</td></tr></table>
            <table><tr><td>c</td></tr></table>
        "#;
        let table = HtmlTable::parse(html, None).unwrap();
        let tables = table.tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].len(), 2);
        assert_eq!(tables[1], vec![vec!["c".to_string()]]);
        assert_eq!(table.rows().len(), 3);
    }

    #[test]
    fn bad_selector_is_an_error() {
        assert!(HtmlTable::parse("<p></p>", Some("tr[")).is_err());
    }
}
