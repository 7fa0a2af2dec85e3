// src/fetch.rs

use crate::config::PageConfig;
use crate::extract::{BaselineTargets, Extractor, HtmlTable, ResultSet};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::task;
use tokio::time::sleep;
use tracing::{info, warn};

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// GET `url` and return the body, retrying transient failures.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(html) => return Ok(html),
                Err(e) if attempt < MAX_RETRIES => {
                    warn!(url, attempt, "reading body failed: {}", e);
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e.into()),
            },
            Ok(resp) if attempt < MAX_RETRIES => {
                warn!(url, attempt, status = %resp.status(), "retrying");
                sleep(RETRY_DELAY).await;
            }
            Ok(resp) => return Err(anyhow::anyhow!("HTTP error: {}", resp.status())),
            Err(e) if attempt < MAX_RETRIES => {
                warn!(url, attempt, "request failed: {}", e);
                sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Extract one already-fetched page. Only a bad row selector can fail.
pub fn extract_page(html: &str, page: &PageConfig, targets: BaselineTargets) -> Result<ResultSet> {
    let table = HtmlTable::parse(html, page.row_selector.as_deref())?;
    let set = Extractor::for_layout(page.layout, targets).extract(&table);
    info!(url = %page.url, layout = ?page.layout, records = set.len(), "extracted");
    Ok(set)
}

/// Fetch and extract every page concurrently; results keep configuration order.
pub async fn fetch_all(
    client: &Client,
    pages: &[PageConfig],
    targets: BaselineTargets,
) -> Result<Vec<ResultSet>> {
    let mut handles = Vec::with_capacity(pages.len());
    for page in pages {
        let client = client.clone();
        let page = page.clone();
        handles.push(task::spawn(async move {
            let html = fetch_page(&client, &page.url)
                .await
                .with_context(|| format!("fetching {}", page.url))?;
            extract_page(&html, &page, targets)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await??);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Layout;

    #[test]
    fn extract_page_honours_selector() -> Result<()> {
        let html = r#"
            <table summary="Ridership during COVID-19">
              <thead><tr><th>Date</th><th>Riders</th><th>% of Baseline</th></tr></thead>
              <tbody><tr><td>3/16/20</td><td>244,000</td><td>59%</td></tr></tbody>
            </table>
            <table><tr><td>3/17/20</td><td>1</td><td>1%</td></tr></table>
        "#;
        let page = PageConfig {
            url: "https://www.bart.gov/news/articles/2020/news20200225".into(),
            layout: Layout::GroupedPercent,
            row_selector: Some(r#"table[summary="Ridership during COVID-19"] tr"#.into()),
        };
        let set = extract_page(html, &page, BaselineTargets::default())?;
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("3/16/20").unwrap().percent_baseline, 59);
        Ok(())
    }

    #[test]
    fn extract_page_bad_selector() {
        let page = PageConfig {
            url: "https://example.com/".into(),
            layout: Layout::GroupedNoPercent,
            row_selector: Some("tr[".into()),
        };
        assert!(extract_page("<table></table>", &page, BaselineTargets::default()).is_err());
    }
}
