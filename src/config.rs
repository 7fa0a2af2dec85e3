// src/config.rs

use crate::extract::{BaselineTargets, Layout};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One news page and the table revision it was published with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub url: String,
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_selector: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub baseline_targets: BaselineTargets,
    pub pages: Vec<PageConfig>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("parsing YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            bail!("no pages configured");
        }
        if let Some(day) = self.baseline_targets.0.iter().position(|&t| t == 0) {
            bail!("baseline target for day {} must be positive", day);
        }
        for page in &self.pages {
            url::Url::parse(&page.url).with_context(|| format!("bad page url {:?}", page.url))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
pages:
  - url: https://www.bart.gov/news/articles/2020/news20200225
    layout: grouped_percent
    row_selector: 'table[summary="Ridership during COVID-19"] tr'
  - url: https://www.bart.gov/news/articles/2023/news20230729
    layout: computed_baseline
"#;

    #[test]
    fn loads_pages_with_default_targets() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ridership.yaml");
        fs::write(&path, SAMPLE)?;

        let cfg = Config::load(&path)?;
        assert_eq!(cfg.pages.len(), 2);
        assert_eq!(cfg.pages[0].layout, Layout::GroupedPercent);
        assert!(cfg.pages[0].row_selector.is_some());
        assert_eq!(cfg.pages[1].row_selector, None);
        assert_eq!(cfg.baseline_targets, BaselineTargets::default());
        Ok(())
    }

    #[test]
    fn explicit_targets() -> Result<()> {
        let cfg = Config::from_yaml(
            "baseline_targets: [1, 2, 3, 4, 5, 6, 7]\npages:\n  - url: https://example.com/\n    layout: grouped_no_percent\n",
        )?;
        assert_eq!(cfg.baseline_targets, BaselineTargets([1, 2, 3, 4, 5, 6, 7]));
        Ok(())
    }

    #[test]
    fn bundled_config_is_valid() -> Result<()> {
        let cfg = Config::from_yaml(include_str!("../ridership.yaml"))?;
        assert!(!cfg.pages.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_invalid() {
        assert!(Config::from_yaml("pages: []").is_err());
        assert!(Config::from_yaml(
            "baseline_targets: [0, 2, 3, 4, 5, 6, 7]\npages:\n  - url: https://example.com/\n    layout: grouped_percent\n"
        )
        .is_err());
        assert!(Config::from_yaml("pages:\n  - url: https://example.com/\n    layout: five_cell\n").is_err());
        assert!(Config::from_yaml("pages:\n  - url: not a url\n    layout: grouped_percent\n").is_err());
        assert!(Config::load("/definitely/not/here.yaml").is_err());
    }
}
