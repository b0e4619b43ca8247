//! Where a draft sheet comes from.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::common::error::SheetError;
use crate::config::types::Config;
use crate::sheet::fetch::{fetch_draft_sheet, read_draft_sheet};
use crate::sheet::table::DraftSheet;

/// A published sheet URL or a local CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    Url { url: String, timeout: Duration },
    File(PathBuf),
}

impl SheetSource {
    /// A local file wins over the configured URL. `None` when neither is set.
    pub fn from_config(config: &Config, sheet_file: Option<PathBuf>) -> Option<Self> {
        if let Some(path) = sheet_file {
            return Some(SheetSource::File(path));
        }
        config.sheet.draft_url.as_ref().map(|url| SheetSource::Url {
            url: url.clone(),
            timeout: Duration::from_secs(config.sheet.fetch_timeout_secs),
        })
    }

    pub async fn load(&self) -> Result<DraftSheet, SheetError> {
        match self {
            SheetSource::Url { url, timeout } => {
                debug!("Fetching draft sheet from {}", url);
                fetch_draft_sheet(url, *timeout).await
            }
            SheetSource::File(path) => {
                debug!("Reading draft sheet from {}", path.display());
                read_draft_sheet(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_wins_over_url() {
        let mut config = Config::default();
        config.sheet.draft_url = Some("https://example.com/sheet".to_string());

        assert_eq!(
            SheetSource::from_config(&config, Some(PathBuf::from("draft.csv"))),
            Some(SheetSource::File(PathBuf::from("draft.csv")))
        );
        assert!(matches!(
            SheetSource::from_config(&config, None),
            Some(SheetSource::Url { .. })
        ));
        assert!(SheetSource::from_config(&Config::default(), None).is_none());
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.csv");
        std::fs::write(
            &path,
            "Trainer,BAN,PICK 1,PICK 2,PICK 3,PICK 4,PICK 5,PICK 6\nMisty,Onix,,,,,,\n",
        )
        .unwrap();

        let sheet = SheetSource::File(path).load().await.unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.rows()[0].ban(), Some("Onix"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SheetSource::File(dir.path().join("none.csv")).load().await;
        assert!(matches!(result, Err(SheetError::Io { .. })));
    }
}
