//! Fetching a published Google Sheet as CSV.

use std::path::Path;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tracing::{info, warn};

use crate::common::error::SheetError;
use crate::sheet::table::DraftSheet;

/// Rewrite a Google Sheets edit URL into its CSV export URL.
///
/// URLs without an edit segment are returned unchanged.
pub fn export_url(public_url: &str) -> String {
    public_url
        .replace("/edit#gid=", "/export?format=csv&gid=")
        .replace("/edit?gid=", "/export?format=csv&gid=")
}

/// Download the CSV body of a sheet.
pub async fn fetch_sheet_csv(
    client: &reqwest::Client,
    public_url: &str,
    timeout: Duration,
) -> Result<String, SheetError> {
    let url = export_url(public_url);
    let fetch_err = |source| SheetError::Fetch {
        url: url.clone(),
        source,
    };

    let response = client
        .get(&url)
        .timeout(timeout)
        .send()
        .await
        .map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SheetError::Status {
            url: url.clone(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(fetch_err)
}

/// Create the exponential backoff used for sheet fetches.
/// 500ms initial, 3 retries.
fn fetch_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_times(3)
}

/// Fetch and parse the draft sheet, retrying transient failures.
pub async fn fetch_draft_sheet(public_url: &str, timeout: Duration) -> Result<DraftSheet, SheetError> {
    let client = reqwest::Client::new();

    let body = (|| fetch_sheet_csv(&client, public_url, timeout))
        .retry(fetch_backoff())
        .when(SheetError::is_transient)
        .notify(|err: &SheetError, delay: Duration| {
            warn!("Sheet fetch failed ({}), retrying in {:.1}s", err, delay.as_secs_f64());
        })
        .await?;

    info!("Fetched draft sheet ({} bytes)", body.len());
    DraftSheet::from_csv(&body)
}

/// Read a draft sheet from a local CSV export.
pub fn read_draft_sheet(path: impl AsRef<Path>) -> Result<DraftSheet, SheetError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    DraftSheet::from_csv(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url_query_gid() {
        assert_eq!(
            export_url("https://docs.google.com/spreadsheets/d/abc/edit?gid=0#gid=0"),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=0#gid=0"
        );
    }

    #[test]
    fn test_export_url_fragment_gid() {
        assert_eq!(
            export_url("https://docs.google.com/spreadsheets/d/abc/edit#gid=12"),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=12"
        );
    }

    #[test]
    fn test_export_url_passthrough() {
        let url = "https://example.com/draft.csv";
        assert_eq!(export_url(url), url);
    }

    #[test]
    fn test_status_errors_transient_only_for_server_side() {
        let server = SheetError::Status { url: String::new(), status: 503 };
        let missing = SheetError::Status { url: String::new(), status: 404 };
        assert!(server.is_transient());
        assert!(!missing.is_transient());
    }

    #[test]
    fn test_read_draft_sheet_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.csv");
        std::fs::write(
            &path,
            "Trainer,BAN,PICK 1,PICK 2,PICK 3,PICK 4,PICK 5,PICK 6\nAsh,,Pikachu,,,,,\n",
        )
        .unwrap();

        let sheet = read_draft_sheet(&path).unwrap();
        assert_eq!(sheet.rows()[0].pick(0), Some("Pikachu"));
        assert!(matches!(
            read_draft_sheet(dir.path().join("nope.csv")),
            Err(SheetError::Io { .. })
        ));
    }
}
