//! Historical-archive search over the Wayback Machine CDX API, streamed
//! page by page.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::mpsc;

use crate::constants;
use crate::error::ReplayError;
use crate::types::WaybackEvent;

/// Start the search and return the event stream. Fatal failures (bad URL,
/// non-success CDX status, exhausted retries) arrive as one final `Failed`
/// event; otherwise the stream ends with a `Finished` summary. Dropping the
/// receiver cancels the search.
pub fn search(url: &str) -> mpsc::Receiver<WaybackEvent> {
    let (tx, rx) = mpsc::channel(64);
    let url = url.to_string();
    tokio::spawn(async move {
        run_search(url, tx).await;
    });
    rx
}

async fn run_search(url: String, tx: mpsc::Sender<WaybackEvent>) {
    let domain = match domain_of(&url) {
        Ok(domain) => domain,
        Err(err) => {
            let _ = tx.send(WaybackEvent::Failed(err.to_string())).await;
            return;
        }
    };

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(constants::ARCHIVE_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            let _ = tx.send(WaybackEvent::Failed(err.to_string())).await;
            return;
        }
    };

    let total_pages = fetch_total_pages(&client, &domain).await;
    if tx
        .send(WaybackEvent::Progress(format!(
            "Starting Wayback Machine search for {}\nTotal pages to search: {}\n",
            domain, total_pages
        )))
        .await
        .is_err()
    {
        return;
    }

    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut found = 0usize;
    let mut page = 0usize;
    let mut retries = 0u32;

    while page < total_pages && found < constants::ARCHIVE_MAX_RESULTS {
        if tx
            .send(WaybackEvent::Progress(format!(
                "Searching page {} of {}...\n",
                page + 1,
                total_pages
            )))
            .await
            .is_err()
        {
            return;
        }

        let page_url = format!(
            "https://web.archive.org/cdx/search/cdx?url={}&matchType=domain&output=json&fl=timestamp,original,mimetype,statuscode,digest,length&collapse=urlkey&page={}&pageSize={}",
            domain, page, constants::ARCHIVE_PAGE_SIZE
        );

        let response = match client.get(&page_url).send().await {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                retries += 1;
                if retries > constants::ARCHIVE_MAX_RETRIES {
                    let _ = tx
                        .send(WaybackEvent::Failed(
                            "Request timed out too many times".to_string(),
                        ))
                        .await;
                    return;
                }
                let _ = tx
                    .send(WaybackEvent::Progress(format!(
                        "Request timed out. Waiting {} seconds before retrying...\n",
                        constants::ARCHIVE_RETRY_WAIT_SECS
                    )))
                    .await;
                tokio::time::sleep(Duration::from_secs(constants::ARCHIVE_RETRY_WAIT_SECS)).await;
                continue;
            }
            Err(err) => {
                let _ = tx
                    .send(WaybackEvent::Failed(format!(
                        "Failed to connect to Wayback Machine: {}",
                        err
                    )))
                    .await;
                return;
            }
        };

        if response.status().as_u16() == 429 {
            retries += 1;
            if retries > constants::ARCHIVE_MAX_RETRIES {
                let _ = tx
                    .send(WaybackEvent::Failed(
                        "Rate limited too many times".to_string(),
                    ))
                    .await;
                return;
            }
            let _ = tx
                .send(WaybackEvent::Progress(format!(
                    "Rate limited. Waiting {} seconds before retrying...\n",
                    constants::ARCHIVE_RETRY_WAIT_SECS
                )))
                .await;
            tokio::time::sleep(Duration::from_secs(constants::ARCHIVE_RETRY_WAIT_SECS)).await;
            continue;
        }

        if !response.status().is_success() {
            let _ = tx
                .send(WaybackEvent::Failed(format!(
                    "Failed to fetch data (Status code: {})",
                    response.status().as_u16()
                )))
                .await;
            return;
        }
        retries = 0;

        let rows: Vec<Vec<String>> = match response.json().await {
            Ok(rows) => rows,
            Err(err) => {
                let _ = tx
                    .send(WaybackEvent::Failed(format!(
                        "Failed to parse CDX response: {}",
                        err
                    )))
                    .await;
                return;
            }
        };
        // first row is the field-name header
        if rows.len() <= 1 {
            break;
        }

        for row in rows.into_iter().skip(1) {
            if row.len() != 6 || row.iter().any(|field| field.is_empty()) {
                continue;
            }
            let timestamp = &row[0];
            let original = &row[1];
            if !seen_urls.insert(original.clone()) {
                continue;
            }
            found += 1;

            let text = format_snapshot(timestamp, original, &row[2], &row[3], &row[5]);
            if tx.send(WaybackEvent::Progress(text)).await.is_err() {
                return;
            }
            if found >= constants::ARCHIVE_MAX_RESULTS {
                break;
            }
        }

        page += 1;
        tokio::time::sleep(Duration::from_secs(constants::ARCHIVE_PAGE_DELAY_SECS)).await;
    }

    let _ = tx
        .send(WaybackEvent::Finished(format!(
            "\nSearch completed. Found {} unique URLs.\n",
            found
        )))
        .await;
}

async fn fetch_total_pages(client: &reqwest::Client, domain: &str) -> usize {
    let url = format!(
        "https://web.archive.org/cdx/search/cdx?url={}&matchType=domain&output=json&showNumPages=true",
        domain
    );
    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => response
            .text()
            .await
            .ok()
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(1),
        _ => 1,
    }
}

/// Host part of the target URL; schemeless input is treated as https.
fn domain_of(url: &str) -> Result<String, ReplayError> {
    let absolute = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    reqwest::Url::parse(&absolute)
        .ok()
        .and_then(|parsed| parsed.host_str().map(String::from))
        .ok_or(ReplayError::MissingHost)
}

/// Human-readable block for one archived URL.
fn format_snapshot(
    timestamp: &str,
    original: &str,
    mimetype: &str,
    statuscode: &str,
    length: &str,
) -> String {
    let mut text = format!("\nFound URL: {}\n", original);
    match NaiveDateTime::parse_from_str(timestamp, "%Y%m%d%H%M%S") {
        Ok(date) => text.push_str(&format!(
            "First Archived: {}\n",
            date.format("%Y-%m-%d %H:%M:%S")
        )),
        Err(_) => text.push_str(&format!("Timestamp: {}\n", timestamp)),
    }
    text.push_str(&format!("Status: {}\n", statuscode));
    text.push_str(&format!("Type: {}\n", mimetype));
    let kilobytes = length.parse::<f64>().unwrap_or(0.0) / 1024.0;
    text.push_str(&format!("Size: {:.2} KB\n", kilobytes));
    text.push_str(&format!(
        "Archive Link: https://web.archive.org/web/{}/{}\n",
        timestamp, original
    ));
    text.push_str(&"-".repeat(80));
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_extraction_handles_schemeless_input() {
        assert_eq!(domain_of("https://example.com/path").unwrap(), "example.com");
        assert_eq!(domain_of("example.com").unwrap(), "example.com");
        assert_eq!(domain_of("http://sub.example.com/a?b=c").unwrap(), "sub.example.com");
    }

    #[test]
    fn snapshot_renders_cdx_timestamp_as_date() {
        let text = format_snapshot("20200114153000", "https://example.com/a", "text/html", "200", "2048");
        assert!(text.contains("Found URL: https://example.com/a"));
        assert!(text.contains("First Archived: 2020-01-14 15:30:00"));
        assert!(text.contains("Size: 2.00 KB"));
        assert!(text.contains("Archive Link: https://web.archive.org/web/20200114153000/https://example.com/a"));
    }

    #[test]
    fn snapshot_falls_back_to_raw_timestamp() {
        let text = format_snapshot("not-a-date", "https://example.com", "text/html", "200", "10");
        assert!(text.contains("Timestamp: not-a-date"));
    }
}
