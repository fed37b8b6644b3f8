//! CrossRef API client for fetching recent journal papers.
//!
//! Issues cursor-paginated requests against `/journals/{issn}/works` and
//! normalizes raw work items into [`Paper`] records. A fetch failure for one
//! journal is logged and ends that journal's pagination loop; papers already
//! collected are kept and the run continues.

use crate::error::{JournalClubError, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info, warn};

/// CrossRef API base URL
pub const CROSSREF_API_BASE: &str = "https://api.crossref.org";

/// CrossRef maximum rows per page
const MAX_ROWS_PER_PAGE: usize = 100;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// A single academic paper, normalized from one CrossRef work item.
#[derive(Debug, Clone, Default)]
pub struct Paper {
    /// Title with markup stripped and whitespace collapsed
    pub title: String,
    /// DOI, possibly empty
    pub doi: String,
    /// Canonical URL (DOI link preferred over the raw URL field)
    pub url: String,
    /// Raw abstract, may contain JATS/HTML markup; stripped at display time
    pub abstract_text: String,
    /// Partial ISO-8601 date: YYYY, YYYY-MM, or YYYY-MM-DD
    pub published_date: String,
    /// Journal name from container-title, or the configured fallback
    pub journal_name: String,
    /// Author display names in upstream order
    pub authors: Vec<String>,
}

/// Client for the CrossRef REST API.
pub struct CrossrefClient {
    client: reqwest::Client,
    base_url: String,
}

impl CrossrefClient {
    /// Create a new client.
    ///
    /// When `email` is non-empty it is advertised in the User-Agent for the
    /// CrossRef polite pool. `base_url` is injectable so tests can point the
    /// client at a mock server.
    pub fn new(email: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut user_agent = String::from("JournalClubAssistant/1.0");
        if !email.is_empty() {
            user_agent.push_str(&format!(" (mailto:{})", email));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| JournalClubError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch papers published in the last `days_back` days from a journal.
    ///
    /// Returns up to `max_results` papers, most recent first. Network or
    /// HTTP-status failures end the pagination loop with a warning; partial
    /// results already collected are returned.
    pub async fn fetch_recent_papers(
        &self,
        issn: &str,
        journal_name: &str,
        days_back: u32,
        max_results: usize,
    ) -> Vec<Paper> {
        let cutoff = (chrono::Local::now() - chrono::Duration::days(days_back as i64))
            .format("%Y-%m-%d")
            .to_string();

        let url = format!("{}/journals/{}/works", self.base_url, issn);
        let rows = max_results.min(MAX_ROWS_PER_PAGE);
        let mut cursor = String::from("*");
        let mut papers: Vec<Paper> = Vec::new();

        info!(issn = issn, cutoff = %cutoff, "Fetching recent papers");

        while papers.len() < max_results {
            let page = match self.fetch_page(&url, &cutoff, rows, &cursor).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(issn = issn, error = %e, "Error fetching from CrossRef");
                    break;
                }
            };

            let item_count = page.items.len();
            debug!(issn = issn, items = item_count, "Fetched page");

            if item_count == 0 {
                break;
            }

            for item in page.items {
                if let Some(paper) = parse_work_item(item, journal_name) {
                    papers.push(paper);
                }
            }

            // Cursor-based pagination: stop when the API stops handing out a
            // cursor or returns a short page (end of results).
            match page.next_cursor {
                Some(next) if !next.is_empty() && item_count >= rows => cursor = next,
                _ => break,
            }
        }

        papers.truncate(max_results);
        info!(issn = issn, count = papers.len(), "Fetch complete");
        papers
    }

    /// Fetch and deserialize one page of works.
    async fn fetch_page(
        &self,
        url: &str,
        cutoff: &str,
        rows: usize,
        cursor: &str,
    ) -> Result<WorksMessage> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(&[
                ("filter", format!("from-pub-date:{}", cutoff).as_str()),
                ("rows", rows.to_string().as_str()),
                ("sort", "published"),
                ("order", "desc"),
                ("cursor", cursor),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JournalClubError::Api {
                code: status.as_u16() as i32,
                message: format!("CrossRef API error: {}", status),
            });
        }

        let body: WorksResponse = response.json().await?;
        Ok(body.message)
    }
}

// === CrossRef API response types ===

#[derive(Debug, Deserialize)]
struct WorksResponse {
    message: WorksMessage,
}

#[derive(Debug, Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<WorkItem>,
    #[serde(rename = "next-cursor")]
    next_cursor: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkItem {
    #[serde(rename = "DOI", default)]
    doi: String,
    #[serde(rename = "URL", default)]
    url: String,
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "abstract", default)]
    abstract_text: String,
    #[serde(default)]
    author: Vec<WorkAuthor>,
    #[serde(rename = "container-title", default)]
    container_title: Vec<String>,
    #[serde(rename = "published-print")]
    published_print: Option<WorkDate>,
    #[serde(rename = "published-online")]
    published_online: Option<WorkDate>,
    published: Option<WorkDate>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkAuthor {
    #[serde(default)]
    given: String,
    #[serde(default)]
    family: String,
}

#[derive(Debug, Deserialize)]
struct WorkDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<i32>>,
}

/// Parse one work item into a [`Paper`], or `None` when it has no title.
fn parse_work_item(item: WorkItem, fallback_journal: &str) -> Option<Paper> {
    // Title may contain markup like <i> around species names
    let raw_title = item.title.first()?;
    if raw_title.is_empty() {
        return None;
    }
    let title = TAG_RE.replace_all(raw_title, "");
    let title = WHITESPACE_RE.replace_all(&title, " ").trim().to_string();
    if title.is_empty() {
        return None;
    }

    // Prefer the DOI-derived canonical link over the raw URL field
    let url = if item.doi.is_empty() {
        item.url.clone()
    } else {
        format!("https://doi.org/{}", item.doi)
    };

    // Print date takes priority over online, then the plain published field
    let published_date = [&item.published_print, &item.published_online, &item.published]
        .into_iter()
        .flatten()
        .next()
        .and_then(|d| d.date_parts.first())
        .map(|parts| format_date_parts(parts))
        .unwrap_or_default();

    let journal_name = item
        .container_title
        .into_iter()
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_journal.to_string());

    let authors = item
        .author
        .iter()
        .filter_map(|a| match (a.given.is_empty(), a.family.is_empty()) {
            (false, false) => Some(format!("{} {}", a.given, a.family)),
            (true, false) => Some(a.family.clone()),
            _ => None,
        })
        .collect();

    Some(Paper {
        title,
        doi: item.doi,
        url,
        abstract_text: item.abstract_text,
        published_date,
        journal_name,
        authors,
    })
}

/// Format CrossRef date-parts, degrading gracefully with missing components.
fn format_date_parts(parts: &[i32]) -> String {
    match parts {
        [year, month, day, ..] => format!("{}-{:02}-{:02}", year, month, day),
        [year, month] => format!("{}-{:02}", year, month),
        [year] => year.to_string(),
        [] => String::new(),
    }
}
