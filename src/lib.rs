//! # journalclub
//!
//! Journal Club Assistant - scan academic journals for recently published
//! papers via the CrossRef REST API, filter them by your keywords, review
//! the matches interactively, and export a curated reading list.
//!
//! ## Modules
//!
//! - [`config`] - YAML configuration loading
//! - [`crossref`] - CrossRef API client with cursor pagination
//! - [`filter`] - Keyword filtering
//! - [`summary`] - Abstract markup stripping and summary extraction
//! - [`review`] - Interactive keep/skip/quit review loop
//! - [`export`] - CSV and Markdown exporters
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use journalclub::crossref::{CrossrefClient, CROSSREF_API_BASE};
//! use journalclub::filter::filter_papers;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CrossrefClient::new("reader@example.org", CROSSREF_API_BASE)?;
//!     let papers = client.fetch_recent_papers("0028-0836", "Nature", 30, 100).await;
//!     let matched = filter_papers(&papers, &["crispr".to_string()]);
//!     println!("{} paper(s) matched", matched.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crossref;
pub mod error;
pub mod export;
pub mod filter;
pub mod review;
pub mod summary;

pub use error::{JournalClubError, Result};
