//! CSV and Markdown export of the accepted reading list.

use crate::error::Result;
use crate::filter::FilteredPaper;
use crate::summary::extract_summary;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// Output format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Markdown,
}

/// CSV header row
const CSV_HEADER: &[&str] = &[
    "Title", "Journal", "Published", "Summary", "Keywords", "Link", "Authors",
];

/// Resolve the output path and format.
///
/// A `.md` extension selects Markdown; anything else is exported as CSV with
/// the extension normalized to `.csv`. When no path is supplied, a
/// timestamped `results_YYYY-MM-DD_HHMMSS.csv` in the working directory is
/// generated.
pub fn resolve_output_path(output: Option<&Path>) -> (PathBuf, ExportFormat) {
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!(
            "results_{}.csv",
            Local::now().format("%Y-%m-%d_%H%M%S")
        )),
    };

    let is_markdown = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false);
    if is_markdown {
        return (path, ExportFormat::Markdown);
    }

    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        (path, ExportFormat::Csv)
    } else {
        (path.with_extension("csv"), ExportFormat::Csv)
    }
}

/// Write the accepted papers in the given format and return the path.
pub fn export_papers(
    papers: &[FilteredPaper],
    path: &Path,
    format: ExportFormat,
) -> Result<PathBuf> {
    match format {
        ExportFormat::Csv => export_csv(papers, path)?,
        ExportFormat::Markdown => export_markdown(papers, path)?,
    }
    info!(path = %path.display(), count = papers.len(), "Export complete");
    Ok(path.to_path_buf())
}

/// Export papers to a CSV file.
pub fn export_csv(papers: &[FilteredPaper], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(CSV_HEADER)?;

    for fp in papers {
        let paper = &fp.paper;
        wtr.write_record(&[
            paper.title.as_str(),
            paper.journal_name.as_str(),
            paper.published_date.as_str(),
            extract_summary(&paper.abstract_text).as_str(),
            fp.matched_keywords.join(", ").as_str(),
            paper.url.as_str(),
            paper.authors.join(", ").as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Export papers to a Markdown file with a pipe-delimited table.
pub fn export_markdown(papers: &[FilteredPaper], path: &Path) -> Result<()> {
    let today = Local::now().format("%Y-%m-%d");

    let mut lines: Vec<String> = Vec::new();
    lines.push("# Journal Club — Papers of Interest".to_string());
    lines.push(String::new());
    lines.push(format!(
        "*Generated on {} — {} paper(s) found*",
        today,
        papers.len()
    ));
    lines.push(String::new());

    if papers.is_empty() {
        lines.push("No papers matched your keywords.".to_string());
    } else {
        lines.push("| # | Title | Journal | Summary | Keywords | Link |".to_string());
        lines.push("|---|-------|---------|---------|----------|------|".to_string());

        for (i, fp) in papers.iter().enumerate() {
            let paper = &fp.paper;
            let summary = extract_summary(&paper.abstract_text);
            let keywords = if fp.matched_keywords.is_empty() {
                "—".to_string()
            } else {
                fp.matched_keywords.join(", ")
            };
            let link = if paper.url.is_empty() {
                "—".to_string()
            } else {
                format!("[Link]({})", paper.url)
            };

            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                i + 1,
                escape_pipes(&paper.title),
                escape_pipes(&paper.journal_name),
                escape_pipes(&summary),
                keywords,
                link,
            ));
        }
    }

    lines.push(String::new());
    std::fs::write(path, lines.join("\n"))?;
    Ok(())
}

/// Escape literal pipes so table cells stay aligned.
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossref::Paper;
    use tempfile::tempdir;

    fn sample_papers() -> Vec<FilteredPaper> {
        vec![
            FilteredPaper {
                paper: Paper {
                    title: "CRISPR screening in primary cells".to_string(),
                    doi: "10.1234/abc".to_string(),
                    url: "https://doi.org/10.1234/abc".to_string(),
                    abstract_text: "<jats:p>We present a screen. It worked.</jats:p>".to_string(),
                    published_date: "2026-08-01".to_string(),
                    journal_name: "Nature Methods".to_string(),
                    authors: vec!["Ada Lovelace".to_string(), "Grace Hopper".to_string()],
                },
                matched_keywords: vec!["CRISPR".to_string(), "screen".to_string()],
            },
            FilteredPaper {
                paper: Paper {
                    title: "A title | with a pipe".to_string(),
                    url: String::new(),
                    published_date: "2026-07".to_string(),
                    journal_name: "Cell".to_string(),
                    ..Default::default()
                },
                matched_keywords: vec!["pipe".to_string()],
            },
        ]
    }

    #[test]
    fn test_resolve_output_path() {
        let (path, format) = resolve_output_path(Some(Path::new("out.md")));
        assert_eq!(path, Path::new("out.md"));
        assert_eq!(format, ExportFormat::Markdown);

        let (path, format) = resolve_output_path(Some(Path::new("out.csv")));
        assert_eq!(path, Path::new("out.csv"));
        assert_eq!(format, ExportFormat::Csv);

        // Missing or foreign extensions normalize to .csv
        let (path, _) = resolve_output_path(Some(Path::new("out")));
        assert_eq!(path, Path::new("out.csv"));
        let (path, _) = resolve_output_path(Some(Path::new("out.txt")));
        assert_eq!(path, Path::new("out.csv"));
    }

    #[test]
    fn test_resolve_default_path_is_timestamped_csv() {
        let (path, format) = resolve_output_path(None);
        let name = path.to_string_lossy();
        assert!(name.starts_with("results_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(format, ExportFormat::Csv);
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out.csv");
        let papers = sample_papers();

        export_csv(&papers, &path).expect("export");

        let mut reader = csv::Reader::from_path(&path).expect("open csv");
        let headers = reader.headers().expect("headers").clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["Title", "Journal", "Published", "Summary", "Keywords", "Link", "Authors"]
        );

        let records: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().expect("records");
        assert_eq!(records.len(), 2);

        // Title, journal, published date, and link survive the round trip
        assert_eq!(&records[0][0], "CRISPR screening in primary cells");
        assert_eq!(&records[0][1], "Nature Methods");
        assert_eq!(&records[0][2], "2026-08-01");
        assert_eq!(&records[0][5], "https://doi.org/10.1234/abc");
        assert_eq!(&records[0][6], "Ada Lovelace, Grace Hopper");
        assert_eq!(&records[1][0], "A title | with a pipe");

        // Summary is derived from the abstract
        assert_eq!(&records[0][3], "We present a screen.");
        assert_eq!(&records[1][3], "No abstract available.");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out.md");
        let papers = sample_papers();

        export_markdown(&papers, &path).expect("export");
        let contents = std::fs::read_to_string(&path).expect("read");

        assert!(contents.starts_with("# Journal Club — Papers of Interest"));
        assert!(contents.contains("2 paper(s) found"));
        assert!(contents.contains("| # | Title | Journal | Summary | Keywords | Link |"));
        assert!(contents.contains(r"A title \| with a pipe"));
        assert!(contents.contains("[Link](https://doi.org/10.1234/abc)"));

        // Each data row still has exactly 6 cells despite the literal pipe
        let row = contents
            .lines()
            .find(|l| l.contains("with a pipe"))
            .expect("pipe row");
        assert_eq!(row.replace("\\|", "").matches('|').count(), 7);
    }

    #[test]
    fn test_markdown_empty_list() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("empty.md");

        export_markdown(&[], &path).expect("export");
        let contents = std::fs::read_to_string(&path).expect("read");
        assert!(contents.contains("No papers matched your keywords."));
        assert!(!contents.contains("| # |"));
    }

    #[test]
    fn test_export_papers_dispatch() {
        let dir = tempdir().expect("tempdir");
        let papers = sample_papers();

        let csv_path = dir.path().join("r.csv");
        let out = export_papers(&papers, &csv_path, ExportFormat::Csv).expect("csv");
        assert_eq!(out, csv_path);

        let md_path = dir.path().join("r.md");
        let out = export_papers(&papers, &md_path, ExportFormat::Markdown).expect("md");
        assert_eq!(out, md_path);
        assert!(md_path.exists());
    }
}
