//! Interactive review loop for filtered papers.
//!
//! Presents each paper in turn and collects a keep/skip/quit decision. The
//! core loop is generic over input and output streams so tests can drive it
//! with in-memory buffers; [`review_papers`] wires it to stdin/stdout.

use crate::error::Result;
use crate::filter::FilteredPaper;
use crate::summary::{strip_markup, NO_ABSTRACT};
use std::io::{BufRead, Write};

/// Knobs for the review loop.
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    /// Decision taken when the operator presses Enter with no input
    pub default_keep: bool,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self { default_keep: true }
    }
}

/// One operator decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Keep,
    Skip,
    Quit,
}

/// Review papers interactively on stdin/stdout.
///
/// Returns the kept papers in their original order. Quitting drops every
/// paper not yet reviewed.
pub fn review_papers(filtered: Vec<FilteredPaper>, options: &ReviewOptions) -> Result<Vec<FilteredPaper>> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut writer = std::io::stdout();
    review_with_streams(filtered, options, &mut reader, &mut writer)
}

/// Core review loop over arbitrary streams.
pub fn review_with_streams<R: BufRead, W: Write>(
    filtered: Vec<FilteredPaper>,
    options: &ReviewOptions,
    reader: &mut R,
    writer: &mut W,
) -> Result<Vec<FilteredPaper>> {
    if filtered.is_empty() {
        return Ok(Vec::new());
    }

    let total = filtered.len();
    writeln!(writer)?;
    writeln!(writer, "=== Interactive Review Mode ===")?;
    writeln!(
        writer,
        "For each paper: y = keep, n = skip, q = quit (save what's accepted so far)"
    )?;
    writeln!(writer)?;

    let mut accepted: Vec<FilteredPaper> = Vec::new();

    for (i, fp) in filtered.into_iter().enumerate() {
        display_paper(&fp, i + 1, total, writer)?;

        let decision = prompt_decision(options, reader, writer)?;
        match decision {
            Decision::Quit => {
                writeln!(writer, "Stopped at paper {}/{}.", i + 1, total)?;
                break;
            }
            Decision::Keep => {
                accepted.push(fp);
                writeln!(writer, "  + Accepted  ({} kept so far)", accepted.len())?;
                writeln!(writer)?;
            }
            Decision::Skip => {
                writeln!(writer, "  - Skipped")?;
                writeln!(writer)?;
            }
        }
    }

    writeln!(
        writer,
        "Review complete: {}/{} paper(s) accepted",
        accepted.len(),
        total
    )?;
    Ok(accepted)
}

/// Prompt until the operator supplies a recognized decision.
fn prompt_decision<R: BufRead, W: Write>(
    options: &ReviewOptions,
    reader: &mut R,
    writer: &mut W,
) -> Result<Decision> {
    loop {
        write!(writer, "  Keep this paper? [y]/n/q > ")?;
        writer.flush()?;

        let mut line = String::new();
        // EOF counts as quit so a closed stdin cannot loop forever
        if reader.read_line(&mut line)? == 0 {
            return Ok(Decision::Quit);
        }

        match line.trim().to_lowercase().as_str() {
            "" => {
                return Ok(if options.default_keep {
                    Decision::Keep
                } else {
                    Decision::Skip
                })
            }
            "y" => return Ok(Decision::Keep),
            "n" => return Ok(Decision::Skip),
            "q" => return Ok(Decision::Quit),
            other => writeln!(writer, "  Unrecognized input: {:?}", other)?,
        }
    }
}

/// Print one paper's details for review.
fn display_paper<W: Write>(fp: &FilteredPaper, index: usize, total: usize, writer: &mut W) -> Result<()> {
    let paper = &fp.paper;

    let abstract_clean = if paper.abstract_text.is_empty() {
        NO_ABSTRACT.to_string()
    } else {
        strip_markup(&paper.abstract_text)
    };
    let keywords = if fp.matched_keywords.is_empty() {
        "—".to_string()
    } else {
        fp.matched_keywords.join(", ")
    };

    writeln!(writer, "--- Paper {}/{} ---", index, total)?;
    writeln!(writer, "  Title:     {}", paper.title)?;
    writeln!(writer, "  Journal:   {}", paper.journal_name)?;
    writeln!(
        writer,
        "  Published: {}",
        if paper.published_date.is_empty() {
            "—"
        } else {
            &paper.published_date
        }
    )?;
    writeln!(writer, "  Abstract:  {}", abstract_clean)?;
    writeln!(writer, "  Keywords:  {}", keywords)?;
    writeln!(writer, "  Link:      {}", paper.url)?;

    if !paper.authors.is_empty() {
        let mut authors = paper.authors.iter().take(5).cloned().collect::<Vec<_>>().join(", ");
        if paper.authors.len() > 5 {
            authors.push_str(&format!(" (+{} more)", paper.authors.len() - 5));
        }
        writeln!(writer, "  Authors:   {}", authors)?;
    }

    Ok(())
}
