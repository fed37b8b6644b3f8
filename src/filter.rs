//! Keyword-based filtering of fetched papers.

use crate::crossref::Paper;
use crate::summary::strip_markup;

/// A paper that passed keyword filtering, with the keywords that matched.
#[derive(Debug, Clone)]
pub struct FilteredPaper {
    pub paper: Paper,
    /// Matched keywords in configured order; empty only in pass-through mode
    pub matched_keywords: Vec<String>,
}

/// Filter papers by case-insensitive keyword substring match against the
/// title and the tag-stripped abstract.
///
/// All matching keywords are recorded, in the configured order. Matching is
/// plain substring containment: "cell" matches "cellular". An empty keyword
/// list passes every paper through with an empty match list.
pub fn filter_papers(papers: &[Paper], keywords: &[String]) -> Vec<FilteredPaper> {
    if keywords.is_empty() {
        return papers
            .iter()
            .map(|p| FilteredPaper {
                paper: p.clone(),
                matched_keywords: Vec::new(),
            })
            .collect();
    }

    let lowercase_keywords: Vec<String> = keywords.iter().map(|kw| kw.to_lowercase()).collect();

    papers
        .iter()
        .filter_map(|paper| {
            let title_lower = paper.title.to_lowercase();
            let abstract_lower = strip_markup(&paper.abstract_text).to_lowercase();

            let matched: Vec<String> = keywords
                .iter()
                .zip(&lowercase_keywords)
                .filter(|(_, kw_lower)| {
                    title_lower.contains(kw_lower.as_str())
                        || abstract_lower.contains(kw_lower.as_str())
                })
                .map(|(kw, _)| kw.clone())
                .collect();

            if matched.is_empty() {
                None
            } else {
                Some(FilteredPaper {
                    paper: paper.clone(),
                    matched_keywords: matched,
                })
            }
        })
        .collect()
}
