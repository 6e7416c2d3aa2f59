use regex::Regex;

/// Points for a keyword appearing as a whole token.
const WHOLE_WORD_POINTS: u32 = 2;
/// Points for a keyword appearing only inside a longer token.
const SUBSTRING_POINTS: u32 = 1;

/// Outcome of scoring one keyword list against one piece of content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordScore {
    pub score: u32,
    /// Normalized keywords that matched, in keyword-list order.
    pub matched: Vec<String>,
}

/// Lowercase, trim, and collapse internal whitespace runs.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-token match: the keyword appears bounded by word boundaries.
fn whole_word_match(content: &str, keyword: &str) -> bool {
    Regex::new(&format!(r"\b{}\b", regex::escape(keyword)))
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}

/// Score `keywords` against `content`.
///
/// A whole-token match is worth 2 points, a substring-only match 1; keywords
/// that match either way are recorded once. Empty inputs score 0.
#[must_use]
pub fn score_keywords(content: &str, keywords: &[String]) -> KeywordScore {
    let content = normalize(content);
    let mut result = KeywordScore::default();
    if content.is_empty() {
        return result;
    }

    for keyword in keywords {
        let keyword = normalize(keyword);
        if keyword.is_empty() {
            continue;
        }
        if whole_word_match(&content, &keyword) {
            result.score += WHOLE_WORD_POINTS;
            result.matched.push(keyword);
        } else if content.contains(&keyword) {
            result.score += SUBSTRING_POINTS;
            result.matched.push(keyword);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn whole_word_beats_substring() {
        let kw = keywords(&["pipe"]);
        let whole = score_keywords("i need a pipe today", &kw);
        let partial = score_keywords("check the pipeline", &kw);
        assert_eq!(whole.score, 2);
        assert_eq!(partial.score, 1);
        assert_eq!(whole.matched, vec!["pipe"]);
        assert_eq!(partial.matched, vec!["pipe"]);
    }

    #[test]
    fn case_insensitive() {
        let kw = keywords(&["Steel Pipes"]);
        let lower = score_keywords("quotation for steel pipes", &kw);
        let upper = score_keywords("QUOTATION FOR STEEL PIPES", &kw);
        assert_eq!(lower, upper);
        assert_eq!(lower.score, 2);
    }

    #[test]
    fn whitespace_runs_collapse() {
        let kw = keywords(&["steel   pipes"]);
        let scored = score_keywords("  steel \t pipes  ", &kw);
        assert_eq!(scored.score, 2);
        assert_eq!(scored.matched, vec!["steel pipes"]);
    }

    #[test]
    fn zero_floor() {
        assert_eq!(score_keywords("anything at all", &[]), KeywordScore::default());
        assert_eq!(score_keywords("", &keywords(&["pipe"])), KeywordScore::default());
        assert_eq!(
            score_keywords("no match here", &keywords(&["", "   "])),
            KeywordScore::default()
        );
    }

    #[test]
    fn unmatched_keywords_are_not_recorded() {
        let scored = score_keywords("steel rods", &keywords(&["steel", "pipes"]));
        assert_eq!(scored.score, 2);
        assert_eq!(scored.matched, vec!["steel"]);
    }

    #[test]
    fn scores_accumulate_across_keywords() {
        let scored = score_keywords(
            "steel pipes and steelworks",
            &keywords(&["steel", "pipes", "works"]),
        );
        // steel: whole word; pipes: whole word; works: substring of steelworks.
        assert_eq!(scored.score, 5);
        assert_eq!(scored.matched, vec!["steel", "pipes", "works"]);
    }
}
