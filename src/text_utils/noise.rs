use crate::{anyhow, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// Default noise table as `(pattern, description)` pairs, applied in order.
///
/// Prefix patterns ending in `[^\n]*` consume the rest of their line. Prefix patterns
/// ending in a lazy `[^\n]*?` stop after the first sentence terminator followed by
/// whitespace, falling back to the end of the line. Email and phone lines run before
/// the site mentions so `support@site.in` is not cut in half first.
pub const NOISE_PATTERN_TABLE: &[(&str, &str)] = &[
    (r"https?://\S+", "bare URL"),
    (r"email[ \t]*:[^\n]*@[^\n]*\.[^\n]*", "email line"),
    (r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+", "email address"),
    (r"phone[ \t]*:[^\n]*\d{10}[^\n]*", "phone line"),
    (r"www\.\w+\.\w+", "website reference"),
    (r"download[ \t]+from[^\n]*", "download link"),
    (r"for[ \t]+more[ \t]+study[ \t]+materials?", "study material ad"),
    (r"available[ \t]+at[^\n]*", "availability note"),
    (r"for[ \t]+more[ \t]+notes[ \t]+visit[^\n]*", "notes advertisement"),
    (r"subscribe[ \t]+to[^\n]*?(?:[.!?]+(?:[ \t]+|$)|$)", "subscription ad"),
    (r"follow[ \t]+us[ \t]+on[^\n]*?(?:[.!?]+(?:[ \t]+|$)|$)", "social media ad"),
    (r"chapter\s*\d+\s*\|\s*page\s*\d+", "chapter marker"),
    (r"\bpage\s*\d+\s*of\s*\d+", "page of total marker"),
    (r"\bpage\s*:\s*\d+", "page label"),
    (r"\bpage\s*\d+", "page number"),
    (r"©[^\n]*\d{4}", "copyright notice"),
    (r"keralanotes\.com[^\n]*", "keralanotes mention"),
    (r"ktunotes\.in[^\n]*", "ktunotes mention"),
    (r"visit[ \t]+our[ \t]+website[^\n]*?(?:[.!?]+(?:[ \t]+|$)|$)", "website promotion"),
    (r"for[ \t]+latest[ \t]+updates[^\n]*?(?:[.!?]+(?:[ \t]+|$)|$)", "update notification"),
    (r"join[ \t]+our[^\n]*?(?:[.!?]+(?:[ \t]+|$)|$)", "join promotion"),
    (r"contact[ \t]+us[^\n]*?(?:[.!?]+(?:[ \t]+|$)|$)", "contact information"),
];

#[derive(Clone, Debug)]
pub struct NoisePattern {
    pub regex: Regex,
    pub description: String,
}

impl NoisePattern {
    /// Compiles `pattern` case-insensitively with `$` matching at line ends.
    pub fn new(pattern: &str, description: &str) -> Result<Self> {
        let regex = Regex::new(&format!("(?im){pattern}"))
            .map_err(|e| anyhow!("invalid noise pattern `{description}`: {e}"))?;
        Ok(Self {
            regex,
            description: description.to_owned(),
        })
    }
}

/// Ordered set of noise patterns stripped by the text cleaner.
#[derive(Clone, Debug)]
pub struct NoisePatterns {
    patterns: Vec<NoisePattern>,
}

impl Default for NoisePatterns {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_NOISE_PATTERNS.clone(),
        }
    }
}

impl NoisePatterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Appends a pattern after the existing ones.
    pub fn with_pattern(mut self, pattern: &str, description: &str) -> Result<Self> {
        self.patterns.push(NoisePattern::new(pattern, description)?);
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NoisePattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Removes every match of every pattern, one pattern at a time.
    pub fn strip(&self, text: &str) -> String {
        self.iter()
            .fold(text.to_owned(), |acc, noise| {
                noise.regex.replace_all(&acc, "").into_owned()
            })
    }

    /// First pattern that still matches somewhere in `text`.
    pub fn first_match(&self, text: &str) -> Option<&NoisePattern> {
        self.iter().find(|noise| noise.regex.is_match(text))
    }
}

lazy_static! {
    static ref DEFAULT_NOISE_PATTERNS: Vec<NoisePattern> = NOISE_PATTERN_TABLE
        .iter()
        .map(|(pattern, description)| NoisePattern::new(pattern, description).unwrap())
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(text: &str) -> String {
        NoisePatterns::default().strip(text)
    }

    #[test]
    fn test_default_table_compiles() {
        assert_eq!(NoisePatterns::default().len(), NOISE_PATTERN_TABLE.len());
    }

    #[test]
    fn test_line_patterns_stop_at_newline() {
        let text = "Download from the archive\nReal content.";
        assert_eq!(strip(text), "\nReal content.");
        let text = "Available at every campus\nSecond line.";
        assert_eq!(strip(text), "\nSecond line.");
    }

    #[test]
    fn test_clause_patterns_stop_at_sentence_end() {
        let text = "Visit our website for more! Real content here.";
        assert_eq!(strip(text), "Real content here.");
        let text = "Intro. Contact us at the office. Body text.";
        assert_eq!(strip(text), "Intro. Body text.");
        let text = "Follow us on social media";
        assert_eq!(strip(text), "");
    }

    #[test]
    fn test_page_markers() {
        assert_eq!(strip("Page 3 of 10"), "");
        assert_eq!(strip("PAGE: 12"), "");
        assert_eq!(strip("Chapter 4 | Page 17"), "");
        assert_eq!(strip("Page\n  5"), "");
        assert_eq!(strip("see homepage 3"), "see homepage 3");
    }

    #[test]
    fn test_contact_details() {
        assert_eq!(strip("Email: notes@example.com"), "");
        assert_eq!(strip("Phone: 9876543210 (office)"), "");
        assert_eq!(strip("write to jane.doe@mail.example.org today"), "write to  today");
    }

    #[test]
    fn test_urls_and_sites() {
        assert_eq!(
            strip("Read https://example.com/a?b=1 first"),
            "Read  first"
        );
        assert_eq!(strip("see www.example.com now"), "see  now");
        assert_eq!(strip("Notes from ktunotes.in semester 5"), "Notes from ");
        assert_eq!(strip("© Example Press 2021 edition"), " edition");
    }

    #[test]
    fn test_custom_pattern() {
        assert!(NoisePatterns::empty().is_empty());
        let patterns = NoisePatterns::empty()
            .with_pattern(r"scanned by \w+", "scanner signature")
            .unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns.strip("Scanned by CamScanner. Text."), ". Text.");
        assert_eq!(
            patterns.first_match("SCANNED BY x").map(|p| p.description.as_str()),
            Some("scanner signature")
        );
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let err = NoisePatterns::empty()
            .with_pattern(r"(unclosed", "broken")
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
