use super::noise::NoisePatterns;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How the surviving lines are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Newlines {
    Space,
    #[default]
    Single,
}

#[derive(Clone, Debug, Default)]
pub struct TextCleaner {
    pub newlines: Newlines,
    pub remove_non_basic_ascii: bool,
    pub noise: NoisePatterns,
}

impl TextCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce_newlines_to_single_space(mut self) -> Self {
        self.newlines = Newlines::Space;
        self
    }

    pub fn reduce_newlines_to_single_newline(mut self) -> Self {
        self.newlines = Newlines::Single;
        self
    }

    pub fn remove_non_basic_ascii(mut self) -> Self {
        self.remove_non_basic_ascii = true;
        self
    }

    pub fn noise_patterns(mut self, noise: NoisePatterns) -> Self {
        self.noise = noise;
        self
    }

    /// Repeats the cleaning pass until the text stops changing, since a removal or an
    /// encoding repair can expose a new match. After the first pass every pass that
    /// changes the text makes it shorter, so the loop ends.
    ///
    /// Passes always keep one line per source line. The `Space` join happens once at
    /// the end so line-scoped patterns never see the following lines.
    pub fn run(&self, text: &str) -> String {
        let mut cleaned = self.clean_pass(text);
        loop {
            let next = self.clean_pass(&cleaned);
            if next == cleaned {
                break;
            }
            cleaned = next;
        }
        if self.newlines == Newlines::Space {
            cleaned = cleaned.replace('\n', " ");
        }
        tracing::debug!(
            original_len = text.len(),
            cleaned_len = cleaned.len(),
            "text cleaned"
        );
        cleaned
    }

    fn clean_pass(&self, text: &str) -> String {
        let mut text = normalize_whitespace(text);
        if !self.noise.is_empty() {
            text = self.noise.strip(&text);
        }
        let mut text = repair_encoding(&text);
        if self.remove_non_basic_ascii {
            text = UNWANTED_CHARS_REGEX.replace_all(&text, "").into_owned();
        }
        let text = SINGLE_SPACE_REGEX.replace_all(&text, " ");

        text.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>()
            .join("\n")
    }
}

/// Cleans `text` with the default noise table, keeping one line per source line.
pub fn normalize(text: &str) -> String {
    TextCleaner::new().run(text)
}

/// Maps line breaks to `\n`, paragraph breaks to `\n\n`, and every horizontal
/// whitespace character to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    let text = END_OF_LINE_REGEX.replace_all(text, "\n");
    let text = END_OF_PARAGRAPH_REGEX.replace_all(&text, "\n\n");
    let text = WHITE_SPACE_REGEX.replace_all(&text, " ");
    SINGLE_SPACE_REGEX.replace_all(&text, " ").into_owned()
}

/// Replaces UTF-8 punctuation that was decoded as Windows-1252.
pub fn repair_encoding(text: &str) -> String {
    ENCODING_FIXES
        .iter()
        .fold(text.to_owned(), |acc, (wrong, correct)| {
            if acc.contains(wrong) {
                acc.replace(wrong, correct)
            } else {
                acc
            }
        })
}

const ENCODING_FIXES: [(&str, &str); 6] = [
    ("â€™", "'"),
    ("â€œ", "\""),
    ("â€\u{9d}", "\""),
    ("â€\u{201d}", "-"),
    ("â€“", "-"),
    ("â€¦", "..."),
];

lazy_static! {
    //
    // Newlines
    //
    static ref END_OF_LINE_SEQUENCES: Vec<&'static str> = vec![
        r"\r\n", // Must be first to avoid matching \r
        r"\r",
        r"\v",
        r"\f",
        r"\u{2028}",
        ];
    static ref END_OF_LINE_REGEX: Regex = Regex::new(&END_OF_LINE_SEQUENCES.join("|")).unwrap();
    static ref END_OF_PARAGRAPH_REGEX: Regex = Regex::new(r"\u{2029}").unwrap();
    //
    // White space
    //
    static ref WHITE_SPACE_SEQUENCES: Vec<&'static str> = vec![
        r"\t",
        r"\u{00A0}",
        r"\u{1680}",
        r"[\u{2000}-\u{200A}]",
        r"\u{202F}",
        r"\u{205F}",
        r"\u{3000}",
        ];
    static ref WHITE_SPACE_REGEX: Regex = Regex::new(&WHITE_SPACE_SEQUENCES.join("|")).unwrap();
    static ref SINGLE_SPACE_REGEX: Regex = Regex::new(r" {2,}").unwrap();
    //
    // Unwanted characters
    //
    static ref UNWANTED_CHARS_REGEX: Regex = Regex::new(r#"[^a-zA-Z0-9.,?!:;'"\-\(\)\[\]\{\}$&@#%^*()\s]+"#).unwrap();
}
