use std::collections::HashSet;
use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Serialize, Deserialize};
use super::tokenizer::{Segmentator, Language};

// English stop words removed from queries
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in",
        "into", "is", "it", "no", "not", "of", "on", "or", "such", "that", "the",
        "their", "then", "there", "these", "they", "this", "to", "was", "will", "with",
    ].into_iter().collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub language: Language,
    pub stopwords: bool,
    pub stemming: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            language: Language::English,
            stopwords: true,
            stemming: false,
        }
    }
}

// Turns query text into index terms: segmentation, case folding,
// stop word removal and optional stemming.
pub struct Analyzer {
    seg: Segmentator,
    stopwords: bool,
    stemmer: Option<Stemmer>,
}

impl Analyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        let stemmer = match (config.stemming, config.language) {
            (true, Language::English) => Some(Stemmer::create(Algorithm::English)),
            _ => None,
        };
        Analyzer {
            seg: Segmentator::new(config.language),
            stopwords: config.stopwords,
            stemmer,
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords && STOPWORDS.contains(token)
    }

    // May return no term (stop words, punctuation) or several (hyphenated words).
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text_normalized = self.seg.normalize(text);
        self.seg.parse_tokens(&text_normalized)
            .into_iter()
            .filter(|token| !self.is_stopword(token))
            .map(|token| match &self.stemmer {
                Some(stemmer) => stemmer.stem(token).into_owned(),
                None => token.to_string(),
            })
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::new(&AnalyzerConfig::default())
    }
}
