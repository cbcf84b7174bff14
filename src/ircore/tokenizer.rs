use unicode_segmentation::UnicodeSegmentation;
use serde::{Serialize, Deserialize};
use jieba_rs::Jieba;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Chinese,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

// Splits text into word tokens. Chinese text has no word delimiters and
// goes through the jieba segmenter, which is only loaded when needed.
pub struct Segmentator {
    lang: Language,
    zh_seg: Option<Jieba>,
}

impl Segmentator {
    pub fn new(lang: Language) -> Self {
        let zh_seg = match lang {
            Language::Chinese => Some(Jieba::new()),
            Language::English => None,
        };
        Segmentator { lang, zh_seg }
    }

    pub fn parse_tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match &self.zh_seg {
            None => text.unicode_words().collect(),
            Some(jieba) => jieba.cut(text, false)
                .into_iter()
                // drop punctuation and whitespace pieces
                .filter(|word| word.chars().next().map_or(false, char::is_alphanumeric))
                .collect(),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        match self.lang {
            Language::English => text.to_lowercase(),
            Language::Chinese => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        let text = "Quarrel sir! no, sir!";
        let latinseg = Segmentator::new(Language::English);
        let normalized = latinseg.normalize(text);
        let tokens = latinseg.parse_tokens(&normalized);
        assert_eq!(tokens, vec!["quarrel", "sir", "no", "sir"]);
    }

    #[test]
    fn test_parse_hyphenated_term() {
        let seg = Segmentator::new(Language::English);
        assert_eq!(seg.parse_tokens("split-pea"), vec!["split", "pea"]);
        assert!(seg.parse_tokens("--").is_empty());
    }

    #[test]
    fn test_parse_chinese() {
        let text = "滚滚长江东逝水，浪花淘尽英雄。";
        let seg = Segmentator::new(Language::Chinese);
        let normalized = seg.normalize(text);
        let tokens = seg.parse_tokens(&normalized);
        assert_eq!(tokens, vec!["滚滚", "长江", "东", "逝水", "浪花", "淘", "尽", "英雄"]);
    }
}
