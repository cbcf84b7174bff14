pub mod bm25;
pub mod lmd;

use serde::{Serialize, Deserialize};
use crate::ircore::DocId;
use crate::ircore::error::EvalError;
use crate::ircore::index::IndexReader;
use bm25::Bm25Params;
use lmd::LmParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocScore {
    pub docid: DocId,
    pub score: f64,
}

// Process-wide scoring policy for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetrievalModel {
    // every match scores 1.0
    UnrankedBoolean,
    // match score is the term frequency
    RankedBoolean,
    Bm25(Bm25Params),
    // Indri: Dirichlet and Jelinek-Mercer smoothed language model
    Indri(LmParams),
}

impl RetrievalModel {
    // Resolves a model name with default parameters
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "unrankedboolean" => Some(RetrievalModel::UnrankedBoolean),
            "rankedboolean" => Some(RetrievalModel::RankedBoolean),
            "bm25" => Some(RetrievalModel::Bm25(Bm25Params::default())),
            "indri" => Some(RetrievalModel::Indri(LmParams::default())),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RetrievalModel::UnrankedBoolean => "UnrankedBoolean",
            RetrievalModel::RankedBoolean => "RankedBoolean",
            RetrievalModel::Bm25(_) => "BM25",
            RetrievalModel::Indri(_) => "Indri",
        }
    }

    // models that give documents missing from an argument a non-zero score
    pub fn is_smoothed(&self) -> bool {
        matches!(self, RetrievalModel::Indri(_))
    }
}

// Score of a document absent from a score list. Under the Indri model
// every argument of #AND, #OR and #SUM contributes a smoothed estimate
// for documents it did not match, so the default is kept as a small
// expression over the collection statistics of the underlying terms.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultScore {
    Zero,
    // smoothed estimate of a term (or #SYN / #NEAR result) in `field`
    Smoothed { field: String, p_mle: f64 },
    GeometricMean(Vec<DefaultScore>),
    Union(Vec<DefaultScore>),
    Sum(Vec<DefaultScore>),
}

impl DefaultScore {
    pub fn at(&self, model: &RetrievalModel, index: &dyn IndexReader, docid: DocId) -> Result<f64, EvalError> {
        match self {
            DefaultScore::Zero => Ok(0.0),
            DefaultScore::Smoothed { field, p_mle } => match model {
                RetrievalModel::Indri(params) => {
                    let length = index.document_length(field, docid)
                        .ok_or_else(|| EvalError::MissingDocumentLength { field: field.clone(), docid })?;
                    Ok(lmd::default_score(params, *p_mle, length))
                }
                _ => Ok(0.0),
            },
            DefaultScore::GeometricMean(args) => {
                let scores = DefaultScore::collect(args, model, index, docid)?;
                Ok(geometric_mean(&scores))
            }
            DefaultScore::Union(args) => {
                let scores = DefaultScore::collect(args, model, index, docid)?;
                Ok(probabilistic_union(&scores))
            }
            DefaultScore::Sum(args) => {
                let scores = DefaultScore::collect(args, model, index, docid)?;
                Ok(scores.iter().sum())
            }
        }
    }

    fn collect(args: &[DefaultScore], model: &RetrievalModel, index: &dyn IndexReader, docid: DocId) -> Result<Vec<f64>, EvalError> {
        args.iter().map(|arg| arg.at(model, index, docid)).collect()
    }
}

// (s1 * s2 * ... * sn) ^ (1/n)
pub fn geometric_mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let product: f64 = scores.iter().product();
    product.powf(1.0 / scores.len() as f64)
}

// 1 - (1 - s1)(1 - s2)...(1 - sn)
pub fn probabilistic_union(scores: &[f64]) -> f64 {
    1.0 - scores.iter().map(|s| 1.0 - s).product::<f64>()
}

// Documents with scores, sorted by ascending docid, plus the score of
// any document missing from the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreList {
    entries: Vec<DocScore>,
    default: DefaultScore,
}

impl ScoreList {
    pub fn new() -> Self {
        ScoreList::with_default(DefaultScore::Zero)
    }

    pub fn with_default(default: DefaultScore) -> Self {
        ScoreList {
            entries: vec![],
            default,
        }
    }

    pub fn push(&mut self, docid: DocId, score: f64) {
        debug_assert!(self.entries.last().map_or(true, |last| last.docid < docid),
            "scores must be appended in ascending doc id order");
        self.entries.push(DocScore { docid, score });
    }

    pub fn get_entries(&self) -> &[DocScore] {
        &self.entries
    }
    pub fn get_default(&self) -> &DefaultScore {
        &self.default
    }
    pub fn set_default(&mut self, default: DefaultScore) {
        self.default = default;
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_score_at(&self, model: &RetrievalModel, index: &dyn IndexReader, docid: DocId) -> Result<f64, EvalError> {
        self.default.at(model, index, docid)
    }
}

impl Default for ScoreList {
    fn default() -> Self {
        ScoreList::new()
    }
}
