use std::fs;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use super::analyzer::AnalyzerConfig;
use super::error::{ConfigError, Result};
use super::query::DefaultOperator;
use super::ranking::RetrievalModel;
use super::ranking::bm25::Bm25Params;
use super::ranking::lmd::LmParams;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum Algorithm {
    UnrankedBoolean,
    RankedBoolean,
    #[serde(rename = "BM25")]
    Bm25,
    Indri,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::UnrankedBoolean
    }
}

// Parameter file of a batch run, e.g.
//
//   indexPath: index/gov2.idx
//   queryFilePath: queries.txt
//   trecEvalOutputPath: run.teIn
//   retrievalAlgorithm: BM25
//   bm25: {k1: 1.2, b: 0.75, k3: 0}
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub index_path: PathBuf,
    pub query_file_path: PathBuf,
    pub trec_eval_output_path: PathBuf,
    #[serde(default)]
    pub retrieval_algorithm: Algorithm,
    #[serde(default)]
    pub bm25: Bm25Params,
    #[serde(default)]
    pub indri: LmParams,
    #[serde(default = "default_result_count")]
    pub result_count: usize,
    #[serde(default = "default_run_id")]
    pub run_id: String,
    #[serde(default)]
    pub default_operator: DefaultOperator,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

fn default_result_count() -> usize {
    100
}

fn default_run_id() -> String {
    String::from("run-1")
}

impl Params {
    pub fn from_str(yaml: &str) -> std::result::Result<Self, ConfigError> {
        let params: Params = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let params = Params::from_str(&content)?;
        log::info!("parameters loaded from {}", path.display());
        Ok(params)
    }

    pub fn model(&self) -> RetrievalModel {
        match self.retrieval_algorithm {
            Algorithm::UnrankedBoolean => RetrievalModel::UnrankedBoolean,
            Algorithm::RankedBoolean => RetrievalModel::RankedBoolean,
            Algorithm::Bm25 => RetrievalModel::Bm25(self.bm25),
            Algorithm::Indri => RetrievalModel::Indri(self.indri),
        }
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        check("bm25.k1", self.bm25.k1 >= 0.0, "must be >= 0")?;
        check("bm25.b", (0.0..=1.0).contains(&self.bm25.b), "must be within [0, 1]")?;
        check("bm25.k3", self.bm25.k3 >= 0.0, "must be >= 0")?;
        check("indri.mu", self.indri.mu >= 0.0, "must be >= 0")?;
        check("indri.lambda", (0.0..=1.0).contains(&self.indri.lambda), "must be within [0, 1]")?;
        check("resultCount", self.result_count >= 1, "must be at least 1")?;
        Ok(())
    }
}

fn check(name: &'static str, valid: bool, reason: &str) -> std::result::Result<(), ConfigError> {
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, reason: reason.to_string() })
    }
}
