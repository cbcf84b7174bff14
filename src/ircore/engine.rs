use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::time::Instant;
use super::analyzer::Analyzer;
use super::config::Params;
use super::error::{EvalError, QueryError, Result};
use super::eval::{self, EvalContext};
use super::index::IndexReader;
use super::index::memory::MemoryIndex;
use super::output::{rank, write_rows, RankedDoc};
use super::query::QryNode;
use super::query::parser::QueryParser;
use super::query_file::{load_queries, QueryEntry};
use super::ranking::{RetrievalModel, ScoreList};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BatchSummary {
    pub queries: usize,
    // queries that could not be parsed or evaluated
    pub failed: usize,
}

// Evaluates structured queries against one index under one retrieval model.
pub struct Engine<'a> {
    index: &'a dyn IndexReader,
    model: RetrievalModel,
    parser: QueryParser,
    result_count: usize,
}

impl<'a> Engine<'a> {
    pub fn new(index: &'a dyn IndexReader, model: RetrievalModel, parser: QueryParser, result_count: usize) -> Self {
        Engine {
            index,
            model,
            parser,
            result_count,
        }
    }

    pub fn get_model(&self) -> &RetrievalModel {
        &self.model
    }

    pub fn parse(&self, query: &str) -> std::result::Result<QryNode, QueryError> {
        self.parser.parse(query)
    }

    pub fn evaluate(&self, node: &QryNode) -> std::result::Result<ScoreList, EvalError> {
        let ctx = EvalContext::new(self.index, &self.model);
        eval::evaluate_scores(node, &ctx)
    }

    pub fn search(&self, query: &str) -> Result<Vec<RankedDoc>> {
        let node = self.parse(query)?;
        log::debug!("{} parsed into {} terms\n{}", node.to_query_string(), node.term_count(), node);
        let scores = self.evaluate(&node)?;
        Ok(rank(scores.get_entries(), self.index, self.result_count)?)
    }

    // Runs the queries in order and writes their result rows. A failing
    // query is reported and gets a placeholder row; the batch goes on.
    pub fn run_batch<W: Write>(&self, queries: &[QueryEntry], run_id: &str, out: &mut W) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();
        for query in queries {
            let start = Instant::now();
            let ranked = match self.search(&query.text) {
                Ok(ranked) => {
                    log::info!("query {}: {} documents in {:?}", query.id, ranked.len(), start.elapsed());
                    ranked
                }
                Err(e) => {
                    log::warn!("query {} skipped: {}", query.id, e);
                    summary.failed += 1;
                    vec![]
                }
            };
            write_rows(out, &query.id, &ranked, run_id)?;
            summary.queries += 1;
        }
        out.flush()?;
        Ok(summary)
    }
}

// Batch run described by a parameter file.
pub fn run(params: &Params) -> Result<BatchSummary> {
    let start = Instant::now();
    let index = MemoryIndex::load_from(&params.index_path)?;
    let queries = load_queries(&params.query_file_path)?;
    let parser = QueryParser::new(Analyzer::new(&params.analyzer), params.default_operator);
    let engine = Engine::new(&index, params.model(), parser, params.result_count);

    if let Some(dir) = params.trec_eval_output_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut out = BufWriter::new(File::create(&params.trec_eval_output_path)?);
    let summary = engine.run_batch(&queries, &params.run_id, &mut out)?;
    log::info!("{} queries ({} failed) evaluated with {} in {:?}",
        summary.queries, summary.failed, engine.get_model().name(), start.elapsed());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ircore::error::Error;
    use crate::ircore::query::DefaultOperator;
    use crate::ircore::ranking::bm25::Bm25Params;
    use tempfile::tempdir;

    fn sample_index() -> MemoryIndex {
        let mut index = MemoryIndex::new();
        let docs: [(&str, &[&str], &[&str]); 4] = [
            ("GX-A", &["green", "pea", "soup"], &["green", "pea", "soup", "with", "ham", "pea"]),
            ("GX-B", &["split", "pea"], &["dried", "split", "pea", "recipe"]),
            ("GX-C", &["tomato", "soup"], &["tomato", "soup", "recipe"]),
            ("GX-D", &["garden"], &["sweet", "pea", "flowers"]),
        ];
        for (external_id, title, body) in docs {
            index.add_document(external_id, &[("title", title), ("body", body)]);
        }
        index
    }

    fn engine(index: &MemoryIndex, model: RetrievalModel) -> Engine<'_> {
        Engine::new(index, model, QueryParser::new(Analyzer::default(), DefaultOperator::Or), 100)
    }

    #[test]
    fn test_search() {
        let index = sample_index();
        let engine = engine(&index, RetrievalModel::RankedBoolean);
        let ranked = engine.search("#AND(pea soup)").unwrap();
        assert_eq!(ranked, vec![RankedDoc { external_id: "GX-A".to_string(), score: 1.0 }]);

        let ranked = engine.search("pea").unwrap();
        let ids: Vec<_> = ranked.iter().map(|doc| doc.external_id.as_str()).collect();
        assert_eq!(ids, vec!["GX-A", "GX-B", "GX-D"]);
        assert_eq!(ranked[0].score, 2.0);

        let ranked = engine.search("#NEAR/1(split pea) soup.title").unwrap();
        let ids: Vec<_> = ranked.iter().map(|doc| doc.external_id.as_str()).collect();
        assert_eq!(ids, vec!["GX-A", "GX-B", "GX-C"]);
    }

    #[test]
    fn test_search_errors() {
        let index = sample_index();
        let engine = engine(&index, RetrievalModel::Bm25(Bm25Params::default()));
        assert!(matches!(engine.search("#AND(pea"), Err(Error::Query(QueryError::Unbalanced(1)))));
        assert!(matches!(engine.search("pea.inlink"),
            Err(Error::Eval(EvalError::EmptyFieldStatistics { .. }))));
    }

    #[test]
    fn test_run_batch() {
        let index = sample_index();
        let engine = engine(&index, RetrievalModel::UnrankedBoolean);
        let queries = vec![
            QueryEntry { id: "1".to_string(), text: "#AND(tomato soup)".to_string() },
            QueryEntry { id: "2".to_string(), text: "#OR(pea))".to_string() },
            QueryEntry { id: "3".to_string(), text: "lentil".to_string() },
        ];
        let mut out = vec![];
        let summary = engine.run_batch(&queries, "test", &mut out).unwrap();
        assert_eq!(summary, BatchSummary { queries: 3, failed: 1 });
        assert_eq!(String::from_utf8(out).unwrap(), "\
1 Q0 GX-C 1 1.000000000000 test
2 Q0 dummy 1 0.000000000000 test
3 Q0 dummy 1 0.000000000000 test
");
    }

    #[test]
    fn test_run() {
        let dir = tempdir().unwrap();
        let index_path = dir.path().join("index.idx");
        sample_index().save_to(&index_path).unwrap();
        let query_path = dir.path().join("queries.txt");
        fs::write(&query_path, "7:#SUM(pea.title pea)\n8:#AND(the\n").unwrap();
        let output_path = dir.path().join("out").join("run.teIn");
        let yaml = format!("
indexPath: {}
queryFilePath: {}
trecEvalOutputPath: {}
retrievalAlgorithm: RankedBoolean
resultCount: 2
runId: sum-run
",
            index_path.display(), query_path.display(), output_path.display());
        let params = Params::from_str(&yaml).unwrap();

        let summary = run(&params).unwrap();
        assert_eq!(summary, BatchSummary { queries: 2, failed: 1 });
        let output = fs::read_to_string(&output_path).unwrap();
        assert_eq!(output, "\
7 Q0 GX-A 1 3.000000000000 sum-run
7 Q0 GX-B 2 2.000000000000 sum-run
8 Q0 dummy 1 0.000000000000 sum-run
");
    }
}
