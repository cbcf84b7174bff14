use std::cmp::Ordering;
use std::io::{self, Write};
use crate::ircore::error::EvalError;
use crate::ircore::index::IndexReader;
use crate::ircore::ranking::DocScore;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedDoc {
    pub external_id: String,
    pub score: f64,
}

// Orders documents by score, best first, breaking ties by external id,
// and keeps the top `limit`.
pub fn rank(scores: &[DocScore], index: &dyn IndexReader, limit: usize) -> Result<Vec<RankedDoc>, EvalError> {
    let mut ranked = scores.iter()
        .map(|entry| -> Result<RankedDoc, EvalError> {
            let external_id = index.external_docid(entry.docid)
                .ok_or(EvalError::UnknownDocument(entry.docid))?;
            Ok(RankedDoc { external_id: external_id.to_string(), score: entry.score })
        })
        .collect::<Result<Vec<_>, _>>()?;
    ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.external_id.cmp(&b.external_id),
        order => order,
    });
    ranked.truncate(limit);
    Ok(ranked)
}

// TREC result rows: `qid Q0 docid rank score run_id`. A query without
// results gets a single placeholder row so every query appears in the run.
pub fn write_rows<W: Write>(out: &mut W, query_id: &str, ranked: &[RankedDoc], run_id: &str) -> io::Result<()> {
    if ranked.is_empty() {
        return writeln!(out, "{} Q0 dummy 1 {:.12} {}", query_id, 0.0, run_id);
    }
    for (i, doc) in ranked.iter().enumerate() {
        writeln!(out, "{} Q0 {} {} {:.12} {}", query_id, doc.external_id, i + 1, doc.score, run_id)?;
    }
    Ok(())
}
