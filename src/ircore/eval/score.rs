use crate::ircore::DocId;
use crate::ircore::error::EvalError;
use crate::ircore::index::pl::InvList;
use crate::ircore::query::QryNode;
use crate::ircore::ranking::{bm25, lmd, DefaultScore, RetrievalModel, ScoreList};
use super::{evaluate_postings, EvalContext};

pub fn evaluate(arg: &QryNode, ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    let list = evaluate_postings(arg, ctx, "#SCORE")?;
    score_list(list, ctx)
}

// Turns an inverted list into a score list under the current model.
// The postings are consumed; only the scores travel further up the tree.
pub fn score_list(list: InvList, ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    let field = list.get_field();
    match ctx.model {
        RetrievalModel::UnrankedBoolean => score_each(&list, |_, _| Ok(1.0)),
        RetrievalModel::RankedBoolean => score_each(&list, |_, tf| Ok(tf as f64)),
        RetrievalModel::Bm25(params) => {
            let (total_terms, document_count) = field_statistics(field, ctx)?;
            let average_length = total_terms as f64 / document_count as f64;
            let idf = bm25::idf(document_count, list.get_document_frequency());
            score_each(&list, |docid, tf| {
                let length = document_length(field, docid, ctx)?;
                Ok(bm25::score(params, idf, tf, length, average_length))
            })
        }
        RetrievalModel::Indri(params) => {
            let (total_terms, _) = field_statistics(field, ctx)?;
            let p_mle = lmd::p_mle(list.get_collection_term_frequency(), total_terms);
            let mut scores = score_each(&list, |docid, tf| {
                let length = document_length(field, docid, ctx)?;
                Ok(lmd::score(params, tf, length, p_mle))
            })?;
            scores.set_default(DefaultScore::Smoothed { field: field.to_string(), p_mle });
            Ok(scores)
        }
    }
}

fn score_each<F>(list: &InvList, score: F) -> Result<ScoreList, EvalError>
    where F: Fn(DocId, u32) -> Result<f64, EvalError> {
    let mut scores = ScoreList::new();
    for posting in list.get_postings() {
        scores.push(posting.get_doc_id(), score(posting.get_doc_id(), posting.get_term_frequency())?);
    }
    Ok(scores)
}

// (total tokens, documents) of a field; both must be non-zero
fn field_statistics(field: &str, ctx: &EvalContext) -> Result<(u64, u32), EvalError> {
    let total_terms = ctx.index.total_collection_terms(field);
    let document_count = ctx.index.document_count(field);
    if total_terms == 0 || document_count == 0 {
        return Err(EvalError::EmptyFieldStatistics { field: field.to_string() });
    }
    Ok((total_terms, document_count))
}

fn document_length(field: &str, docid: DocId, ctx: &EvalContext) -> Result<u32, EvalError> {
    ctx.index.document_length(field, docid)
        .ok_or_else(|| EvalError::MissingDocumentLength { field: field.to_string(), docid })
}
