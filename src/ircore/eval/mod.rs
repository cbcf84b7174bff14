pub mod cursor;
pub mod term;
pub mod near;
pub mod score;
pub mod and;
pub mod or;
pub mod sum;

use crate::ircore::DocId;
use crate::ircore::error::EvalError;
use crate::ircore::index::IndexReader;
use crate::ircore::index::pl::InvList;
use crate::ircore::query::QryNode;
use crate::ircore::ranking::{DocScore, RetrievalModel, ScoreList};
use cursor::min_docid;

// What an operator produces: positional postings, or scores.
#[derive(Debug, Clone, PartialEq)]
pub enum QryResult {
    Postings(InvList),
    Scores(ScoreList),
}

// Everything evaluation reads besides the tree itself.
pub struct EvalContext<'a> {
    pub index: &'a dyn IndexReader,
    pub model: &'a RetrievalModel,
}

impl<'a> EvalContext<'a> {
    pub fn new(index: &'a dyn IndexReader, model: &'a RetrievalModel) -> Self {
        EvalContext { index, model }
    }

    pub fn default_score_at(&self, list: &ScoreList, docid: DocId) -> Result<f64, EvalError> {
        list.default_score_at(self.model, self.index, docid)
    }
}

pub fn evaluate(node: &QryNode, ctx: &EvalContext) -> Result<QryResult, EvalError> {
    let result = match node {
        QryNode::Term { term, field } => QryResult::Postings(term::evaluate_term(term, field, ctx)),
        QryNode::Syn(args) => QryResult::Postings(term::evaluate_syn(args, ctx)?),
        QryNode::Near { window, args } => QryResult::Postings(near::evaluate(*window, args, ctx)?),
        QryNode::Score(arg) => QryResult::Scores(score::evaluate(arg, ctx)?),
        QryNode::And(args) => QryResult::Scores(and::evaluate(args, ctx)?),
        QryNode::Or(args) => QryResult::Scores(or::evaluate(args, ctx)?),
        QryNode::Sum(args) => QryResult::Scores(sum::evaluate(args, ctx)?),
    };
    Ok(result)
}

// Evaluates `node` into a score list, scoring inverted lists implicitly
// as if they were wrapped in #SCORE.
pub fn evaluate_scores(node: &QryNode, ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    match evaluate(node, ctx)? {
        QryResult::Postings(list) => score::score_list(list, ctx),
        QryResult::Scores(scores) => Ok(scores),
    }
}

// Evaluates an argument of an operator that works on positions.
pub fn evaluate_postings(node: &QryNode, ctx: &EvalContext, operator: &'static str) -> Result<InvList, EvalError> {
    match evaluate(node, ctx)? {
        QryResult::Postings(list) => Ok(list),
        QryResult::Scores(_) => Err(EvalError::ExpectedInvertedList { operator }),
    }
}

// Visits every docid found in any list once, in ascending order. For
// each, `combine` receives one score per list: the list's own score when
// it has the docid, its default score otherwise.
pub(crate) fn merge_with_defaults<F>(lists: &[ScoreList], ctx: &EvalContext, combine: F) -> Result<Vec<DocScore>, EvalError>
    where F: Fn(&[f64]) -> f64 {
    let mut cursors: Vec<_> = lists.iter().map(ScoreList::cursor).collect();
    let mut scores = vec![0.0; lists.len()];
    let mut merged = vec![];
    while let Some(docid) = min_docid(&cursors) {
        for (i, cursor) in cursors.iter_mut().enumerate() {
            scores[i] = match cursor.current() {
                Some(entry) if entry.docid == docid => {
                    cursor.advance();
                    entry.score
                }
                _ => ctx.default_score_at(&lists[i], docid)?,
            };
        }
        merged.push(DocScore { docid, score: combine(&scores) });
    }
    Ok(merged)
}
