use crate::ircore::error::EvalError;
use crate::ircore::query::QryNode;
use crate::ircore::ranking::{geometric_mean, DefaultScore, RetrievalModel, ScoreList};
use super::{evaluate_scores, merge_with_defaults, EvalContext};

pub fn evaluate(args: &[QryNode], ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    let lists = args.iter()
        .map(|arg| evaluate_scores(arg, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    if ctx.model.is_smoothed() {
        smoothed_and(&lists, ctx)
    } else {
        Ok(boolean_and(lists, ctx.model))
    }
}

// Documents present in every list. The score is the minimum of the
// argument scores, or 1.0 for unranked retrieval.
pub fn boolean_and(mut lists: Vec<ScoreList>, model: &RetrievalModel) -> ScoreList {
    let mut result = ScoreList::new();
    if lists.is_empty() {
        return result;
    }
    // the shortest list leads the merge
    lists.sort_by_key(ScoreList::len);
    let mut cursors: Vec<_> = lists.iter().map(ScoreList::cursor).collect();
    'docs: while let Some(lead) = cursors[0].current() {
        let mut score = lead.score;
        for i in 1..cursors.len() {
            if !cursors[i].advance_to(lead.docid) {
                break 'docs;
            }
            match cursors[i].current() {
                Some(entry) if entry.docid == lead.docid => score = score.min(entry.score),
                Some(entry) => {
                    cursors[0].advance_to(entry.docid);
                    continue 'docs;
                }
                None => break 'docs,
            }
        }
        let score = match model {
            RetrievalModel::UnrankedBoolean => 1.0,
            _ => score,
        };
        result.push(lead.docid, score);
        cursors[0].advance();
    }
    result
}

// Indri #AND: every document matched by any argument, scored by the
// geometric mean of the argument scores. An argument that misses the
// document contributes its default score.
pub fn smoothed_and(lists: &[ScoreList], ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    let defaults = lists.iter().map(|list| list.get_default().clone()).collect();
    let mut result = ScoreList::with_default(DefaultScore::GeometricMean(defaults));
    for entry in merge_with_defaults(lists, ctx, geometric_mean)? {
        result.push(entry.docid, entry.score);
    }
    Ok(result)
}
