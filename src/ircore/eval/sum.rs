use std::collections::BTreeMap;
use crate::ircore::DocId;
use crate::ircore::error::EvalError;
use crate::ircore::query::QryNode;
use crate::ircore::ranking::{DefaultScore, ScoreList};
use super::{evaluate_scores, EvalContext};

pub fn evaluate(args: &[QryNode], ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    let lists = args.iter()
        .map(|arg| evaluate_scores(arg, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sum(&lists))
}

// Adds up the scores of each document over the lists containing it;
// a list without the document adds nothing.
pub fn sum(lists: &[ScoreList]) -> ScoreList {
    let mut totals: BTreeMap<DocId, f64> = BTreeMap::new();
    for list in lists {
        for entry in list.get_entries() {
            *totals.entry(entry.docid).or_insert(0.0) += entry.score;
        }
    }
    let defaults = lists.iter().map(|list| list.get_default().clone()).collect();
    let mut result = ScoreList::with_default(DefaultScore::Sum(defaults));
    for (docid, score) in totals {
        result.push(docid, score);
    }
    result
}
