use std::collections::BTreeMap;
use crate::ircore::DocId;
use crate::ircore::error::EvalError;
use crate::ircore::query::QryNode;
use crate::ircore::ranking::{probabilistic_union, DefaultScore, RetrievalModel, ScoreList};
use super::{evaluate_scores, merge_with_defaults, EvalContext};

pub fn evaluate(args: &[QryNode], ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    let lists = args.iter()
        .map(|arg| evaluate_scores(arg, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    if ctx.model.is_smoothed() {
        smoothed_or(&lists, ctx)
    } else {
        Ok(boolean_or(&lists, ctx.model))
    }
}

// Documents present in any list, scored by the maximum argument score
// (1.0 for unranked retrieval).
pub fn boolean_or(lists: &[ScoreList], model: &RetrievalModel) -> ScoreList {
    let mut best: BTreeMap<DocId, f64> = BTreeMap::new();
    for list in lists {
        for entry in list.get_entries() {
            best.entry(entry.docid)
                .and_modify(|score| *score = score.max(entry.score))
                .or_insert(entry.score);
        }
    }
    let mut result = ScoreList::new();
    for (docid, score) in best {
        let score = match model {
            RetrievalModel::UnrankedBoolean => 1.0,
            _ => score,
        };
        result.push(docid, score);
    }
    result
}

// Indri #OR: 1 - (1 - s1)(1 - s2)...(1 - sn), with default scores for
// the arguments that miss a document.
pub fn smoothed_or(lists: &[ScoreList], ctx: &EvalContext) -> Result<ScoreList, EvalError> {
    let defaults = lists.iter().map(|list| list.get_default().clone()).collect();
    let mut result = ScoreList::with_default(DefaultScore::Union(defaults));
    for entry in merge_with_defaults(lists, ctx, probabilistic_union)? {
        result.push(entry.docid, entry.score);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ircore::eval::testing::{field_tokens, index_with_bodies};
    use crate::ircore::ranking::DocScore;
    use crate::ircore::ranking::lmd::{self, LmParams};

    fn scores(entries: &[(u32, f64)]) -> ScoreList {
        let mut list = ScoreList::new();
        for &(docid, score) in entries {
            list.push(docid, score);
        }
        list
    }

    #[test]
    fn test_boolean_or_is_union() {
        let a = scores(&[(1, 3.0), (4, 1.0)]);
        let b = scores(&[(2, 1.0), (4, 2.0)]);
        let c = scores(&[(9, 6.0)]);
        let result = boolean_or(&[a, b, c], &RetrievalModel::RankedBoolean);
        assert_eq!(result.get_entries(), &[
            DocScore { docid: 1, score: 3.0 },
            DocScore { docid: 2, score: 1.0 },
            DocScore { docid: 4, score: 2.0 },
            DocScore { docid: 9, score: 6.0 },
        ]);
    }

    #[test]
    fn test_unranked_or() {
        let a = scores(&[(3, 2.0)]);
        let b = scores(&[(1, 4.0)]);
        let result = boolean_or(&[a, b, ScoreList::new()], &RetrievalModel::UnrankedBoolean);
        assert_eq!(result.get_entries(), &[DocScore { docid: 1, score: 1.0 }, DocScore { docid: 3, score: 1.0 }]);
        assert!(boolean_or(&[], &RetrievalModel::UnrankedBoolean).is_empty());
    }

    #[test]
    fn test_smoothed_or() {
        let index = index_with_bodies(&[
            field_tokens(4, &[("pea", &[0])]),
            field_tokens(4, &[("soup", &[3])]),
        ]);
        let params = LmParams { mu: 4.0, lambda: 0.5 };
        let model = RetrievalModel::Indri(params);
        let ctx = EvalContext::new(&index, &model);
        let result = evaluate(&[QryNode::term("pea", "body"), QryNode::term("soup", "body")], &ctx).unwrap();
        assert_eq!(result.len(), 2);
        let p = lmd::p_mle(1, 8);
        let matched = lmd::score(&params, 1, 4, p);
        let missed = lmd::default_score(&params, p, 4);
        let expected = 1.0 - (1.0 - matched) * (1.0 - missed);
        let epsilon = 1e-12;
        assert!((result.get_entries()[0].score - expected).abs() < epsilon);
        assert!((result.get_entries()[1].score - expected).abs() < epsilon);
        assert!(matches!(result.get_default(), DefaultScore::Union(args) if args.len() == 2));
    }
}
