use crate::ircore::{DEFAULT_FIELD, TermOffset};
use crate::ircore::error::EvalError;
use crate::ircore::index::pl::{InvList, Posting};
use crate::ircore::query::QryNode;
use super::{evaluate_postings, EvalContext};

pub fn evaluate(window: u32, args: &[QryNode], ctx: &EvalContext) -> Result<InvList, EvalError> {
    let lists = args.iter()
        .map(|arg| evaluate_postings(arg, ctx, "#NEAR"))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(near_match(&lists, window))
}

// #NEAR/n: documents where the arguments occur in order, each one at
// most n positions after the previous one. A match is a chain
// p1 < p2 < ... < pk with 0 < p(i+1) - p(i) <= n; the resulting posting
// holds the end position of every chain, and the frequency is their count.
pub fn near_match(lists: &[InvList], window: u32) -> InvList {
    let field = lists.first().map_or(DEFAULT_FIELD, InvList::get_field);
    let mut result = InvList::new(field);
    if lists.is_empty() {
        return result;
    }
    let mut cursors: Vec<_> = lists.iter().map(InvList::cursor).collect();
    // the first argument leads; the others catch up to its docid
    'docs: while let Some(docid) = cursors[0].current_docid() {
        for i in 1..cursors.len() {
            if !cursors[i].advance_to(docid) {
                break 'docs;
            }
            match cursors[i].current_docid() {
                Some(other) if other > docid => {
                    cursors[0].advance_to(other);
                    continue 'docs;
                }
                _ => {}
            }
        }
        let mut chain_ends = cursors[0].current_positions().unwrap_or_default().to_vec();
        for cursor in &cursors[1..] {
            if chain_ends.is_empty() {
                break;
            }
            chain_ends = follow_within(&chain_ends, cursor.current_positions().unwrap_or_default(), window);
        }
        if !chain_ends.is_empty() {
            result.append_posting(Posting::new(docid, chain_ends));
        }
        cursors[0].advance();
    }
    result
}

// Positions of `next` that come at most `window` positions after some
// position of `previous`. Both inputs are sorted ascending.
fn follow_within(previous: &[TermOffset], next: &[TermOffset], window: u32) -> Vec<TermOffset> {
    let mut matched = vec![];
    // previous[..before] are the positions lower than the current one
    let mut before = 0;
    for &position in next {
        while before < previous.len() && previous[before] < position {
            before += 1;
        }
        if before > 0 && position - previous[before - 1] <= window {
            matched.push(position);
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(postings: Vec<(u32, Vec<u32>)>) -> InvList {
        InvList::from_postings("body", postings.into_iter().map(|(docid, positions)| Posting::new(docid, positions)).collect())
    }

    #[test]
    fn test_near_gap() {
        let a = list(vec![(1, vec![5])]);
        assert_eq!(near_match(&[a.clone(), list(vec![(1, vec![7])])], 2).get_postings(),
            &[Posting::new(1, vec![7])]);
        assert!(near_match(&[a, list(vec![(1, vec![8])])], 2).is_empty());
    }

    #[test]
    fn test_near_order() {
        // b before a never matches
        let a = list(vec![(1, vec![5])]);
        let b = list(vec![(1, vec![4])]);
        assert!(near_match(&[a, b], 10).is_empty());
    }

    #[test]
    fn test_near_chain() {
        let a = list(vec![(1, vec![1, 20]), (2, vec![0]), (3, vec![2])]);
        let b = list(vec![(1, vec![3, 22]), (3, vec![9])]);
        let c = list(vec![(1, vec![4, 30]), (3, vec![10])]);
        let matched = near_match(&[a, b, c], 2);
        // doc 1: 1 -> 3 -> 4 chains, 20 -> 22 -> 30 breaks; doc 3: 2 -> 9 breaks
        assert_eq!(matched.get_postings(), &[Posting::new(1, vec![4])]);
        assert_eq!(matched.get_collection_term_frequency(), 1);
    }

    #[test]
    fn test_near_counts_every_chain_end() {
        let a = list(vec![(1, vec![0, 10])]);
        let b = list(vec![(1, vec![1, 2, 11])]);
        let matched = near_match(&[a, b], 2);
        assert_eq!(matched.get_postings()[0].get_positions(), &vec![1, 2, 11]);
        assert_eq!(matched.get_postings()[0].get_term_frequency(), 3);
    }

    #[test]
    fn test_near_window_bounds() {
        let a = list(vec![(1, vec![0]), (2, vec![3]), (5, vec![1])]);
        let b = list(vec![(1, vec![1]), (2, vec![900]), (4, vec![2]), (5, vec![0])]);
        assert!(near_match(&[a.clone(), b.clone()], 0).is_empty());
        // an unbounded window is an ordered intersection
        let docids: Vec<_> = near_match(&[a, b], u32::MAX).get_postings().iter().map(Posting::get_doc_id).collect();
        assert_eq!(docids, vec![1, 2]);
    }

    #[test]
    fn test_near_single_and_empty() {
        let a = list(vec![(2, vec![4])]);
        assert_eq!(near_match(&[a.clone()], 3), a);
        assert!(near_match(&[], 3).is_empty());
        assert!(near_match(&[a, InvList::new("body")], 3).is_empty());
    }
}
