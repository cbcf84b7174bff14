use crate::ircore::DEFAULT_FIELD;
use crate::ircore::error::EvalError;
use crate::ircore::index::pl::{InvList, Posting};
use crate::ircore::query::QryNode;
use super::{evaluate_postings, EvalContext};
use super::cursor::min_docid;

pub fn evaluate_term(term: &str, field: &str, ctx: &EvalContext) -> InvList {
    let list = ctx.index.postings(term, field);
    log::debug!("{}.{}: df {} ctf {}", term, field, list.get_document_frequency(), list.get_collection_term_frequency());
    list
}

pub fn evaluate_syn(args: &[QryNode], ctx: &EvalContext) -> Result<InvList, EvalError> {
    let lists = args.iter()
        .map(|arg| evaluate_postings(arg, ctx, "#SYN"))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge_synonyms(&lists))
}

// Treats all arguments as one term: per document the frequencies add up
// and the positions are merged. The field is taken from the first argument.
pub fn merge_synonyms(lists: &[InvList]) -> InvList {
    let field = lists.first().map_or(DEFAULT_FIELD, InvList::get_field);
    let mut merged = InvList::new(field);
    let mut cursors: Vec<_> = lists.iter().map(InvList::cursor).collect();
    while let Some(docid) = min_docid(&cursors) {
        let mut term_frequency = 0;
        let mut positions = vec![];
        for cursor in cursors.iter_mut().filter(|cursor| cursor.current_docid() == Some(docid)) {
            if let Some(posting) = cursor.current() {
                term_frequency += posting.get_term_frequency();
                positions.extend_from_slice(posting.get_positions());
            }
            cursor.advance();
        }
        positions.sort_unstable();
        positions.dedup();
        merged.append_posting(Posting::with_frequency(docid, term_frequency, positions));
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ircore::eval::testing::{field_tokens, index_with_bodies};
    use crate::ircore::ranking::RetrievalModel;

    #[test]
    fn test_evaluate_term() {
        let index = index_with_bodies(&[field_tokens(3, &[("pea", &[1])])]);
        let model = RetrievalModel::UnrankedBoolean;
        let ctx = EvalContext::new(&index, &model);
        assert_eq!(evaluate_term("pea", "body", &ctx).get_document_frequency(), 1);
        assert!(evaluate_term("pea", "title", &ctx).is_empty());
    }

    #[test]
    fn test_merge_synonyms() {
        let a = InvList::from_postings("title", vec![Posting::new(1, vec![2, 7]), Posting::new(4, vec![0])]);
        let b = InvList::from_postings("body", vec![Posting::new(1, vec![3, 7]), Posting::new(9, vec![5])]);
        let merged = merge_synonyms(&[a, b]);
        assert_eq!(merged.get_field(), "title");
        assert_eq!(merged.get_postings(), &[
            Posting::with_frequency(1, 4, vec![2, 3, 7]),
            Posting::new(4, vec![0]),
            Posting::new(9, vec![5]),
        ]);
        assert_eq!(merged.get_collection_term_frequency(), 6);
        assert_eq!(merged.get_document_frequency(), 3);
    }

    #[test]
    fn test_syn_of_nothing() {
        let merged = merge_synonyms(&[InvList::new("url")]);
        assert!(merged.is_empty());
        assert_eq!(merged.get_field(), "url");
    }
}
