use crate::ircore::{DocId, TermOffset};
use crate::ircore::index::pl::{InvList, Posting};
use crate::ircore::ranking::{DocScore, ScoreList};

pub trait DocEntry {
    fn get_doc_id(&self) -> DocId;
}

impl DocEntry for Posting {
    fn get_doc_id(&self) -> DocId {
        Posting::get_doc_id(self)
    }
}

impl DocEntry for DocScore {
    fn get_doc_id(&self) -> DocId {
        self.docid
    }
}

// Forward-only read position in a docid-sorted list. A cursor never
// moves backwards; once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct ArgCursor<'a, T> {
    entries: &'a [T],
    next_index: usize,
}

impl<'a, T: DocEntry> ArgCursor<'a, T> {
    pub fn new(entries: &'a [T]) -> Self {
        ArgCursor {
            entries,
            next_index: 0,
        }
    }

    pub fn at_end(&self) -> bool {
        self.next_index >= self.entries.len()
    }

    pub fn current(&self) -> Option<&'a T> {
        self.entries.get(self.next_index)
    }

    pub fn current_docid(&self) -> Option<DocId> {
        self.current().map(DocEntry::get_doc_id)
    }

    pub fn advance(&mut self) {
        if !self.at_end() {
            self.next_index += 1;
        }
    }

    // Moves to the first entry with docid >= `min_docid`.
    // Returns false when the list is exhausted.
    pub fn advance_to(&mut self, min_docid: DocId) -> bool {
        let rest = &self.entries[self.next_index.min(self.entries.len())..];
        self.next_index += rest.partition_point(|entry| entry.get_doc_id() < min_docid);
        !self.at_end()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> ArgCursor<'a, Posting> {
    pub fn current_term_frequency(&self) -> Option<u32> {
        self.current().map(Posting::get_term_frequency)
    }

    pub fn current_positions(&self) -> Option<&'a [TermOffset]> {
        self.current().map(|posting| posting.get_positions().as_slice())
    }
}

impl<'a> ArgCursor<'a, DocScore> {
    pub fn current_score(&self) -> Option<f64> {
        self.current().map(|entry| entry.score)
    }
}

// smallest docid under any cursor that is not exhausted
pub fn min_docid<T: DocEntry>(cursors: &[ArgCursor<'_, T>]) -> Option<DocId> {
    cursors.iter().filter_map(ArgCursor::current_docid).min()
}

impl InvList {
    pub fn cursor(&self) -> ArgCursor<'_, Posting> {
        ArgCursor::new(self.get_postings())
    }
}

impl ScoreList {
    pub fn cursor(&self) -> ArgCursor<'_, DocScore> {
        ArgCursor::new(self.get_entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(docids: &[DocId]) -> ScoreList {
        let mut list = ScoreList::new();
        for &docid in docids {
            list.push(docid, docid as f64 / 10.0);
        }
        list
    }

    #[test]
    fn test_advance_to() {
        let list = scores(&[2, 5, 9]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.current_docid(), Some(2));
        assert!(cursor.advance_to(3));
        assert_eq!(cursor.current_docid(), Some(5));
        assert!(cursor.advance_to(5));
        assert_eq!(cursor.current_docid(), Some(5));
        // never moves backwards
        assert!(cursor.advance_to(1));
        assert_eq!(cursor.current_docid(), Some(5));
        assert_eq!(cursor.current_score(), Some(0.5));
        assert!(!cursor.advance_to(10));
        assert!(cursor.at_end());
        assert_eq!(cursor.current(), None);
        assert!(!cursor.advance_to(0));
    }

    #[test]
    fn test_advance() {
        let list = InvList::from_postings("body", vec![Posting::new(1, vec![3, 4]), Posting::new(4, vec![0])]);
        let mut cursor = list.cursor();
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.current_term_frequency(), Some(2));
        assert_eq!(cursor.current_positions(), Some(&[3, 4][..]));
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert!(cursor.at_end());
        assert_eq!(cursor.current_positions(), None);
    }

    #[test]
    fn test_min_docid() {
        let a = scores(&[4, 8]);
        let b = scores(&[6]);
        let mut cursors = vec![a.cursor(), b.cursor()];
        assert_eq!(min_docid(&cursors), Some(4));
        cursors[0].advance();
        assert_eq!(min_docid(&cursors), Some(6));
        cursors[1].advance();
        cursors[0].advance();
        assert_eq!(min_docid(&cursors), None);
    }
}
