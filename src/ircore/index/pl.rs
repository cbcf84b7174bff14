use serde::{Serialize, Deserialize};
use crate::ircore::{DocId, TermOffset, DEFAULT_FIELD};

pub type Positions = Vec<TermOffset>;

// One document's occurrences of a term within one field.
// Positions are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    doc_id: DocId,
    term_frequency: u32,
    positions: Positions,
}

impl Posting {
    pub fn new(doc_id: DocId, positions: Positions) -> Self {
        Posting {
            doc_id,
            term_frequency: positions.len() as u32,
            positions,
        }
    }

    // for merged postings whose frequency is not the number of distinct positions
    pub fn with_frequency(doc_id: DocId, term_frequency: u32, positions: Positions) -> Self {
        Posting {
            doc_id,
            term_frequency,
            positions,
        }
    }

    pub fn get_doc_id(&self) -> DocId {
        self.doc_id
    }
    pub fn get_term_frequency(&self) -> u32 {
        self.term_frequency
    }
    pub fn get_positions(&self) -> &Positions {
        &self.positions
    }
}

// Inverted list of one (term, field): postings sorted by ascending doc id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvList {
    field: String,
    collection_term_frequency: u64,
    postings: Vec<Posting>,
}

impl InvList {
    pub fn new(field: &str) -> Self {
        InvList {
            field: field.to_string(),
            collection_term_frequency: 0,
            postings: vec![],
        }
    }

    pub fn from_postings(field: &str, postings: Vec<Posting>) -> Self {
        let mut list = InvList::new(field);
        for posting in postings {
            list.append_posting(posting);
        }
        list
    }

    pub fn append_posting(&mut self, posting: Posting) {
        debug_assert!(self.postings.last().map_or(true, |last| last.doc_id < posting.doc_id),
            "postings must be appended in ascending doc id order");
        self.collection_term_frequency += posting.term_frequency as u64;
        self.postings.push(posting);
    }

    pub fn get_field(&self) -> &str {
        &self.field
    }
    // number of documents containing the term
    pub fn get_document_frequency(&self) -> usize {
        self.postings.len()
    }
    // total occurrences of the term in this field across the collection
    pub fn get_collection_term_frequency(&self) -> u64 {
        self.collection_term_frequency
    }
    pub fn get_postings(&self) -> &[Posting] {
        &self.postings
    }
    pub fn len(&self) -> usize {
        self.postings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl Default for InvList {
    fn default() -> Self {
        InvList::new(DEFAULT_FIELD)
    }
}
