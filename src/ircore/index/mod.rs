pub mod pl;
pub mod memory;

use crate::ircore::DocId;
use pl::InvList;

// Read-only access to a full-text index. Implementations must be safe to
// share between queries; evaluation never mutates the index.
pub trait IndexReader {
    // inverted list of `term` in `field`, empty when the term never occurs there
    fn postings(&self, term: &str, field: &str) -> InvList;
    // length of `doc` in `field` measured in tokens, None for unknown documents
    fn document_length(&self, field: &str, doc: DocId) -> Option<u32>;
    // total number of tokens in `field` across the collection
    fn total_collection_terms(&self, field: &str) -> u64;
    // number of documents with at least one token in `field`
    fn document_count(&self, field: &str) -> u32;
    fn internal_docid(&self, external_id: &str) -> Option<DocId>;
    fn external_docid(&self, doc: DocId) -> Option<&str>;
}
