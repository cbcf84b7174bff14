use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::ircore::{DocId, TermOffset};
use crate::ircore::error::Result;
use super::IndexReader;
use super::pl::{InvList, Posting};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct FieldStats {
    // total number of tokens in the field
    total_terms: u64,
    // documents with at least one token in the field
    document_count: u32,
}

// A positional index kept in memory, one postings table per field.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MemoryIndex {
    // field -> term -> postings
    postings_lists: HashMap<String, HashMap<String, Vec<Posting>>>,
    // field -> doc id -> number of tokens
    document_length: HashMap<String, HashMap<DocId, u32>>,
    field_stats: HashMap<String, FieldStats>,
    // doc id -> external id
    external_ids: Vec<String>,
    // rebuilt after loading
    #[serde(skip)]
    internal_ids: HashMap<String, DocId>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        MemoryIndex::default()
    }

    // Adds one document made of already analyzed fields. Doc ids are
    // assigned densely from 0; token positions start at 0 in every field.
    // A field listed more than once continues where the previous part ended.
    pub fn add_document(&mut self, external_id: &str, fields: &[(&str, &[&str])]) -> DocId {
        let doc_id = self.external_ids.len() as DocId;
        if self.internal_ids.contains_key(external_id) {
            log::warn!("document {} indexed more than once", external_id);
        }
        self.external_ids.push(external_id.to_string());
        self.internal_ids.insert(external_id.to_string(), doc_id);

        let mut merged: Vec<(&str, Vec<&str>)> = vec![];
        for &(field, tokens) in fields {
            match merged.iter_mut().find(|(name, _)| *name == field) {
                Some((_, all)) => all.extend_from_slice(tokens),
                None => merged.push((field, tokens.to_vec())),
            }
        }

        for (field, tokens) in merged {
            let length = tokens.len() as u32;
            self.document_length
                .entry(field.to_string())
                .or_insert_with(HashMap::new)
                .insert(doc_id, length);
            if length == 0 {
                continue;
            }
            let stats = self.field_stats.entry(field.to_string()).or_default();
            stats.total_terms += length as u64;
            stats.document_count += 1;

            let terms = self.postings_lists.entry(field.to_string()).or_insert_with(HashMap::new);
            let mut positions: HashMap<&str, Vec<TermOffset>> = HashMap::new();
            for (offset, token) in tokens.iter().enumerate() {
                positions.entry(*token).or_insert_with(Vec::new).push(offset as TermOffset);
            }
            for (token, offsets) in positions {
                terms.entry(token.to_string())
                    .or_insert_with(Vec::new)
                    .push(Posting::new(doc_id, offsets));
            }
        }
        doc_id
    }

    pub fn document_total(&self) -> usize {
        self.external_ids.len()
    }

    fn rebuild(&mut self) {
        self.internal_ids = self.external_ids.iter()
            .enumerate()
            .map(|(doc_id, external_id)| (external_id.clone(), doc_id as DocId))
            .collect();
    }

    pub fn save_to(&self, filepath: &Path) -> Result<()> {
        if let Some(dir) = filepath.parent() {
            fs::create_dir_all(dir)?;
        }
        let encoded: Vec<u8> = bincode::serialize(self)?;
        let mut writer = File::create(filepath)?;
        writer.write_all(&encoded)?;
        log::info!("index with {} documents saved to {}", self.document_total(), filepath.display());
        Ok(())
    }

    pub fn load_from(filepath: &Path) -> Result<Self> {
        let mut encoded = vec![];
        File::open(filepath)?.read_to_end(&mut encoded)?;
        let mut index: MemoryIndex = bincode::deserialize(&encoded[..])?;
        index.rebuild();
        log::info!("index with {} documents loaded from {}", index.document_total(), filepath.display());
        Ok(index)
    }
}

impl IndexReader for MemoryIndex {
    fn postings(&self, term: &str, field: &str) -> InvList {
        match self.postings_lists.get(field).and_then(|terms| terms.get(term)) {
            Some(postings) => InvList::from_postings(field, postings.clone()),
            None => InvList::new(field),
        }
    }

    fn document_length(&self, field: &str, doc: DocId) -> Option<u32> {
        if doc as usize >= self.external_ids.len() {
            return None;
        }
        // a document without the field has length 0 there
        Some(self.document_length.get(field)
            .and_then(|lengths| lengths.get(&doc))
            .copied()
            .unwrap_or(0))
    }

    fn total_collection_terms(&self, field: &str) -> u64 {
        self.field_stats.get(field).map_or(0, |stats| stats.total_terms)
    }

    fn document_count(&self, field: &str) -> u32 {
        self.field_stats.get(field).map_or(0, |stats| stats.document_count)
    }

    fn internal_docid(&self, external_id: &str) -> Option<DocId> {
        self.internal_ids.get(external_id).copied()
    }

    fn external_docid(&self, doc: DocId) -> Option<&str> {
        self.external_ids.get(doc as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_index() -> MemoryIndex {
        let mut index = MemoryIndex::new();
        let title: &[&str] = &["green", "pea"];
        let body: &[&str] = &["pea", "soup", "pea"];
        index.add_document("doc-a", &[("title", title), ("body", body)]);
        let body: &[&str] = &["split", "pea"];
        index.add_document("doc-b", &[("body", body)]);
        index
    }

    #[test]
    fn test_add_document() {
        let index = sample_index();
        assert_eq!(index.document_total(), 2);
        let list = index.postings("pea", "body");
        assert_eq!(list.get_document_frequency(), 2);
        assert_eq!(list.get_collection_term_frequency(), 3);
        assert_eq!(list.get_postings()[0].get_doc_id(), 0);
        assert_eq!(list.get_postings()[0].get_positions(), &vec![0, 2]);
        assert_eq!(list.get_postings()[1].get_positions(), &vec![1]);
        assert_eq!(index.total_collection_terms("body"), 5);
        assert_eq!(index.document_count("body"), 2);
        assert_eq!(index.document_count("title"), 1);
    }

    #[test]
    fn test_unknown_terms_and_documents() {
        let index = sample_index();
        assert!(index.postings("lentil", "body").is_empty());
        assert!(index.postings("pea", "url").is_empty());
        assert_eq!(index.document_length("title", 1), Some(0));
        assert_eq!(index.document_length("body", 9), None);
        assert_eq!(index.internal_docid("doc-b"), Some(1));
        assert_eq!(index.external_docid(0), Some("doc-a"));
        assert_eq!(index.external_docid(5), None);
    }

    #[test]
    fn test_repeated_field() {
        let mut index = MemoryIndex::new();
        let first: &[&str] = &["pea"];
        let second: &[&str] = &["soup", "pea"];
        index.add_document("d0", &[("body", first), ("body", second)]);
        let list = index.postings("pea", "body");
        assert_eq!(list.get_postings(), &[Posting::new(0, vec![0, 2])]);
        assert_eq!(index.postings("soup", "body").get_postings()[0].get_positions(), &vec![1]);
        assert_eq!(index.document_length("body", 0), Some(3));
        assert_eq!(index.document_count("body"), 1);
        assert_eq!(index.total_collection_terms("body"), 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index").join("test.idx");
        let index = sample_index();
        index.save_to(&path).unwrap();

        let loaded = MemoryIndex::load_from(&path).unwrap();
        assert_eq!(loaded.document_total(), 2);
        assert_eq!(loaded.internal_docid("doc-a"), Some(0));
        assert_eq!(loaded.postings("pea", "body"), index.postings("pea", "body"));
        assert_eq!(loaded.document_length("body", 0), Some(3));
    }
}
