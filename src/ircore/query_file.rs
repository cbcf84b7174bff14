use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::Path;
use encoding_rs::ISO_8859_2;
use encoding_rs_io::DecodeReaderBytesBuilder;
use super::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct QueryEntry {
    pub id: String,
    pub text: String,
}

// Reads a query file of `id:query` lines.
pub fn load_queries(path: &Path) -> Result<Vec<QueryEntry>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::InvalidData => read_to_string_non_utf8_encoding(path)?,
        Err(e) => return Err(e.into()),
    };
    let queries = parse_queries(&content, &path.to_string_lossy());
    log::info!("{} queries read from {}", queries.len(), path.display());
    Ok(queries)
}

// Blank lines are skipped; malformed lines are reported and skipped.
pub fn parse_queries(content: &str, source: &str) -> Vec<QueryEntry> {
    let mut queries = vec![];
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(':') {
            Some((id, text)) if !id.trim().is_empty() => queries.push(QueryEntry {
                id: id.trim().to_string(),
                text: text.trim().to_string(),
            }),
            _ => {
                let err = Error::QueryFile {
                    path: source.to_string(),
                    line: number + 1,
                    message: "expected 'id:query'".to_string(),
                };
                log::warn!("{}, line skipped", err);
            }
        }
    }
    queries
}

fn read_to_string_non_utf8_encoding(path: &Path) -> io::Result<String> {
    let mut dest = String::new();
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(ISO_8859_2))
        .build(File::open(path)?);
    decoder.read_to_string(&mut dest)?;
    Ok(dest)
}
