use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    // term frequency saturation
    pub k1: f64,
    // document length normalization, 0 disables it
    pub b: f64,
    // query term frequency saturation
    pub k3: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k1: 1.2,
            b: 0.75,
            k3: 0.0,
        }
    }
}

// The BM25 algorithm, per matched document d of a term t in field f
//   idf(t) * tfw(t, d) * qtfw(t)
//   idf  = ln((N - df + 0.5) / (df + 0.5))
//   tfw  = tf / (tf + k1 * (1 - b + b * ld / lavg))
//   qtfw = (k3 + 1) * qtf / (k3 + qtf)
//     N: documents with field f
//     df: documents containing t
//     tf: occurrences of t in d
//     ld: length of d in field f, lavg: average length of field f
// idf goes negative for terms in more than half of the documents;
// such terms lower the score.
pub fn idf(document_count: u32, document_frequency: usize) -> f64 {
    let n = document_count as f64;
    let df = document_frequency as f64;
    ((n - df + 0.5) / (df + 0.5)).ln()
}

pub fn tf_weight(params: &Bm25Params, tf: u32, doc_length: u32, average_length: f64) -> f64 {
    let tf = tf as f64;
    tf / (tf + params.k1 * (1.0 - params.b + params.b * doc_length as f64 / average_length))
}

// each query term counts once
pub fn qtf_weight(params: &Bm25Params, qtf: u32) -> f64 {
    let qtf = qtf as f64;
    (params.k3 + 1.0) * qtf / (params.k3 + qtf)
}

pub fn score(params: &Bm25Params, idf: f64, tf: u32, doc_length: u32, average_length: f64) -> f64 {
    idf * tf_weight(params, tf, doc_length, average_length) * qtf_weight(params, 1)
}
