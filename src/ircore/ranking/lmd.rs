use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LmParams {
    // Dirichlet prior
    pub mu: f64,
    // Jelinek-Mercer mixing weight of the collection model
    pub lambda: f64,
}

impl Default for LmParams {
    fn default() -> Self {
        LmParams {
            mu: 2500.0,
            lambda: 0.4,
        }
    }
}

// Maximum likelihood estimate of a term in the collection: ctf / |C|
pub fn p_mle(collection_term_frequency: u64, total_collection_terms: u64) -> f64 {
    collection_term_frequency as f64 / total_collection_terms as f64
}

// Indri language model with two-stage smoothing
//   p(t|d) = (1 - lambda) * (tf + mu * p_mle) / (ld + mu) + lambda * p_mle
//     tf: occurrences of t in d
//     ld: length of d in the field of t
//     p_mle: collection probability of t in that field
pub fn score(params: &LmParams, tf: u32, doc_length: u32, p_mle: f64) -> f64 {
    (1.0 - params.lambda) * (tf as f64 + params.mu * p_mle) / (doc_length as f64 + params.mu)
        + params.lambda * p_mle
}

// p(t|d) of a document the term does not occur in
pub fn default_score(params: &LmParams, p_mle: f64, doc_length: u32) -> f64 {
    score(params, 0, doc_length, p_mle)
}
