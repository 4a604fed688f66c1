//! TF-IDF vector space cosine similarity

use std::collections::{HashMap, HashSet};

/// Cosine similarity over a TF-IDF vector space built from the input
/// documents only. Unigrams and bigrams, smoothed idf, L2 normalization.
pub struct TfidfScorer {
    stop_words: HashSet<&'static str>,
    max_features: usize,
}

impl Default for TfidfScorer {
    fn default() -> Self {
        Self::new(5000)
    }
}

impl TfidfScorer {
    pub fn new(max_features: usize) -> Self {
        Self {
            stop_words: Self::stop_words(),
            max_features,
        }
    }

    /// Similarity between job description and one resume, scaled to 0-100.
    /// Empty input or an empty vocabulary yields 0.0.
    pub fn calculate_similarity(&self, job_description: &str, resume_text: &str) -> f64 {
        self.calculate_batch_similarity(job_description, &[resume_text.to_string()])
            .into_iter()
            .next()
            .unwrap_or(0.0)
    }

    /// Similarity between a job description and each resume in the batch.
    pub fn calculate_batch_similarity(&self, job_description: &str, resumes: &[String]) -> Vec<f64> {
        let job = preprocess(job_description);
        let docs: Vec<String> = resumes.iter().map(|r| preprocess(r)).collect();

        if job.is_empty() || docs.is_empty() {
            return vec![0.0; resumes.len()];
        }

        let mut corpus: Vec<Vec<String>> = Vec::with_capacity(docs.len() + 1);
        corpus.push(self.terms(&job));
        for doc in &docs {
            corpus.push(self.terms(doc));
        }

        let vocabulary = self.build_vocabulary(&corpus);
        if vocabulary.is_empty() {
            return vec![0.0; resumes.len()];
        }

        let idf = self.inverse_document_frequencies(&corpus, &vocabulary);
        let vectors: Vec<Vec<f64>> = corpus
            .iter()
            .map(|terms| self.vectorize(terms, &vocabulary, &idf))
            .collect();

        let job_vector = &vectors[0];
        vectors[1..]
            .iter()
            .map(|resume_vector| cosine(job_vector, resume_vector) * 100.0)
            .collect()
    }

    /// Unigrams plus bigrams with stop words removed
    fn terms(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|w| !self.stop_words.contains(w))
            .collect();

        let mut terms: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        for pair in words.windows(2) {
            terms.push(format!("{} {}", pair[0], pair[1]));
        }
        terms
    }

    fn build_vocabulary(&self, corpus: &[Vec<String>]) -> HashMap<String, usize> {
        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for doc in corpus {
            for term in doc {
                *frequencies.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<(&str, usize)> = frequencies.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(self.max_features);

        terms
            .into_iter()
            .enumerate()
            .map(|(index, (term, _))| (term.to_string(), index))
            .collect()
    }

    fn inverse_document_frequencies(
        &self,
        corpus: &[Vec<String>],
        vocabulary: &HashMap<String, usize>,
    ) -> Vec<f64> {
        let n_docs = corpus.len() as f64;
        let mut document_frequency = vec![0usize; vocabulary.len()];

        for doc in corpus {
            let unique: HashSet<&String> = doc.iter().collect();
            for term in unique {
                if let Some(&index) = vocabulary.get(term) {
                    document_frequency[index] += 1;
                }
            }
        }

        document_frequency
            .into_iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect()
    }

    fn vectorize(
        &self,
        terms: &[String],
        vocabulary: &HashMap<String, usize>,
        idf: &[f64],
    ) -> Vec<f64> {
        let mut vector = vec![0.0; vocabulary.len()];
        for term in terms {
            if let Some(&index) = vocabulary.get(term) {
                vector[index] += 1.0;
            }
        }

        for (index, value) in vector.iter_mut().enumerate() {
            *value *= idf[index];
        }

        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }

    fn stop_words() -> HashSet<&'static str> {
        [
            "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in",
            "is", "it", "its", "of", "on", "or", "that", "the", "to", "was", "were", "will",
            "with", "this", "but", "they", "have", "had", "we", "you", "our", "their",
        ]
        .into_iter()
        .collect()
    }
}

fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    // Vectors are already L2-normalized
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
