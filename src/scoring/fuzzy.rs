//! Fuzzy string matching: token-set ratio for whole documents and
//! partial-ratio skill lookup

use strsim::normalized_levenshtein;
use std::collections::BTreeSet;

pub struct FuzzyScorer {
    match_threshold: f64,
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new(80.0)
    }
}

impl FuzzyScorer {
    pub fn new(match_threshold: f64) -> Self {
        Self {
            match_threshold: match_threshold.clamp(0.0, 100.0),
        }
    }

    pub fn match_threshold(&self) -> f64 {
        self.match_threshold
    }

    /// Token-set-ratio similarity between full texts, 0-100.
    pub fn calculate_fuzzy_score(&self, job_desc_text: &str, resume_text: &str) -> f64 {
        if job_desc_text.is_empty() || resume_text.is_empty() {
            return 0.0;
        }
        token_set_ratio(job_desc_text, resume_text)
    }

    /// Batch variant over multiple resumes.
    pub fn calculate_batch_fuzzy_scores(&self, job_desc_text: &str, resumes: &[String]) -> Vec<f64> {
        resumes
            .iter()
            .map(|resume| self.calculate_fuzzy_score(job_desc_text, resume))
            .collect()
    }

    /// Partition required skills into (matched, missing) by partial-ratio
    /// lookup. Every input skill lands in exactly one of the two lists.
    pub fn match_skills(&self, job_skills: &[String], resume_text: &str) -> (Vec<String>, Vec<String>) {
        let resume_lower = resume_text.to_lowercase();
        let mut matched = Vec::new();
        let mut missing = Vec::new();

        for skill in job_skills {
            if partial_ratio(&skill.to_lowercase(), &resume_lower) > self.match_threshold {
                matched.push(skill.clone());
            } else {
                missing.push(skill.clone());
            }
        }

        (matched, missing)
    }
}

/// Plain ratio: normalized Levenshtein similarity scaled to 0-100
fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Best ratio of the shorter string against any equally long window of the
/// longer string.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let short_chars: Vec<char> = shorter.chars().collect();
    let long_chars: Vec<char> = longer.chars().collect();

    if short_chars.is_empty() {
        return 0.0;
    }
    if short_chars.len() == long_chars.len() {
        return ratio(shorter, longer);
    }

    let mut best = 0.0f64;
    for start in 0..=(long_chars.len() - short_chars.len()) {
        let window: String = long_chars[start..start + short_chars.len()].iter().collect();
        best = best.max(ratio(shorter, &window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Token-set ratio: compare the sorted token intersection against each
/// side's full sorted token set and keep the best pairwise ratio.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).cloned().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).cloned().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).cloned().collect();

    let sorted_intersection = intersection.join(" ");
    let combined_a = join_nonempty(&sorted_intersection, &only_a.join(" "));
    let combined_b = join_nonempty(&sorted_intersection, &only_b.join(" "));

    ratio(&sorted_intersection, &combined_a)
        .max(ratio(&sorted_intersection, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{} {}", a, b),
    }
}
