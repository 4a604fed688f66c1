//! Skill relationship graph similarity

use aho_corasick::AhoCorasick;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Similarity over a fixed skill graph: related skills contribute partial
/// credit inversely proportional to their graph distance.
pub struct SkillGraphMatcher {
    adjacency: HashMap<String, BTreeSet<String>>,
    nodes: Vec<String>,
    node_matcher: AhoCorasick,
}

impl Default for SkillGraphMatcher {
    fn default() -> Self {
        Self::new(Self::default_relations())
    }
}

impl SkillGraphMatcher {
    pub fn new(relations: BTreeMap<String, Vec<String>>) -> Self {
        let mut adjacency: HashMap<String, BTreeSet<String>> = HashMap::new();

        for (hub, related) in relations {
            for skill in related {
                adjacency
                    .entry(hub.clone())
                    .or_default()
                    .insert(skill.clone());
                adjacency.entry(skill).or_default().insert(hub.clone());
            }
        }

        let nodes: Vec<String> = adjacency.keys().cloned().collect();
        let node_matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&nodes)
            .expect("Invalid skill graph node patterns");

        Self {
            adjacency,
            nodes,
            node_matcher,
        }
    }

    /// Graph similarity in 0-100. Sums 1/(1+distance) over all job-skill x
    /// resume-skill pairs, scaled by 20 and capped.
    pub fn graph_similarity(&self, job_desc: &str, resume_text: &str) -> f64 {
        let job_skills = self.extract_skills(job_desc);
        let resume_skills = self.extract_skills(resume_text);

        if job_skills.is_empty() || resume_skills.is_empty() {
            return 0.0;
        }

        let mut total_similarity = 0.0;
        for job_skill in &job_skills {
            for resume_skill in &resume_skills {
                if let Some(distance) = self.shortest_path_length(job_skill, resume_skill) {
                    total_similarity += 1.0 / (1.0 + distance as f64);
                }
            }
        }

        (total_similarity * 20.0).min(100.0)
    }

    /// Skills present in text by node-name substring membership
    fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.node_matcher
            .find_overlapping_iter(text)
            .map(|m| self.nodes[m.pattern().as_usize()].clone())
            .collect()
    }

    /// BFS shortest path length, None when disconnected
    fn shortest_path_length(&self, from: &str, to: &str) -> Option<usize> {
        if from == to {
            return Some(0);
        }

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        visited.insert(from);
        queue.push_back((from, 0));

        while let Some((node, distance)) = queue.pop_front() {
            if let Some(neighbors) = self.adjacency.get(node) {
                for neighbor in neighbors {
                    if neighbor == to {
                        return Some(distance + 1);
                    }
                    if visited.insert(neighbor) {
                        queue.push_back((neighbor, distance + 1));
                    }
                }
            }
        }

        None
    }

    fn default_relations() -> BTreeMap<String, Vec<String>> {
        let to_vec = |words: &[&str]| words.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut relations = BTreeMap::new();
        relations.insert(
            "python".to_string(),
            to_vec(&["django", "flask", "pandas", "numpy", "scikit-learn"]),
        );
        relations.insert(
            "javascript".to_string(),
            to_vec(&["react", "node", "vue", "angular", "typescript"]),
        );
        relations.insert(
            "data".to_string(),
            to_vec(&["sql", "analysis", "visualization", "tableau", "powerbi"]),
        );
        relations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_skill_scores_full_credit() {
        let matcher = SkillGraphMatcher::default();
        let score = matcher.graph_similarity("python required", "python expert");

        // Distance 0 contributes 1.0, scaled by 20
        assert!(score >= 20.0);
    }

    #[test]
    fn test_related_skills_score_partial_credit() {
        let matcher = SkillGraphMatcher::default();
        let related = matcher.graph_similarity("python required", "django specialist");
        let exact = matcher.graph_similarity("python required", "python specialist");

        assert!(related > 0.0);
        assert!(related < exact);
    }

    #[test]
    fn test_no_known_skills_scores_zero() {
        let matcher = SkillGraphMatcher::default();
        assert_eq!(matcher.graph_similarity("accountant wanted", "bartender"), 0.0);
    }

    #[test]
    fn test_disconnected_components_contribute_nothing() {
        let matcher = SkillGraphMatcher::default();
        // react is in the javascript component, flask in the python component
        let score = matcher.graph_similarity("react", "flask");

        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_score_capped_at_100() {
        let matcher = SkillGraphMatcher::default();
        let everything = "python django flask pandas numpy javascript react node vue angular typescript data sql analysis visualization tableau powerbi";
        let score = matcher.graph_similarity(everything, everything);

        assert_eq!(score, 100.0);
    }
}
