//! Generational evolutionary search over a 3-dimensional weight vector

use crate::config::OptimizerConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Skills/experience/education weights. Coordinates are non-negative and
/// sum to 1 within floating tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl WeightVector {
    pub fn new(skills: f64, experience: f64, education: f64) -> Self {
        let mut v = Self {
            skills,
            experience,
            education,
        };
        v.renormalize();
        v
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.skills, self.experience, self.education]
    }

    fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Clamp coordinates to [0, 1] and rescale to sum 1
    fn renormalize(&mut self) {
        self.skills = self.skills.clamp(0.0, 1.0);
        self.experience = self.experience.clamp(0.0, 1.0);
        self.education = self.education.clamp(0.0, 1.0);

        let sum = self.skills + self.experience + self.education;
        if sum > 0.0 {
            self.skills /= sum;
            self.experience /= sum;
            self.education /= sum;
        } else {
            self.skills = 1.0 / 3.0;
            self.experience = 1.0 / 3.0;
            self.education = 1.0 / 3.0;
        }
    }

    pub fn is_valid(&self, tolerance: f64) -> bool {
        let sum = self.skills + self.experience + self.education;
        self.skills >= 0.0
            && self.experience >= 0.0
            && self.education >= 0.0
            && (sum - 1.0).abs() < tolerance
    }
}

/// Per-run convergence log returned alongside the best weight vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaReport {
    pub best_weights: WeightVector,
    pub best_fitness_history: Vec<f64>,
    pub avg_fitness_history: Vec<f64>,
    pub diversity_history: Vec<f64>,
    /// (final - initial) best fitness divided by generation count
    pub convergence_rate: f64,
    pub final_fitness: f64,
    pub generations: usize,
    pub population_size: usize,
    pub evaluations: usize,
    pub execution_time_secs: f64,
}

pub struct GaOptimizer {
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
}

impl Default for GaOptimizer {
    fn default() -> Self {
        Self::new(20, 10, 0.1)
    }
}

impl GaOptimizer {
    pub fn new(population_size: usize, generations: usize, mutation_rate: f64) -> Self {
        Self {
            population_size: population_size.max(2),
            generations: generations.max(1),
            mutation_rate: mutation_rate.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::new(
            config.population_size,
            config.generations,
            config.mutation_rate,
        )
    }

    /// Run the search with the default fitness heuristic: distance from the
    /// skills-heavy optimal profile, penalized for drifting off the simplex.
    pub fn optimize(&self) -> GaReport {
        self.optimize_with(default_fitness)
    }

    /// Run the search against a caller-supplied fitness function.
    pub fn optimize_with<F>(&self, fitness: F) -> GaReport
    where
        F: Fn(&WeightVector) -> f64,
    {
        let start = Instant::now();
        let mut rng = rand::thread_rng();

        let mut population: Vec<WeightVector> = (0..self.population_size)
            .map(|_| random_simplex_point(&mut rng))
            .collect();

        let mut best_history = Vec::with_capacity(self.generations);
        let mut avg_history = Vec::with_capacity(self.generations);
        let mut diversity_history = Vec::with_capacity(self.generations);
        let mut best = population[0];

        for generation in 0..self.generations {
            let fitness_scores: Vec<f64> = population.iter().map(&fitness).collect();

            let (best_index, best_fitness) = fitness_scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(i, f)| (i, *f))
                .unwrap_or((0, 0.0));
            let avg_fitness = fitness_scores.iter().sum::<f64>() / fitness_scores.len() as f64;
            let diversity = population_diversity(&population);

            best = population[best_index];
            best_history.push(best_fitness);
            avg_history.push(avg_fitness);
            diversity_history.push(diversity);

            log::debug!(
                "Generation {}: best={:.2}, avg={:.2}, diversity={:.4}",
                generation + 1,
                best_fitness,
                avg_fitness,
                diversity
            );

            // Elitism: the best individual survives unconditionally
            let mut next_population = vec![best];
            while next_population.len() < self.population_size {
                let parent1 = tournament_select(&population, &fitness_scores, &mut rng);
                let parent2 = tournament_select(&population, &fitness_scores, &mut rng);

                let mut child = blend_crossover(&parent1, &parent2);
                self.mutate(&mut child, &mut rng);
                next_population.push(child);
            }
            population = next_population;
        }

        let final_fitness = best_history.last().copied().unwrap_or(0.0);
        let initial_fitness = best_history.first().copied().unwrap_or(0.0);
        let convergence_rate = if best_history.len() > 1 {
            (final_fitness - initial_fitness) / best_history.len() as f64
        } else {
            0.0
        };

        GaReport {
            best_weights: best,
            best_fitness_history: best_history,
            avg_fitness_history: avg_history,
            diversity_history,
            convergence_rate,
            final_fitness,
            generations: self.generations,
            population_size: self.population_size,
            evaluations: self.generations * self.population_size,
            execution_time_secs: start.elapsed().as_secs_f64(),
        }
    }

    /// Gaussian perturbation of one random coordinate, then renormalize
    fn mutate<R: Rng>(&self, individual: &mut WeightVector, rng: &mut R) {
        if rng.gen::<f64>() >= self.mutation_rate {
            return;
        }

        let mut values = individual.as_array();
        let index = rng.gen_range(0..3);
        values[index] += gaussian(rng, 0.0, 0.1);
        *individual = WeightVector::from_array(values);
    }
}

/// Default fitness: closeness to the skills > experience > education profile
/// minus a sum-to-one penalty, floored at zero.
pub fn default_fitness(weights: &WeightVector) -> f64 {
    let optimal = [0.6, 0.3, 0.1];
    let values = weights.as_array();

    let sum: f64 = values.iter().sum();
    let penalty = (1.0 - sum).abs() * 100.0;

    let dist: f64 = values
        .iter()
        .zip(optimal.iter())
        .map(|(w, o)| (w - o).powi(2))
        .sum::<f64>()
        .sqrt();

    (100.0 - dist * 50.0 - penalty).max(0.0)
}

/// Uniform sample from the 3-simplex (Dirichlet with unit concentration)
fn random_simplex_point<R: Rng>(rng: &mut R) -> WeightVector {
    let a = -rng.gen::<f64>().max(f64::MIN_POSITIVE).ln();
    let b = -rng.gen::<f64>().max(f64::MIN_POSITIVE).ln();
    let c = -rng.gen::<f64>().max(f64::MIN_POSITIVE).ln();
    WeightVector::new(a, b, c)
}

fn tournament_select<R: Rng>(
    population: &[WeightVector],
    fitness_scores: &[f64],
    rng: &mut R,
) -> WeightVector {
    let k = 3.min(population.len());
    let indices: Vec<usize> = (0..population.len()).collect();
    let contenders: Vec<usize> = indices.choose_multiple(rng, k).copied().collect();

    let winner = contenders
        .into_iter()
        .max_by(|a, b| {
            fitness_scores[*a]
                .partial_cmp(&fitness_scores[*b])
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(0);
    population[winner]
}

/// Blend crossover: convex step from parent1 toward parent2, renormalized
fn blend_crossover(parent1: &WeightVector, parent2: &WeightVector) -> WeightVector {
    const ALPHA: f64 = 0.5;
    let p1 = parent1.as_array();
    let p2 = parent2.as_array();

    WeightVector::from_array([
        p1[0] + ALPHA * (p2[0] - p1[0]),
        p1[1] + ALPHA * (p2[1] - p1[1]),
        p1[2] + ALPHA * (p2[2] - p1[2]),
    ])
}

/// Mean per-coordinate standard deviation across the population
fn population_diversity(population: &[WeightVector]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }

    let n = population.len() as f64;
    let mut total = 0.0;

    for coord in 0..3 {
        let values: Vec<f64> = population.iter().map(|w| w.as_array()[coord]).collect();
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        total += variance.sqrt();
    }

    total / 3.0
}

/// Box-Muller transform for a single normal sample
fn gaussian<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + z * std_dev
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn test_best_weights_are_valid_simplex_point() {
        let optimizer = GaOptimizer::new(10, 5, 0.2);
        let report = optimizer.optimize();

        assert!(report.best_weights.is_valid(TOLERANCE));
    }

    #[test]
    fn test_histories_cover_all_generations() {
        let optimizer = GaOptimizer::new(8, 6, 0.1);
        let report = optimizer.optimize();

        assert_eq!(report.best_fitness_history.len(), 6);
        assert_eq!(report.avg_fitness_history.len(), 6);
        assert_eq!(report.diversity_history.len(), 6);
        assert_eq!(report.evaluations, 48);
    }

    #[test]
    fn test_search_approaches_optimal_profile() {
        let optimizer = GaOptimizer::new(30, 25, 0.2);
        let report = optimizer.optimize();

        // The default fitness pulls toward (0.6, 0.3, 0.1); after 25
        // generations the best individual should be in the right region
        assert!(report.best_weights.skills > report.best_weights.education);
        assert!(report.final_fitness > 80.0);
    }

    #[test]
    fn test_elitism_keeps_best_fitness_monotone() {
        let optimizer = GaOptimizer::new(15, 10, 0.3);
        let report = optimizer.optimize();

        for window in report.best_fitness_history.windows(2) {
            assert!(window[1] >= window[0] - TOLERANCE);
        }
    }

    #[test]
    fn test_custom_fitness_function() {
        let optimizer = GaOptimizer::new(10, 5, 0.1);
        // Reward education-heavy vectors
        let report = optimizer.optimize_with(|w| w.education * 100.0);

        assert!(report.best_weights.education > 0.3);
        assert!(report.best_weights.is_valid(TOLERANCE));
    }

    #[test]
    fn test_weight_vector_renormalization() {
        let v = WeightVector::new(2.0, 2.0, 0.0);

        assert!(v.is_valid(TOLERANCE));
        assert!((v.skills - 0.5).abs() < TOLERANCE);
        assert_eq!(v.education, 0.0);
    }

    #[test]
    fn test_degenerate_vector_falls_back_to_uniform() {
        let v = WeightVector::new(0.0, 0.0, 0.0);

        assert!(v.is_valid(TOLERANCE));
        assert!((v.skills - 1.0 / 3.0).abs() < TOLERANCE);
    }
}
