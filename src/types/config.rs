use serde::{Deserialize, Serialize};

/// Tunables for the genetic algorithm driver. Loadable from a TOML file via
/// `parser::json::load_config_or_default`, falling back to defaults when
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elite_ratio: f64,
    pub tournament_size: usize,
    pub early_stop_fitness: f64,
    pub seed: u64,
    /// Wall-clock bound in milliseconds; `None` means no timeout.
    pub timeout_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        GaConfig {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.15,
            crossover_rate: 0.8,
            elite_ratio: 0.1,
            tournament_size: 5,
            early_stop_fitness: 95.0,
            seed: 42,
            timeout_ms: None,
        }
    }
}

impl GaConfig {
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64) * self.elite_ratio)
            .ceil()
            .max(1.0) as usize
    }
}

/// Configuration governing how the substitution engine ranks candidates and
/// how often a staff member may be pulled in as a substitute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionRules {
    pub min_advance_notice_hours: u32,
    pub max_daily_substitutions: u32,
}

impl Default for SubstitutionRules {
    fn default() -> Self {
        SubstitutionRules {
            min_advance_notice_hours: 2,
            max_daily_substitutions: 3,
        }
    }
}
