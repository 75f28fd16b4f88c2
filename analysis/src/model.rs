//! Turns the two teams' resource totals into a normalized advantage and a
//! win probability estimate based on the pythagorean expectation.

pub const DEFAULT_EXPONENT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Metric {
    Gold,
    Experience,
    CreepScore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Exponent of the pythagorean expectation
    pub exponent: f64,
    pub metrics: Vec<Metric>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_EXPONENT,
            metrics: vec![Metric::Gold, Metric::Experience],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamTotals {
    pub gold: f64,
    pub experience: f64,
    pub creep_score: f64,
}

impl TeamTotals {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Gold => self.gold,
            Metric::Experience => self.experience,
            Metric::CreepScore => self.creep_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub advantage: f64,
    pub win_probability: f64,
}

/// `(a - b) / (a + b)`, or 0 when there is nothing to compare.
pub fn normalized_advantage(a: f64, b: f64) -> f64 {
    if a + b == 0.0 {
        return 0.0;
    }

    ((a - b) / (a + b)).clamp(-1.0, 1.0)
}

/// `a^x / (a^x + b^x)`, where two empty sides count as an even match.
pub fn win_probability(a: f64, b: f64, exponent: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.5;
    }

    let a_pow = a.powf(exponent);
    let total = a_pow + b.powf(exponent);
    if total == 0.0 || !total.is_finite() {
        return 0.5;
    }

    a_pow / total
}

/// Averages the per metric advantage and probability over the configured
/// metrics.
pub fn estimate(config: &ModelConfig, player: &TeamTotals, enemy: &TeamTotals) -> Estimate {
    if config.metrics.is_empty() {
        return Estimate {
            advantage: 0.0,
            win_probability: 0.5,
        };
    }

    let count = config.metrics.len() as f64;
    let (advantage, win_probability) =
        config
            .metrics
            .iter()
            .fold((0.0, 0.0), |(adv, prob), metric| {
                let (a, b) = (player.get(*metric), enemy.get(*metric));
                (
                    adv + normalized_advantage(a, b),
                    prob + win_probability(a, b, config.exponent),
                )
            });

    Estimate {
        advantage: advantage / count,
        win_probability: win_probability / count,
    }
}

/// `p[i + 1] - p[i]` for every minute but the last one, which stays `None`.
pub fn momentum_impacts(win_probabilities: &[f64]) -> Vec<Option<f64>> {
    let mut impacts: Vec<_> = win_probabilities
        .windows(2)
        .map(|pair| Some(pair[1] - pair[0]))
        .collect();

    if !win_probabilities.is_empty() {
        impacts.push(None);
    }

    impacts
}
