use std::fmt;

use serde::Serialize;

use powerball_db::models::{PICK_COUNT, Ticket};

use crate::pools::{COLD_SET, HOT_SET, POWER_COLD, POWER_HOT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerballStatus {
    Hot,
    Cold,
    Neutral,
}

impl PowerballStatus {
    pub fn classify(power_ball: u8) -> Self {
        if POWER_HOT.contains(&power_ball) {
            PowerballStatus::Hot
        } else if POWER_COLD.contains(&power_ball) {
            PowerballStatus::Cold
        } else {
            PowerballStatus::Neutral
        }
    }
}

impl fmt::Display for PowerballStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerballStatus::Hot => write!(f, "hot"),
            PowerballStatus::Cold => write!(f, "cold"),
            PowerballStatus::Neutral => write!(f, "neutral"),
        }
    }
}

/// Tranches de somme des boules blanches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SumBand {
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
    OutOfRange,
}

impl SumBand {
    pub fn of(sum: u32) -> Self {
        match sum {
            50..=99 => SumBand::Low,
            100..=149 => SumBand::MediumLow,
            150..=199 => SumBand::Medium,
            200..=249 => SumBand::MediumHigh,
            250..=299 => SumBand::High,
            _ => SumBand::OutOfRange,
        }
    }
}

impl fmt::Display for SumBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumBand::Low => write!(f, "Basse (50-99)"),
            SumBand::MediumLow => write!(f, "Moyenne-basse (100-149)"),
            SumBand::Medium => write!(f, "Moyenne (150-199)"),
            SumBand::MediumHigh => write!(f, "Moyenne-haute (200-249)"),
            SumBand::High => write!(f, "Haute (250-299)"),
            SumBand::OutOfRange => write!(f, "Hors tranches"),
        }
    }
}

/// Plus grand numéro de la moitié basse (1-34 / 35-69).
const LOW_MAX: u8 = 34;

const PRIMES: [u8; 19] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67];
const FIBONACCI: [u8; 9] = [1, 2, 3, 5, 8, 13, 21, 34, 55];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub hot_count: usize,
    pub cold_count: usize,
    pub neutral_count: usize,
    pub sum: u32,
    pub even_count: usize,
    pub powerball_status: PowerballStatus,
    /// Paires de numéros qui se suivent (12-13).
    pub consecutive_pairs: usize,
    pub low_count: usize,
    pub prime_count: usize,
    pub fibonacci_count: usize,
    /// Variance (population) des 4 écarts entre boules triées.
    pub gap_variance: f64,
}

impl AnalysisSummary {
    pub fn odd_count(&self) -> usize {
        PICK_COUNT - self.even_count
    }

    /// Répartition pair/impair, ex. `3E-2O`.
    pub fn parity_pattern(&self) -> String {
        format!("{}E-{}O", self.even_count, self.odd_count())
    }

    pub fn sum_band(&self) -> SumBand {
        SumBand::of(self.sum)
    }

    pub fn high_count(&self) -> usize {
        PICK_COUNT - self.low_count
    }

    /// Répartition bas/haut, ex. `2B-3H`.
    pub fn low_high_pattern(&self) -> String {
        format!("{}B-{}H", self.low_count, self.high_count())
    }
}

fn gap_variance(balls: &[u8]) -> f64 {
    let gaps: Vec<f64> = balls.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    if gaps.is_empty() {
        return 0.0;
    }
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64
}

pub fn analyze(ticket: &Ticket) -> AnalysisSummary {
    let balls = ticket.white_balls();
    let hot_count = balls.iter().filter(|b| HOT_SET.contains(b)).count();
    let cold_count = balls.iter().filter(|b| COLD_SET.contains(b)).count();

    AnalysisSummary {
        hot_count,
        cold_count,
        neutral_count: PICK_COUNT - hot_count - cold_count,
        sum: balls.iter().map(|&b| b as u32).sum(),
        even_count: balls.iter().filter(|&&b| b % 2 == 0).count(),
        powerball_status: PowerballStatus::classify(ticket.power_ball()),
        consecutive_pairs: balls.windows(2).filter(|w| w[1] - w[0] == 1).count(),
        low_count: balls.iter().filter(|&&b| b <= LOW_MAX).count(),
        prime_count: balls.iter().filter(|b| PRIMES.contains(b)).count(),
        fibonacci_count: balls.iter().filter(|b| FIBONACCI.contains(b)).count(),
        gap_variance: gap_variance(balls),
    }
}
