use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;

use powerball_db::models::{POWER_MAX, Strategy, Ticket, WHITE_MAX};

use crate::strategy::{StrategyConfig, generate_with};

/// Fréquences observées sur une série de grilles générées.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub draws: usize,
    pub white: Vec<u64>,
    pub power: Vec<u64>,
}

impl Default for FrequencyReport {
    fn default() -> Self {
        Self {
            draws: 0,
            white: vec![0; WHITE_MAX as usize],
            power: vec![0; POWER_MAX as usize],
        }
    }
}

impl FrequencyReport {
    pub fn record(&mut self, ticket: &Ticket) {
        self.draws += 1;
        for &b in ticket.white_balls() {
            self.white[(b - 1) as usize] += 1;
        }
        self.power[(ticket.power_ball() - 1) as usize] += 1;
    }

    /// Fréquence moyenne par numéro blanc sur `range`.
    pub fn band_mean(&self, range: RangeInclusive<u8>) -> f64 {
        let lo = (*range.start()).max(1);
        let hi = (*range.end()).min(WHITE_MAX);
        if lo > hi {
            return 0.0;
        }
        let total: u64 = (lo..=hi).map(|n| self.white[(n - 1) as usize]).sum();
        total as f64 / (hi - lo + 1) as f64
    }

    pub fn white_share(&self, number: u8) -> f64 {
        if self.draws == 0 || number < 1 || number > WHITE_MAX {
            return 0.0;
        }
        self.white[(number - 1) as usize] as f64 / self.draws as f64
    }
}

pub fn simulate<R: Rng + ?Sized>(strategy: Strategy, draws: usize, rng: &mut R) -> FrequencyReport {
    simulate_with(strategy, draws, rng, |_| {})
}

/// Comme [`simulate`], `on_draw` est appelé après chaque grille.
pub fn simulate_with<R, F>(strategy: Strategy, draws: usize, rng: &mut R, mut on_draw: F) -> FrequencyReport
where
    R: Rng + ?Sized,
    F: FnMut(usize),
{
    let config = StrategyConfig::for_strategy(strategy);
    let mut report = FrequencyReport::default();
    for i in 0..draws {
        let ticket = generate_with(&config, rng);
        report.record(&ticket);
        on_draw(i + 1);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::{POWER_COLD, POWER_HOT};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_frequency_ratio_close_to_three() {
        let mut rng = StdRng::seed_from_u64(20240101);
        let report = simulate(Strategy::Frequency, 100_000, &mut rng);
        let low = report.band_mean(1..=40);
        let high = report.band_mean(61..=69);
        let ratio = low / high;
        assert!((2.5..3.5).contains(&ratio), "ratio = {}", ratio);
    }

    #[test]
    fn test_random_is_flat() {
        let mut rng = StdRng::seed_from_u64(31);
        let report = simulate(Strategy::Random, 50_000, &mut rng);
        let ratio = report.band_mean(1..=40) / report.band_mean(61..=69);
        assert!((0.9..1.1).contains(&ratio), "ratio = {}", ratio);
    }

    #[test]
    fn test_totals_consistent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ticks = 0;
        let report = simulate_with(Strategy::Balanced, 300, &mut rng, |_| ticks += 1);
        assert_eq!(ticks, 300);
        assert_eq!(report.draws, 300);
        assert_eq!(report.white.iter().sum::<u64>(), 1500);
        assert_eq!(report.power.iter().sum::<u64>(), 300);
    }

    #[test]
    fn test_power_ball_stays_uniform_for_biased_strategies() {
        let draws = 52_000;
        let expected = draws as f64 / POWER_MAX as f64;
        for (strategy, seed) in [(Strategy::Cold, 11), (Strategy::Ultimate, 12)] {
            let mut rng = StdRng::seed_from_u64(seed);
            let report = simulate(strategy, draws, &mut rng);
            assert_eq!(report.power.iter().sum::<u64>(), draws as u64);

            // 10 valeurs « hot » ou « cold » sur 26.
            let tagged: u64 = POWER_HOT
                .iter()
                .chain(POWER_COLD.iter())
                .map(|&pb| report.power[(pb - 1) as usize])
                .sum();
            let tagged_expected = expected * 10.0;
            assert!(
                (tagged as f64 - tagged_expected).abs() < tagged_expected * 0.05,
                "{}: {} au lieu de ~{}",
                strategy,
                tagged,
                tagged_expected
            );

            for (i, &count) in report.power.iter().enumerate() {
                assert!(
                    (count as f64 - expected).abs() < expected * 0.15,
                    "{}: PB {} tiré {} fois",
                    strategy,
                    i + 1,
                    count
                );
            }
        }
    }

    #[test]
    fn test_band_mean_clamps() {
        let report = FrequencyReport::default();
        assert_eq!(report.band_mean(0..=200), 0.0);
        assert_eq!(report.band_mean(10..=5), 0.0);
        assert_eq!(report.white_share(0), 0.0);
    }
}
