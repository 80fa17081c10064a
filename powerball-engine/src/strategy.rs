use rand::Rng;
use tracing::debug;

use powerball_db::models::{PICK_COUNT, POWER_MAX, Strategy, Ticket};

use crate::pools::{
    BALANCED_COLD, BALANCED_HOT, COLD_POOL, HOT_POOL, HOT_SET, frequency_weights,
};
use crate::sampler::{Pool, draw_unique_from};

/// Étape biaisée : entre `min` et `max` numéros tirés dans `pool`.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasedPick {
    pub pool: Vec<u8>,
    pub min: usize,
    pub max: usize,
}

impl BiasedPick {
    pub fn new(pool: &[u8], min: usize, max: usize) -> Self {
        Self {
            pool: pool.to_vec(),
            min,
            max,
        }
    }

    pub fn exactly(pool: &[u8], count: usize) -> Self {
        Self::new(pool, count, count)
    }

    fn target<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let lo = self.min.min(self.max);
        let hi = self.min.max(self.max);
        rng.random_range(lo..=hi)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Pools(Vec<BiasedPick>),
    Weighted(Vec<f64>),
    Uniform,
}

/// Politique de sélection des boules blanches. Quelle que soit la sélection,
/// la grille est complétée uniformément sur 1-69.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub strategy: Strategy,
    pub selection: Selection,
}

impl StrategyConfig {
    pub fn for_strategy(strategy: Strategy) -> Self {
        let selection = match strategy {
            Strategy::Ultimate => Selection::Pools(vec![BiasedPick::new(&HOT_SET, 3, 4)]),
            Strategy::Hot => Selection::Pools(vec![BiasedPick::new(&HOT_POOL, 4, 5)]),
            Strategy::Cold => Selection::Pools(vec![BiasedPick::new(&COLD_POOL, 4, 5)]),
            Strategy::Balanced => Selection::Pools(vec![
                BiasedPick::exactly(&BALANCED_HOT, 2),
                BiasedPick::exactly(&BALANCED_COLD, 2),
            ]),
            Strategy::Frequency => Selection::Weighted(frequency_weights()),
            Strategy::Random => Selection::Uniform,
        };
        Self {
            strategy,
            selection,
        }
    }
}

pub fn generate<R: Rng + ?Sized>(strategy: Strategy, rng: &mut R) -> Ticket {
    generate_with(&StrategyConfig::for_strategy(strategy), rng)
}

pub fn generate_with<R: Rng + ?Sized>(config: &StrategyConfig, rng: &mut R) -> Ticket {
    let mut chosen: Vec<u8> = Vec::with_capacity(PICK_COUNT);

    match &config.selection {
        Selection::Pools(stages) => {
            for stage in stages {
                let room = PICK_COUNT - chosen.len();
                if room == 0 {
                    break;
                }
                let wanted = stage.target(rng).min(room);
                let added = draw_unique_from(Pool::Candidates(&stage.pool), wanted, &mut chosen, rng);
                if added < wanted {
                    debug!(
                        strategy = %config.strategy,
                        wanted,
                        added,
                        "réservoir épuisé, complément uniforme"
                    );
                }
            }
        }
        Selection::Weighted(weights) => {
            let added = draw_unique_from(Pool::Weighted(weights), PICK_COUNT, &mut chosen, rng);
            if added < PICK_COUNT {
                debug!(strategy = %config.strategy, added, "poids insuffisants, complément uniforme");
            }
        }
        Selection::Uniform => {}
    }

    let remaining = PICK_COUNT - chosen.len();
    draw_unique_from(Pool::Uniform, remaining, &mut chosen, rng);

    // Le Powerball n'est jamais biaisé.
    let power_ball = rng.random_range(1..=POWER_MAX);

    let white_balls: [u8; PICK_COUNT] = match chosen.as_slice().try_into() {
        Ok(w) => w,
        Err(_) => unreachable!("le complément uniforme produit toujours 5 boules"),
    };
    match Ticket::new(white_balls, power_ball) {
        Ok(ticket) => ticket,
        Err(e) => unreachable!("grille générée invalide : {e}"),
    }
}

pub fn generate_sets<R: Rng + ?Sized>(strategy: Strategy, count: usize, rng: &mut R) -> Vec<Ticket> {
    let config = StrategyConfig::for_strategy(strategy);
    (0..count).map(|_| generate_with(&config, rng)).collect()
}

/// Une grille par stratégie, à tour de rôle, jusqu'à `count` grilles.
pub fn generate_rotation<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<(Strategy, Ticket)> {
    Strategy::ALL
        .iter()
        .cycle()
        .take(count)
        .map(|&s| (s, generate(s, rng)))
        .collect()
}
