use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use powerball_db::models::WHITE_MAX;

/// Source des tirages d'une étape.
#[derive(Debug, Clone, Copy)]
pub enum Pool<'a> {
    /// Tous les numéros de 1 à 69.
    Uniform,
    /// Liste de candidats équiprobables.
    Candidates(&'a [u8]),
    /// Table de poids, index i = numéro i + 1.
    Weighted(&'a [f64]),
}

pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Ajoute jusqu'à `count` numéros absents de `chosen`, tirés dans `pool`.
///
/// Un tirage qui retombe sur un numéro déjà choisi est rejeté et recommencé,
/// ce qui revient à tirer sans remise parmi les candidats restants. Si le
/// réservoir n'a plus assez de candidats, tous ceux qui restent sont pris et
/// l'appelant complète uniformément. Renvoie le nombre de numéros ajoutés.
pub fn draw_unique_from<R: Rng + ?Sized>(
    pool: Pool<'_>,
    count: usize,
    chosen: &mut Vec<u8>,
    rng: &mut R,
) -> usize {
    if count == 0 {
        return 0;
    }

    let picked = match pool {
        Pool::Uniform => {
            let available: Vec<u8> = (1..=WHITE_MAX).filter(|n| !chosen.contains(n)).collect();
            sample_candidates(&available, count, rng)
        }
        Pool::Candidates(candidates) => {
            let mut available: Vec<u8> = Vec::with_capacity(candidates.len());
            for &n in candidates {
                if (1..=WHITE_MAX).contains(&n) && !chosen.contains(&n) && !available.contains(&n) {
                    available.push(n);
                }
            }
            sample_candidates(&available, count, rng)
        }
        Pool::Weighted(weights) => weighted_sample_without_replacement(weights, count, chosen, rng),
    };

    let added = picked.len();
    chosen.extend(picked);
    added
}

fn sample_candidates<R: Rng + ?Sized>(available: &[u8], count: usize, rng: &mut R) -> Vec<u8> {
    available.choose_multiple(rng, count).copied().collect()
}

/// Roulette à poids cumulés, sans remise.
///
/// Les poids nuls, négatifs ou non finis ne sont jamais tirés. S'arrête dès
/// qu'il ne reste plus de poids tirable.
pub fn weighted_sample_without_replacement<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    exclude: &[u8],
    rng: &mut R,
) -> Vec<u8> {
    let mut available: Vec<(u8, f64)> = weights
        .iter()
        .take(WHITE_MAX as usize)
        .enumerate()
        .map(|(i, &w)| ((i + 1) as u8, w))
        .filter(|(n, w)| w.is_finite() && *w > 0.0 && !exclude.contains(n))
        .collect();
    let mut selected = Vec::with_capacity(count);

    while selected.len() < count && !available.is_empty() {
        let dist = match WeightedIndex::new(available.iter().map(|(_, w)| *w)) {
            Ok(d) => d,
            Err(e) => {
                debug!(error = %e, "table de poids inutilisable");
                break;
            }
        };
        let idx = dist.sample(rng);
        let (number, _) = available.remove(idx);
        selected.push(number);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_fills_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut chosen = vec![1, 2];
        let added = draw_unique_from(Pool::Uniform, 3, &mut chosen, &mut rng);
        assert_eq!(added, 3);
        assert_eq!(chosen.len(), 5);
        let mut dedup = chosen.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 5);
    }

    #[test]
    fn test_candidates_skip_already_chosen() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut chosen = vec![10, 20];
        let added = draw_unique_from(Pool::Candidates(&[10, 20, 30]), 2, &mut chosen, &mut rng);
        assert_eq!(added, 1);
        assert_eq!(chosen, vec![10, 20, 30]);
    }

    #[test]
    fn test_candidates_exhausted_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut chosen = Vec::new();
        let added = draw_unique_from(Pool::Candidates(&[5, 5, 6]), 4, &mut chosen, &mut rng);
        assert_eq!(added, 2);
        chosen.sort();
        assert_eq!(chosen, vec![5, 6]);
    }

    #[test]
    fn test_candidates_ignore_out_of_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut chosen = Vec::new();
        let added = draw_unique_from(Pool::Candidates(&[0, 70, 200, 12]), 3, &mut chosen, &mut rng);
        assert_eq!(added, 1);
        assert_eq!(chosen, vec![12]);
    }

    #[test]
    fn test_zero_count_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut chosen = vec![3];
        assert_eq!(draw_unique_from(Pool::Uniform, 0, &mut chosen, &mut rng), 0);
        assert_eq!(chosen, vec![3]);
    }

    #[test]
    fn test_weighted_only_positive_weights() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut weights = vec![0.0; 69];
        weights[4] = 1.0;
        weights[9] = 2.0;
        weights[14] = f64::NAN;
        weights[19] = -1.0;
        let picked = weighted_sample_without_replacement(&weights, 5, &[], &mut rng);
        let mut sorted = picked.clone();
        sorted.sort();
        assert_eq!(sorted, vec![5, 10]);
    }

    #[test]
    fn test_weighted_respects_exclude() {
        let mut rng = StdRng::seed_from_u64(11);
        let weights = vec![1.0; 69];
        for _ in 0..50 {
            let picked = weighted_sample_without_replacement(&weights, 5, &[1, 2, 3], &mut rng);
            assert_eq!(picked.len(), 5);
            assert!(picked.iter().all(|n| ![1, 2, 3].contains(n)));
        }
    }

    #[test]
    fn test_weighted_all_zero_returns_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let picked = weighted_sample_without_replacement(&[0.0; 69], 5, &[], &mut rng);
        assert!(picked.is_empty());
    }

    #[test]
    fn test_weighted_bias() {
        // Numéro 1 pèse autant que les 68 autres réunis.
        let mut rng = StdRng::seed_from_u64(2024);
        let mut weights = vec![1.0; 69];
        weights[0] = 68.0;
        let hits = (0..2000)
            .filter(|_| weighted_sample_without_replacement(&weights, 1, &[], &mut rng)[0] == 1)
            .count();
        assert!((850..1150).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let mut a = rng_from_seed(Some(99));
        let mut b = rng_from_seed(Some(99));
        let mut ca = Vec::new();
        let mut cb = Vec::new();
        draw_unique_from(Pool::Uniform, 5, &mut ca, &mut a);
        draw_unique_from(Pool::Uniform, 5, &mut cb, &mut b);
        assert_eq!(ca, cb);
    }
}
