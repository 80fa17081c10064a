//! Réservoirs statiques utilisés par les stratégies et par l'analyse.
//!
//! Ces listes sont des données d'affichage figées, pas le résultat d'un calcul.

use powerball_db::models::WHITE_MAX;

/// Ensemble « chaud » de l'analyse, aussi réservoir de la stratégie Ultimate.
pub const HOT_SET: [u8; 10] = [23, 36, 39, 21, 32, 16, 38, 18, 10, 42];

/// Ensemble « froid » de l'analyse.
pub const COLD_SET: [u8; 10] = [60, 61, 62, 63, 64, 65, 66, 67, 68, 69];

pub const HOT_POOL: [u8; 15] = [23, 36, 39, 21, 32, 16, 38, 18, 10, 42, 28, 33, 37, 52, 53];

pub const COLD_POOL: [u8; 13] = [69, 68, 67, 66, 65, 64, 63, 62, 61, 60, 13, 29, 49];

pub const BALANCED_HOT: [u8; 5] = [23, 36, 39, 21, 32];
pub const BALANCED_COLD: [u8; 5] = [65, 66, 67, 68, 69];

pub const POWER_HOT: [u8; 5] = [24, 18, 6, 20, 21];
pub const POWER_COLD: [u8; 5] = [8, 9, 12, 15, 25];

/// Poids par numéro (index i = numéro i + 1) : 1-40 → 3, 41-60 → 2, 61-69 → 1.
pub fn frequency_weights() -> Vec<f64> {
    (1..=WHITE_MAX)
        .map(|n| match n {
            1..=40 => 3.0,
            41..=60 => 2.0,
            _ => 1.0,
        })
        .collect()
}
