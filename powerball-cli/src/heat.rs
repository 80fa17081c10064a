//! Indices de chaleur affichés par `stats`.
//!
//! Données figées : aucun historique n'est importé ni recalculé.

use std::fmt;

/// (numéro, z-score)
const WHITE_HEAT: [(u8, f64); 20] = [
    (23, 2.9),
    (36, 2.7),
    (39, 2.6),
    (21, 2.5),
    (32, 2.4),
    (16, 2.2),
    (38, 2.1),
    (18, 2.1),
    (10, 2.0),
    (42, 2.0),
    (60, -2.1),
    (62, -2.2),
    (61, -2.3),
    (63, -2.4),
    (64, -2.5),
    (65, -2.6),
    (66, -2.7),
    (67, -2.8),
    (68, -2.9),
    (69, -3.1),
];

const POWER_HEAT: [(u8, f64); 10] = [
    (24, 1.9),
    (18, 1.8),
    (6, 1.7),
    (20, 1.6),
    (21, 1.5),
    (8, -1.5),
    (9, -1.6),
    (12, -1.7),
    (15, -1.8),
    (25, -2.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatCategory {
    BlazingHot,
    Hot,
    Warm,
    Neutral,
    Cool,
    Cold,
    Freezing,
}

impl HeatCategory {
    pub fn from_z(z: f64) -> Self {
        if z >= 2.0 {
            HeatCategory::BlazingHot
        } else if z >= 1.0 {
            HeatCategory::Hot
        } else if z >= 0.5 {
            HeatCategory::Warm
        } else if z >= -0.5 {
            HeatCategory::Neutral
        } else if z >= -1.0 {
            HeatCategory::Cool
        } else if z >= -2.0 {
            HeatCategory::Cold
        } else {
            HeatCategory::Freezing
        }
    }
}

impl fmt::Display for HeatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatCategory::BlazingHot => write!(f, "🔥 BRÛLANT"),
            HeatCategory::Hot => write!(f, "🔥 CHAUD"),
            HeatCategory::Warm => write!(f, "🌡️ TIÈDE"),
            HeatCategory::Neutral => write!(f, "🌡️ NEUTRE"),
            HeatCategory::Cool => write!(f, "❄️ FRAIS"),
            HeatCategory::Cold => write!(f, "❄️ FROID"),
            HeatCategory::Freezing => write!(f, "🧊 GELÉ"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeatEntry {
    pub number: u8,
    pub z_score: f64,
    pub heat_index: f64,
    pub category: HeatCategory,
}

/// z = +3 → 100, z = 0 → 50, z = -3 → 0.
pub fn heat_index(z: f64) -> f64 {
    (50.0 + z * 16.67).clamp(0.0, 100.0)
}

fn rank(data: &[(u8, f64)]) -> Vec<HeatEntry> {
    let mut entries: Vec<HeatEntry> = data
        .iter()
        .map(|&(number, z_score)| HeatEntry {
            number,
            z_score,
            heat_index: heat_index(z_score),
            category: HeatCategory::from_z(z_score),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.heat_index
            .partial_cmp(&a.heat_index)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

pub fn white_rankings() -> Vec<HeatEntry> {
    rank(&WHITE_HEAT)
}

pub fn power_rankings() -> Vec<HeatEntry> {
    rank(&POWER_HEAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerball_engine::pools::{COLD_SET, HOT_SET, POWER_COLD, POWER_HOT};

    #[test]
    fn test_heat_index_scale() {
        assert!((heat_index(0.0) - 50.0).abs() < 1e-9);
        assert!((heat_index(3.0) - 100.0).abs() < 0.02);
        assert_eq!(heat_index(5.0), 100.0);
        assert_eq!(heat_index(-4.0), 0.0);
    }

    #[test]
    fn test_categories() {
        assert_eq!(HeatCategory::from_z(2.0), HeatCategory::BlazingHot);
        assert_eq!(HeatCategory::from_z(1.2), HeatCategory::Hot);
        assert_eq!(HeatCategory::from_z(0.7), HeatCategory::Warm);
        assert_eq!(HeatCategory::from_z(0.0), HeatCategory::Neutral);
        assert_eq!(HeatCategory::from_z(-0.8), HeatCategory::Cool);
        assert_eq!(HeatCategory::from_z(-2.0), HeatCategory::Cold);
        assert_eq!(HeatCategory::from_z(-2.5), HeatCategory::Freezing);
    }

    #[test]
    fn test_rankings_sorted() {
        let ranks = white_rankings();
        assert_eq!(ranks.len(), 20);
        assert_eq!(ranks[0].number, 23);
        assert_eq!(ranks[19].number, 69);
        assert!(ranks.windows(2).all(|w| w[0].heat_index >= w[1].heat_index));
    }

    #[test]
    fn test_static_data_matches_engine_sets() {
        for e in white_rankings() {
            if e.z_score > 0.0 {
                assert!(HOT_SET.contains(&e.number), "{}", e.number);
            } else {
                assert!(COLD_SET.contains(&e.number), "{}", e.number);
            }
        }
        for e in power_rankings() {
            if e.z_score > 0.0 {
                assert!(POWER_HOT.contains(&e.number));
            } else {
                assert!(POWER_COLD.contains(&e.number));
            }
        }
    }
}
