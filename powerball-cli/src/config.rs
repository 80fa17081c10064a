use std::path::PathBuf;

use anyhow::{Context, Result};

use powerball_db::db::{DB_PATH_ENV, default_db_path};
use powerball_db::models::Strategy;

pub const STRATEGY_ENV: &str = "POWERBALL_STRATEGY";
pub const COUNT_ENV: &str = "POWERBALL_COUNT";

#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    /// Stratégie utilisée quand `generate` est lancé sans `--strategy`.
    pub default_strategy: Strategy,
    pub default_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            default_strategy: Strategy::Ultimate,
            default_count: 1,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Une valeur présente mais invalide est une erreur, pas un retour au défaut.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut out = Self::default();

        if let Some(p) = lookup(DB_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            out.db_path = PathBuf::from(p);
        }

        if let Some(s) = lookup(STRATEGY_ENV) {
            out.default_strategy = s
                .parse::<Strategy>()
                .with_context(|| format!("{} invalide", STRATEGY_ENV))?;
        }

        if let Some(s) = lookup(COUNT_ENV) {
            let n: usize = s
                .trim()
                .parse()
                .with_context(|| format!("{} invalide : '{}'", COUNT_ENV, s))?;
            anyhow::ensure!(n > 0, "{} doit être positif", COUNT_ENV);
            out.default_count = n;
        }

        Ok(out)
    }
}
