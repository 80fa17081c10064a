mod config;
mod display;
mod heat;

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use powerball_db::db::{
    clear_saved_tickets, count_saved_tickets, delete_saved_ticket, fetch_saved_tickets,
    increment_counter, migrate, open_db, read_counter, save_ticket,
};
use powerball_db::models::{Strategy, Ticket};
use powerball_db::rusqlite::Connection;
use powerball_engine::sampler::rng_from_seed;
use powerball_engine::simulate::simulate_with;
use powerball_engine::{AnalysisSummary, analyze, generate_rotation, generate_sets};

use crate::config::Settings;
use crate::display::{
    display_analysis, display_counter, display_disclaimer, display_heat_rankings, display_saved,
    display_simulation, display_strategies, display_tickets,
};

#[derive(Parser)]
#[command(name = "powerball", about = "Générateur de grilles Powerball")]
struct Cli {
    /// Sortie JSON au lieu des tableaux
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Générer des grilles
    Generate(GenerateArgs),

    /// Analyser une grille (5 boules + Powerball)
    Analyze {
        /// 6 nombres : 5 boules puis le Powerball
        numbers: Vec<u8>,
    },

    /// Lister les stratégies disponibles
    Strategies,

    /// Afficher les indices de chaleur
    Stats,

    /// Simuler un grand nombre de grilles et mesurer les fréquences
    Simulate {
        #[arg(short, long, default_value = "frequency")]
        strategy: Strategy,

        /// Nombre de grilles simulées
        #[arg(short = 'n', long, default_value = "100000")]
        draws: usize,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Gérer les grilles enregistrées
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Afficher le compteur global de grilles
    Counter,

    /// Afficher le chemin de la base de données
    DbPath,
}

#[derive(Subcommand)]
enum SavedAction {
    /// Lister les dernières grilles enregistrées
    List {
        #[arg(short, long, default_value = "20")]
        last: u32,
    },
    /// Supprimer une grille
    Delete { id: i64 },
    /// Tout supprimer
    Clear,
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Stratégie (ultimate, hot, cold, balanced, frequency, random)
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Nombre de grilles
    #[arg(short, long)]
    count: Option<usize>,

    /// Seed pour la reproductibilité
    #[arg(long)]
    seed: Option<u64>,

    /// Alterner toutes les stratégies
    #[arg(short, long, conflicts_with = "strategy")]
    all: bool,

    /// Enregistrer les grilles générées
    #[arg(long)]
    save: bool,
}

#[derive(Serialize)]
struct GeneratedSet {
    strategy: Strategy,
    ticket: Ticket,
    analysis: AnalysisSummary,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn connect(path: &Path) -> Result<Connection> {
    let conn = open_db(path)?;
    migrate(&conn)?;
    Ok(conn)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    debug!(?settings, "configuration chargée");

    // La base n'est indispensable qu'aux grilles enregistrées : le reste
    // fonctionne sans elle.
    let conn = match connect(&settings.db_path) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "base indisponible");
            None
        }
    };

    match cli.command {
        Command::Generate(args) => cmd_generate(conn.as_ref(), &settings, &args, cli.json),
        Command::Analyze { numbers } => cmd_analyze(&numbers, cli.json),
        Command::Strategies => {
            display_strategies(settings.default_strategy);
            Ok(())
        }
        Command::Stats => {
            display_heat_rankings(&heat::white_rankings(), &heat::power_rankings());
            display_disclaimer();
            Ok(())
        }
        Command::Simulate {
            strategy,
            draws,
            seed,
        } => cmd_simulate(strategy, draws, seed, cli.json),
        Command::Saved { action } => cmd_saved(require_db(conn.as_ref())?, action, cli.json),
        Command::Counter => {
            display_counter(current_count(conn.as_ref()));
            Ok(())
        }
        Command::DbPath => {
            println!("{}", settings.db_path.display());
            Ok(())
        }
    }
}

fn require_db(conn: Option<&Connection>) -> Result<&Connection> {
    match conn {
        Some(c) => Ok(c),
        None => bail!("Base de données indisponible (voir POWERBALL_DB)"),
    }
}

/// Compteur affiché : 0 si la base ne répond pas.
fn current_count(conn: Option<&Connection>) -> u64 {
    let Some(conn) = conn else {
        return 0;
    };
    read_counter(conn).unwrap_or_else(|e| {
        warn!(error = %format!("{:#}", e), "lecture du compteur impossible");
        0
    })
}

fn bump_counter(conn: Option<&Connection>, by: usize) -> Option<u64> {
    let conn = conn?;
    match increment_counter(conn, by as u64) {
        Ok(count) => Some(count),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "incrément du compteur impossible");
            None
        }
    }
}

fn cmd_generate(
    conn: Option<&Connection>,
    settings: &Settings,
    args: &GenerateArgs,
    json: bool,
) -> Result<()> {
    let count = args.count.unwrap_or(settings.default_count);
    if count == 0 {
        bail!("Le nombre de grilles doit être positif");
    }
    if args.save && conn.is_none() {
        bail!("Impossible d'enregistrer : base de données indisponible");
    }

    let mut rng = rng_from_seed(args.seed);
    let tickets: Vec<(Strategy, Ticket)> = if args.all {
        generate_rotation(count, &mut rng)
    } else {
        let strategy = args.strategy.unwrap_or(settings.default_strategy);
        generate_sets(strategy, count, &mut rng)
            .into_iter()
            .map(|t| (strategy, t))
            .collect()
    };

    let sets: Vec<(Strategy, Ticket, AnalysisSummary)> = tickets
        .into_iter()
        .map(|(s, t)| (s, t, analyze(&t)))
        .collect();

    if args.save {
        let conn = require_db(conn)?;
        let tx = conn
            .unchecked_transaction()
            .context("Impossible de démarrer la transaction")?;
        for (strategy, ticket, _) in &sets {
            save_ticket(&tx, strategy.name(), ticket)?;
        }
        tx.commit().context("Échec du commit")?;
    }

    let total = bump_counter(conn, sets.len());

    if json {
        let out: Vec<GeneratedSet> = sets
            .iter()
            .map(|&(strategy, ticket, analysis)| GeneratedSet {
                strategy,
                ticket,
                analysis,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    display_tickets(&sets);
    if args.save {
        println!("{} grille(s) enregistrée(s).", sets.len());
    }
    if let Some(total) = total {
        display_counter(total);
    }
    display_disclaimer();
    Ok(())
}

fn cmd_analyze(numbers: &[u8], json: bool) -> Result<()> {
    let ticket = Ticket::from_numbers(numbers)?;
    let summary = analyze(&ticket);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        display_analysis(&ticket, &summary);
    }
    Ok(())
}

fn cmd_simulate(strategy: Strategy, draws: usize, seed: Option<u64>, json: bool) -> Result<()> {
    if draws == 0 {
        bail!("Le nombre de grilles simulées doit être positif");
    }

    let mut rng = rng_from_seed(seed);
    let pb = ProgressBar::new(draws as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .context("Gabarit de progression invalide")?
            .progress_chars("=> "),
    );

    let step = (draws / 100).max(1);
    let report = simulate_with(strategy, draws, &mut rng, |done| {
        if done % step == 0 {
            pb.set_position(done as u64);
        }
    });
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_simulation(strategy, &report);
    }
    Ok(())
}

fn cmd_saved(conn: &Connection, action: SavedAction, json: bool) -> Result<()> {
    match action {
        SavedAction::List { last } => {
            let saved = fetch_saved_tickets(conn, last)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                display_saved(&saved);
                println!("Total : {} grille(s) enregistrée(s)", count_saved_tickets(conn)?);
            }
        }
        SavedAction::Delete { id } => {
            if delete_saved_ticket(conn, id)? {
                println!("Grille {} supprimée.", id);
            } else {
                bail!("Aucune grille avec l'identifiant {}", id);
            }
        }
        SavedAction::Clear => {
            let removed = clear_saved_tickets(conn)?;
            println!("{} grille(s) supprimée(s).", removed);
        }
    }
    Ok(())
}
