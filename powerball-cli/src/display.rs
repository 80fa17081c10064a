use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use powerball_db::models::{SavedTicket, Strategy, Ticket};
use powerball_engine::simulate::FrequencyReport;
use powerball_engine::{AnalysisSummary, PowerballStatus};

use crate::heat::{HeatCategory, HeatEntry};

pub fn strategy_label(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Ultimate => "Ultimate",
        Strategy::Hot => "Numéros chauds",
        Strategy::Cold => "Numéros froids",
        Strategy::Balanced => "Équilibrée",
        Strategy::Frequency => "Pondérée par fréquence",
        Strategy::Random => "Aléatoire",
    }
}

fn strategy_description(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Ultimate => "3 ou 4 numéros parmi les 10 plus chauds, complétés au hasard",
        Strategy::Hot => "4 ou 5 numéros parmi les 15 les plus sortis",
        Strategy::Cold => "4 ou 5 numéros parmi les 13 les moins sortis (contrarien)",
        Strategy::Balanced => "2 chauds, 2 froids, 1 au hasard",
        Strategy::Frequency => "Roulette pondérée : 1-40 ×3, 41-60 ×2, 61-69 ×1",
        Strategy::Random => "5 numéros uniformes, aucun biais",
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_balls(balls: &[u8]) -> String {
    balls
        .iter()
        .map(|b| format!("{:2}", b))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn status_cell(status: PowerballStatus) -> Cell {
    let color = match status {
        PowerballStatus::Hot => Color::Red,
        PowerballStatus::Cold => Color::Cyan,
        PowerballStatus::Neutral => Color::White,
    };
    Cell::new(status.to_string()).fg(color)
}

pub fn display_disclaimer() {
    println!("\nAvertissement : chaque combinaison a exactement la même probabilité de sortir.");
    println!("Les stratégies sont cosmétiques et ne prédisent rien.");
}

pub fn display_tickets(sets: &[(Strategy, Ticket, AnalysisSummary)]) {
    println!("\n🎲 Grilles générées\n");

    let mut table = new_table(vec![
        "#", "Stratégie", "Boules", "PB", "Chauds/Froids/Neutres", "Somme", "Pair/Impair", "Statut PB",
    ]);

    for (i, (strategy, ticket, summary)) in sets.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(strategy_label(*strategy)),
            Cell::new(format_balls(ticket.white_balls())),
            Cell::new(format!("{:2}", ticket.power_ball())).fg(Color::Red),
            Cell::new(format!(
                "{}/{}/{}",
                summary.hot_count, summary.cold_count, summary.neutral_count
            )),
            Cell::new(summary.sum),
            Cell::new(summary.parity_pattern()),
            status_cell(summary.powerball_status),
        ]);
    }
    println!("{table}");
}

pub fn display_analysis(ticket: &Ticket, summary: &AnalysisSummary) {
    println!("\n🔎 Analyse de la grille {}\n", ticket);

    let mut table = new_table(vec!["Mesure", "Valeur"]);
    table.add_row(vec![Cell::new("Numéros chauds"), Cell::new(summary.hot_count)]);
    table.add_row(vec![Cell::new("Numéros froids"), Cell::new(summary.cold_count)]);
    table.add_row(vec![Cell::new("Numéros neutres"), Cell::new(summary.neutral_count)]);
    table.add_row(vec![Cell::new("Somme"), Cell::new(summary.sum)]);
    table.add_row(vec![Cell::new("Tranche de somme"), Cell::new(summary.sum_band())]);
    table.add_row(vec![Cell::new("Pair/Impair"), Cell::new(summary.parity_pattern())]);
    table.add_row(vec![Cell::new("Bas/Haut (1-34 / 35-69)"), Cell::new(summary.low_high_pattern())]);
    table.add_row(vec![Cell::new("Paires consécutives"), Cell::new(summary.consecutive_pairs)]);
    table.add_row(vec![Cell::new("Nombres premiers"), Cell::new(summary.prime_count)]);
    table.add_row(vec![Cell::new("Nombres de Fibonacci"), Cell::new(summary.fibonacci_count)]);
    table.add_row(vec![Cell::new("Variance des écarts"), Cell::new(format!("{:.2}", summary.gap_variance))]);
    table.add_row(vec![Cell::new("Powerball"), status_cell(summary.powerball_status)]);
    println!("{table}");
}

pub fn display_strategies(default: Strategy) {
    let mut table = new_table(vec!["Nom", "Stratégie", "Principe"]);
    for strategy in Strategy::ALL {
        let name = if strategy == default {
            format!("{} (défaut)", strategy.name())
        } else {
            strategy.name().to_string()
        };
        table.add_row(vec![name.as_str(), strategy_label(strategy), strategy_description(strategy)]);
    }
    println!("{table}");
    println!("Le Powerball est toujours tiré uniformément entre 1 et 26.");
}

pub fn display_heat_rankings(white: &[HeatEntry], power: &[HeatEntry]) {
    println!("\n🔥 Indice de chaleur (données statiques)\n");

    println!("── Boules blanches (1-69) ──");
    display_heat_table(white);

    println!("\n── Powerball (1-26) ──");
    display_heat_table(power);
}

fn display_heat_table(entries: &[HeatEntry]) {
    let mut table = new_table(vec!["Rang", "Numéro", "Indice", "Catégorie", "Z-score"]);
    for (i, e) in entries.iter().enumerate() {
        let color = match e.category {
            HeatCategory::BlazingHot | HeatCategory::Hot => Color::Red,
            HeatCategory::Warm => Color::Yellow,
            HeatCategory::Neutral => Color::White,
            HeatCategory::Cool | HeatCategory::Cold | HeatCategory::Freezing => Color::Cyan,
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:2}", e.number)),
            Cell::new(format!("{:.1}", e.heat_index)),
            Cell::new(e.category.to_string()).fg(color),
            Cell::new(format!("{:+.2}", e.z_score)),
        ]);
    }
    println!("{table}");
}

pub fn display_saved(saved: &[SavedTicket]) {
    if saved.is_empty() {
        println!("Aucune grille enregistrée.");
        return;
    }

    let mut table = new_table(vec!["Id", "Date", "Stratégie", "Boules", "PB"]);
    for s in saved {
        table.add_row(vec![
            s.id.to_string(),
            s.saved_at.clone(),
            s.strategy.clone(),
            format_balls(s.ticket.white_balls()),
            format!("{:2}", s.ticket.power_ball()),
        ]);
    }
    println!("{table}");
}

pub fn display_counter(count: u64) {
    println!("Grilles générées depuis le début : {}", count);
}

pub fn display_simulation(strategy: Strategy, report: &FrequencyReport) {
    println!(
        "\n📊 Simulation : {} grilles, stratégie {}\n",
        report.draws,
        strategy_label(strategy)
    );

    let mut table = new_table(vec!["Plage", "Fréquence moyenne / numéro", "Part des grilles"]);
    for (label, lo, hi) in [("1-40", 1u8, 40u8), ("41-60", 41, 60), ("61-69", 61, 69)] {
        let mean = report.band_mean(lo..=hi);
        let share = if report.draws == 0 {
            0.0
        } else {
            mean / report.draws as f64 * 100.0
        };
        table.add_row(vec![
            label.to_string(),
            format!("{:.1}", mean),
            format!("{:.2} %", share),
        ]);
    }
    println!("{table}");

    let mut top: Vec<(u8, u64)> = report
        .white
        .iter()
        .enumerate()
        .map(|(i, &c)| ((i + 1) as u8, c))
        .collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    println!("\n── 10 boules les plus tirées ──");
    let mut table = new_table(vec!["Numéro", "Tirages", "Part"]);
    for (number, count) in top.iter().take(10) {
        table.add_row(vec![
            format!("{:2}", number),
            count.to_string(),
            format!("{:.2} %", report.white_share(*number) * 100.0),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balls() {
        assert_eq!(format_balls(&[1, 12, 69]), " 1 - 12 - 69");
    }

    #[test]
    fn test_every_strategy_has_label() {
        for s in Strategy::ALL {
            assert!(!strategy_label(s).is_empty());
            assert!(!strategy_description(s).is_empty());
        }
    }
}
