use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

use crate::models::{SavedTicket, Ticket};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS generation_counter (
    id     INTEGER PRIMARY KEY CHECK (id = 1),
    count  INTEGER NOT NULL DEFAULT 0
);
INSERT OR IGNORE INTO generation_counter (id, count) VALUES (1, 0);

CREATE TABLE IF NOT EXISTS saved_tickets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    strategy    TEXT NOT NULL,
    ball_1      INTEGER NOT NULL,
    ball_2      INTEGER NOT NULL,
    ball_3      INTEGER NOT NULL,
    ball_4      INTEGER NOT NULL,
    ball_5      INTEGER NOT NULL,
    power_ball  INTEGER NOT NULL,
    saved_at    TEXT NOT NULL
);
";

pub const DB_PATH_ENV: &str = "POWERBALL_DB";

/// `data/powerball.db` sous le répertoire courant. La surcharge par
/// `POWERBALL_DB` est résolue par la configuration de l'appelant.
pub fn default_db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("powerball.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn read_counter(conn: &Connection) -> Result<u64> {
    let count: i64 = conn
        .query_row("SELECT count FROM generation_counter WHERE id = 1", [], |row| row.get(0))
        .context("Lecture du compteur impossible")?;
    u64::try_from(count).context("Compteur négatif en base")
}

/// Incrémente le compteur global en une seule instruction et renvoie la nouvelle valeur.
pub fn increment_counter(conn: &Connection, by: u64) -> Result<u64> {
    let by = i64::try_from(by).context("Incrément trop grand")?;
    let count: i64 = conn
        .query_row(
            "UPDATE generation_counter SET count = count + ?1 WHERE id = 1 RETURNING count",
            [by],
            |row| row.get(0),
        )
        .context("Incrément du compteur impossible")?;
    debug!(by, count, "compteur global incrémenté");
    u64::try_from(count).context("Compteur négatif en base")
}

pub fn save_ticket(conn: &Connection, strategy: &str, ticket: &Ticket) -> Result<i64> {
    let balls = ticket.white_balls();
    let saved_at = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO saved_tickets (strategy, ball_1, ball_2, ball_3, ball_4, ball_5, power_ball, saved_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            strategy,
            balls[0],
            balls[1],
            balls[2],
            balls[3],
            balls[4],
            ticket.power_ball(),
            saved_at,
        ],
    ).context("Échec de l'enregistrement de la grille")?;
    Ok(conn.last_insert_rowid())
}

pub fn fetch_saved_tickets(conn: &Connection, limit: u32) -> Result<Vec<SavedTicket>> {
    let mut stmt = conn.prepare(
        "SELECT id, strategy, ball_1, ball_2, ball_3, ball_4, ball_5, power_ball, saved_at
         FROM saved_tickets ORDER BY id DESC LIMIT ?1"
    )?;
    let rows = stmt.query_map([limit], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            [
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, u8>(6)?,
            ],
            row.get::<_, u8>(7)?,
            row.get::<_, String>(8)?,
        ))
    })?.collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, strategy, balls, power_ball, saved_at)| -> Result<SavedTicket> {
            let ticket = Ticket::new(balls, power_ball)
                .with_context(|| format!("Grille enregistrée {} invalide", id))?;
            Ok(SavedTicket {
                id,
                strategy,
                ticket,
                saved_at,
            })
        })
        .collect()
}

pub fn count_saved_tickets(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM saved_tickets", [], |row| row.get(0))?;
    Ok(count)
}

pub fn delete_saved_ticket(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn
        .execute("DELETE FROM saved_tickets WHERE id = ?1", [id])
        .context("Échec de la suppression")?;
    Ok(changed > 0)
}

pub fn clear_saved_tickets(conn: &Connection) -> Result<usize> {
    let changed = conn
        .execute("DELETE FROM saved_tickets", [])
        .context("Échec de la suppression")?;
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn
    }

    fn test_ticket(pb: u8) -> Ticket {
        Ticket::new([10, 18, 23, 36, 42], pb).unwrap()
    }

    #[test]
    fn test_default_db_path_under_data() {
        let path = default_db_path();
        assert!(path.ends_with("data/powerball.db"), "{}", path.display());
    }

    #[test]
    fn test_counter_starts_at_zero() {
        let conn = test_conn();
        assert_eq!(read_counter(&conn).unwrap(), 0);
    }

    #[test]
    fn test_counter_increments() {
        let conn = test_conn();
        assert_eq!(increment_counter(&conn, 1).unwrap(), 1);
        assert_eq!(increment_counter(&conn, 5).unwrap(), 6);
        assert_eq!(read_counter(&conn).unwrap(), 6);
    }

    #[test]
    fn test_migrate_keeps_counter() {
        let conn = test_conn();
        increment_counter(&conn, 3).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(read_counter(&conn).unwrap(), 3);
    }

    #[test]
    fn test_save_and_fetch_order() {
        let conn = test_conn();
        assert_eq!(count_saved_tickets(&conn).unwrap(), 0);

        save_ticket(&conn, "hot", &test_ticket(1)).unwrap();
        save_ticket(&conn, "cold", &test_ticket(2)).unwrap();
        save_ticket(&conn, "random", &test_ticket(3)).unwrap();
        assert_eq!(count_saved_tickets(&conn).unwrap(), 3);

        let saved = fetch_saved_tickets(&conn, 10).unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].strategy, "random");
        assert_eq!(saved[0].ticket.power_ball(), 3);
        assert_eq!(saved[2].strategy, "hot");
        assert_eq!(saved[2].ticket.white_balls(), &[10, 18, 23, 36, 42]);

        let limited = fetch_saved_tickets(&conn, 2).unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_delete_saved_ticket() {
        let conn = test_conn();
        let id = save_ticket(&conn, "hot", &test_ticket(1)).unwrap();
        assert!(delete_saved_ticket(&conn, id).unwrap());
        assert!(!delete_saved_ticket(&conn, id).unwrap());
        assert_eq!(count_saved_tickets(&conn).unwrap(), 0);
    }

    #[test]
    fn test_clear_saved_tickets() {
        let conn = test_conn();
        save_ticket(&conn, "hot", &test_ticket(1)).unwrap();
        save_ticket(&conn, "hot", &test_ticket(2)).unwrap();
        assert_eq!(clear_saved_tickets(&conn).unwrap(), 2);
        assert_eq!(count_saved_tickets(&conn).unwrap(), 0);
    }
}
