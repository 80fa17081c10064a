use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub const WHITE_MAX: u8 = 69;
pub const POWER_MAX: u8 = 26;
pub const PICK_COUNT: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketError {
    #[error("Boule blanche {0} hors limites (1-69)")]
    WhiteOutOfRange(u8),

    #[error("Powerball {0} hors limites (1-26)")]
    PowerOutOfRange(u8),

    #[error("Boule blanche en double : {0}")]
    DuplicateWhite(u8),

    #[error("Attendu 6 nombres (5 boules + 1 Powerball), reçu : {0}")]
    WrongCount(usize),
}

/// Grille Powerball : 5 boules blanches distinctes triées, 1 Powerball.
///
/// Les champs sont privés pour que toute grille construite respecte
/// les invariants de [`validate_ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Ticket {
    white_balls: [u8; 5],
    power_ball: u8,
}

impl Ticket {
    pub fn new(mut white_balls: [u8; 5], power_ball: u8) -> Result<Self, TicketError> {
        validate_ticket(&white_balls, power_ball)?;
        white_balls.sort_unstable();
        Ok(Self {
            white_balls,
            power_ball,
        })
    }

    /// 5 boules puis le Powerball, dans l'ordre de saisie.
    pub fn from_numbers(numbers: &[u8]) -> Result<Self, TicketError> {
        if numbers.len() != PICK_COUNT + 1 {
            return Err(TicketError::WrongCount(numbers.len()));
        }
        let white = [numbers[0], numbers[1], numbers[2], numbers[3], numbers[4]];
        Self::new(white, numbers[5])
    }

    pub fn white_balls(&self) -> &[u8; 5] {
        &self.white_balls
    }

    pub fn power_ball(&self) -> u8 {
        self.power_ball
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let balls = self
            .white_balls
            .iter()
            .map(|b| format!("{:02}", b))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} | PB {:02}", balls, self.power_ball)
    }
}

pub fn validate_ticket(white_balls: &[u8; 5], power_ball: u8) -> Result<(), TicketError> {
    for &b in white_balls {
        if b < 1 || b > WHITE_MAX {
            return Err(TicketError::WhiteOutOfRange(b));
        }
    }
    if power_ball < 1 || power_ball > POWER_MAX {
        return Err(TicketError::PowerOutOfRange(power_ball));
    }
    for i in 0..white_balls.len() {
        for j in (i + 1)..white_balls.len() {
            if white_balls[i] == white_balls[j] {
                return Err(TicketError::DuplicateWhite(white_balls[i]));
            }
        }
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Stratégie inconnue : '{0}' (attendu : ultimate, hot, cold, balanced, frequency, random)")]
pub struct StrategyError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Ultimate,
    Hot,
    Cold,
    Balanced,
    Frequency,
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Ultimate,
        Strategy::Hot,
        Strategy::Cold,
        Strategy::Balanced,
        Strategy::Frequency,
        Strategy::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Ultimate => "ultimate",
            Strategy::Hot => "hot",
            Strategy::Cold => "cold",
            Strategy::Balanced => "balanced",
            Strategy::Frequency => "frequency",
            Strategy::Random => "random",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ultimate" => Ok(Strategy::Ultimate),
            "hot" => Ok(Strategy::Hot),
            "cold" => Ok(Strategy::Cold),
            "balanced" => Ok(Strategy::Balanced),
            "frequency" | "frequency-weighted" => Ok(Strategy::Frequency),
            "random" => Ok(Strategy::Random),
            _ => Err(StrategyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedTicket {
    pub id: i64,
    pub strategy: String,
    pub ticket: Ticket,
    pub saved_at: String,
}
