//! Identifier and hue sources.
//!
//! The engine never reaches for global randomness directly; it asks an
//! [`IdGenerator`] for ids and a [`HueSource`] for hues. Tests plug in
//! [`SequentialIds`] and [`FixedHues`] to get reproducible boards.

use uuid::Uuid;

/// Length of ids produced by [`RandomIds`].
pub const RANDOM_ID_LEN: usize = 12;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Produces raw identifier strings.
///
/// Uniqueness is checked by the engine; a generator only needs to make
/// collisions unlikely.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Produces hues in degrees (`0..360`).
pub trait HueSource {
    fn next_hue(&mut self) -> u16;
}

/// Short lowercase base-36 ids drawn from UUID v4 randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        base36(Uuid::new_v4().as_u128(), RANDOM_ID_LEN)
    }
}

/// Monotonic `"{prefix}-{n}"` ids, starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Uniformly random hues.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomHues;

impl HueSource for RandomHues {
    fn next_hue(&mut self) -> u16 {
        (Uuid::new_v4().as_u128() % 360) as u16
    }
}

/// Cycles through a fixed list of hues; yields 0 when the list is empty.
#[derive(Debug, Clone, Default)]
pub struct FixedHues {
    hues: Vec<u16>,
    cursor: usize,
}

impl FixedHues {
    pub fn new(hues: impl Into<Vec<u16>>) -> Self {
        Self {
            hues: hues.into(),
            cursor: 0,
        }
    }
}

impl HueSource for FixedHues {
    fn next_hue(&mut self) -> u16 {
        if self.hues.is_empty() {
            return 0;
        }
        let hue = self.hues[self.cursor % self.hues.len()];
        self.cursor = (self.cursor + 1) % self.hues.len();
        hue % 360
    }
}

fn base36(mut value: u128, len: usize) -> String {
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(char::from(BASE36_DIGITS[(value % 36) as usize]));
        value /= 36;
    }
    out
}
