//! Plugboard (Steckerbrett): an involutive letter swap applied on the way
//! into and out of the rotor stack.

use serde::{Deserialize, Serialize};

use super::alphabet::{self, SIZE};
use crate::error::{EnigmaError, EnigmaResult};

/// Policy for pair lists that reuse a letter or pair a letter with itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairPolicy {
    /// Reject the whole pair list at construction.
    #[default]
    Strict,
    /// A later pair unplugs any earlier partner of either letter. A self
    /// pair unplugs that letter.
    LastWins,
}

/// Configured plugboard. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    wiring: [u8; SIZE as usize],
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::identity()
    }
}

impl Plugboard {
    /// Plugboard with no cables: every letter maps to itself.
    #[must_use]
    pub fn identity() -> Self {
        let mut wiring = [0u8; SIZE as usize];
        for (i, slot) in (0..SIZE).zip(wiring.iter_mut()) {
            *slot = i;
        }
        Self { wiring }
    }

    /// Build from letter pairs. Letters are accepted in either case.
    ///
    /// # Errors
    ///
    /// Returns error if a letter is outside `A`-`Z`, or, under
    /// [`PairPolicy::Strict`], if a pair reuses a letter or is a self pair.
    pub fn from_pairs<I>(pairs: I, policy: PairPolicy) -> EnigmaResult<Self>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut board = Self::identity();
        for (a, b) in pairs {
            let a = plug_index(a)?;
            let b = plug_index(b)?;
            match policy {
                PairPolicy::Strict => board.plug_strict(a, b)?,
                PairPolicy::LastWins => board.plug_last_wins(a, b),
            }
        }
        Ok(board)
    }

    /// Build from notation such as `"AB CD EF"`. Pairs are separated by
    /// whitespace or commas.
    ///
    /// # Errors
    ///
    /// Returns error if a token is not exactly two letters, or for the
    /// reasons listed on [`Plugboard::from_pairs`].
    pub fn parse(notation: &str, policy: PairPolicy) -> EnigmaResult<Self> {
        Self::from_tokens(
            notation
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|token| !token.is_empty()),
            policy,
        )
    }

    /// Build from two-letter tokens such as `["AB", "CD"]`.
    ///
    /// # Errors
    ///
    /// Same as [`Plugboard::parse`].
    pub fn from_tokens<I, S>(tokens: I, policy: PairPolicy) -> EnigmaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pairs = tokens
            .into_iter()
            .map(|token| parse_pair(token.as_ref()))
            .collect::<EnigmaResult<Vec<_>>>()?;
        Self::from_pairs(pairs, policy)
    }

    fn plug_strict(&mut self, a: u8, b: u8) -> EnigmaResult<()> {
        if a == b {
            return Err(EnigmaError::PlugSelfPair(alphabet::letter_at(a)));
        }
        for letter in [a, b] {
            let partner = self.wiring[letter as usize];
            if partner != letter {
                return Err(EnigmaError::PlugLetterReused {
                    letter: alphabet::letter_at(letter),
                    partner: alphabet::letter_at(partner),
                });
            }
        }
        self.connect(a, b);
        Ok(())
    }

    fn plug_last_wins(&mut self, a: u8, b: u8) {
        self.unplug(a);
        self.unplug(b);
        if a != b {
            self.connect(a, b);
        }
    }

    fn connect(&mut self, a: u8, b: u8) {
        self.wiring[a as usize] = b;
        self.wiring[b as usize] = a;
    }

    fn unplug(&mut self, letter: u8) {
        let partner = self.wiring[letter as usize];
        self.wiring[partner as usize] = partner;
        self.wiring[letter as usize] = letter;
    }

    /// Swap a contact index through the plugboard.
    #[must_use]
    pub const fn swap_index(&self, index: u8) -> u8 {
        self.wiring[index as usize]
    }

    /// Swap a letter. Unplugged letters and characters outside `A`-`Z` are
    /// returned unchanged.
    #[must_use]
    pub fn swap(&self, letter: char) -> char {
        alphabet::index_of(letter).map_or(letter, |i| alphabet::letter_at(self.swap_index(i)))
    }

    /// Installed pairs, each ordered alphabetically, sorted by first letter.
    #[must_use]
    pub fn pairs(&self) -> Vec<(char, char)> {
        (0..SIZE)
            .filter(|&i| self.wiring[i as usize] > i)
            .map(|i| (alphabet::letter_at(i), alphabet::letter_at(self.wiring[i as usize])))
            .collect()
    }

    /// Number of installed cables.
    #[must_use]
    pub fn len(&self) -> usize {
        (0..SIZE).filter(|&i| self.wiring[i as usize] > i).count()
    }

    /// True when no cables are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pairs in `"AB CD"` notation.
    #[must_use]
    pub fn notation(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(a, b)| format!("{a}{b}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn plug_index(letter: char) -> EnigmaResult<u8> {
    alphabet::index_of(letter.to_ascii_uppercase()).ok_or(EnigmaError::InvalidPlugLetter(letter))
}

fn parse_pair(token: &str) -> EnigmaResult<(char, char)> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => Ok((a, b)),
        _ => Err(EnigmaError::MalformedPlugPair(token.to_string())),
    }
}
