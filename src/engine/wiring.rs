//! Rotor and reflector wiring catalogs.
//!
//! The historical rotor types I-V and reflectors A-C are process-wide
//! constant tables. Wiring strings are decoded and inverted at compile time,
//! so machines only ever hold `&'static` references into them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::alphabet::{self, SIZE};
use crate::error::EnigmaError;

const N: usize = SIZE as usize;

fn wiring_string(map: impl Fn(u8) -> u8) -> String {
    (0..SIZE).map(|i| alphabet::letter_at(map(i))).collect()
}

/// Decode a 26-letter wiring string into an index permutation.
const fn decode(wiring: &str) -> [u8; N] {
    let bytes = wiring.as_bytes();
    assert!(bytes.len() == N, "wiring must have 26 letters");
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        assert!(bytes[i].is_ascii_uppercase(), "wiring must be A-Z");
        out[i] = bytes[i] - b'A';
        i += 1;
    }
    out
}

/// Inverse permutation: `inverse(p)[p[i]] == i`.
const fn inverse(forward: &[u8; N]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[forward[i] as usize] = i as u8;
        i += 1;
    }
    out
}

/// Static wiring of one rotor type.
#[derive(Debug, PartialEq, Eq)]
pub struct RotorSpec {
    name: &'static str,
    forward: [u8; N],
    backward: [u8; N],
    notch: u8,
}

impl RotorSpec {
    const fn new(name: &'static str, wiring: &str, notch: char) -> Self {
        let forward = decode(wiring);
        Self {
            name,
            backward: inverse(&forward),
            forward,
            notch: notch as u8 - b'A',
        }
    }

    /// Catalog name (roman numeral).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Forward (right-to-left) substitution for a contact index.
    #[must_use]
    pub const fn forward(&self, index: u8) -> u8 {
        self.forward[index as usize]
    }

    /// Backward (left-to-right) substitution for a contact index.
    #[must_use]
    pub const fn backward(&self, index: u8) -> u8 {
        self.backward[index as usize]
    }

    /// Position at which this rotor advances its left neighbour.
    #[must_use]
    pub const fn notch(&self) -> u8 {
        self.notch
    }

    /// Forward wiring as its 26-letter catalog string.
    #[must_use]
    pub fn wiring(&self) -> String {
        wiring_string(|i| self.forward(i))
    }
}

/// Static wiring of one reflector type. Always an involution.
#[derive(Debug, PartialEq, Eq)]
pub struct ReflectorSpec {
    name: &'static str,
    wiring: [u8; N],
}

impl ReflectorSpec {
    const fn new(name: &'static str, wiring: &str) -> Self {
        let wiring = decode(wiring);
        let mut i = 0;
        while i < N {
            assert!(
                wiring[wiring[i] as usize] as usize == i,
                "reflector must be an involution"
            );
            i += 1;
        }
        Self { name, wiring }
    }

    /// Catalog name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reflect a contact index.
    #[must_use]
    pub const fn reflect(&self, index: u8) -> u8 {
        self.wiring[index as usize]
    }

    /// Wiring as its 26-letter catalog string.
    #[must_use]
    pub fn wiring(&self) -> String {
        wiring_string(|i| self.reflect(i))
    }
}

pub static ROTOR_I: RotorSpec = RotorSpec::new("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", 'Q');
pub static ROTOR_II: RotorSpec = RotorSpec::new("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", 'E');
pub static ROTOR_III: RotorSpec = RotorSpec::new("III", "BDFHJLCPRTXVZNYEIWGAKMOUSQ", 'V');
pub static ROTOR_IV: RotorSpec = RotorSpec::new("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", 'J');
pub static ROTOR_V: RotorSpec = RotorSpec::new("V", "VZBRGITYUPSDNHLXAWMJQOFECK", 'Z');

pub static REFLECTOR_A: ReflectorSpec = ReflectorSpec::new("A", "EJMZALYXVBWFCRQUONTSPIKHGD");
pub static REFLECTOR_B: ReflectorSpec = ReflectorSpec::new("B", "YRUHQSLDPXNGOKMIEBFZCWVJAT");
pub static REFLECTOR_C: ReflectorSpec = ReflectorSpec::new("C", "FVPJIAOYEDRZXWGCTKUQSBNMHL");

/// Rotor catalog selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RotorType {
    /// Rotor I (notch Q).
    I,
    /// Rotor II (notch E).
    II,
    /// Rotor III (notch V).
    III,
    /// Rotor IV (notch J).
    IV,
    /// Rotor V (notch Z).
    V,
}

impl RotorType {
    /// Every rotor type in catalog order.
    pub const ALL: [Self; 5] = [Self::I, Self::II, Self::III, Self::IV, Self::V];

    /// Wiring for this rotor type.
    #[must_use]
    pub const fn spec(self) -> &'static RotorSpec {
        match self {
            Self::I => &ROTOR_I,
            Self::II => &ROTOR_II,
            Self::III => &ROTOR_III,
            Self::IV => &ROTOR_IV,
            Self::V => &ROTOR_V,
        }
    }
}

impl fmt::Display for RotorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name())
    }
}

impl FromStr for RotorType {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rotor| rotor.spec().name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EnigmaError::UnknownRotor(s.to_string()))
    }
}

impl TryFrom<usize> for RotorType {
    type Error = EnigmaError;

    /// Zero-based catalog index (0 = I).
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| EnigmaError::UnknownRotor(index.to_string()))
    }
}

/// Reflector catalog selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReflectorType {
    /// Reflector A.
    A,
    /// Reflector B, the wartime standard.
    #[default]
    B,
    /// Reflector C.
    C,
}

impl ReflectorType {
    /// Every reflector type in catalog order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Wiring for this reflector type.
    #[must_use]
    pub const fn spec(self) -> &'static ReflectorSpec {
        match self {
            Self::A => &REFLECTOR_A,
            Self::B => &REFLECTOR_B,
            Self::C => &REFLECTOR_C,
        }
    }
}

impl fmt::Display for ReflectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name())
    }
}

impl FromStr for ReflectorType {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reflector| reflector.spec().name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EnigmaError::UnknownReflector(s.to_string()))
    }
}
