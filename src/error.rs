//! Error types for enigmatic.
//!
//! Every configuration problem is caught when a machine is built. Once an
//! [`EnigmaMachine`](crate::engine::EnigmaMachine) exists, enciphering cannot
//! fail: stepping and substitution are closed under modulo-26 arithmetic.

use thiserror::Error;

/// Result type alias for enigmatic operations.
pub type EnigmaResult<T> = Result<T, EnigmaError>;

/// Unified error type for all enigmatic operations.
#[derive(Debug, Error)]
pub enum EnigmaError {
    // ===== Catalog Errors =====
    /// Rotor identifier not present in the catalog.
    #[error("Unknown rotor type '{0}' (expected one of I, II, III, IV, V)")]
    UnknownRotor(String),

    /// Reflector identifier not present in the catalog.
    #[error("Unknown reflector type '{0}' (expected one of A, B, C)")]
    UnknownReflector(String),

    /// Wrong number of rotors supplied.
    #[error("Machine requires exactly 3 rotors, got {0}")]
    RotorCount(usize),

    // ===== Rotor Setting Errors =====
    /// Initial rotor position outside 0-25.
    #[error("Rotor {slot} position {value} out of range 0-25")]
    PositionOutOfRange {
        /// Rotor slot (0 = left, 1 = middle, 2 = right).
        slot: usize,
        /// Offending value.
        value: u8,
    },

    /// Ring setting outside 0-25.
    #[error("Rotor {slot} ring setting {value} out of range 0-25")]
    RingSettingOutOfRange {
        /// Rotor slot (0 = left, 1 = middle, 2 = right).
        slot: usize,
        /// Offending value.
        value: u8,
    },

    // ===== Plugboard Errors =====
    /// Plug letter outside A-Z.
    #[error("Plugboard letter {0:?} is not in A-Z")]
    InvalidPlugLetter(char),

    /// Plug pair token that is not exactly two letters.
    #[error("Malformed plugboard pair '{0}' (expected two letters, e.g. 'AB')")]
    MalformedPlugPair(String),

    /// Letter plugged to itself.
    #[error("Plugboard letter {0} cannot be paired with itself")]
    PlugSelfPair(char),

    /// Letter used by more than one pair.
    #[error("Plugboard letter {letter} already paired with {partner}")]
    PlugLetterReused {
        /// Letter appearing twice.
        letter: char,
        /// Its existing partner.
        partner: char,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EnigmaError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error belongs to the configuration taxonomy.
    ///
    /// Configuration errors are fatal to the construction attempt only; the
    /// caller must rebuild the machine with corrected parameters.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
