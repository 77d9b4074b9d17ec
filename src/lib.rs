//! # enigmatic
//!
//! Deterministic simulator of the three-rotor Enigma cipher machine.
//!
//! Reproduces the historical substitution and stepping rules exactly,
//! including the middle-rotor double step:
//! - Rotor types I-V and reflectors A-C as compile-time constant tables
//! - Ring settings, start positions and a plugboard per session
//! - Reciprocity: the same key deciphers what it enciphered
//!
//! This is a historical simulation, not a secure cipher.
//!
//! ## Example
//!
//! ```rust
//! use enigmatic::prelude::*;
//!
//! let config = MachineConfig::builder()
//!     .rotors([RotorType::I, RotorType::II, RotorType::III])
//!     .window("AAA")
//!     .build();
//!
//! let mut machine = EnigmaMachine::new(config.clone()).unwrap();
//! let ciphertext = machine.process("AAAAA");
//! assert_eq!(ciphertext, "BDZGO");
//!
//! let mut receiver = EnigmaMachine::new(config).unwrap();
//! assert_eq!(receiver.process(&ciphertext), "AAAAA");
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod config;
pub mod engine;
pub mod error;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CasePolicy, MachineConfig, MachineConfigBuilder, PlugboardConfig};
    pub use crate::engine::rng::KeyRng;
    pub use crate::engine::{
        EnigmaMachine, PairPolicy, Plugboard, ReflectorType, RotorState, RotorType,
    };
    pub use crate::error::{EnigmaError, EnigmaResult};
}

/// Re-export for public API
pub use engine::EnigmaMachine;
pub use error::{EnigmaError, EnigmaResult};
