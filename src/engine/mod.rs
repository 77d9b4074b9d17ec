//! Core cipher engine.
//!
//! Implements the three-rotor machine with:
//! - Plugboard swap on entry and exit
//! - Right-to-left rotor cascade, reflector, left-to-right cascade
//! - Ratchet stepping including the middle-rotor double step
//!
//! # Reciprocity
//!
//! Every rotor is a bijection and the reflector and plugboard are
//! involutions, so the full path for one keystroke is an involution.
//! Two machines built from the same [`MachineConfig`] therefore decrypt
//! each other's output.

pub mod alphabet;
pub mod plugboard;
pub mod rng;
pub mod rotor;
pub mod wiring;

pub use plugboard::{PairPolicy, Plugboard};
pub use rng::KeyRng;
pub use rotor::RotorState;
pub use wiring::{ReflectorSpec, ReflectorType, RotorSpec, RotorType};

use crate::config::{CasePolicy, MachineConfig, ROTOR_COUNT};
use crate::error::{EnigmaError, EnigmaResult};

/// Left rotor slot.
pub const LEFT: usize = 0;
/// Middle rotor slot.
pub const MIDDLE: usize = 1;
/// Right (fast) rotor slot.
pub const RIGHT: usize = 2;

/// A configured machine for one session.
///
/// Owns its rotor states and plugboard; rotor and reflector wiring are
/// shared `'static` catalog entries. Not meant for concurrent mutation:
/// build one machine per conversation.
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    /// Rotors, left to right.
    rotors: [RotorState; ROTOR_COUNT],
    /// Plugboard cabling.
    plugboard: Plugboard,
    /// Reflector wiring.
    reflector: &'static ReflectorSpec,
    /// Case handling for `process`.
    case_policy: CasePolicy,
    /// Configuration the machine was built from (for `reset`).
    config: MachineConfig,
}

impl EnigmaMachine {
    /// Build a machine from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if configuration validation fails.
    pub fn new(config: MachineConfig) -> EnigmaResult<Self> {
        let (rotors, plugboard) = config.assemble()?;

        tracing::debug!(
            rotors = ?config.rotors,
            reflector = %config.reflector,
            window = %config.window(),
            plugs = plugboard.len(),
            "enigma machine constructed"
        );

        Ok(Self {
            rotors,
            plugboard,
            reflector: config.reflector.spec(),
            case_policy: config.case_policy,
            config,
        })
    }

    /// Build a machine from the three historical settings lists.
    ///
    /// `rotors` are catalog names (`"I"`..`"V"`), left to right.
    ///
    /// # Errors
    ///
    /// Returns error for an unknown rotor name, a wrong count, out-of-range
    /// settings or a malformed plugboard.
    pub fn from_settings(
        rotors: &[&str],
        positions: [u8; ROTOR_COUNT],
        ring_settings: [u8; ROTOR_COUNT],
        pairs: &[(char, char)],
    ) -> EnigmaResult<Self> {
        if rotors.len() != ROTOR_COUNT {
            return Err(EnigmaError::RotorCount(rotors.len()));
        }
        let rotors = rotors
            .iter()
            .map(|name| name.parse())
            .collect::<EnigmaResult<Vec<RotorType>>>()?;

        let config = MachineConfig {
            rotors,
            positions: positions.to_vec(),
            ring_settings: ring_settings.to_vec(),
            plugboard: crate::config::PlugboardConfig {
                pairs: pairs.iter().map(|(a, b)| format!("{a}{b}")).collect(),
                ..Default::default()
            },
            ..MachineConfig::default()
        };
        Self::new(config)
    }

    /// Advance the rotors for one keystroke.
    ///
    /// Both notch flags are read before anything moves. A middle rotor
    /// sitting on its notch steps itself and the left rotor, which gives
    /// the middle rotor two steps on consecutive keystrokes.
    pub fn step_rotors(&mut self) {
        let middle_at_notch = self.rotors[MIDDLE].at_notch();
        let right_at_notch = self.rotors[RIGHT].at_notch();

        if middle_at_notch {
            self.rotors[LEFT].step();
        }
        if right_at_notch || middle_at_notch {
            self.rotors[MIDDLE].step();
        }
        self.rotors[RIGHT].step();

        if middle_at_notch {
            tracing::trace!(window = %self.window(), "middle rotor double step");
        }
    }

    /// Substitute one alphabet index through the full signal path.
    /// Does not step.
    fn substitute(&self, index: u8) -> u8 {
        let mut c = self.plugboard.swap_index(index);
        for rotor in self.rotors.iter().rev() {
            c = rotor.forward(c);
        }
        c = self.reflector.reflect(c);
        for rotor in &self.rotors {
            c = rotor.backward(c);
        }
        self.plugboard.swap_index(c)
    }

    /// Encipher one character.
    ///
    /// Characters outside the alphabet (as decided by the case policy) are
    /// returned unchanged and do not step the rotors.
    pub fn encrypt_char(&mut self, c: char) -> char {
        let (letter, lowercase) = match self.case_policy {
            CasePolicy::Strict => (c, false),
            CasePolicy::Normalize => (c.to_ascii_uppercase(), false),
            CasePolicy::Preserve => (c.to_ascii_uppercase(), c.is_ascii_lowercase()),
        };
        let Some(index) = alphabet::index_of(letter) else {
            return c;
        };

        self.step_rotors();
        let out = alphabet::letter_at(self.substitute(index));
        if lowercase {
            out.to_ascii_lowercase()
        } else {
            out
        }
    }

    /// Encipher a message, character by character, in order.
    ///
    /// Enciphering and deciphering are the same operation.
    pub fn process(&mut self, message: &str) -> String {
        message.chars().map(|c| self.encrypt_char(c)).collect()
    }

    /// Current rotor positions, left to right.
    #[must_use]
    pub fn positions(&self) -> [u8; ROTOR_COUNT] {
        [
            self.rotors[LEFT].position(),
            self.rotors[MIDDLE].position(),
            self.rotors[RIGHT].position(),
        ]
    }

    /// Current window letters, e.g. `"ADU"`.
    #[must_use]
    pub fn window(&self) -> String {
        self.rotors.iter().map(RotorState::window_letter).collect()
    }

    /// Move the rotors to new positions.
    ///
    /// # Errors
    ///
    /// Returns error if any position is outside 0-25; no rotor moves in that case.
    pub fn set_positions(&mut self, positions: [u8; ROTOR_COUNT]) -> EnigmaResult<()> {
        if let Some((slot, &value)) = positions
            .iter()
            .enumerate()
            .find(|&(_, &p)| p >= alphabet::SIZE)
        {
            return Err(EnigmaError::PositionOutOfRange { slot, value });
        }
        for (rotor, position) in self.rotors.iter_mut().zip(positions) {
            rotor.set_position(position);
        }
        Ok(())
    }

    /// Return the rotors to their configured start positions.
    pub fn reset(&mut self) {
        for (rotor, &position) in self.rotors.iter_mut().zip(&self.config.positions) {
            rotor.set_position(position);
        }
        tracing::debug!(window = %self.window(), "enigma machine reset");
    }

    /// Rotor in `slot` (0 = left, 1 = middle, 2 = right).
    #[must_use]
    pub fn rotor(&self, slot: usize) -> Option<&RotorState> {
        self.rotors.get(slot)
    }

    /// Installed plugboard.
    #[must_use]
    pub const fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    /// Reflector wiring.
    #[must_use]
    pub const fn reflector(&self) -> &'static ReflectorSpec {
        self.reflector
    }

    /// Configuration the machine was built from.
    #[must_use]
    pub const fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Configuration with the current rotor positions as start positions.
    ///
    /// A machine built from the snapshot continues the session exactly where
    /// this one stands.
    #[must_use]
    pub fn snapshot(&self) -> MachineConfig {
        MachineConfig {
            positions: self.positions().to_vec(),
            ..self.config.clone()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn machine(window: &str) -> EnigmaMachine {
        EnigmaMachine::new(MachineConfig::builder().window(window).build()).unwrap()
    }

    #[test]
    fn test_single_step_moves_right_rotor() {
        let mut m = machine("AAA");
        m.step_rotors();
        assert_eq!(m.positions(), [0, 0, 1]);
    }

    #[test]
    fn test_right_notch_carries_middle() {
        // Rotor III notch is V
        let mut m = machine("AAV");
        m.step_rotors();
        assert_eq!(m.window(), "ABW");
    }

    #[test]
    fn test_double_step_from_pre_step_flags() {
        // Rotor II notch is E; right rotor not at notch
        let mut m = machine("AEA");
        m.step_rotors();
        assert_eq!(m.positions(), [1, 5, 1]);
    }

    #[test]
    fn test_double_step_sequence() {
        let mut m = machine("ADU");
        let windows: Vec<String> = (0..4)
            .map(|_| {
                m.step_rotors();
                m.window()
            })
            .collect();
        assert_eq!(windows, vec!["ADV", "AEW", "BFX", "BFY"]);
    }

    #[test]
    fn test_all_three_wrap() {
        // Left rotor I has its notch at Q, which never carries further
        let mut m = machine("ZEV");
        m.step_rotors();
        assert_eq!(m.window(), "AFW");
    }

    #[test]
    fn test_substitute_is_involution() {
        let m = machine("QWE");
        for i in 0..alphabet::SIZE {
            assert_eq!(m.substitute(m.substitute(i)), i);
            assert_ne!(m.substitute(i), i, "letter enciphered to itself");
        }
    }

    #[test]
    fn test_encrypt_char_known_vector() {
        let mut m = machine("AAA");
        assert_eq!(m.encrypt_char('A'), 'B');
        assert_eq!(m.positions(), [0, 0, 1]);
    }

    #[test]
    fn test_non_alphabetic_does_not_step() {
        let mut m = machine("AAA");
        for c in [' ', '1', '!', 'a', '\n', 'é'] {
            assert_eq!(m.encrypt_char(c), c);
        }
        assert_eq!(m.positions(), [0, 0, 0]);
    }

    #[test]
    fn test_normalize_case_policy() {
        let config = MachineConfig::builder()
            .case_policy(CasePolicy::Normalize)
            .build();
        let mut m = EnigmaMachine::new(config).unwrap();
        assert_eq!(m.process("aaaaa"), "BDZGO");
    }

    #[test]
    fn test_preserve_case_policy() {
        let config = MachineConfig::builder()
            .case_policy(CasePolicy::Preserve)
            .build();
        let mut m = EnigmaMachine::new(config).unwrap();
        assert_eq!(m.process("aAaAa"), "bDzGo");
    }

    #[test]
    fn test_reset_restores_start() {
        let mut m = machine("ADU");
        let first = m.process("HELLO");
        m.reset();
        assert_eq!(m.window(), "ADU");
        assert_eq!(m.process("HELLO"), first);
    }

    #[test]
    fn test_set_positions() {
        let mut m = machine("AAA");
        m.set_positions([1, 2, 3]).unwrap();
        assert_eq!(m.window(), "BCD");

        let err = m.set_positions([0, 26, 0]).unwrap_err();
        assert!(matches!(
            err,
            EnigmaError::PositionOutOfRange { slot: 1, value: 26 }
        ));
        assert_eq!(m.window(), "BCD");
    }

    #[test]
    fn test_snapshot_resumes_session() {
        let mut m = machine("AAA");
        let first = m.process("ATTACKAT");
        let mut resumed = EnigmaMachine::new(m.snapshot()).unwrap();
        assert_eq!(m.snapshot().window(), resumed.window());
        assert_eq!(resumed.process("DAWN"), m.process("DAWN"));
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn test_accessors() {
        let m = machine("ABC");
        assert_eq!(m.rotor(LEFT).map(RotorState::rotor_type), Some(RotorType::I));
        assert_eq!(m.rotor(RIGHT).map(RotorState::position), Some(2));
        assert!(m.rotor(3).is_none());
        assert!(m.plugboard().is_empty());
        assert_eq!(m.reflector().name(), "B");
        assert_eq!(m.config().window(), "ABC");
    }

    #[test]
    fn test_from_settings() {
        let mut m =
            EnigmaMachine::from_settings(&["I", "II", "III"], [0, 0, 0], [0, 0, 0], &[]).unwrap();
        assert_eq!(m.process("AAAAA"), "BDZGO");
    }

    #[test]
    fn test_from_settings_rejects_bad_input() {
        assert!(matches!(
            EnigmaMachine::from_settings(&["I", "II"], [0; 3], [0; 3], &[]),
            Err(EnigmaError::RotorCount(2))
        ));
        assert!(matches!(
            EnigmaMachine::from_settings(&["I", "II", "VI"], [0; 3], [0; 3], &[]),
            Err(EnigmaError::UnknownRotor(_))
        ));
        assert!(matches!(
            EnigmaMachine::from_settings(&["I", "II", "III"], [0; 3], [0, 0, 26], &[]),
            Err(EnigmaError::RingSettingOutOfRange { slot: 2, value: 26 })
        ));
        assert!(matches!(
            EnigmaMachine::from_settings(&["I", "II", "III"], [0; 3], [0; 3], &[('A', 'A')]),
            Err(EnigmaError::PlugSelfPair('A'))
        ));
    }
}
