//! Rotor state: a catalog wiring plus ring setting and rotational position.

use super::alphabet::{self, SIZE};
use super::wiring::{RotorSpec, RotorType};
use crate::error::{EnigmaError, EnigmaResult};

/// One mounted rotor.
///
/// The wiring is shared with every other machine using the same rotor type;
/// only `ring_setting` and `position` belong to this instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorState {
    rotor_type: RotorType,
    spec: &'static RotorSpec,
    ring_setting: u8,
    position: u8,
}

impl RotorState {
    /// Mount a rotor in `slot` (used only for error reporting).
    ///
    /// # Errors
    ///
    /// Returns error if `position` or `ring_setting` is outside 0-25.
    pub fn new(
        slot: usize,
        rotor_type: RotorType,
        position: u8,
        ring_setting: u8,
    ) -> EnigmaResult<Self> {
        if position >= SIZE {
            return Err(EnigmaError::PositionOutOfRange {
                slot,
                value: position,
            });
        }
        if ring_setting >= SIZE {
            return Err(EnigmaError::RingSettingOutOfRange {
                slot,
                value: ring_setting,
            });
        }
        Ok(Self {
            rotor_type,
            spec: rotor_type.spec(),
            ring_setting,
            position,
        })
    }

    /// Catalog type of this rotor.
    #[must_use]
    pub const fn rotor_type(&self) -> RotorType {
        self.rotor_type
    }

    /// Current rotational position (0-25).
    #[must_use]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Ring setting (0-25).
    #[must_use]
    pub const fn ring_setting(&self) -> u8 {
        self.ring_setting
    }

    /// Letter shown in the machine window.
    #[must_use]
    pub const fn window_letter(&self) -> char {
        alphabet::letter_at(self.position)
    }

    pub(crate) fn set_position(&mut self, position: u8) {
        self.position = position % SIZE;
    }

    /// True iff this rotor will advance its left neighbour on the next step.
    #[must_use]
    pub const fn at_notch(&self) -> bool {
        self.position == self.spec.notch()
    }

    /// Advance one position, wrapping 25 to 0.
    pub fn step(&mut self) {
        self.position = (self.position + 1) % SIZE;
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn offset(&self) -> i8 {
        self.position as i8 - self.ring_setting as i8
    }

    /// Right-to-left substitution through this rotor.
    #[must_use]
    pub const fn forward(&self, index: u8) -> u8 {
        let offset = self.offset();
        let mapped = self.spec.forward(alphabet::shift(index, offset));
        alphabet::shift(mapped, -offset)
    }

    /// Left-to-right substitution through this rotor.
    #[must_use]
    pub const fn backward(&self, index: u8) -> u8 {
        let offset = self.offset();
        let mapped = self.spec.backward(alphabet::shift(index, offset));
        alphabet::shift(mapped, -offset)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn rotor(rotor_type: RotorType, position: u8, ring: u8) -> RotorState {
        RotorState::new(0, rotor_type, position, ring).unwrap()
    }

    #[test]
    fn test_step_wraps() {
        let mut r = rotor(RotorType::I, 25, 0);
        r.step();
        assert_eq!(r.position(), 0);
        assert_eq!(r.window_letter(), 'A');
    }

    #[test]
    fn test_step_increments() {
        let mut r = rotor(RotorType::II, 3, 7);
        r.step();
        assert_eq!(r.position(), 4);
        assert_eq!(r.ring_setting(), 7);
    }

    #[test]
    fn test_at_notch() {
        // Rotor II notch is E (4)
        assert!(rotor(RotorType::II, 4, 0).at_notch());
        assert!(!rotor(RotorType::II, 5, 0).at_notch());
        // Ring setting does not move the notch
        assert!(rotor(RotorType::III, 21, 9).at_notch());
    }

    #[test]
    fn test_forward_at_origin_is_raw_wiring() {
        let r = rotor(RotorType::I, 0, 0);
        // I: A -> E
        assert_eq!(r.forward(0), 4);
        assert_eq!(r.backward(4), 0);
    }

    #[test]
    fn test_forward_with_position() {
        // Position B shifts A onto contact B, which I maps to K; K - 1 = J
        let r = rotor(RotorType::I, 1, 0);
        assert_eq!(r.forward(0), 9);
    }

    #[test]
    fn test_ring_setting_cancels_position() {
        let a = rotor(RotorType::III, 5, 5);
        let b = rotor(RotorType::III, 0, 0);
        for i in 0..SIZE {
            assert_eq!(a.forward(i), b.forward(i));
        }
    }

    #[test]
    fn test_rejects_out_of_range_position() {
        let err = RotorState::new(2, RotorType::I, 26, 0).unwrap_err();
        assert!(matches!(
            err,
            EnigmaError::PositionOutOfRange { slot: 2, value: 26 }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_ring() {
        let err = RotorState::new(1, RotorType::I, 0, 200).unwrap_err();
        assert!(matches!(
            err,
            EnigmaError::RingSettingOutOfRange { slot: 1, value: 200 }
        ));
    }
}
