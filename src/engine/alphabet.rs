//! The 26-letter alphabet and its modulo-26 arithmetic.
//!
//! Letters `A`-`Z` map to indices `0`-`25`. All rotor and reflector wiring
//! is expressed in these indices.

/// Number of symbols in the alphabet.
pub const SIZE: u8 = 26;

/// Letters in index order.
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Index of an uppercase letter, or `None` for anything outside `A`-`Z`.
#[must_use]
pub const fn index_of(c: char) -> Option<u8> {
    if c.is_ascii_uppercase() {
        Some(c as u8 - b'A')
    } else {
        None
    }
}

/// Uppercase letter for an index. Indices wrap modulo 26.
#[must_use]
pub const fn letter_at(index: u8) -> char {
    (b'A' + index % SIZE) as char
}

/// `(index + offset) mod 26`, with `offset` in `-25..=25`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub const fn shift(index: u8, offset: i8) -> u8 {
    (index as i16 + offset as i16).rem_euclid(SIZE as i16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_bounds() {
        assert_eq!(index_of('A'), Some(0));
        assert_eq!(index_of('Z'), Some(25));
        assert_eq!(index_of('a'), None);
        assert_eq!(index_of('1'), None);
        assert_eq!(index_of(' '), None);
        assert_eq!(index_of('Ä'), None);
    }

    #[test]
    fn test_letter_at_wraps() {
        assert_eq!(letter_at(0), 'A');
        assert_eq!(letter_at(25), 'Z');
        assert_eq!(letter_at(26), 'A');
    }

    #[test]
    fn test_letters_table_matches_indices() {
        for (i, c) in LETTERS.chars().enumerate() {
            assert_eq!(index_of(c), Some(i as u8));
            assert_eq!(letter_at(i as u8), c);
        }
    }

    #[test]
    fn test_shift() {
        assert_eq!(shift(25, 1), 0);
        assert_eq!(shift(0, -1), 25);
        assert_eq!(shift(3, 25), 2);
        assert_eq!(shift(7, 0), 7);
    }
}
