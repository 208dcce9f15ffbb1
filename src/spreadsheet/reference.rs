//! Conversion between A1-style cell references and 0-based indexes.

/// Converts 0-based (row, col) into a reference such as `C7`.
pub(crate) fn index_to_reference(row: usize, col: usize) -> String {
    let mut reference = col_to_letters(col);
    reference.push_str(&(row + 1).to_string());
    reference
}

/// Parses a reference such as `AB12` into 0-based (row, col).
pub(crate) fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    Some((row_to_index(digits)?, col_to_index(letters)?))
}

/// `A` → 0, `Z` → 25, `AA` → 26. Returns `None` for an empty or non-alphabetic string.
pub(crate) fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .to_ascii_uppercase()
        .bytes()
        .try_fold(0usize, |index, byte| index.checked_mul(26)?.checked_add((byte - b'A') as usize + 1))
        .map(|col| col - 1)
}

/// `1` → 0. Row numbers are 1-based, so `0` is rejected.
pub(crate) fn row_to_index(digits: &str) -> Option<usize> {
    digits
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .map(|row| row - 1)
}

fn col_to_letters(col: usize) -> String {
    let mut col = col + 1;
    let mut letters = Vec::new();
    while col > 0 {
        col -= 1;
        letters.push(b'A' + (col % 26) as u8);
        col /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        assert_eq!(index_to_reference(0, 0), "A1");
        assert_eq!(index_to_reference(6, 2), "C7");
        assert_eq!(index_to_reference(9, 26), "AA10");
        assert_eq!(index_to_reference(0, 701), "ZZ1");
        assert_eq!(index_to_reference(0, 702), "AAA1");

        assert_eq!(reference_to_index("A1"), Some((0, 0)));
        assert_eq!(reference_to_index("AA10"), Some((9, 26)));
        assert_eq!(reference_to_index("zz1"), Some((0, 701)));
    }

    #[test]
    fn rejects_malformed_references() {
        assert_eq!(reference_to_index("A0"), None);
        assert_eq!(reference_to_index("12"), None);
        assert_eq!(reference_to_index("AB"), None);
        assert_eq!(col_to_index("A1"), None);
    }

    #[test]
    fn overlong_column_letters_are_rejected() {
        let letters = "Z".repeat(40);
        assert_eq!(col_to_index(&letters), None);
        assert_eq!(reference_to_index(&format!("{letters}1")), None);
        assert_eq!(col_to_index("XFD"), Some(16383));
    }
}
