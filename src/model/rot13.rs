/// Rotate every ASCII letter 13 places within its case.
///
/// Digits, punctuation and non-ASCII characters pass through unchanged, so the
/// transform is only self-inverse on letters.
#[must_use]
pub fn rot13(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'a'..='m' | 'A'..='M' => char::from(c as u8 + 13),
            'n'..='z' | 'N'..='Z' => char::from(c as u8 - 13),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rot13_rotates_both_cases() {
        assert_eq!(rot13("secret"), "frperg");
        assert_eq!(rot13("Hello"), "Uryyb");
        assert_eq!(rot13("abcdefghijklmnopqrstuvwxyz"), "nopqrstuvwxyzabcdefghijklm");
        assert_eq!(rot13("ABCDEFGHIJKLMNOPQRSTUVWXYZ"), "NOPQRSTUVWXYZABCDEFGHIJKLM");
    }

    #[test]
    fn rot13_is_self_inverse_for_letters() {
        for input in ["", "a", "Zz", "pass", "secret", "AlIcE", "mnMN", "qwertyUIOP"] {
            assert_eq!(rot13(&rot13(input)), input, "input: {input}");
        }
    }

    #[test]
    fn rot13_leaves_digits_and_punctuation_alone() {
        for input in ["1234", "!@#$%^&*", "0-9_.,;:", "  ", "[]{}`~"] {
            assert_eq!(rot13(input), input, "input: {input}");
        }
    }

    #[test]
    fn rot13_mixed_input_only_moves_letters() {
        assert_eq!(rot13("p4ss!"), "c4ff!");
    }

    #[test]
    fn rot13_ignores_non_ascii() {
        assert_eq!(rot13("ñandú"), "ñnaqú");
    }
}
