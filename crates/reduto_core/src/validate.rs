//! Field validators for registration input.
//!
//! # Responsibility
//! - Provide pure, deterministic checks for name, email and tax ID.
//!
//! # Invariants
//! - Validators never mutate input and have no side effects.
//! - Tax ID validation accepts masked or unmasked digit input.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Validates an 11-digit national tax ID with two trailing check digits.
///
/// Non-digit characters are stripped first, so masked input is accepted.
/// Rejects wrong lengths and the trivially-invalid all-same-digit IDs,
/// then verifies both weighted modulo-11 check digits.
pub fn is_valid_tax_id(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    for check_pos in [9usize, 10] {
        let sum: u32 = digits[..check_pos]
            .iter()
            .enumerate()
            .map(|(i, &d)| d * (check_pos as u32 + 1 - i as u32))
            .sum();
        if ((10 * sum) % 11) % 10 != digits[check_pos] {
            return false;
        }
    }

    true
}

/// Structural email check: one `@`, non-whitespace local part, dotted domain.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}

/// Names must have at least two characters after trimming.
pub fn is_valid_name(raw: &str) -> bool {
    raw.trim().chars().count() >= 2
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, is_valid_name, is_valid_tax_id};

    #[test]
    fn tax_id_accepts_known_valid_ids() {
        assert!(is_valid_tax_id("11144477735"));
        assert!(is_valid_tax_id("52998224725"));
    }

    #[test]
    fn tax_id_accepts_masked_input() {
        assert!(is_valid_tax_id("111.444.777-35"));
    }

    #[test]
    fn tax_id_rejects_every_repeated_digit_sequence() {
        for digit in 0..=9 {
            let repeated = digit.to_string().repeat(11);
            assert!(!is_valid_tax_id(&repeated), "{repeated} must be invalid");
        }
    }

    #[test]
    fn tax_id_rejects_wrong_length() {
        assert!(!is_valid_tax_id(""));
        assert!(!is_valid_tax_id("1114447773"));
        assert!(!is_valid_tax_id("111444777350"));
    }

    #[test]
    fn tax_id_rejects_single_digit_flips() {
        let valid = "11144477735";
        for (pos, original) in valid.chars().enumerate() {
            let flipped_digit = ((original.to_digit(10).unwrap() + 1) % 10).to_string();
            let mut flipped = String::with_capacity(valid.len());
            flipped.push_str(&valid[..pos]);
            flipped.push_str(&flipped_digit);
            flipped.push_str(&valid[pos + 1..]);
            assert!(!is_valid_tax_id(&flipped), "flip at {pos} must invalidate");
        }
    }

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana silva@example.com"));
        assert!(!is_valid_email("ana@@example.com"));
    }

    #[test]
    fn name_needs_two_characters_after_trim() {
        assert!(is_valid_name("Jo"));
        assert!(is_valid_name("  Ana  "));
        assert!(!is_valid_name("A"));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name(""));
    }
}
