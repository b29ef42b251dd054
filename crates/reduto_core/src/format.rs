//! Live input masks for digit-based fields.
//!
//! # Responsibility
//! - Reformat raw input into canonical display patterns.
//! - Track per-field mask installation state explicitly.
//!
//! # Invariants
//! - `mask_value` is idempotent: reapplying yields the same string.
//! - Input is truncated to the field's maximum digit count first.
//! - A field with an externally-installed formatter is never masked twice.

/// Digit-masked input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskField {
    /// `DDD.DDD.DDD-DD`, 11 digits.
    TaxId,
    /// `(DD) DDDDD-DDDD`, 11 digits.
    Phone,
    /// `DDDDD-DDD`, 8 digits.
    PostalCode,
}

impl MaskField {
    /// Maximum number of digits retained for this field.
    pub fn max_digits(self) -> usize {
        match self {
            Self::TaxId | Self::Phone => 11,
            Self::PostalCode => 8,
        }
    }
}

/// Strips non-digit characters.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Applies the canonical display mask for `field` to arbitrary input.
///
/// Partial input keeps whatever separators are already justified by the
/// digits present, matching type-as-you-go reformatting.
pub fn mask_value(field: MaskField, raw: &str) -> String {
    let mut digits = digits_only(raw);
    digits.truncate(field.max_digits());

    match field {
        MaskField::TaxId => mask_tax_id(&digits),
        MaskField::Phone => mask_phone(&digits),
        MaskField::PostalCode => mask_postal_code(&digits),
    }
}

fn mask_tax_id(digits: &str) -> String {
    let mut out = String::with_capacity(14);
    for (index, ch) in digits.chars().enumerate() {
        match index {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(ch);
    }
    out
}

fn mask_phone(digits: &str) -> String {
    if digits.len() <= 2 {
        return digits.to_string();
    }
    let (area, rest) = digits.split_at(2);
    if rest.len() <= 5 {
        return format!("({area}) {rest}");
    }
    let (prefix, suffix) = rest.split_at(5);
    format!("({area}) {prefix}-{suffix}")
}

fn mask_postal_code(digits: &str) -> String {
    if digits.len() <= 5 {
        return digits.to_string();
    }
    let (prefix, suffix) = digits.split_at(5);
    format!("{prefix}-{suffix}")
}

/// Explicit per-field mask installation state.
///
/// Replaces the ambient process-wide "mask applied" flags of the original
/// page script: the controller owns this state, so installation stays
/// idempotent and testable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskSet {
    tax_id: bool,
    phone: bool,
    postal_code: bool,
}

impl MaskSet {
    /// Installs the mask for one field. Returns `false` if already installed.
    pub fn install(&mut self, field: MaskField) -> bool {
        let slot = self.slot_mut(field);
        let newly = !*slot;
        *slot = true;
        newly
    }

    /// Installs masks for every field.
    pub fn install_all(&mut self) {
        self.tax_id = true;
        self.phone = true;
        self.postal_code = true;
    }

    pub fn is_installed(&self, field: MaskField) -> bool {
        match field {
            MaskField::TaxId => self.tax_id,
            MaskField::Phone => self.phone,
            MaskField::PostalCode => self.postal_code,
        }
    }

    fn slot_mut(&mut self, field: MaskField) -> &mut bool {
        match field {
            MaskField::TaxId => &mut self.tax_id,
            MaskField::Phone => &mut self.phone,
            MaskField::PostalCode => &mut self.postal_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{digits_only, mask_value, MaskField, MaskSet};

    #[test]
    fn tax_id_mask_produces_canonical_form() {
        assert_eq!(mask_value(MaskField::TaxId, "11144477735"), "111.444.777-35");
    }

    #[test]
    fn phone_mask_produces_canonical_form() {
        assert_eq!(mask_value(MaskField::Phone, "11987654321"), "(11) 98765-4321");
    }

    #[test]
    fn postal_code_mask_produces_canonical_form() {
        assert_eq!(mask_value(MaskField::PostalCode, "01310930"), "01310-930");
    }

    #[test]
    fn masks_are_idempotent() {
        for (field, raw) in [
            (MaskField::TaxId, "111.444.777-35"),
            (MaskField::Phone, "(11) 98765-4321"),
            (MaskField::PostalCode, "01310-930"),
        ] {
            let once = mask_value(field, raw);
            assert_eq!(mask_value(field, &once), once);
            assert_eq!(once, raw);
        }
    }

    #[test]
    fn overlong_input_is_truncated_to_field_limit() {
        assert_eq!(
            mask_value(MaskField::TaxId, "111444777359999"),
            "111.444.777-35"
        );
        assert_eq!(mask_value(MaskField::PostalCode, "013109301"), "01310-930");
    }

    #[test]
    fn partial_input_keeps_only_justified_separators() {
        assert_eq!(mask_value(MaskField::TaxId, "1114"), "111.4");
        assert_eq!(mask_value(MaskField::TaxId, "111444777"), "111.444.777");
        assert_eq!(mask_value(MaskField::Phone, "11"), "11");
        assert_eq!(mask_value(MaskField::Phone, "1198765"), "(11) 98765");
        assert_eq!(mask_value(MaskField::PostalCode, "01310"), "01310");
    }

    #[test]
    fn digits_only_strips_everything_else() {
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn mask_set_install_is_idempotent() {
        let mut masks = MaskSet::default();
        assert!(masks.install(MaskField::TaxId));
        assert!(!masks.install(MaskField::TaxId));
        assert!(masks.is_installed(MaskField::TaxId));
        assert!(!masks.is_installed(MaskField::Phone));

        masks.install_all();
        assert!(masks.is_installed(MaskField::Phone));
        assert!(masks.is_installed(MaskField::PostalCode));
    }
}
