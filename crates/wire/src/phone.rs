/// Normalize a sender address to E.164-ish form.
///
/// Strips every character except digits, then prepends `+` when the input
/// carried no prefix. Bare national numbers are not special-cased; the
/// provider is expected to deliver country-coded addresses.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("+{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting() {
        assert_eq!(normalize_phone("+1 (415) 555-1234"), "+14155551234");
        assert_eq!(normalize_phone("91 99999 99999"), "+919999999999");
    }

    #[test]
    fn prepends_plus_when_missing() {
        assert_eq!(normalize_phone("14155551234"), "+14155551234");
    }

    #[test]
    fn idempotent_on_normalized_input() {
        let once = normalize_phone("+14155551234");
        assert_eq!(normalize_phone(&once), once);
    }
}
