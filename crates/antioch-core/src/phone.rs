//! Phone-number normalisation for individual intake.

/// Normalise a phone number to `(AAA) BBB-CCCC` where possible.
///
/// Ten digits format directly; eleven digits with a leading country `1` drop
/// the country digit first. Anything else (short, foreign, extension-laden)
/// is returned trimmed but otherwise untouched.
pub fn normalize_phone(raw: &str) -> String {
  let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

  let national = match digits.len() {
    10 => digits.as_str(),
    11 if digits.starts_with('1') => &digits[1..],
    _ => return raw.trim().to_string(),
  };

  format!(
    "({}) {}-{}",
    &national[..3],
    &national[3..6],
    &national[6..]
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_ten_digits() {
    assert_eq!(normalize_phone("5551234567"), "(555) 123-4567");
    assert_eq!(normalize_phone("555-123-4567"), "(555) 123-4567");
    assert_eq!(normalize_phone("(555) 123 4567"), "(555) 123-4567");
  }

  #[test]
  fn drops_leading_country_one() {
    assert_eq!(normalize_phone("+1 555 123 4567"), "(555) 123-4567");
    assert_eq!(normalize_phone("15551234567"), "(555) 123-4567");
  }

  #[test]
  fn leaves_unrecognised_input_trimmed() {
    assert_eq!(normalize_phone("  +44 20 7946 0958 "), "+44 20 7946 0958");
    assert_eq!(normalize_phone("x123"), "x123");
    assert_eq!(normalize_phone(""), "");
  }
}
