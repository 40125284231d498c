//! Address normalization.

/// Normalize a free-text address into a cache key.
///
/// Lowercases, drops every character that is not alphanumeric, `_`,
/// whitespace or `-`, then collapses runs of whitespace into single spaces
/// and trims the ends.
///
/// Two addresses differing only in case, punctuation or spacing produce the
/// same key. This is lossy on purpose: `"Rua A, 10"` and `"rua a 10"` share
/// one cache entry.
///
/// # Examples
///
/// ```
/// use route_cost_server::domain::normalize_address;
///
/// assert_eq!(
///     normalize_address("  Av. Paulista,   1000 - São Paulo "),
///     "av paulista 1000 - são paulo"
/// );
/// ```
pub fn normalize_address(address: &str) -> String {
    let stripped: String = address
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize_address("  RUA AUGUSTA  "), "rua augusta");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_address("rua\t\taugusta\n 100"), "rua augusta 100");
    }

    #[test]
    fn strips_punctuation_but_keeps_hyphens() {
        assert_eq!(
            normalize_address("Rua Augusta, 100 - Consolação/SP."),
            "rua augusta 100 - consolaçãosp"
        );
    }

    #[test]
    fn punctuation_between_spaces_does_not_leave_double_spaces() {
        assert_eq!(normalize_address("Rua A , 10"), "rua a 10");
    }

    #[test]
    fn equivalent_spellings_share_a_key() {
        assert_eq!(
            normalize_address("Av. Brasil, 500"),
            normalize_address("av brasil 500")
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize_address(""), "");
        assert_eq!(normalize_address(" ,.; "), "");
    }
}
