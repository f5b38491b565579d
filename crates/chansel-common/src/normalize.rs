/// Normalize a channel name for comparison.
///
/// Trims, collapses every run of Unicode whitespace (tabs, non-breaking
/// spaces, ...) into a single ASCII space and lowercases the result.
pub fn normalize_name(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_and_nbsp_variants_match() {
        assert_eq!(normalize_name("WLS  "), "wls");
        assert_eq!(normalize_name("WLS"), "wls");
        assert_eq!(normalize_name("wls\u{00A0}"), "wls");
    }

    #[test]
    fn test_collapses_internal_runs() {
        assert_eq!(normalize_name("  Fox\t\tNews\u{00A0} Channel "), "fox news channel");
        assert_eq!(normalize_name("ESPN\u{2003}2"), "espn 2");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "   ",
            "ESPN (West)",
            "A\u{00A0}\u{00A0}B\tC",
            "ÉCOLE  Tv",
            "already normal",
        ];
        for input in inputs {
            let once = normalize_name(input);
            assert_eq!(normalize_name(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name(" \u{00A0}\t"), "");
    }
}
