//! Not-found diagnostics: tell the user which channel names the page
//! actually offers.

use crate::presets::PresetCatalog;
use chansel_common::normalize_name;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::info;

static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("static regex"));

pub struct AvailableChannels<'a> {
    /// Strategy or provider label used as the log prefix.
    pub provider: &'a str,
    /// The selector value that failed to match.
    pub selector: &'a str,
    /// Channel names discovered on the page.
    pub available: &'a [String],
    /// Preset family suffix; when set, names already covered by a preset of
    /// that family are left out.
    pub preset_suffix: Option<&'a str>,
    /// Extra names to exclude alongside the preset selectors.
    pub known_names: &'a [String],
}

/// Emit one info line listing usable channel names and return it.
///
/// Returns `None` (and logs nothing) when nothing was discovered or every
/// discovered name is already covered.
pub fn log_available_channels(
    options: &AvailableChannels<'_>,
    presets: &PresetCatalog,
) -> Option<String> {
    if options.available.is_empty() {
        return None;
    }

    let line = match options.preset_suffix {
        None => format!(
            "[{}] Channel '{}' not found. Available channels ({}): {}",
            options.provider,
            options.selector,
            options.available.len(),
            options.available.join(", ")
        ),
        Some(suffix) => {
            let mut covered = presets.selectors_for_suffix(suffix);
            covered.extend(
                options
                    .known_names
                    .iter()
                    .map(|n| normalize_name(n))
                    .filter(|n| !n.is_empty()),
            );

            let uncovered = uncovered_channels(options.available, &covered);
            if uncovered.is_empty() {
                return None;
            }
            format!(
                "[{}] Channel '{}' not found. Channels without a '{}' preset ({}): {}",
                options.provider,
                options.selector,
                suffix,
                uncovered.len(),
                uncovered.join(", ")
            )
        }
    };

    info!("{}", line);
    Some(line)
}

/// Discovered names not covered by any selector in `covered`.
pub fn uncovered_channels(available: &[String], covered: &HashSet<String>) -> Vec<String> {
    available
        .iter()
        .filter(|name| !is_covered(name, covered))
        .cloned()
        .collect()
}

/// Case-insensitive coverage test.
///
/// A trailing parenthetical is dropped first ("ESPN (West)" → "espn"). The
/// name is covered if it equals a selector, or is a selector followed by a
/// space and a digit ("ESPN 2").
pub fn is_covered(name: &str, covered: &HashSet<String>) -> bool {
    let stripped = TRAILING_PARENTHETICAL.replace(name, "");
    let normalized = normalize_name(&stripped);
    if normalized.is_empty() {
        return false;
    }
    if covered.contains(&normalized) {
        return true;
    }
    covered.iter().any(|selector| {
        normalized
            .strip_prefix(selector.as_str())
            .and_then(|rest| rest.strip_prefix(' '))
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    })
}
