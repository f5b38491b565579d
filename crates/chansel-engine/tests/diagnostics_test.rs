use chansel_engine::ChannelSelector;
use chansel_engine::config::ChanselConfig;
use chansel_engine::diagnostics::{AvailableChannels, is_covered, uncovered_channels};
use chansel_engine::presets::{PresetCatalog, PresetEntry};
use chansel_engine::strategy::ProviderProfile;

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sling_selector() -> ChannelSelector {
    ChannelSelector::new(ChanselConfig {
        presets: vec![
            PresetEntry::new("espn-sling", ProviderProfile::new("guide", "espn")),
            PresetEntry::new("cnn-fubo", ProviderProfile::new("guide", "cnn")),
        ],
        ..ChanselConfig::default()
    })
}

#[test]
fn test_empty_discovery_logs_nothing() {
    let selector = sling_selector();
    let none: Vec<String> = Vec::new();

    for suffix in [None, Some("-sling")] {
        let line = selector.log_available_channels(&AvailableChannels {
            provider: "guide",
            selector: "ESPN",
            available: &none,
            preset_suffix: suffix,
            known_names: &names(&["CNN"]),
        });
        assert!(line.is_none());
    }
}

#[test]
fn test_unfiltered_lists_every_name() {
    let selector = sling_selector();
    let available = names(&["ESPN", "CNN", "Fox News"]);

    let line = selector
        .log_available_channels(&AvailableChannels {
            provider: "guide",
            selector: "ESPNU",
            available: &available,
            preset_suffix: None,
            known_names: &[],
        })
        .expect("expected a log line");

    assert!(line.contains("'ESPNU'"));
    assert!(line.ends_with("(3): ESPN, CNN, Fox News"), "line: {}", line);
}

#[test]
fn test_filtered_excludes_preset_covered_names() {
    let catalog = PresetCatalog::new(vec![PresetEntry::new(
        "espn-sling",
        ProviderProfile::new("guide", "espn"),
    )]);
    let covered = catalog.selectors_for_suffix("-sling");
    let available = names(&["ESPN", "ESPN 2", "ESPN News", "ESPN (West)"]);

    assert_eq!(uncovered_channels(&available, &covered), names(&["ESPN News"]));

    let selector = sling_selector();
    let line = selector
        .log_available_channels(&AvailableChannels {
            provider: "guide",
            selector: "ESPNU",
            available: &available,
            preset_suffix: Some("-sling"),
            known_names: &[],
        })
        .expect("expected a log line");
    assert!(line.ends_with("(1): ESPN News"), "line: {}", line);
}

#[test]
fn test_presets_of_other_families_do_not_cover() {
    let selector = sling_selector();
    let available = names(&["CNN", "ESPN"]);

    let line = selector
        .log_available_channels(&AvailableChannels {
            provider: "guide",
            selector: "HLN",
            available: &available,
            preset_suffix: Some("-sling"),
            known_names: &[],
        })
        .expect("expected a log line");
    assert!(line.ends_with("(1): CNN"), "line: {}", line);
}

#[test]
fn test_known_names_merge_into_exclusions() {
    let selector = sling_selector();
    let available = names(&["ESPN", "ESPN News"]);

    let line = selector.log_available_channels(&AvailableChannels {
        provider: "guide",
        selector: "ESPNU",
        available: &available,
        preset_suffix: Some("-sling"),
        known_names: &names(&["espn  news"]),
    });
    assert!(line.is_none());
}

#[test]
fn test_digit_suffix_requires_single_space() {
    let covered = ["espn".to_string()].into_iter().collect();
    assert!(is_covered("ESPN 2", &covered));
    assert!(!is_covered("ESPN2", &covered));
    assert!(!is_covered("ESPNews 2", &covered));
}
