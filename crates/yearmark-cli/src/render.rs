//! Plain-text rendering of pipeline results for the terminal.

use std::fmt::Write as _;

use yearmark_core::{EventCatalog, digits};
use yearmark_types::{EncodedYear, MnemonicResult};

/// Render a generation result.
pub fn mnemonic(event: &str, year: u32, result: &MnemonicResult) -> String {
    let letters = digits::encode(year);
    let mut out = String::new();
    let _ = writeln!(out, "Event:       {event}");
    let _ = writeln!(out, "Year:        {year} ({})", letters_label(&letters));
    let _ = writeln!(out, "Mnemonic:    {}", result.mnemonic_text);
    if !result.description.is_empty() {
        let _ = writeln!(out, "Description: {}", result.description);
    }
    if !result.source_link.is_empty() {
        let _ = writeln!(out, "Source:      {}", result.source_link);
    }
    out
}

/// Render several results, separated by blank lines.
pub fn mnemonics(runs: &[(String, u32, MnemonicResult)]) -> String {
    runs.iter()
        .map(|(event, year, result)| mnemonic(event, *year, result))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the digit/letter table for an encoded year.
pub fn encoding(encoded: &EncodedYear) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Year {}: {}", encoded.year, letters_label(encoded));
    for pair in encoded.pairs() {
        let _ = writeln!(out, "  {} -> {}", pair.digit, pair.letter);
    }
    out
}

/// Render every catalog year with its events, most recent first.
pub fn catalog(catalog: &EventCatalog) -> String {
    let mut out = String::new();
    for year in catalog.years() {
        let _ = writeln!(out, "{year}: {}", catalog.events_for_year(year).join(", "));
    }
    out
}

/// Render the events recorded for one year.
pub fn events_for_year(catalog: &EventCatalog, year: u32) -> String {
    let events = catalog.events_for_year(year);
    if events.is_empty() {
        return format!("No catalog events for {year}.\n");
    }
    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "{event}");
    }
    out
}

fn letters_label(encoded: &EncodedYear) -> String {
    if encoded.is_empty() {
        "no letters".to_owned()
    } else {
        format!("letters {}", encoded.spaced())
    }
}

#[cfg(test)]
mod tests {
    use yearmark_types::EventInfo;

    use super::*;

    #[test]
    fn successful_result_shows_all_fields() {
        let result = MnemonicResult::generated(
            "Liberty Loving Gentlemen",
            EventInfo {
                description: "Independence was declared.".to_owned(),
                source_link: "https://en.wikipedia.org/wiki/Declaration_of_Independence"
                    .to_owned(),
            },
        );
        let text = mnemonic("Declaration of Independence", 1776, &result);
        assert!(text.contains("Year:        1776 (letters L L G)"));
        assert!(text.contains("Mnemonic:    Liberty Loving Gentlemen"));
        assert!(text.contains("Source:      https://en.wikipedia.org/wiki/"));
    }

    #[test]
    fn failed_result_omits_empty_fields() {
        let result = MnemonicResult::failed("HTTP 401");
        let text = mnemonic("Moon Landing", 1969, &result);
        assert!(text.contains("Mnemonic:    Error: HTTP 401"));
        assert!(!text.contains("Description:"));
        assert!(!text.contains("Source:"));
    }

    #[test]
    fn batch_results_are_separated_by_blank_lines() {
        let runs = vec![
            (
                "Gaspee Affair".to_owned(),
                1772,
                MnemonicResult::missing_credential("no key"),
            ),
            (
                "Moon Landing".to_owned(),
                1969,
                MnemonicResult::missing_credential("no key"),
            ),
        ];
        let text = mnemonics(&runs);
        assert!(text.starts_with("Event:       Gaspee Affair\n"));
        assert!(text.contains("Mnemonic:    no key\n\nEvent:       Moon Landing\n"));
        assert!(text.ends_with("Mnemonic:    no key\n"));
    }

    #[test]
    fn encoding_lists_each_pair() {
        let text = encoding(&digits::encode(2001));
        assert_eq!(text, "Year 2001: letters O O A\n  0 -> O\n  0 -> O\n  1 -> A\n");
        assert_eq!(encoding(&digits::encode(5)), "Year 5: no letters\n");
    }

    #[test]
    fn events_for_unknown_year_says_so() {
        let catalog = EventCatalog::curated();
        assert_eq!(events_for_year(&catalog, 1700), "No catalog events for 1700.\n");
        assert_eq!(events_for_year(&catalog, 1772), "Gaspee Affair\n");
    }

    #[test]
    fn catalog_starts_with_most_recent_year() {
        let text = catalog(&EventCatalog::curated());
        assert!(text.starts_with("1989: Fall of the Berlin Wall\n"));
    }
}
