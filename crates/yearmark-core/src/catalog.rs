//! Curated year -> event name reference data.
//!
//! The catalog is a convenience picklist, not a whitelist: any event name
//! may be passed to the generator whether or not it appears here. Names are
//! written as reference page titles so the derived link resolves. Some
//! entries carry a curated description, which is used in place of a
//! reference lookup.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;

/// Built-in events, in ascending year order.
const CURATED: &[(u32, &[&str])] = &[
    (1066, &["Battle of Hastings"]),
    (1215, &["Magna Carta"]),
    (1492, &["Voyages of Christopher Columbus"]),
    (1517, &["Ninety-five Theses"]),
    (1607, &["Jamestown Settlement"]),
    (1620, &["Mayflower Compact"]),
    (1754, &["French and Indian War"]),
    (1765, &["Stamp Act 1765"]),
    (1770, &["Boston Massacre"]),
    (1772, &["Gaspee Affair"]),
    (1773, &["Boston Tea Party"]),
    (1774, &["First Continental Congress", "Intolerable Acts"]),
    (
        1775,
        &["Battles of Lexington and Concord", "Battle of Bunker Hill"],
    ),
    (1776, &["Declaration of Independence", "Common Sense"]),
    (1777, &["Battles of Saratoga", "Articles of Confederation"]),
    (1781, &["Siege of Yorktown"]),
    (1783, &["Treaty of Paris"]),
    (1787, &["Constitutional Convention", "Northwest Ordinance"]),
    (1789, &["Storming of the Bastille"]),
    (1791, &["United States Bill of Rights"]),
    (1803, &["Louisiana Purchase", "Marbury v. Madison"]),
    (1815, &["Battle of Waterloo"]),
    (1820, &["Missouri Compromise"]),
    (1848, &["Seneca Falls Convention", "California Gold Rush"]),
    (1861, &["Battle of Fort Sumter"]),
    (1863, &["Emancipation Proclamation", "Battle of Gettysburg"]),
    (1869, &["First transcontinental railroad"]),
    (1914, &["Assassination of Archduke Franz Ferdinand"]),
    (1920, &["Nineteenth Amendment to the United States Constitution"]),
    (1929, &["Wall Street Crash of 1929"]),
    (1941, &["Attack on Pearl Harbor"]),
    (1944, &["Normandy landings"]),
    (1954, &["Brown v. Board of Education"]),
    (1962, &["Cuban Missile Crisis"]),
    (1963, &["March on Washington for Jobs and Freedom"]),
    (1969, &["Moon Landing"]),
    (1989, &["Fall of the Berlin Wall"]),
];

/// Curated descriptions, keyed by event name.
const CURATED_DESCRIPTIONS: &[(&str, &str)] = &[
    (
        "Gaspee Affair",
        "Colonists burned the British schooner Gaspee, escalating tensions leading up to the American Revolution.",
    ),
    (
        "Declaration of Independence",
        "The thirteen American colonies declared independence from British rule.",
    ),
    (
        "Moon Landing",
        "Apollo 11 mission successfully landed the first humans on the Moon.",
    ),
];

/// One event in a catalog file: a bare name, or a name with a description.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Name(String),
    Described {
        event: String,
        #[serde(default)]
        description: Option<String>,
    },
}

/// Read-only mapping from year to the ordered event names for that year.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventCatalog {
    events: BTreeMap<u32, Vec<String>>,
    /// Lowercased event name -> curated description.
    descriptions: BTreeMap<String, String>,
}

impl EventCatalog {
    /// The built-in curated catalog.
    pub fn curated() -> Self {
        let events = CURATED
            .iter()
            .map(|(year, names)| (*year, names.iter().map(|n| (*n).to_owned()).collect()))
            .collect();
        let descriptions = CURATED_DESCRIPTIONS
            .iter()
            .map(|(name, text)| (name.to_lowercase(), (*text).to_owned()))
            .collect();
        Self {
            events,
            descriptions,
        }
    }

    /// Build a catalog from a YAML mapping of years to event lists.
    ///
    /// Each list item is either a bare event name or a mapping with `event`
    /// and an optional `description`:
    ///
    /// ```yaml
    /// 1772:
    ///   - event: Gaspee Affair
    ///     description: Colonists burned the British schooner Gaspee.
    /// 1773:
    ///   - Boston Tea Party
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the text is not such a mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<u32, Vec<CatalogEntry>> = serde_yml::from_str(yaml)?;

        let mut catalog = Self::default();
        for (year, entries) in raw {
            let mut names = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    CatalogEntry::Name(name) => names.push(name),
                    CatalogEntry::Described { event, description } => {
                        if let Some(text) = description.filter(|d| !d.trim().is_empty()) {
                            catalog.descriptions.insert(event.trim().to_lowercase(), text);
                        }
                        names.push(event);
                    }
                }
            }
            catalog.events.insert(year, names);
        }
        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or
    /// [`CatalogError::Yaml`] if it is not a valid catalog.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Event names recorded for `year`, in display order. Empty if none.
    pub fn events_for_year(&self, year: u32) -> &[String] {
        self.events.get(&year).map(Vec::as_slice).unwrap_or_default()
    }

    /// All years with at least one entry, most recent first.
    pub fn years(&self) -> Vec<u32> {
        self.events.keys().rev().copied().collect()
    }

    /// The earliest year listing `event` (case-insensitive).
    pub fn year_of(&self, event: &str) -> Option<u32> {
        let wanted = event.trim().to_lowercase();
        self.events
            .iter()
            .find(|(_, names)| names.iter().any(|n| n.to_lowercase() == wanted))
            .map(|(year, _)| *year)
    }

    /// The curated description for `event` (case-insensitive), if any.
    pub fn description_of(&self, event: &str) -> Option<&str> {
        self.descriptions
            .get(&event.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Every `(year, event)` pair, oldest year first, in listed order.
    pub fn entries(&self) -> Vec<(u32, &str)> {
        self.events
            .iter()
            .flat_map(|(year, names)| names.iter().map(move |n| (*year, n.as_str())))
            .collect()
    }

    /// Number of years in the catalog.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the catalog holds no years.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curated_contains_seed_events() {
        let catalog = EventCatalog::curated();
        assert_eq!(catalog.events_for_year(1772), ["Gaspee Affair"]);
        assert_eq!(
            catalog.events_for_year(1776).first().map(String::as_str),
            Some("Declaration of Independence")
        );
        assert_eq!(catalog.events_for_year(1969), ["Moon Landing"]);
    }

    #[test]
    fn curated_table_is_sorted_and_unique() {
        let years: Vec<u32> = CURATED.iter().map(|(y, _)| *y).collect();
        let mut sorted = years.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(years, sorted);
    }

    #[test]
    fn years_are_descending() {
        let years = EventCatalog::curated().years();
        assert!(years.windows(2).all(|w| w.first() > w.get(1)));
        assert_eq!(years.first(), Some(&1989));
    }

    #[test]
    fn unknown_year_is_empty() {
        assert!(EventCatalog::curated().events_for_year(1700).is_empty());
    }

    #[test]
    fn year_of_ignores_case() {
        let catalog = EventCatalog::curated();
        assert_eq!(catalog.year_of("moon landing"), Some(1969));
        assert_eq!(catalog.year_of("Battle of Bunker Hill"), Some(1775));
        assert_eq!(catalog.year_of("Treaty of Westphalia"), None);
    }

    #[test]
    fn from_yaml_preserves_insertion_order() {
        let yaml = "1776:\n  - Common Sense\n  - Declaration of Independence\n1066:\n  - Battle of Hastings\n";
        let catalog = EventCatalog::from_yaml(yaml);
        assert!(catalog.is_ok());
        let catalog = catalog.unwrap_or_default();
        assert_eq!(
            catalog.events_for_year(1776),
            ["Common Sense", "Declaration of Independence"]
        );
        assert_eq!(catalog.years(), vec![1776, 1066]);
    }

    #[test]
    fn curated_descriptions_are_looked_up_by_name() {
        let catalog = EventCatalog::curated();
        assert_eq!(
            catalog.description_of("gaspee affair"),
            Some(
                "Colonists burned the British schooner Gaspee, escalating tensions leading up to the American Revolution."
            )
        );
        assert!(
            catalog
                .description_of(" Moon Landing ")
                .is_some_and(|d| d.starts_with("Apollo 11"))
        );
        assert_eq!(catalog.description_of("Boston Tea Party"), None);
    }

    #[test]
    fn every_curated_description_names_a_catalog_event() {
        let catalog = EventCatalog::curated();
        for (name, _) in CURATED_DESCRIPTIONS {
            assert!(catalog.year_of(name).is_some(), "{name} is not in the catalog");
        }
    }

    #[test]
    fn entries_run_oldest_first() {
        let catalog = EventCatalog::curated();
        let entries = catalog.entries();
        assert_eq!(entries.first(), Some(&(1066, "Battle of Hastings")));
        assert_eq!(entries.last(), Some(&(1989, "Fall of the Berlin Wall")));
        assert!(entries.contains(&(1776, "Common Sense")));
        assert!(entries.windows(2).all(|w| w.first() <= w.get(1)));
    }

    #[test]
    fn from_yaml_accepts_described_entries() {
        let yaml = "1772:\n  - event: Gaspee Affair\n    description: A schooner burned.\n  - Boston Massacre\n1969:\n  - event: Moon Landing\n";
        let catalog = EventCatalog::from_yaml(yaml);
        assert!(catalog.is_ok(), "{catalog:?}");
        let catalog = catalog.unwrap_or_default();
        assert_eq!(
            catalog.events_for_year(1772),
            ["Gaspee Affair", "Boston Massacre"]
        );
        assert_eq!(catalog.description_of("Gaspee Affair"), Some("A schooner burned."));
        assert_eq!(catalog.description_of("Boston Massacre"), None);
        assert_eq!(catalog.description_of("Moon Landing"), None);
        assert_eq!(catalog.year_of("moon landing"), Some(1969));
    }

    #[test]
    fn from_yaml_rejects_non_mapping() {
        assert!(EventCatalog::from_yaml("- just\n- a list\n").is_err());
    }
}
