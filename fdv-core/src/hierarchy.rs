use crate::error::Result;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded state -> district reference table (`STATE,DISTRICT` rows).
///
/// Spellings follow the administrative list, not the geometry sources.
pub static DISTRICTS_OF_STATES_CSV: &str = include_str!("../../fixtures/districts_of_states.csv");

/// A state and its districts, in reference-table order.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RegionHierarchyEntry {
    pub state: String,
    pub districts: Vec<String>,
}

/// Static mapping from each state to its ordered list of districts.
///
/// Only used to populate the cascading state/district dropdowns.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct RegionHierarchy {
    entries: Vec<RegionHierarchyEntry>,
}

impl RegionHierarchy {
    /// The hierarchy embedded in the binary.
    pub fn embedded() -> Result<RegionHierarchy> {
        RegionHierarchy::parse_hierarchy_csv(DISTRICTS_OF_STATES_CSV)
    }

    /// Parse `STATE,DISTRICT` rows (with headers).
    ///
    /// States keep the order of their first row; districts keep file order.
    pub fn parse_hierarchy_csv(csv_object: &str) -> Result<RegionHierarchy> {
        let mut entries: Vec<RegionHierarchyEntry> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let state = record.get(0).unwrap_or("").trim();
            let district = record.get(1).unwrap_or("").trim();
            if state.is_empty() {
                continue;
            }
            let position = match entries.iter().position(|e| e.state == state) {
                Some(position) => position,
                None => {
                    entries.push(RegionHierarchyEntry {
                        state: state.to_string(),
                        districts: Vec::new(),
                    });
                    entries.len() - 1
                }
            };
            if !district.is_empty() {
                entries[position].districts.push(district.to_string());
            }
        }
        log::info!("Loaded region hierarchy with {} states", entries.len());
        Ok(RegionHierarchy { entries })
    }

    pub fn entries(&self) -> &[RegionHierarchyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State names in reference-table order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.state.as_str())
    }

    /// Districts of `state`, or `None` for a state the table does not know.
    pub fn districts_of(&self, state: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.state == state)
            .map(|e| e.districts.as_slice())
    }

    pub fn contains(&self, state: &str, district: &str) -> bool {
        self.districts_of(state)
            .map(|districts| districts.iter().any(|d| d == district))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::RegionHierarchy;

    #[test]
    fn test_embedded_hierarchy() {
        let hierarchy = RegionHierarchy::embedded().unwrap();
        assert_eq!(hierarchy.len(), 36);
        assert_eq!(hierarchy.states().next(), Some("Andaman and Nicobar Islands"));
        assert_eq!(hierarchy.states().last(), Some("West Bengal"));
    }

    #[test]
    fn test_kerala_districts_in_order() {
        let hierarchy = RegionHierarchy::embedded().unwrap();
        let kerala = hierarchy.districts_of("Kerala").unwrap();
        let expected = [
            "Alappuzha",
            "Ernakulam",
            "Idukki",
            "Kannur",
            "Kasaragod",
            "Kollam",
            "Kottayam",
            "Kozhikode",
            "Malappuram",
            "Palakkad",
            "Pathanamthitta",
            "Thiruvananthapuram",
            "Thrissur",
            "Wayanad",
        ];
        assert_eq!(kerala, expected.map(String::from).as_slice());
    }

    #[test]
    fn test_unknown_state() {
        let hierarchy = RegionHierarchy::embedded().unwrap();
        assert!(hierarchy.districts_of("Atlantis").is_none());
        assert!(!hierarchy.contains("Atlantis", "Patna"));
        assert!(hierarchy.contains("Bihar", "Patna"));
        assert!(!hierarchy.contains("Jharkhand", "Patna"));
    }

    #[test]
    fn test_parse_groups_repeated_states() {
        let csv_data = "\
STATE,DISTRICT
Goa,North Goa
Ladakh,Kargil
Goa,South Goa
Ladakh,Leh
";
        let hierarchy = RegionHierarchy::parse_hierarchy_csv(csv_data).unwrap();
        assert_eq!(hierarchy.states().collect::<Vec<_>>(), vec!["Goa", "Ladakh"]);
        assert_eq!(hierarchy.districts_of("Goa").unwrap(), ["North Goa", "South Goa"]);
        assert_eq!(hierarchy.districts_of("Ladakh").unwrap(), ["Kargil", "Leh"]);
    }
}
