use serde::{Deserialize, Serialize};

use crate::id::fresh_id;

/// Errors produced by the editor data model.
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error("legend must keep at least one entry")]
    LastLegendEntry,
    #[error("sections must keep at least one entry")]
    LastSectionEntry,
    #[error("unknown entry id `{0}`")]
    UnknownEntry(String),
}

/// One color-legend entry (what a room's color means to the crew).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub id: String,
    pub label: String,
    /// CSS-style color, e.g. `#a7f3d0`. Optional; the editor falls back to
    /// its palette when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One house-section entry (which physical area a room belongs to).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub id: String,
    pub label: String,
}

/// Ordered, non-empty list of color-legend entries with unique ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColorLegend {
    entries: Vec<LegendEntry>,
}

/// Ordered, non-empty list of house sections with unique ids.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HouseSections {
    entries: Vec<SectionEntry>,
}

impl Default for ColorLegend {
    fn default() -> Self {
        Self {
            entries: vec![LegendEntry {
                id: fresh_id(),
                label: "Standard clean".to_owned(),
                color: Some("#a7f3d0".to_owned()),
            }],
        }
    }
}

impl Default for HouseSections {
    fn default() -> Self {
        Self {
            entries: vec![SectionEntry {
                id: fresh_id(),
                label: "Main floor".to_owned(),
            }],
        }
    }
}

impl ColorLegend {
    /// Build a legend from entries, dropping duplicate ids (first wins).
    /// Falls back to the default single entry when `entries` is empty.
    pub fn from_entries(entries: Vec<LegendEntry>) -> Self {
        let entries = dedup_by_id(entries, |e| &e.id);
        if entries.is_empty() {
            return Self::default();
        }
        Self { entries }
    }

    #[inline]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Id of the first entry. The legend is never empty, so this always
    /// exists; it is the fallback target for repairs.
    #[inline]
    pub fn first_id(&self) -> &str {
        &self.entries[0].id
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Append a new entry and return its fresh id.
    pub fn add(&mut self, label: impl Into<String>, color: Option<String>) -> String {
        let id = fresh_id();
        self.entries.push(LegendEntry {
            id: id.clone(),
            label: label.into(),
            color,
        });
        id
    }

    /// Remove the entry with `id`. Refuses to remove the last entry.
    pub fn remove(&mut self, id: &str) -> Result<(), ModelError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ModelError::UnknownEntry(id.to_owned()))?;
        if self.entries.len() == 1 {
            return Err(ModelError::LastLegendEntry);
        }
        self.entries.remove(idx);
        Ok(())
    }
}

impl HouseSections {
    pub fn from_entries(entries: Vec<SectionEntry>) -> Self {
        let entries = dedup_by_id(entries, |e| &e.id);
        if entries.is_empty() {
            return Self::default();
        }
        Self { entries }
    }

    #[inline]
    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    #[inline]
    pub fn first_id(&self) -> &str {
        &self.entries[0].id
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn add(&mut self, label: impl Into<String>) -> String {
        let id = fresh_id();
        self.entries.push(SectionEntry {
            id: id.clone(),
            label: label.into(),
        });
        id
    }

    /// Remove the entry with `id`. Refuses to remove the last entry.
    pub fn remove(&mut self, id: &str) -> Result<(), ModelError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ModelError::UnknownEntry(id.to_owned()))?;
        if self.entries.len() == 1 {
            return Err(ModelError::LastSectionEntry);
        }
        self.entries.remove(idx);
        Ok(())
    }
}

fn dedup_by_id<T>(entries: Vec<T>, id_of: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(id_of(e).to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_is_never_empty() {
        let legend = ColorLegend::from_entries(Vec::new());
        assert_eq!(legend.entries().len(), 1);
    }

    #[test]
    fn remove_refuses_last_entry() {
        let mut legend = ColorLegend::default();
        let id = legend.first_id().to_owned();
        assert!(matches!(
            legend.remove(&id),
            Err(ModelError::LastLegendEntry)
        ));
        assert!(legend.contains(&id));
    }

    #[test]
    fn remove_unknown_id_errors() {
        let mut sections = HouseSections::default();
        assert!(matches!(
            sections.remove("missing"),
            Err(ModelError::UnknownEntry(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_dropped_first_wins() {
        let entries = vec![
            LegendEntry {
                id: "dup".into(),
                label: "first".into(),
                color: None,
            },
            LegendEntry {
                id: "dup".into(),
                label: "second".into(),
                color: None,
            },
        ];
        let legend = ColorLegend::from_entries(entries);
        assert_eq!(legend.entries().len(), 1);
        assert_eq!(legend.entries()[0].label, "first");
    }

    #[test]
    fn add_then_remove_keeps_order() {
        let mut sections = HouseSections::default();
        let first = sections.first_id().to_owned();
        let upstairs = sections.add("Upstairs");
        let basement = sections.add("Basement");
        sections.remove(&upstairs).unwrap();
        let ids: Vec<&str> = sections.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), basement.as_str()]);
    }
}
