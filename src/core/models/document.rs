//! Typed records for the certification-specification JSON document
//!
//! The input is a JSON object mapping each subpart name to an ordered list of
//! sections. Sections own requirements and AMCs; AMCs own requirements of
//! their own.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// A requirement attached to a CS or to an AMC
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Requirement {
    /// Unique requirement identifier (e.g., "CS 23.2005(a)")
    #[serde(rename = "Requirement ID", deserialize_with = "identifier")]
    pub id: String,
    /// Free text of the requirement, shown as the node tooltip
    #[serde(rename = "Content")]
    pub content: String,
}

/// Acceptable Means of Compliance for a CS
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Amc {
    /// AMC number (e.g., "23.2005")
    #[serde(rename = "AMC Number", deserialize_with = "identifier")]
    pub number: String,
    /// Descriptive AMC name
    #[serde(rename = "AMC Name")]
    pub name: String,
    /// Requirements stated by this AMC
    #[serde(rename = "Requirements", default, deserialize_with = "optional_list")]
    pub requirements: Vec<Requirement>,
}

impl Amc {
    /// Node id for this AMC (`AMC-<number>`)
    #[must_use]
    pub fn node_id(&self) -> String {
        format!("AMC-{}", self.number)
    }
}

/// A certification section listed under a subpart
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    /// CS number (e.g., "23.2005")
    #[serde(rename = "CS Number", deserialize_with = "identifier")]
    pub number: String,
    /// Descriptive CS name
    #[serde(rename = "CS Name")]
    pub name: String,
    /// Requirements stated directly by the CS
    #[serde(rename = "CS Requirements", default, deserialize_with = "optional_list")]
    pub requirements: Vec<Requirement>,
    /// AMCs that satisfy this CS
    #[serde(rename = "AMCs", default, deserialize_with = "optional_list")]
    pub amcs: Vec<Amc>,
}

impl Section {
    /// Node id for this section (`CS-<number>`)
    #[must_use]
    pub fn node_id(&self) -> String {
        format!("CS-{}", self.number)
    }
}

/// A named subpart and its sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subpart {
    /// Subpart name, used verbatim as node id and label
    pub name: String,
    /// Sections in document order
    pub sections: Vec<Section>,
}

/// The whole input document, subparts in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level subparts
    pub subparts: Vec<Subpart>,
}

impl Document {
    /// Create an empty document
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subparts: Vec::new(),
        }
    }

    /// Append a subpart
    pub fn add_subpart(&mut self, name: String, sections: Vec<Section>) {
        self.subparts.push(Subpart { name, sections });
    }

    /// Number of top-level subparts
    #[must_use]
    pub fn subpart_count(&self) -> usize {
        self.subparts.len()
    }

    /// Number of sections across all subparts
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.subparts.iter().map(|s| s.sections.len()).sum()
    }

    /// Look up a subpart by name
    #[must_use]
    pub fn get_subpart(&self, name: &str) -> Option<&Subpart> {
        self.subparts.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Document ({} subparts, {} sections)",
            self.subpart_count(),
            self.section_count()
        )?;
        for subpart in &self.subparts {
            writeln!(f, "  {} ({} sections)", subpart.name, subpart.sections.len())?;
        }
        Ok(())
    }
}

/// Identifiers show up as strings in most exports and as bare numbers in some
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentifier {
    Text(String),
    Number(serde_json::Number),
}

fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawIdentifier::deserialize(deserializer)? {
        RawIdentifier::Text(s) => s,
        RawIdentifier::Number(n) => n.to_string(),
    })
}

/// `null` and a missing key both mean "no children"
fn optional_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
