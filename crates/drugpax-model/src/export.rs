//! JSON snapshot of a [`Model`].
//!
//! Layout:
//!
//! ```json
//! { "xml_base": "…", "elements": [ { "type": "SmallMolecule", "id": "…", … }, … ] }
//! ```
//!
//! Elements are written in id order, so identical models produce identical bytes.

use crate::element::Element;
use crate::model::Model;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    xml_base: &'a str,
    elements: Vec<&'a Element>,
}

/// Owned form of the snapshot, for reading exports back.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub xml_base: String,
    pub elements: Vec<Element>,
}

impl Snapshot {
    /// Rebuild a model from a parsed snapshot.
    pub fn into_model(self) -> Result<Model, crate::ModelError> {
        let mut model = Model::with_xml_base(self.xml_base);
        for element in self.elements {
            model.add(element)?;
        }
        Ok(model)
    }
}

fn snapshot(model: &Model) -> SnapshotRef<'_> {
    SnapshotRef {
        xml_base: model.xml_base(),
        elements: model.iter().collect(),
    }
}

pub fn to_json_string(model: &Model) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&snapshot(model))
}

pub fn write_json<W: Write>(model: &Model, writer: W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, &snapshot(model))
}

pub fn from_json_str(json: &str) -> serde_json::Result<Snapshot> {
    serde_json::from_str(json)
}
