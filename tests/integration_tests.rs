//! Integration tests for the complete drugpax pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - DrugBank XML file → records → pathway model
//! - Model → JSON snapshot → model
//!
//! Run with: cargo test --test integration_tests

use anyhow::Result;
use drugpax_ingest_drugbank::{convert, read_drugbank_file, ConvertConfig, DrugBankError};
use drugpax_model::export::{from_json_str, to_json_string, write_json};
use drugpax_model::{
    BiochemicalReaction, Control, ElementKind, ModificationFeature, Named, Protein,
    SequenceModificationVocabulary, SmallMolecule,
};
use std::fs;
use tempfile::tempdir;

const DRUGBANK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<drugbank xmlns="http://www.drugbank.ca" version="5.1">
  <drug type="small molecule">
    <drugbank-id primary="true">DB00945</drugbank-id>
    <drugbank-id>APRD00264</drugbank-id>
    <name>Acetylsalicylic acid</name>
    <description>The prototypical analgesic.</description>
    <general-references>
      <articles>
        <article>
          <pubmed-id>10592235</pubmed-id>
          <citation>Vane JR: The mechanism of action of aspirin.</citation>
        </article>
      </articles>
      <textbooks>
        <textbook>
          <isbn>978-0071624428</isbn>
          <citation>Goodman and Gilman's The Pharmacological Basis of Therapeutics</citation>
        </textbook>
      </textbooks>
      <links/>
    </general-references>
    <synonyms>
      <synonym>Aspirin</synonym>
    </synonyms>
    <experimental-properties>
      <property><kind>Molecular Weight</kind><value>180.16</value><source/></property>
      <property><kind>Molecular Formula</kind><value>C9H8O4</value><source/></property>
    </experimental-properties>
    <targets>
      <target position="1">
        <id>BE0000375</id>
        <name>Prostaglandin G/H synthase 1</name>
        <actions>
          <action>inhibitor</action>
          <action>acetylation</action>
        </actions>
        <known-action>yes</known-action>
        <polypeptide id="P23219" source="Swiss-Prot">
          <name>Prostaglandin G/H synthase 1</name>
          <gene-name>PTGS1</gene-name>
          <organism ncbi-taxonomy-id="9606">Humans</organism>
        </polypeptide>
      </target>
      <target position="2">
        <id>BE0000017</id>
        <name>Prostaglandin G/H synthase 2</name>
        <actions>
          <action>inhibitor</action>
        </actions>
        <known-action>yes</known-action>
        <polypeptide id="P35354" source="Swiss-Prot">
          <name>Prostaglandin G/H synthase 2</name>
          <gene-name>PTGS2</gene-name>
          <organism ncbi-taxonomy-id="9606">Humans</organism>
        </polypeptide>
      </target>
    </targets>
  </drug>
</drugbank>
"#;

// ============================================================================
// DrugBank file → model
// ============================================================================

#[test]
fn test_drugbank_file_to_model() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("drugbank.xml");
    fs::write(&path, DRUGBANK_XML)?;

    let drugs = read_drugbank_file(&path)?;
    assert_eq!(drugs.len(), 1);

    let conversion = convert(&drugs, ConvertConfig::default())?;
    let model = &conversion.model;
    assert_eq!(conversion.report.drugs, 1);
    assert_eq!(conversion.report.drug_targets, 2);
    assert!(conversion.report.warnings.is_empty());

    let molecule = model.get_as::<SmallMolecule>("sm_DB00945")?;
    assert_eq!(molecule.display_name(), Some("Acetylsalicylic acid"));

    let controls: Vec<_> = model.elements_of::<Control>().collect();
    assert_eq!(controls.len(), 2);
    let mut controlled: Vec<_> = controls
        .iter()
        .flat_map(|c| c.controlled.iter().map(String::as_str))
        .collect();
    controlled.sort_unstable();
    assert_eq!(
        controlled,
        vec!["rxn_acetylation_P23219", "rxn_plain_P35354"]
    );
    Ok(())
}

#[test]
fn test_acetylation_target_states() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("drugbank.xml");
    fs::write(&path, DRUGBANK_XML)?;
    let model = convert(&read_drugbank_file(&path)?, ConvertConfig::default())?.model;

    let reaction = model.get_as::<BiochemicalReaction>("rxn_acetylation_P23219")?;
    assert_eq!(reaction.left, vec!["protein_unmodified_P23219"]);
    assert_eq!(reaction.right, vec!["protein_acetylated_P23219"]);

    let acetylated = model.get_as::<Protein>("protein_acetylated_P23219")?;
    let feature = acetylated
        .features
        .iter()
        .next()
        .map(|id| model.get_as::<ModificationFeature>(id))
        .transpose()?
        .expect("acetylated protein carries a feature");
    let vocabulary = model.get_as::<SequenceModificationVocabulary>(&feature.modification_type)?;
    assert!(vocabulary.terms.contains("acetylated"));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = read_drugbank_file(&dir.path().join("missing.xml")).unwrap_err();
    assert!(matches!(err, DrugBankError::Io { .. }));
}

// ============================================================================
// Model → JSON snapshot
// ============================================================================

#[test]
fn test_snapshot_roundtrip_through_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("drugbank.xml");
    fs::write(&path, DRUGBANK_XML)?;
    let config = ConvertConfig {
        xml_base: "http://example.org/drugpax#".to_string(),
        ..Default::default()
    };
    let model = convert(&read_drugbank_file(&path)?, config)?.model;

    let out = dir.path().join("model.json");
    write_json(&model, fs::File::create(&out)?)?;
    let text = fs::read_to_string(&out)?;

    let json: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(json["xml_base"], "http://example.org/drugpax#");
    let elements = json["elements"].as_array().expect("elements array");
    assert_eq!(elements.len(), model.len());
    assert!(elements
        .iter()
        .any(|e| e["type"] == "SmallMolecule" && e["id"] == "http://example.org/drugpax#sm_DB00945"));
    // registry URIs are not namespaced
    assert!(elements
        .iter()
        .any(|e| e["id"] == "https://bioregistry.io/pubmed:10592235"));
    assert!(elements
        .iter()
        .any(|e| e["id"] == "https://bioregistry.io/isbn:978-0071624428"));

    let restored = from_json_str(&text)?.into_model()?;
    assert_eq!(restored.summary(), model.summary());
    assert_eq!(to_json_string(&restored)?, to_json_string(&model)?);
    Ok(())
}

#[test]
fn test_summary_counts_every_kind() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("drugbank.xml");
    fs::write(&path, DRUGBANK_XML)?;
    let model = convert(&read_drugbank_file(&path)?, ConvertConfig::default())?.model;

    let summary = model.summary();
    assert_eq!(summary.values().sum::<usize>(), model.len());
    assert_eq!(summary.get(&ElementKind::SmallMolecule), Some(&1));
    assert_eq!(summary.get(&ElementKind::BiochemicalReaction), Some(&2));
    assert_eq!(summary.get(&ElementKind::BioSource), Some(&1));
    Ok(())
}
