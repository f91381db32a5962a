//! DrugBank XML decoding (boundary adapter).
//!
//! Reads the DrugBank 5.x layout with quick-xml's serde deserializer into
//! private wire structs, then maps them onto the public [`crate::record`]
//! types. Only the elements the converter uses are declared; everything else
//! in a `<drug>` (products, pathways, interactions, …) is ignored.

use crate::error::DrugBankError;
use crate::record::{
    Article, Drug, DrugId, ExperimentalProperty, ExternalIdentifier, GeneralReferences,
    KnownAction, Link, Polypeptide, Target, Textbook,
};
use serde::Deserialize;
use std::io::BufRead;
use std::path::Path;

// ============================================================================
// Wire structs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct DrugbankXml {
    #[serde(rename = "drug", default)]
    drugs: Vec<DrugXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DrugXml {
    #[serde(rename = "drugbank-id")]
    drugbank_ids: Vec<DrugbankIdXml>,
    name: String,
    description: String,
    synonyms: SynonymsXml,
    #[serde(rename = "international-brands")]
    international_brands: InternationalBrandsXml,
    #[serde(rename = "general-references")]
    general_references: GeneralReferencesXml,
    #[serde(rename = "experimental-properties")]
    experimental_properties: ExperimentalPropertiesXml,
    #[serde(rename = "external-identifiers")]
    external_identifiers: ExternalIdentifiersXml,
    targets: TargetsXml,
}

#[derive(Debug, Default, Deserialize)]
struct DrugbankIdXml {
    #[serde(rename = "@primary", default)]
    primary: bool,
    #[serde(rename = "$text", default)]
    value: String,
}

/// Element whose payload is its text; attributes are ignored.
#[derive(Debug, Default, Deserialize)]
struct TextXml {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct SynonymsXml {
    #[serde(rename = "synonym", default)]
    items: Vec<TextXml>,
}

#[derive(Debug, Default, Deserialize)]
struct InternationalBrandsXml {
    #[serde(rename = "international-brand", default)]
    items: Vec<InternationalBrandXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InternationalBrandXml {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeneralReferencesXml {
    articles: ArticlesXml,
    links: LinksXml,
    textbooks: TextbooksXml,
}

#[derive(Debug, Default, Deserialize)]
struct ArticlesXml {
    #[serde(rename = "article", default)]
    items: Vec<ArticleXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArticleXml {
    #[serde(rename = "pubmed-id")]
    pubmed_id: String,
    citation: String,
}

#[derive(Debug, Default, Deserialize)]
struct LinksXml {
    #[serde(rename = "link", default)]
    items: Vec<LinkXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LinkXml {
    title: String,
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct TextbooksXml {
    #[serde(rename = "textbook", default)]
    items: Vec<TextbookXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TextbookXml {
    isbn: String,
    citation: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExperimentalPropertiesXml {
    #[serde(rename = "property", default)]
    items: Vec<PropertyXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PropertyXml {
    kind: Option<String>,
    value: String,
    source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalIdentifiersXml {
    #[serde(rename = "external-identifier", default)]
    items: Vec<ExternalIdentifierXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExternalIdentifierXml {
    resource: String,
    identifier: String,
}

#[derive(Debug, Default, Deserialize)]
struct TargetsXml {
    #[serde(rename = "target", default)]
    items: Vec<TargetXml>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TargetXml {
    id: Option<String>,
    name: Option<String>,
    actions: ActionsXml,
    #[serde(rename = "known-action")]
    known_action: String,
    #[serde(rename = "polypeptide")]
    polypeptides: Vec<PolypeptideXml>,
}

#[derive(Debug, Default, Deserialize)]
struct ActionsXml {
    #[serde(rename = "action", default)]
    items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PolypeptideXml {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@source")]
    source: Option<String>,
    name: String,
    #[serde(rename = "gene-name")]
    gene_name: Option<String>,
    organism: Option<TextXml>,
    #[serde(rename = "external-identifiers")]
    external_identifiers: ExternalIdentifiersXml,
    synonyms: SynonymsXml,
}

// ============================================================================
// Wire → record mapping
// ============================================================================

fn trimmed(s: String) -> String {
    let t = s.trim();
    if t.len() == s.len() {
        s
    } else {
        t.to_string()
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(trimmed).filter(|s| !s.is_empty())
}

fn texts(items: Vec<TextXml>) -> Vec<String> {
    items
        .into_iter()
        .map(|t| trimmed(t.value))
        .filter(|s| !s.is_empty())
        .collect()
}

fn external_identifiers(xml: ExternalIdentifiersXml) -> Vec<ExternalIdentifier> {
    xml.items
        .into_iter()
        .map(|x| ExternalIdentifier {
            resource: trimmed(x.resource),
            identifier: trimmed(x.identifier),
        })
        .collect()
}

impl From<PolypeptideXml> for Polypeptide {
    fn from(xml: PolypeptideXml) -> Self {
        Polypeptide {
            id: trimmed(xml.id),
            source: non_blank(xml.source),
            name: trimmed(xml.name),
            gene_name: non_blank(xml.gene_name),
            organism: non_blank(xml.organism.map(|o| o.value)),
            synonyms: texts(xml.synonyms.items),
            external_identifiers: external_identifiers(xml.external_identifiers),
        }
    }
}

impl From<TargetXml> for Target {
    fn from(xml: TargetXml) -> Self {
        Target {
            id: non_blank(xml.id),
            name: non_blank(xml.name),
            polypeptides: xml.polypeptides.into_iter().map(Polypeptide::from).collect(),
            actions: xml
                .actions
                .items
                .into_iter()
                .map(trimmed)
                .filter(|s| !s.is_empty())
                .collect(),
            known_action: KnownAction::parse(&xml.known_action),
        }
    }
}

impl From<DrugXml> for Drug {
    fn from(xml: DrugXml) -> Self {
        let refs = xml.general_references;
        Drug {
            ids: xml
                .drugbank_ids
                .into_iter()
                .map(|id| DrugId {
                    value: trimmed(id.value),
                    primary: id.primary,
                })
                .collect(),
            name: trimmed(xml.name),
            description: trimmed(xml.description),
            synonyms: texts(xml.synonyms.items),
            brands: xml
                .international_brands
                .items
                .into_iter()
                .map(|b| trimmed(b.name))
                .filter(|s| !s.is_empty())
                .collect(),
            general_references: GeneralReferences {
                articles: refs
                    .articles
                    .items
                    .into_iter()
                    .map(|a| Article {
                        pubmed_id: trimmed(a.pubmed_id),
                        citation: trimmed(a.citation),
                    })
                    .collect(),
                links: refs
                    .links
                    .items
                    .into_iter()
                    .map(|l| Link {
                        title: trimmed(l.title),
                        url: trimmed(l.url),
                    })
                    .collect(),
                textbooks: refs
                    .textbooks
                    .items
                    .into_iter()
                    .map(|t| Textbook {
                        isbn: trimmed(t.isbn),
                        citation: trimmed(t.citation),
                    })
                    .collect(),
            },
            experimental_properties: xml
                .experimental_properties
                .items
                .into_iter()
                .map(|p| ExperimentalProperty {
                    kind: non_blank(p.kind),
                    value: p.value,
                    source: non_blank(p.source),
                })
                .collect(),
            external_identifiers: external_identifiers(xml.external_identifiers),
            targets: xml.targets.items.into_iter().map(Target::from).collect(),
        }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Decode a DrugBank document held in memory.
pub fn parse_drugbank_str(xml: &str) -> Result<Vec<Drug>, DrugBankError> {
    let doc: DrugbankXml = quick_xml::de::from_str(xml)?;
    Ok(doc.drugs.into_iter().map(Drug::from).collect())
}

/// Decode a DrugBank document from a buffered reader.
pub fn parse_drugbank_reader<R: BufRead>(reader: R) -> Result<Vec<Drug>, DrugBankError> {
    let doc: DrugbankXml = quick_xml::de::from_reader(reader)?;
    Ok(doc.drugs.into_iter().map(Drug::from).collect())
}

/// Decode a DrugBank XML file.
pub fn read_drugbank_file(path: &Path) -> Result<Vec<Drug>, DrugBankError> {
    let file = std::fs::File::open(path).map_err(|source| DrugBankError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_drugbank_reader(std::io::BufReader::new(file))
}
