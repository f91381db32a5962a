//! DrugBank ingestion for drugpax
//!
//! - **Records** (`record`): typed drug, target and polypeptide values.
//! - **XML** (`xml`): decoding of the DrugBank 5.x XML export into records.
//! - **Conversion** (`convert`): records → [`drugpax_model::Model`], with a
//!   report of recoverable anomalies.
//!
//! ```no_run
//! use drugpax_ingest_drugbank::{convert, read_drugbank_file, ConvertConfig};
//!
//! # fn main() -> Result<(), drugpax_ingest_drugbank::DrugBankError> {
//! let drugs = read_drugbank_file("drugbank.xml".as_ref())?;
//! let conversion = convert(&drugs, ConvertConfig::default())?;
//! println!("{} elements", conversion.model.len());
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod error;
pub mod record;
pub mod xml;

pub use convert::{
    convert, Conversion, ConversionReport, ConversionWarning, ConvertConfig, Converter,
    WarningKind,
};
pub use error::DrugBankError;
pub use record::{
    Article, Drug, DrugId, ExperimentalProperty, ExternalIdentifier, GeneralReferences,
    KnownAction, Link, Polypeptide, Target, Textbook,
};
pub use xml::{parse_drugbank_reader, parse_drugbank_str, read_drugbank_file};
