use drugpax_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal ingestion failures. Recoverable anomalies are
/// [`crate::convert::ConversionWarning`]s instead.
#[derive(Debug, Error)]
pub enum DrugBankError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed DrugBank XML: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("pathway model error: {0}")]
    Model(#[from] ModelError),
}
