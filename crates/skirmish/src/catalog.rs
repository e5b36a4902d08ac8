//! Loading the card catalog.
//!
//! The catalog is a JSON array of card templates, typically shipped as a
//! data file next to the server binary. It is read once at startup and
//! never reloaded.

use std::path::Path;

use skirmish_protocol::{CardTemplate, ProtocolError};

use crate::SkirmishError;

/// Parses a catalog from a JSON string.
pub fn parse_catalog(json: &str) -> Result<Vec<CardTemplate>, SkirmishError> {
    let catalog: Vec<CardTemplate> =
        serde_json::from_str(json).map_err(ProtocolError::Decode)?;
    if catalog.is_empty() {
        return Err(ProtocolError::InvalidMessage("card catalog is empty".into()).into());
    }
    Ok(catalog)
}

/// Reads and parses a catalog file from disk.
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<CardTemplate>, SkirmishError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(SkirmishError::CatalogIo)?;
    let catalog = parse_catalog(&json)?;
    tracing::info!(path = %path.display(), cards = catalog.len(), "card catalog loaded");
    Ok(catalog)
}
