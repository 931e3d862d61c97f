use std::path::PathBuf;

/// Failures that can occur while building or validating a `Catalog`.
///
/// Queries against an already-built catalog never fail; only loading does.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate topic id: {0}")]
    DuplicateTopic(String),
    #[error("Prerequisite cycle detected at topic '{topic}'")]
    Cycle { topic: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let duplicate = CatalogError::DuplicateTopic("control-flow".to_string());
        assert_eq!(format!("{}", duplicate), "Duplicate topic id: control-flow");

        let cycle = CatalogError::Cycle {
            topic: "race-conditions".to_string(),
        };
        assert_eq!(
            format!("{}", cycle),
            "Prerequisite cycle detected at topic 'race-conditions'"
        );
    }

    #[test]
    fn test_parse_error_conversion() {
        let err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let catalog_err: CatalogError = err.into();
        assert!(format!("{}", catalog_err).starts_with("Failed to parse catalog:"));
    }
}
