//! Access to the curated sample documents in `docs/samples`.

use crate::rst::ast::{Document, SystemMessage};
use crate::rst::processor::{process_file, ProcessingError, ProcessingSpec};
use crate::rst::token::Token;
use std::fs;
use std::path::PathBuf;

/// Available sample files (canonical sources)
pub const AVAILABLE_SAMPLES: &[&str] = &[
    "000-paragraphs.rst",
    "010-sections.rst",
    "020-lists.rst",
    "030-definitions.rst",
    "040-explicit-markup.rst",
    "050-literal-blocks.rst",
    "060-inline-markup.rst",
    "070-diagnostics.rst",
    "080-kitchensink.rst",
];

/// Main interface for accessing rst sample files
pub struct RstSources;

impl RstSources {
    /// Get the path to the samples directory
    pub fn samples_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("docs/samples")
    }

    fn sample_path(filename: &str) -> Result<PathBuf, ProcessingError> {
        if !AVAILABLE_SAMPLES.contains(&filename) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Sample '{}' is not available. Available samples: {:?}",
                filename, AVAILABLE_SAMPLES
            )));
        }
        Ok(Self::samples_dir().join(filename))
    }

    /// Get sample content as raw string
    pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
        Ok(fs::read_to_string(Self::sample_path(filename)?)?)
    }

    /// Get the token stream of a sample
    pub fn get_tokens(filename: &str) -> Result<Vec<Token>, ProcessingError> {
        Ok(crate::rst::lex(&Self::get_string(filename)?))
    }

    /// Parse a sample; the document is named after the file
    pub fn get_document(filename: &str) -> Result<(Document, Vec<SystemMessage>), ProcessingError> {
        let content = Self::get_string(filename)?;
        let name = filename.trim_end_matches(".rst");
        Ok(crate::rst::parse(name, &content)?)
    }

    /// Get sample content processed with the specified format
    pub fn get_processed(filename: &str, format: &str) -> Result<String, ProcessingError> {
        let spec = ProcessingSpec::from_string(format)?;
        process_file(Self::sample_path(filename)?, &spec)
    }

    /// List all available sample files
    pub fn list_samples() -> Vec<&'static str> {
        AVAILABLE_SAMPLES.to_vec()
    }
}
