//! File processing API for reStructuredText
//!
//! This module provides an extensible API for processing rst files with different
//! stages (token, ast) and formats (simple, json, yaml, treeviz).
//!
//! A processing spec is written `<stage>-<format>`:
//!
//!     token-simple   one token per line, `line:column kind "text"`
//!     token-json     the token stream as a JSON array
//!     token-yaml     the token stream as YAML
//!     ast-json       the document tree as JSON, system messages included
//!     ast-yaml       the document tree as YAML
//!     ast-treeviz    the document tree drawn with box characters
//!
//! Sample documents for tests and demos live in `docs/samples`; see
//! [RstSources](crate::rst::testing::RstSources).

use crate::rst::ast::to_treeviz_str;
use crate::rst::error::ParseError;
use crate::rst::token::Token;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

impl ProcessingStage {
    pub fn name(self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        }
    }
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Treeviz,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Treeviz => "treeviz",
        }
    }
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-treeviz"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "treeviz" => OutputFormat::Treeviz,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Treeviz) => {
                Err(ProcessingError::InvalidFormatType(
                    "Format 'treeviz' only works with AST stage".to_string(),
                ))
            }
            (ProcessingStage::Ast, OutputFormat::Simple) => {
                Err(ProcessingError::InvalidFormatType(
                    "Format 'simple' only works with token stage".to_string(),
                ))
            }
            _ => Ok(ProcessingSpec { stage, format }),
        }
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        use OutputFormat::*;
        use ProcessingStage::*;
        [
            (Token, Simple),
            (Token, Json),
            (Token, Yaml),
            (Ast, Json),
            (Ast, Yaml),
            (Ast, Treeviz),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }
}

impl std::fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.stage.name(), self.format.name())
    }
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Process an rst file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    let content = fs::read_to_string(file_path)?;
    let name = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    process_str(&name, &content, spec)
}

/// Process rst source text according to the given specification
pub fn process_str(
    name: &str,
    content: &str,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    log::debug!("processing '{}' as {}", name, spec);
    match spec.stage {
        ProcessingStage::Token => format_tokens(&crate::rst::lex(content), spec.format),
        ProcessingStage::Ast => {
            let (doc, _) = crate::rst::parse(name, content)?;
            match spec.format {
                OutputFormat::Json => serde_json::to_string_pretty(&doc)
                    .map_err(|e| ProcessingError::Serialization(e.to_string())),
                OutputFormat::Yaml => serde_yaml::to_string(&doc)
                    .map_err(|e| ProcessingError::Serialization(e.to_string())),
                OutputFormat::Treeviz => Ok(to_treeviz_str(&doc)),
                OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
                    "Format 'simple' only works with token stage".to_string(),
                )),
            }
        }
    }
}

/// Format tokens according to the specified format
fn format_tokens(tokens: &[Token], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                result.push_str(&token.to_string());
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(tokens).map_err(|e| ProcessingError::Serialization(e.to_string()))
        }
        OutputFormat::Treeviz => Err(ProcessingError::InvalidFormatType(
            "Format 'treeviz' only works with AST stage".to_string(),
        )),
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| spec.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_specs() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Token);
        assert_eq!(spec.format, OutputFormat::Json);

        let spec = ProcessingSpec::from_string("ast-treeviz").unwrap();
        assert_eq!(spec.stage, ProcessingStage::Ast);
        assert_eq!(spec.format, OutputFormat::Treeviz);
    }

    #[test]
    fn test_invalid_specs() {
        assert!(matches!(
            ProcessingSpec::from_string("token"),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("html-json"),
            Err(ProcessingError::InvalidStage(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("ast-xml"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("token-treeviz"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("ast-simple"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
    }

    #[test]
    fn test_every_available_spec_parses_back() {
        for format in available_formats() {
            let spec = ProcessingSpec::from_string(&format).unwrap();
            assert_eq!(spec.to_string(), format);
        }
    }

    #[test]
    fn test_token_simple() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let output = process_str("t", "**bold**", &spec).unwrap();
        assert_eq!(
            output,
            "1:1 inlineStrongOpen \"**\"\n\
             1:3 inlineStrong \"bold\"\n\
             1:7 inlineStrongClose \"**\"\n\
             2:1 eof \"\"\n"
        );
    }

    #[test]
    fn test_ast_json_carries_messages() {
        let spec = ProcessingSpec::from_string("ast-json").unwrap();
        let output = process_str("t", "*open\n", &spec).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["name"], "t");
        assert_eq!(json["nodeList"][1]["type"], "systemMessage");
        assert_eq!(
            json["nodeList"][1]["messageType"],
            "warningInlineEmphasisStartWithoutEnd"
        );
    }

    #[test]
    fn test_missing_file() {
        let spec = ProcessingSpec::from_string("token-json").unwrap();
        assert!(matches!(
            process_file("does/not/exist.rst", &spec),
            Err(ProcessingError::Io(_))
        ));
    }
}
