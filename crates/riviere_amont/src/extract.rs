//! Framework extractor seam.
//!
//! Parsing a source dialect into `ComponentAnalysis` happens outside this
//! workspace (an AST toolchain owns it). The trait here is the boundary:
//! extraction may involve an editor/language-service round trip, so it is
//! async, and it is the only step allowed to fail the whole analysis — an
//! unparsable file surfaces as "not analyzable", never as an empty graph.

use crate::analysis::ComponentAnalysis;
use riviere_socle::BoxFuture;
use thiserror::Error;

/// Why a source file could not be turned into facts.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// Source could not be parsed at all.
    #[error("source is not parsable: {0}")]
    Unparsable(String),
    /// Parsed fine, but no component definition was found.
    #[error("no component found in {0}")]
    NoComponent(String),
    /// The language-service round trip failed.
    #[error("extractor backend failed: {0}")]
    Backend(String),
}

/// Source-dialect parser boundary.
pub trait FrameworkExtractor: Send + Sync {
    /// Extract structural facts from one component source file.
    fn extract<'a>(
        &'a self,
        file_path: &'a str,
        source: &'a str,
    ) -> BoxFuture<'a, Result<ComponentAnalysis, ExtractionError>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Framework;

    /// Extractor returning a fixed analysis; used across the workspace tests.
    struct FixedExtractor;

    impl FrameworkExtractor for FixedExtractor {
        fn extract<'a>(
            &'a self,
            file_path: &'a str,
            _source: &'a str,
        ) -> BoxFuture<'a, Result<ComponentAnalysis, ExtractionError>> {
            Box::pin(async move {
                Ok(ComponentAnalysis::new("Fixed", file_path, Framework::React))
            })
        }
    }

    #[tokio::test]
    async fn test_extractor_seam() {
        let extractor = FixedExtractor;
        let analysis = extractor.extract("Fixed.tsx", "").await.unwrap();
        assert_eq!(analysis.file_path.as_str(), "Fixed.tsx");
    }
}
