//! Parsing options and configuration.

/// Options for parsing ALTO documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How missing Layout/Page elements are reported
    pub error_mode: ErrorMode,

    /// Whether DOCTYPE declarations are accepted
    pub allow_dtd: bool,

    /// Whether multi-page assembly may parse pages in parallel
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Report missing Layout/Page elements as errors.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Turn missing Layout/Page elements into an empty layout.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Accept or reject DOCTYPE declarations.
    pub fn with_dtd(mut self, allow: bool) -> Self {
        self.allow_dtd = allow;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub(crate) fn xml_options(&self) -> roxmltree::ParsingOptions {
        roxmltree::ParsingOptions {
            allow_dtd: self.allow_dtd,
            ..roxmltree::ParsingOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            allow_dtd: true,
            parallel: true,
        }
    }
}

/// Error handling mode for structural failures.
///
/// Malformed XML and malformed geometry attributes are always errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Missing Layout/Page yields an empty layout
    #[default]
    Lenient,
    /// Missing Layout/Page yields `Error::MissingElement`
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().strict().with_dtd(false).sequential();

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(!options.allow_dtd);
        assert!(!options.parallel);
        assert!(!options.xml_options().allow_dtd);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.allow_dtd);
        assert!(options.parallel);
    }
}
