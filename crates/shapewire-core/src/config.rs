//! Codec configuration.
//!
//! Configuration is plain data passed to the entry points that need it. It can
//! be built by hand, deserialized, or loaded from environment variables.

/// Default XML namespace written on root elements.
pub const DEFAULT_XML_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Default limit on element nesting while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings shared by the encoders and decoders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodecConfig {
    /// Maximum element nesting accepted by the decoder.
    pub max_depth: usize,
    /// Namespace written as `xmlns` on XML root elements, if any.
    pub xml_namespace: Option<String>,
    /// Whether XML documents start with an `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            xml_namespace: Some(DEFAULT_XML_NAMESPACE.to_owned()),
            xml_declaration: true,
        }
    }
}

impl CodecConfig {
    /// Load configuration from environment variables.
    ///
    /// - `SHAPEWIRE_MAX_DEPTH`: decoder nesting limit
    /// - `SHAPEWIRE_XML_NAMESPACE`: root namespace; empty disables it
    /// - `SHAPEWIRE_XML_DECLARATION`: `1`/`true` or `0`/`false`
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SHAPEWIRE_MAX_DEPTH") {
            match v.parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_depth = depth,
                _ => tracing::warn!(value = %v, "ignoring invalid SHAPEWIRE_MAX_DEPTH"),
            }
        }
        if let Ok(v) = std::env::var("SHAPEWIRE_XML_NAMESPACE") {
            config.xml_namespace = if v.is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = std::env::var("SHAPEWIRE_XML_DECLARATION") {
            config.xml_declaration = v == "1" || v.eq_ignore_ascii_case("true");
        }

        config
    }

    /// Return a copy with a different nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Return a copy with a different (or no) root namespace.
    #[must_use]
    pub fn with_xml_namespace(mut self, namespace: Option<&str>) -> Self {
        self.xml_namespace = namespace.map(str::to_owned);
        self
    }
}
