//! Per-render configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Deepest recursion any budget may request.
pub const MAX_DEPTH: u32 = 64;

/// Recursion budgets and global switches for one render pass.
///
/// Read-only while rendering. Deserializes from camelCase JSON; missing
/// fields take their defaults:
///
/// ```json
/// { "reflectionDepth": 4, "refractionDepth": 4, "traceDepth": 8, "shadowsEnabled": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Maximum number of nested reflection bounces
    pub reflection_depth: u32,
    /// Maximum number of nested refraction bounces
    pub refraction_depth: u32,
    /// Maximum number of nested secondary rays of any kind
    pub trace_depth: u32,
    /// Global switch for shadow rays
    pub shadows_enabled: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            reflection_depth: 4,
            refraction_depth: 4,
            trace_depth: 8,
            shadows_enabled: true,
        }
    }
}

impl RenderOptions {
    /// Options with every secondary ray disabled: local shading only.
    pub fn local_only() -> Self {
        Self {
            reflection_depth: 0,
            refraction_depth: 0,
            trace_depth: 0,
            shadows_enabled: false,
        }
    }

    /// Parse and validate options from a JSON string.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        let options: RenderOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&raw)?;
        log::debug!("Loaded render options from {}: {:?}", path.display(), options);
        Ok(options)
    }

    /// Check that every budget is within [`MAX_DEPTH`].
    pub fn validate(&self) -> RenderResult<()> {
        let budgets = [
            ("reflectionDepth", self.reflection_depth),
            ("refractionDepth", self.refraction_depth),
            ("traceDepth", self.trace_depth),
        ];
        for (field, value) in budgets {
            if value > MAX_DEPTH {
                return Err(RenderError::InvalidOptions(format!(
                    "{field} must be at most {MAX_DEPTH}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();

        assert_eq!(options.reflection_depth, 4);
        assert_eq!(options.refraction_depth, 4);
        assert_eq!(options.trace_depth, 8);
        assert!(options.shadows_enabled);
    }

    #[test]
    fn test_parse_full() {
        let options = RenderOptions::from_json_str(
            r#"{ "reflectionDepth": 2, "refractionDepth": 3, "traceDepth": 5, "shadowsEnabled": false }"#,
        )
        .unwrap();

        assert_eq!(
            options,
            RenderOptions {
                reflection_depth: 2,
                refraction_depth: 3,
                trace_depth: 5,
                shadows_enabled: false,
            }
        );
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let options = RenderOptions::from_json_str(r#"{ "traceDepth": 1 }"#).unwrap();

        assert_eq!(options.trace_depth, 1);
        assert_eq!(options.reflection_depth, 4);
        assert!(options.shadows_enabled);
    }

    #[test]
    fn test_parse_error() {
        let err = RenderOptions::from_json_str("{ traceDepth: }").unwrap_err();
        assert!(matches!(err, RenderError::Parse(_)));
    }

    #[test]
    fn test_rejects_excessive_depth() {
        let err = RenderOptions::from_json_str(r#"{ "reflectionDepth": 1000 }"#).unwrap_err();

        assert!(matches!(err, RenderError::InvalidOptions(_)));
        assert!(err.to_string().contains("reflectionDepth"));
    }

    #[test]
    fn test_missing_file() {
        let err = RenderOptions::from_path("/nonexistent/prism/options.json").unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn test_serialize_roundtrip_keys() {
        let json = serde_json::to_string(&RenderOptions::local_only()).unwrap();

        assert!(json.contains("\"reflectionDepth\":0"));
        assert!(json.contains("\"shadowsEnabled\":false"));
    }
}
