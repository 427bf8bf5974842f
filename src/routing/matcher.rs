//! Route matching logic.
//!
//! # Responsibilities
//! - Compile path templates (`/places/{id}`) into segment lists
//! - Match request method (exact)
//! - Match request path segment by segment, binding parameters by name
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Parameter segments match exactly one non-empty path segment
//! - No wildcards, no regex, no trailing-slash normalization
//! - Matching runs on the raw path; captured values are percent-decoded afterwards,
//!   so `%2F` inside a parameter never splits a segment

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use axum::http::Method;
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Named captures produced by a successful path match.
pub type PathParams = HashMap<String, String>;

/// Error compiling a path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern '{pattern}': malformed segment '{segment}'")]
    MalformedSegment { pattern: String, segment: String },

    #[error("pattern '{pattern}': duplicate parameter '{name}'")]
    DuplicateParam { pattern: String, name: String },
}

/// A captured segment that cannot be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamDecodeError {
    #[error("parameter '{name}': invalid percent-escape in '{value}'")]
    InvalidEscape { name: String, value: String },

    #[error("parameter '{name}': '{value}' is not UTF-8 once decoded")]
    InvalidUtf8 { name: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template such as `/places/nearby/latitude/{latitude}`.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(pattern.to_string()))?;

        let mut segments = Vec::new();
        for raw in rest.split('/') {
            let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if is_param_name(name) => {
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(PatternError::DuplicateParam {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    Segment::Param(name.to_string())
                }
                _ if raw.contains(['{', '}']) => {
                    return Err(PatternError::MalformedSegment {
                        pattern: pattern.to_string(),
                        segment: raw.to_string(),
                    });
                }
                _ => Segment::Literal(raw.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// Match a request path, returning the bound (still encoded) parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;

        let mut params = PathParams::new();
        let mut parts = rest.split('/');
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(expected) => {
                    if part != expected {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), part.to_string());
                }
            }
        }

        // Leftover segments mean the path is longer than the pattern.
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }

    /// Names of the parameters in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// The template this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Percent-decode every captured value. Fails on the first bad one.
pub fn decode_params(params: PathParams) -> Result<PathParams, ParamDecodeError> {
    params
        .into_iter()
        .map(|(name, raw)| {
            let value = decode_param(&name, &raw)?;
            Ok((name, value))
        })
        .collect()
}

/// Decode one value. Every `%` must start a two-digit hex escape and the
/// decoded bytes must be UTF-8.
fn decode_param(name: &str, raw: &str) -> Result<String, ParamDecodeError> {
    let bytes = raw.as_bytes();
    let well_formed = raw.match_indices('%').all(|(i, _)| {
        bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return Err(ParamDecodeError::InvalidEscape {
            name: name.to_string(),
            value: raw.to_string(),
        });
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ParamDecodeError::InvalidUtf8 {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Method + path condition for a single route.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    method: Method,
    path: PathPattern,
}

impl RouteMatcher {
    pub fn new(method: Method, path: PathPattern) -> Self {
        Self { method, path }
    }

    /// Both conditions must hold (AND). The method is checked first.
    pub fn matches(&self, method: &Method, path: &str) -> Option<PathParams> {
        if *method != self.method {
            return None;
        }
        self.path.matches(path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &PathPattern {
        &self.path
    }
}
