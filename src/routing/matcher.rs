//! Path pattern matching for documentation groups.
//!
//! # Responsibilities
//! - Compile Ant-style patterns (`/api/**`, `/files/*.txt`, `/v?`) once
//! - Match request paths against the compiled set
//!
//! # Design Decisions
//! - Backed by `globset`; all patterns of a group share one `GlobSet`
//! - `*` and `?` never cross a `/` (literal separator)
//! - A trailing `/**` also matches the bare prefix, so `/api/**` covers `/api`
//! - Matching is case-sensitive
//! - Invalid patterns are rejected at compile time, never at match time

use std::fmt;
use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("invalid path pattern {pattern:?}: {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to build pattern set: {0}")]
    Set(#[source] globset::Error),
}

/// A compiled set of path patterns. A path matches if any pattern does.
#[derive(Clone)]
pub struct PathPatterns {
    raw: Vec<String>,
    set: GlobSet,
}

impl PathPatterns {
    pub fn compile<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = patterns.into_iter().map(Into::into).collect();

        let mut builder = GlobSetBuilder::new();
        for pattern in &raw {
            builder.add(ant_glob(pattern)?);
        }
        let set = builder.build().map_err(|e| {
            tracing::debug!(error = %e, "Failed to build path pattern set");
            PatternError::Set(e)
        })?;

        Ok(Self { raw, set })
    }

    /// The patterns as written.
    pub fn patterns(&self) -> &[String] {
        &self.raw
    }

    pub fn matches(&self, path: &str) -> bool {
        self.set.is_match(Path::new(path))
    }
}

impl fmt::Debug for PathPatterns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathPatterns").field(&self.raw).finish()
    }
}

/// Compile one Ant-style pattern into a glob.
fn ant_glob(pattern: &str) -> Result<Glob, PatternError> {
    let expanded = match pattern.strip_suffix("/**") {
        Some(prefix) => format!("{prefix}{{,/**}}"),
        None => pattern.to_string(),
    };

    GlobBuilder::new(&expanded)
        .literal_separator(true)
        .build()
        .map_err(|source| {
            tracing::debug!(pattern = %pattern, error = %source, "Failed to compile path pattern");
            PatternError::Invalid {
                pattern: pattern.to_string(),
                source,
            }
        })
}
