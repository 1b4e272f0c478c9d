//! SQL dialect support.
//!
//! The renderer walks a parsed tree and emits SQL text for a target
//! dialect, applying the rewrites the dialects disagree on: identifier
//! quoting, `IFNULL`/`COALESCE`, parameter placeholder shape, upsert tail
//! translation, type name translation, and `DROP INDEX` form.

mod renderer;

use core::fmt;

use thiserror::Error;

use crate::ast::Statement;

/// A target SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    MySql,
    Postgres,
    Sqlite,
}

impl Dialect {
    /// The conventional lowercase name of the dialect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strict-mode rendering failure. In non-strict mode the renderer emits
/// best-effort output and never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A statement kind outside the modeled tree was reached.
    #[error("unsupported statement kind")]
    UnsupportedStatement,
    /// `ON DUPLICATE KEY` could not be reshaped into `ON CONFLICT` because
    /// no conflict target could be derived.
    #[error("cannot rewrite ON DUPLICATE KEY without conflict target")]
    MissingConflictTarget,
}

/// Renders `statements` for `target`, joining them with `"; "`.
///
/// PostgreSQL parameter numbering (`$1`, `$2`, …) increases across the
/// whole output. Rendering the same tree twice yields identical text.
///
/// # Errors
///
/// Only in `strict` mode, when an upsert cannot be reshaped for the target
/// dialect ([`RenderError::MissingConflictTarget`]).
pub fn render_statements(
    statements: &[Statement<'_>],
    target: Dialect,
    strict: bool,
) -> Result<String, RenderError> {
    renderer::Renderer::new(target, strict).render_statements(statements)
}
