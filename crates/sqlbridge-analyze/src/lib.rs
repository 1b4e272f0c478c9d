//! # sqlbridge-analyze
//!
//! Static analysis over parsed SQL: walks the syntax tree produced by
//! [`sqlbridge-core`](sqlbridge_core) and surfaces risky or non-portable
//! patterns as coded findings, plus an "optimize" wrapper that combines
//! analysis with dialect conversion.
//!
//! ```
//! use sqlbridge_analyze::analyze;
//!
//! let report = analyze("SELECT * FROM users");
//! assert!(report.valid);
//! assert!(report.findings.iter().any(|f| f.code == "SELECT_STAR"));
//! ```

use core::fmt;

use thiserror::Error;

use sqlbridge_core::ast::{
    CreateTableStmt, DeleteStmt, Expr, InsertStmt, SelectStmt, TableRef, UpdateStmt,
};
use sqlbridge_core::{convert_dialect, parse_all, Arena, Dialect, Statement};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analysis finding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Finding {
    pub severity: Severity,
    /// Stable machine-readable code, e.g. `SELECT_STAR`.
    pub code: &'static str,
    /// Problem and recommendation joined for display.
    pub message: String,
    pub problem: String,
    pub recommendation: String,
    /// Index of the statement the finding applies to; `None` for failures
    /// that precede statement numbering (parse errors).
    pub statement_index: Option<usize>,
}

/// The result of analyzing a SQL script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// False when the script did not parse; the sole finding is then
    /// `PARSE_ERROR`.
    pub valid: bool,
    pub statement_count: usize,
    pub findings: Vec<Finding>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return match self.findings.first() {
                None => write!(f, "invalid SQL"),
                Some(finding) => write!(f, "invalid SQL: {}", finding.problem),
            };
        }
        if self.findings.is_empty() {
            write!(
                f,
                "valid SQL ({} statements), no findings",
                self.statement_count
            )
        } else {
            write!(
                f,
                "valid SQL ({} statements), {} finding(s)",
                self.statement_count,
                self.findings.len()
            )
        }
    }
}

/// Analysis tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Target dialect; enables the dialect-specific portability findings.
    pub dialect: Option<Dialect>,
}

/// The result of [`optimize_for_dialect`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptimizationReport {
    pub dialect: Dialect,
    pub original_sql: String,
    pub optimized_sql: String,
    /// True when conversion actually changed the text.
    pub converted: bool,
    pub analysis: Report,
    /// Deduplicated recommended actions.
    pub actions: Vec<String>,
}

/// Failure of the optimize wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    #[error("cannot optimize invalid SQL: {0}")]
    InvalidSql(String),
    #[error(transparent)]
    Convert(#[from] sqlbridge_core::Error),
}

/// Analyzes `sql` without any dialect target.
#[must_use]
pub fn analyze(sql: &str) -> Report {
    analyze_with_options(sql, &Options::default())
}

/// Analyzes `sql`, including dialect-portability findings when
/// [`Options::dialect`] is set.
#[must_use]
pub fn analyze_with_options(sql: &str, options: &Options) -> Report {
    let mut report = Report::default();
    let arena = Arena::new();
    let statements = match parse_all(&arena, sql) {
        Ok(statements) => statements,
        Err(err) => {
            report.valid = false;
            add_finding(
                &mut report,
                Severity::Critical,
                "PARSE_ERROR",
                &err.to_string(),
                "Fix SQL syntax at the reported line/column and re-run parsing.",
                None,
            );
            return report;
        }
    };
    report.valid = true;
    report.statement_count = statements.len();

    for (idx, statement) in statements.iter().enumerate() {
        analyze_statement(*statement, idx, &mut report, options);
    }
    tracing::debug!(
        statements = report.statement_count,
        findings = report.findings.len(),
        "analysis complete"
    );
    report
}

/// Analyzes `sql` against `dialect`, converts it, and gathers the
/// deduplicated recommendations into an action list.
///
/// # Errors
///
/// Returns [`OptimizeError::InvalidSql`] when the input does not parse, or
/// [`OptimizeError::Convert`] when conversion fails.
pub fn optimize_for_dialect(
    sql: &str,
    dialect: Dialect,
) -> Result<OptimizationReport, OptimizeError> {
    let analysis = analyze_with_options(sql, &Options {
        dialect: Some(dialect),
    });
    if !analysis.valid {
        let problem = analysis
            .findings
            .first()
            .map(|f| f.problem.clone())
            .unwrap_or_default();
        return Err(OptimizeError::InvalidSql(problem));
    }
    let optimized_sql = convert_dialect(sql, dialect)?;
    let converted = sql.trim() != optimized_sql.trim();

    let mut actions = Vec::new();
    if converted {
        actions.push(format!("Converted SQL to {dialect}-compatible syntax"));
    }
    let mut seen = std::collections::HashSet::new();
    for finding in &analysis.findings {
        if finding.recommendation.is_empty() || !seen.insert(finding.recommendation.clone()) {
            continue;
        }
        actions.push(finding.recommendation.clone());
    }
    tracing::debug!(%dialect, converted, "dialect optimization complete");
    Ok(OptimizationReport {
        dialect,
        original_sql: sql.to_owned(),
        optimized_sql,
        converted,
        analysis,
        actions,
    })
}

fn analyze_statement(statement: Statement<'_>, idx: usize, report: &mut Report, options: &Options) {
    match statement {
        Statement::Select(select) => analyze_select(select, idx, report, options),
        Statement::Insert(insert) => analyze_insert(insert, idx, report, options),
        Statement::Update(update) => analyze_update(update, idx, report, options),
        Statement::Delete(delete) => analyze_delete(delete, idx, report, options),
        Statement::CreateTable(create) => analyze_create_table(create, idx, report, options),
        Statement::GenericDdl(_) => {
            add_finding(
                report,
                Severity::Warning,
                "GENERIC_DDL",
                "Statement was parsed with generic DDL fallback, so internals may not be fully analyzed.",
                "For best validation, rewrite this statement to a currently modeled form or extend parser support for this DDL type.",
                Some(idx),
            );
        }
        Statement::Use(_) => {
            if matches!(options.dialect, Some(Dialect::Postgres | Dialect::Sqlite)) {
                add_finding(
                    report,
                    Severity::Warning,
                    "USE_NOT_SUPPORTED",
                    "USE statement is not portable to this dialect.",
                    "For PostgreSQL use explicit database connection; for SQLite use file/database handle selection in the client.",
                    Some(idx),
                );
            }
        }
        Statement::AlterDatabase(_) => {
            if options.dialect == Some(Dialect::Sqlite) {
                add_finding(
                    report,
                    Severity::Warning,
                    "ALTER_DATABASE_NOT_SUPPORTED",
                    "ALTER DATABASE is not supported in SQLite.",
                    "Move database-level options to application/connection settings.",
                    Some(idx),
                );
            }
        }
        _ => {}
    }
}

fn analyze_select(select: &SelectStmt<'_>, idx: usize, report: &mut Report, options: &Options) {
    if select.columns.iter().any(|c| c.star) {
        add_finding(
            report,
            Severity::Warning,
            "SELECT_STAR",
            "Query uses SELECT *; this can read unnecessary columns and break clients if schema changes.",
            "Select explicit columns needed by the caller (e.g. SELECT id, name) to reduce IO and improve compatibility.",
            Some(idx),
        );
    }
    let mut set_op = select.set_op;
    while let Some(op) = set_op {
        if op.op == sqlbridge_core::ast::SetOp::Union && !op.all {
            add_finding(
                report,
                Severity::Info,
                "UNION_DISTINCT_COST",
                "UNION performs duplicate elimination, which can add sort/hash overhead on large datasets.",
                "Use UNION ALL when duplicate removal is not required.",
                Some(idx),
            );
        }
        set_op = op.right.set_op;
    }
    for table_ref in select.from {
        if let TableRef::Join(join) = table_ref {
            if join.kind == sqlbridge_core::ast::JoinKind::Cross {
                add_finding(
                    report,
                    Severity::Warning,
                    "CROSS_JOIN",
                    "CROSS JOIN can create a cartesian product and explode row counts.",
                    "Ensure join cardinality is intended, or use an INNER/LEFT JOIN with explicit join predicates.",
                    Some(idx),
                );
            }
        }
    }
    analyze_expr(select.where_clause, idx, report, options);
    analyze_expr(select.having, idx, report, options);
    for column in select.columns {
        analyze_expr(Some(column.expr), idx, report, options);
    }
}

fn analyze_insert(insert: &InsertStmt<'_>, idx: usize, report: &mut Report, options: &Options) {
    if insert.rows.len() > 1000 {
        add_finding(
            report,
            Severity::Info,
            "BULK_INSERT_SIZE",
            "Very large VALUES clause detected; this can increase lock time and memory pressure.",
            "Split into smaller batches (for example 200-1000 rows) and use transactions if needed.",
            Some(idx),
        );
    }
    let has_upsert = !insert.on_dup_key.is_empty()
        || !insert.on_conflict_update.is_empty()
        || insert.on_conflict_do_nothing;
    if has_upsert {
        add_finding(
            report,
            Severity::Info,
            "UPSERT_PRESENT",
            "Upsert logic detected (ON DUPLICATE KEY / ON CONFLICT).",
            "Verify matching unique/primary indexes exist on conflict columns to avoid full-table checks.",
            Some(idx),
        );
    }
    if options.dialect == Some(Dialect::MySql)
        && (!insert.on_conflict_update.is_empty() || insert.on_conflict_do_nothing)
    {
        add_finding(
            report,
            Severity::Warning,
            "DIALECT_UPSERT_MISMATCH",
            "ON CONFLICT is not native MySQL syntax.",
            "Use ON DUPLICATE KEY UPDATE (or run dialect conversion targeting mysql).",
            Some(idx),
        );
    }
    if options.dialect == Some(Dialect::Postgres) && !insert.on_dup_key.is_empty() {
        add_finding(
            report,
            Severity::Warning,
            "DIALECT_UPSERT_MISMATCH",
            "ON DUPLICATE KEY is not native PostgreSQL syntax.",
            "Use ON CONFLICT (...) DO UPDATE/DO NOTHING (or run dialect conversion targeting postgres).",
            Some(idx),
        );
    }
    if let Some(select) = insert.select {
        for column in select.columns {
            analyze_expr(Some(column.expr), idx, report, options);
        }
    }
    if insert.replace && options.dialect == Some(Dialect::Postgres) {
        add_finding(
            report,
            Severity::Warning,
            "REPLACE_NOT_PORTABLE",
            "REPLACE is not supported by PostgreSQL.",
            "Rewrite as INSERT ... ON CONFLICT ... DO UPDATE.",
            Some(idx),
        );
    }
}

fn analyze_update(update: &UpdateStmt<'_>, idx: usize, report: &mut Report, options: &Options) {
    if update.where_clause.is_none() {
        add_finding(
            report,
            Severity::Critical,
            "UPDATE_WITHOUT_WHERE",
            "UPDATE statement has no WHERE clause and will affect all rows.",
            "Add a WHERE predicate or confirm intentionally full-table update using explicit safeguards.",
            Some(idx),
        );
    }
    if update.limit.is_some() && update.order_by.is_empty() {
        add_finding(
            report,
            Severity::Warning,
            "UPDATE_LIMIT_NO_ORDER",
            "UPDATE uses LIMIT without ORDER BY, so chosen rows may be nondeterministic.",
            "Add ORDER BY on a stable key (for example primary key) before LIMIT.",
            Some(idx),
        );
    }
    analyze_expr(update.where_clause, idx, report, options);
    for assignment in update.set {
        analyze_expr(Some(assignment.value), idx, report, options);
    }
}

fn analyze_delete(delete: &DeleteStmt<'_>, idx: usize, report: &mut Report, options: &Options) {
    if delete.where_clause.is_none() {
        add_finding(
            report,
            Severity::Critical,
            "DELETE_WITHOUT_WHERE",
            "DELETE statement has no WHERE clause and will remove all rows.",
            "Add a WHERE predicate or use TRUNCATE explicitly when full deletion is intended.",
            Some(idx),
        );
    }
    if delete.limit.is_some() && delete.order_by.is_empty() {
        add_finding(
            report,
            Severity::Warning,
            "DELETE_LIMIT_NO_ORDER",
            "DELETE uses LIMIT without ORDER BY, so deleted rows may be nondeterministic.",
            "Add ORDER BY on a stable key before LIMIT.",
            Some(idx),
        );
    }
    analyze_expr(delete.where_clause, idx, report, options);
}

fn analyze_create_table(
    create: &CreateTableStmt<'_>,
    idx: usize,
    report: &mut Report,
    options: &Options,
) {
    for column in create.columns {
        if column.data_type.name.eq_ignore_ascii_case("jsonb") {
            match options.dialect {
                Some(Dialect::MySql) => add_finding(
                    report,
                    Severity::Info,
                    "JSONB_DIALECT_NOTE",
                    "Column uses JSONB but target is MySQL.",
                    "Use JSON type and generated columns + functional indexes for JSON paths.",
                    Some(idx),
                ),
                Some(Dialect::Sqlite) => add_finding(
                    report,
                    Severity::Info,
                    "JSONB_DIALECT_NOTE",
                    "Column uses JSONB but target is SQLite.",
                    "Use TEXT storage with JSON1 functions and check constraints for shape validation.",
                    Some(idx),
                ),
                _ => add_finding(
                    report,
                    Severity::Info,
                    "JSONB_DIALECT_NOTE",
                    "Column uses JSONB. Dialect conversion keeps JSONB for Postgres, rewrites to JSON in MySQL, and TEXT in SQLite.",
                    "If converting across dialects, verify JSON operator compatibility and add dialect-specific indexes (for example GIN in Postgres, generated-column indexes in MySQL).",
                    Some(idx),
                ),
            }
        }
        if column.auto_increment && options.dialect == Some(Dialect::Postgres) {
            add_finding(
                report,
                Severity::Info,
                "AUTO_INCREMENT_REWRITE",
                "AUTO_INCREMENT detected with PostgreSQL target.",
                "Use GENERATED AS IDENTITY (dialect converter can rewrite this).",
                Some(idx),
            );
        }
    }
}

fn analyze_expr(expr: Option<Expr<'_>>, idx: usize, report: &mut Report, options: &Options) {
    let Some(expr) = expr else {
        return;
    };
    match expr {
        Expr::Like(like) => {
            if let Expr::Literal(literal) = like.pattern {
                if literal.raw.starts_with("'%") || literal.raw.starts_with("\"%") {
                    add_finding(
                        report,
                        Severity::Info,
                        "LIKE_LEADING_WILDCARD",
                        "LIKE pattern starts with wildcard; index seeks are usually not possible.",
                        "Use anchored pattern (for example 'abc%') or consider full-text/trigram indexing.",
                        Some(idx),
                    );
                }
            }
            analyze_expr(Some(like.expr), idx, report, options);
            analyze_expr(Some(like.pattern), idx, report, options);
            analyze_expr(like.escape, idx, report, options);
        }
        Expr::Binary(binary) => {
            if binary.op == sqlbridge_core::TokenKind::Keyword(sqlbridge_core::Keyword::Or) {
                add_finding(
                    report,
                    Severity::Info,
                    "OR_PREDICATE",
                    "OR predicate can reduce index selectivity and lead to less efficient plans.",
                    "Consider splitting into UNION ALL branches or adding composite indexes aligned with predicates.",
                    Some(idx),
                );
            }
            analyze_expr(Some(binary.left), idx, report, options);
            analyze_expr(Some(binary.right), idx, report, options);
        }
        Expr::Unary(unary) => analyze_expr(Some(unary.expr), idx, report, options),
        Expr::Function(call) => {
            if call.name.parts.len() == 1 {
                let fn_name = call.name.parts[0].text.to_ascii_uppercase();
                if options.dialect == Some(Dialect::Postgres) && fn_name == "IFNULL" {
                    add_finding(
                        report,
                        Severity::Warning,
                        "FUNCTION_DIALECT_REWRITE",
                        "IFNULL is not idiomatic in PostgreSQL.",
                        "Use COALESCE(...) for PostgreSQL compatibility.",
                        Some(idx),
                    );
                }
                if options.dialect == Some(Dialect::MySql) && fn_name == "COALESCE" {
                    add_finding(
                        report,
                        Severity::Info,
                        "FUNCTION_DIALECT_REWRITE",
                        "COALESCE will work in MySQL, but IFNULL is often preferred for 2-arg null handling.",
                        "Use IFNULL(a,b) when you specifically need MySQL-style two-argument null coalescing.",
                        Some(idx),
                    );
                }
            }
            for arg in call.args {
                analyze_expr(Some(*arg), idx, report, options);
            }
        }
        Expr::Case(case) => {
            analyze_expr(case.operand, idx, report, options);
            analyze_expr(case.else_expr, idx, report, options);
            for when in case.whens {
                analyze_expr(Some(when.cond), idx, report, options);
                analyze_expr(Some(when.result), idx, report, options);
            }
        }
        Expr::Between(between) => {
            analyze_expr(Some(between.expr), idx, report, options);
            analyze_expr(Some(between.low), idx, report, options);
            analyze_expr(Some(between.high), idx, report, options);
        }
        Expr::In(in_expr) => {
            analyze_expr(Some(in_expr.expr), idx, report, options);
            for item in in_expr.list {
                analyze_expr(Some(*item), idx, report, options);
            }
            if let Some(subquery) = in_expr.subquery {
                analyze_subquery(subquery, idx, report, options);
            }
        }
        Expr::IsNull(is_null) => analyze_expr(Some(is_null.expr), idx, report, options),
        Expr::Exists(exists) => analyze_subquery(exists.subquery, idx, report, options),
        Expr::Subquery(subquery) => analyze_subquery(subquery.subquery, idx, report, options),
        Expr::Cast(cast) => analyze_expr(Some(cast.expr), idx, report, options),
        _ => {}
    }
}

fn analyze_subquery(select: &SelectStmt<'_>, idx: usize, report: &mut Report, options: &Options) {
    for column in select.columns {
        analyze_expr(Some(column.expr), idx, report, options);
    }
    analyze_expr(select.where_clause, idx, report, options);
}

fn add_finding(
    report: &mut Report,
    severity: Severity,
    code: &'static str,
    problem: &str,
    recommendation: &str,
    statement_index: Option<usize>,
) {
    let mut message = String::from(problem);
    if !recommendation.is_empty() {
        message.push_str(" Recommendation: ");
        message.push_str(recommendation);
    }
    report.findings.push(Finding {
        severity,
        code,
        message,
        problem: problem.to_owned(),
        recommendation: recommendation.to_owned(),
        statement_index,
    });
}
