//! Analyze a few sample statements and print findings plus the converted
//! form for each dialect.
//!
//! Run with `cargo run -p sqlbridge-analyze --example report`.

use sqlbridge_analyze::analyze;
use sqlbridge_core::{convert_dialect, Dialect};

fn main() {
    let samples = [
        ("select_star", "SELECT * FROM users WHERE name LIKE '%abc'"),
        (
            "upsert",
            "INSERT INTO users (id, name) VALUES (1, IFNULL(:name, 'x')) \
             ON DUPLICATE KEY UPDATE name = IFNULL(:name, name)",
        ),
        ("ddl", "CREATE TABLE events (id BIGINT AUTO_INCREMENT PRIMARY KEY, payload JSONB)"),
        ("unsafe_update", "UPDATE users SET active = 0"),
    ];

    for (name, sql) in samples {
        println!("== {name}");
        println!("input : {sql}");
        let report = analyze(sql);
        println!("report: {report}");
        for finding in &report.findings {
            println!("  - [{}] {}: {}", finding.severity, finding.code, finding.message);
        }
        for dialect in [Dialect::MySql, Dialect::Postgres, Dialect::Sqlite] {
            match convert_dialect(sql, dialect) {
                Ok(out) => println!("{dialect:>8}: {out}"),
                Err(err) => println!("{dialect:>8}: ERROR: {err}"),
            }
        }
        println!();
    }
}
