//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Write a small trust network to `temp_dir`.
///
/// Returns `(trust_path, ratings_path)`. Users 1..=4 form the diamond A->B->D, A->C->D with
/// domains A={1,2}, B={1}, C={2}, D={1,2}. User 5 trusts and is trusted by A but has no ratings,
/// and user 9 rated an item but appears in no trust edge.
#[allow(dead_code)]
pub fn create_test_dataset(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let trust = r#"# truster trustee
1 2
1 3
2 4
3 4
1 5
5 1
"#;
    let ratings = r#"# user item topic rating helpfulness
1 100 1 5 3
1 101 2 4 3
2 100 1 5 1
3 102 2 2 4
4 100 1 3 2
4 103 2 4 4
9 104 7 1 1
"#;
    let trust_path = temp_dir.path().join("trust.txt");
    let ratings_path = temp_dir.path().join("ratings.txt");
    std::fs::write(&trust_path, trust).unwrap();
    std::fs::write(&ratings_path, ratings).unwrap();
    (trust_path, ratings_path)
}
