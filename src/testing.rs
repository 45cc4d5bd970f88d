use std::sync::Once;

use serde::{Deserialize, Serialize};

use crate::mapping::{Mapping, Ordinal};
use crate::properties::Collation;

static INIT_LOG: Once = Once::new();

/// Initializes the logger. Log level is controlled by the `RUST_LOG` environment variable.
pub fn init_logger() {
    INIT_LOG.call_once(pretty_env_logger::init);
}

/// Parses a collation. See [Collation#impl-FromStr-for-Collation] for the format.
///
/// # Panics
///
/// This function panics if the collation can not be parsed.
pub fn collation(s: &str) -> Collation {
    s.parse().unwrap_or_else(|e| panic!("Invalid collation: {}", e))
}

/// A test case that checks which required collations are satisfied by a collation.
#[derive(Debug, Deserialize, Serialize)]
struct SatisfiesTestCase {
    /// Description of the test case.
    name: String,
    /// The collation under test.
    collation: String,
    /// Required collations the collation must satisfy.
    #[serde(default)]
    satisfies: Vec<String>,
    /// Required collations the collation must not satisfy.
    #[serde(default)]
    not_satisfies: Vec<String>,
    /// If present the collation is remapped by a projection `[source_count, projected columns]`
    /// before it is checked.
    projection: Option<(usize, Vec<Ordinal>)>,
    /// If present the expected result of the projection.
    projected: Option<String>,
}

/// Reads a YAML-document that contains a list of [satisfies test cases](SatisfiesTestCase) and runs them.
///
/// # Panics
///
/// This function panics if the document is not valid or if some test case fails.
pub fn run_satisfies_tests(str: &str) {
    init_logger();

    let test_cases: Vec<SatisfiesTestCase> =
        serde_yaml::from_str(str).unwrap_or_else(|e| panic!("Invalid test cases: {}", e));
    assert!(!test_cases.is_empty(), "No test cases");

    for test_case in test_cases {
        run_satisfies_test(test_case);
    }
}

fn run_satisfies_test(test_case: SatisfiesTestCase) {
    let name = test_case.name.as_str();
    let mut provided = collation(&test_case.collation);

    if let Some((source_count, projected)) = test_case.projection.as_ref() {
        let mapping = Mapping::projection(*source_count, projected)
            .unwrap_or_else(|e| panic!("{}: invalid projection: {}", name, e));
        provided = provided.remap(&mapping);
    }

    if let Some(expected) = test_case.projected.as_ref() {
        assert_eq!(format!("{}", provided), collation(expected).to_string(), "{}: projected collation", name);
    }

    assert!(provided.satisfies(&provided), "{}: {} must satisfy itself", name, provided);

    for required in test_case.satisfies.iter() {
        let required = collation(required);
        assert!(provided.satisfies(&required), "{}: {} must satisfy {}", name, provided, required);
    }

    for required in test_case.not_satisfies.iter() {
        let required = collation(required);
        assert!(!provided.satisfies(&required), "{}: {} must not satisfy {}", name, provided, required);
    }
}
