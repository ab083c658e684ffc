//! Deep structural equality with slot-path diagnostics

use testlet_core::{AssertError, Value, MAX_COMPARE_DEPTH};

/// Direction of a comparison pass
///
/// The checker walks the pair twice with the argument positions swapped;
/// the direction only selects the wording of structural errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Forward,
    Backward,
}

/// Recursive structural comparator over host values
///
/// A single one-directional walk over one side's slots can only detect
/// slots that side has and the other lacks. Running the same walk twice
/// with the argument positions swapped makes both missing and extra slots
/// detectable with one piece of traversal code; the pass direction is
/// carried only to pick the error wording.
///
/// The comparator owns no state beyond its depth bound - it is re-entrant
/// and strictly sequential, which the path accounting depends on.
#[derive(Debug, Clone)]
pub struct DeepEqualityChecker {
    max_depth: usize,
}

impl DeepEqualityChecker {
    /// Create a checker with the default depth bound
    pub fn new() -> Self {
        Self::with_max_depth(MAX_COMPARE_DEPTH)
    }

    /// Create a checker with a custom depth bound
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Compare two values structurally in both directions
    ///
    /// The forward pass drives iteration with `actual`'s slots against
    /// `expected`; the backward pass swaps the roles. The first
    /// discrepancy found in either pass is returned.
    pub fn check(&self, expected: &Value, actual: &Value) -> Result<(), AssertError> {
        self.compare(expected, actual, "", 0, Pass::Forward)?;
        self.compare(actual, expected, "", 0, Pass::Backward)
    }

    fn compare(
        &self,
        value1: &Value,
        value2: &Value,
        path: &str,
        depth: usize,
        pass: Pass,
    ) -> Result<(), AssertError> {
        if depth > self.max_depth {
            return Err(AssertError::CyclicReference { path: clean(path) });
        }

        if value1.is_container() {
            // Iteration is driven by value2's slot set; the argument swap
            // in the recursion flips the driving side at every level.
            for (key, nested) in value2.slots() {
                let slot_path = format!("{path}.{key}");
                match value1.slot(&key) {
                    Some(own) => self.compare(nested, own, &slot_path, depth + 1, pass)?,
                    None => {
                        return Err(match pass {
                            Pass::Forward => AssertError::MissingSlot {
                                path: clean(&slot_path),
                            },
                            Pass::Backward => AssertError::ExtraSlot {
                                path: clean(&slot_path),
                            },
                        })
                    }
                }
            }
            return Ok(());
        }

        // Null compares equal to anything
        if value1.is_null() || value2.is_null() {
            return Ok(());
        }

        if !value2.loose_eq(value1) {
            return Err(AssertError::ValueMismatch {
                path: clean(path),
                left: value2.to_string(),
                right: value1.to_string(),
            });
        }

        Ok(())
    }
}

impl Default for DeepEqualityChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the leading separator before a path reaches an error message
fn clean(path: &str) -> String {
    path.trim_start_matches('.').to_string()
}
