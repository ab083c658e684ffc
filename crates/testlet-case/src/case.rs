//! Test case base type: assertion counter, runner handle, assertions

use std::fmt;

use testlet_channel::SharedRunner;
use testlet_core::{AssertError, RunnerMessage, Value, EXPECTED_THROW_MESSAGE};
use tracing::{debug, trace};

use crate::compare::DeepEqualityChecker;

/// Base type for test cases
///
/// A case is created by the host runner, holds a shared handle to it, and
/// exposes the assertion set. Every assertion increments the counter
/// exactly once - pass or fail - then evaluates its predicate and returns
/// any failure as an [`AssertError`] for the runner to intercept; nothing
/// is recovered locally. Each method takes an optional caller message that
/// replaces the default template on failure.
pub struct TestCase {
    runner: SharedRunner,
    session: String,
    assertions: u64,
}

impl TestCase {
    /// Create a test case bound to a runner and session
    pub fn new(runner: SharedRunner, session: impl Into<String>) -> Self {
        Self {
            runner,
            session: session.into(),
            assertions: 0,
        }
    }

    /// Opaque session identifier this case was created under
    pub fn session(&self) -> &str {
        &self.session
    }

    /// Number of assertions evaluated so far, pass or fail
    pub fn assertions(&self) -> u64 {
        self.assertions
    }

    fn tally(&mut self) {
        self.assertions += 1;
        trace!(
            session = %self.session,
            assertions = self.assertions,
            "evaluating assertion"
        );
    }

    /// Assert that a condition holds
    pub fn assert_true(
        &mut self,
        condition: bool,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        if condition {
            Ok(())
        } else {
            Err(failure(message, || {
                "Expected condition to be true".to_string()
            }))
        }
    }

    /// Assert that a condition does not hold
    pub fn assert_false(
        &mut self,
        condition: bool,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        if condition {
            Err(failure(message, || {
                "Expected condition to be false".to_string()
            }))
        } else {
            Ok(())
        }
    }

    /// Assert loose equality between two values
    ///
    /// Equality is coerced the way the host coerces it, so `1` compares
    /// equal to `"1"`; see [`Value::loose_eq`]. For aggregates with path
    /// diagnostics use [`TestCase::assert_deep_equal`].
    pub fn assert_equal(
        &mut self,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        let expected = expected.into();
        let actual = actual.into();
        if actual.loose_eq(&expected) {
            Ok(())
        } else {
            Err(failure(message, || {
                format!("Expected {expected}, got {actual}")
            }))
        }
    }

    /// Assert loose inequality between two values
    pub fn assert_not_equal(
        &mut self,
        expected: impl Into<Value>,
        actual: impl Into<Value>,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        let expected = expected.into();
        let actual = actual.into();
        if actual.loose_eq(&expected) {
            Err(failure(message, || {
                format!("Expected a value other than {expected}")
            }))
        } else {
            Ok(())
        }
    }

    /// Assert a strict ordering: `actual > cmp`
    pub fn assert_greater<T: PartialOrd + fmt::Display>(
        &mut self,
        actual: T,
        cmp: T,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        if actual > cmp {
            Ok(())
        } else {
            Err(failure(message, || {
                format!("Expected {actual} to be greater than {cmp}")
            }))
        }
    }

    /// Assert a strict ordering: `actual < cmp`
    pub fn assert_less<T: PartialOrd + fmt::Display>(
        &mut self,
        actual: T,
        cmp: T,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        if actual < cmp {
            Ok(())
        } else {
            Err(failure(message, || {
                format!("Expected {actual} to be less than {cmp}")
            }))
        }
    }

    /// Assert that two numbers differ by at most `max_diff`
    pub fn assert_close(
        &mut self,
        expected: f64,
        actual: f64,
        max_diff: f64,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        if (expected - actual).abs() <= max_diff {
            Ok(())
        } else {
            Err(failure(message, || {
                format!("Expected {actual} to be within {max_diff} of {expected}")
            }))
        }
    }

    /// Assert that a value lies within an inclusive range
    ///
    /// Reversed bounds are tolerated: the range is normalized so the
    /// smaller bound is the lower one before the check.
    pub fn assert_between<T: PartialOrd + fmt::Display>(
        &mut self,
        actual: T,
        min: T,
        max: T,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        if actual < min || actual > max {
            Err(failure(message, || {
                format!("Expected {actual} to be between {min} and {max}")
            }))
        } else {
            Ok(())
        }
    }

    /// Assert recursive structural equality, with slot-path diagnostics
    ///
    /// Delegates to [`DeepEqualityChecker`], which walks the pair in both
    /// directions so missing and extra slots are both detected. A caller
    /// message replaces the checker's structural error wholesale.
    pub fn assert_deep_equal(
        &mut self,
        expected: &Value,
        actual: &Value,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        self.tally();
        DeepEqualityChecker::new()
            .check(expected, actual)
            .map_err(|err| match message {
                Some(text) => AssertError::Failure(text.to_string()),
                None => err,
            })
    }

    /// Assert that a fallible call raises, returning the raised error
    ///
    /// The one assertion that intercepts a failure instead of propagating
    /// it: the error raised by `f` becomes the success value. If `f`
    /// completes normally, the assertion itself fails.
    pub fn assert_throws<T, E>(
        &mut self,
        f: impl FnOnce() -> Result<T, E>,
        message: Option<&str>,
    ) -> Result<E, AssertError> {
        self.tally();
        match f() {
            Err(raised) => Ok(raised),
            Ok(_) => Err(AssertError::ExpectedThrow(
                message
                    .map(str::to_string)
                    .unwrap_or_else(|| EXPECTED_THROW_MESSAGE.to_string()),
            )),
        }
    }

    /// Ask the host runner to execute an external command
    ///
    /// Pass-through only: the command string is not validated and no
    /// result is awaited. Not an assertion, so the counter is untouched.
    pub fn run_command(&self, command: impl Into<String>) {
        let command = command.into();
        debug!(session = %self.session, command = %command, "requesting external command");
        self.runner.send(RunnerMessage::ExternalCommand { command });
    }
}

fn failure(message: Option<&str>, default: impl FnOnce() -> String) -> AssertError {
    AssertError::Failure(message.map(str::to_string).unwrap_or_else(default))
}
