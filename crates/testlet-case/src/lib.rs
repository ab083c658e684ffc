//! Test case base type and deep structural comparison
//!
//! This crate provides the leaf-facing API of testlet: [`TestCase`], the
//! base type a host runner instantiates per test case, and
//! [`DeepEqualityChecker`], the bidirectional structural comparator behind
//! `assert_deep_equal`.

pub mod case;
pub mod compare;

pub use case::TestCase;
pub use compare::DeepEqualityChecker;
