//! Test suites for locale resolution.

pub(crate) mod support;
