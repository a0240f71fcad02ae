//! Unit tests for the geo module.
