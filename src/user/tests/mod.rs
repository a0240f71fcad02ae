//! Unit tests for user values and the in-memory user repository.
