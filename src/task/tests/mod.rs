//! Unit tests for the task module.

mod state_transition_tests;
