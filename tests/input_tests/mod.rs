//! Tests for answer parsing and prompting

mod parse_tests;
