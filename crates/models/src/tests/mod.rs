/// Record helpers: id parsing, merge and loose matching
pub mod record_tests;
