//! Whole-case configuration read from `.json` files
pub mod json_reader;
