//! Property-based tests

mod presence_proptest;
