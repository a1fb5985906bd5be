//! Integration tests

mod realtime;
