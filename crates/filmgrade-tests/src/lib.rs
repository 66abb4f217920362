//! Integration tests for filmgrade crates.
//!
//! End-to-end checks that go through the public dispatch surface and
//! compare against the individual building blocks.
