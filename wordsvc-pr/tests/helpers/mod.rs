//! Test Helper Utilities
//!
//! Shared utilities for testing wordsvc-pr

#![allow(dead_code)]

pub mod fake_wiktionary;
pub mod raw_server;

pub use fake_wiktionary::{
    imageinfo_json, revisions_json, sections_json, FakeReplies, FakeWiktionary, Reply,
};
pub use raw_server::{start_raw_server, TRUNCATED_503};
