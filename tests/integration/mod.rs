//! Integration tests for tranquil-reader
//!
//! These tests run the complete reading-view pipeline end-to-end over
//! unusual inputs and realistic pages.

mod edge_cases;
mod real_world_pages;
