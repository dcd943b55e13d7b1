//! End-to-end tests for the crawler

mod crawl_tests;
