//! Configuration loading tests. Every test is `#[serial]` because the
//! environment is process-global.
