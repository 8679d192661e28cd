//! Core library for the `judgeload` CLI.
//!
//! `judgeload` drives synthetic load against an online code judge: it
//! generates a seeded, weighted mix of submissions across languages and
//! failure modes, keeps a bounded number of submit calls in flight for a
//! fixed duration, polls every accepted submission until it resolves to a
//! verdict, and reports submit latency percentiles and the verdict
//! distribution.
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod metrics;
pub mod system;
pub mod workload;
