//! Taskboard - in-memory project, task and user management.
//!
//! Entities live in fixed-capacity slot stores addressed by prefixed
//! identifiers (`P0000`, `T0000`, `U0000`). The [`service`] layer wraps each
//! store with validation and queries, [`app::Workspace`] ties the three
//! together with the login session and cross-entity rules, and [`cli`]
//! drives it all from a line-oriented shell.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod assignment;
pub mod config;
pub mod domain;
pub mod error;
pub mod id_generation;
pub mod service;
pub mod storage;
pub mod validation;

// Public CLI module (needed by binary)
pub mod cli;

pub mod output;
