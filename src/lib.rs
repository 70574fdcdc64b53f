//! Increment Engine for employee salary reviews
//!
//! This crate manages employee records and HR increment policies, matches
//! each employee's years of experience to a policy band such as
//! `"2-5 years"` or `"10+ years"`, and computes the resulting salary
//! increment. The engine itself lives in [`calculation`]; [`api`] exposes it
//! over HTTP on top of the SQLite-backed [`store`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
