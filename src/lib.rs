//! Personnel records engine
//!
//! This crate provides role-gated employee search and payroll reporting over
//! a normalized personnel store. Searches are composed as parameterized
//! queries from whichever criteria are populated, and every operation is
//! checked against the caller's role before storage is touched.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod query;
pub mod service;
pub mod storage;
