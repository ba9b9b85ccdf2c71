// serpshare/src/lib.rs
//! # SerpShare CLI Application
//!
//! Terminal front end for `serpshare-core`: loads recorded SERP and volume
//! data, runs the attribution model and renders the result as tables or JSON.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
