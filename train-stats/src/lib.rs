//! Train journey history site.
//!
//! Shows what has been recorded about past train travel: per-year totals,
//! sortable tables of legs, stations, operators, classes and units, and
//! detail pages for single legs and stations.

pub mod api;
pub mod cache;
pub mod config;
pub mod domain;
pub mod ranking;
pub mod tables;
pub mod web;
