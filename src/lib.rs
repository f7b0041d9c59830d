//! Attendance administration back end: department attendance rules, the
//! late/effective minutes calculator, and the JSON API the dashboard calls.

pub mod api;
pub mod auth;
pub mod calc;
pub mod config;
pub mod docs;
pub mod error;
pub mod model;
pub mod models;
pub mod report;
pub mod routes;
pub mod rules;
pub mod utils;
