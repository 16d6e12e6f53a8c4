//! # Maildeck Server
//!
//! Gated catalog-and-preview server for static HTML email artifacts.
//!
//! ## Overview
//!
//! Maildeck joins a directory of rendered email artifacts with per-artifact
//! JSON metadata records and serves:
//!
//! - **Internal catalog**: filterable, sortable listing behind a shared
//!   preview key
//! - **Viewers**: desktop/mobile/combined preview pages with link-shareable
//!   view state
//! - **Public routes**: key-less viewer pages for direct client sharing
//! - **Local meta tools**: a flag-gated write endpoint for tagging artifacts
//!
//! The server is built on Axum; the catalog engine lives in
//! [`maildeck_core`] and the data model in [`maildeck_model`].

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod pages;
pub mod routes;

pub use infra::app_state::AppState;
pub use infra::config::Config;
