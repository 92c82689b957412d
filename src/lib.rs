//! mdsite - Markdown to HTML static site generator
//!
//! Converts a directory of markdown documents into HTML pages by literal
//! `{{title}}` / `{{content}}` substitution into a template, and offers a
//! small HTTP service for uploading sources and downloading pages.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Titles, file names, templates, configuration, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (filesystem, pulldown-cmark, TOML config)
//! - **Web**: axum router for the upload/download service
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod web;
