//! Markdown infrastructure module

mod pulldown;

pub use pulldown::PulldownRenderer;
