#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod runtime;
pub mod tools;
pub mod types;

mod selectors;
#[cfg(test)]
mod testing;

pub use config::{Config, LabelTable};
pub use engine::Engine;
pub use error::{Result, SitellmsError};
pub use render::{render_json, render_markdown};
pub use tools::classify::PatternSet;
pub use tools::fetch::{HttpClient, HttpResponse, ReqwestClient};
pub use types::*;
