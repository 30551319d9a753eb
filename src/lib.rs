//! Resume and job-description analysis pipeline with ATS scoring.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod nlp;
