pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod inspect;
pub mod logging;
pub mod runner;
