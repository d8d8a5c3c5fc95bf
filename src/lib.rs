//! Core library for the swap-cycler bot.
//!
//! The binary (`main.rs`) wires the fullnode client, the pool price reader
//! and the swap executor into a [`cycle::Orchestrator`] and runs it.

pub mod cli;
pub mod config;
pub mod cycle;
pub mod dex;
pub mod errors;
pub mod models;
pub mod sui;
pub mod utils;
pub mod wallet;
