//! Scripts for deploying the RealityV2 contract, which lets reality.eth
//! questions be escalated to Kleros arbitration.

pub mod cli;
pub mod commands;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod network;
pub mod published;
pub mod registry;
mod solidity;
pub mod template;
pub mod types;
pub mod utils;
