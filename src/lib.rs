//! dnsup: keeps DNS records pointed at network interfaces.
//!
//! A library for discovering the address of network interfaces, either by
//! local inspection or by DNS reflection, and publishing it to a DNS
//! provider whenever it changes.

pub mod config;
pub mod monitor;
pub mod network;
pub mod publish;
pub mod resolve;
pub mod task;
pub mod time;
