//! This module holds the client-facing configuration of host admission.

pub mod config;
