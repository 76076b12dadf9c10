//! Core processing modules
//!
//! Contains the request composition, response normalization, persona
//! instructions, and chat turn orchestration logic.

pub mod composer;
pub mod normalizer;
pub mod persona;
pub mod service;
