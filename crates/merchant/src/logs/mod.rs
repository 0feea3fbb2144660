//! Opt-in JSONL traces for offline analysis of play sessions.

pub mod trading;
