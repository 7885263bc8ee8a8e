//! Okey orchestration on top of `okey-engine`.
//!
//! Deterministic session seeding, the room directory with per-room
//! single-writer command serialization, a policy-driven game driver, and
//! rayon batch simulation.

pub mod driver;
pub mod rooms;
pub mod seeding;
pub mod simulator;
