//! Motorway Simulation Library
//!
//! A turn-based grid traffic simulation with a reset/step/observe contract
//! for driving episodes from an external controller.

pub mod simulation;
