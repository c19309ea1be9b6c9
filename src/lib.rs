//! Rail Simulation Library
//!
//! A discrete-event simulation of a rail vehicle running a fixed line,
//! docking at stations and exchanging passengers. Rendering is left to the
//! consumer of the per-frame snapshots.

pub mod simulation;
