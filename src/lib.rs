//! UrbanPulse Simulation Library
//!
//! Procedural grid-city generation plus the per-frame simulation of traffic,
//! daylight, and weather. Everything here runs headless; a rendering front
//! end consumes the transforms, colors, and particle buffers this crate
//! produces.

pub mod simulation;
