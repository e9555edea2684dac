//! Dragflow Animation System
//!
//! Spring physics used to settle a dropped item into its slot.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Scheduler**: Steps every live spring with an explicit frame delta
//! - **Interruptible**: Retargeting a spring keeps its current velocity

pub mod scheduler;
pub mod spring;

pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
