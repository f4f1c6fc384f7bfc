//! Numerical methods shared by the pricing layers.
//!
//! - `solvers`: Newton-Raphson root finding with bounded iteration

pub mod solvers;
