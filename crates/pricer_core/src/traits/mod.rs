//! Numeric traits shared across the pricing layers.

/// Generic floating-point trait for numeric computations.
///
/// Pricing and solver code is written against this trait so the same
/// formulas serve `f64` production runs and `f32` experiments alike.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.06, 0.5);
/// assert!((discount_f64 - 0.970446).abs() < 1e-6);
/// ```
pub use num_traits::Float;
