//! Exact rational arithmetic for the stepwise equivalence judge.
//!
//! Everything is built on two pieces: a persistent, monotonically growing
//! [`PrimeCache`] that backs factorization-based GCD/LCM, and the
//! [`MixedFraction`] triple with LaTeX/decimal parsing and stringifying.

pub mod error;
pub mod fraction;
pub mod primes;

pub use error::MathError;
pub use fraction::MixedFraction;
pub use primes::PrimeCache;
