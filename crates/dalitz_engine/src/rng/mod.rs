//! # Random Source
//!
//! Seeded uniform variates for the rejection sampler.
//!
//! - **Reproducibility**: every stream is created from a 64-bit seed and
//!   remembers it
//! - **Static dispatch**: the generator is generic over [`UniformSource`], so
//!   the hot loop never goes through a trait object
//! - **Independent substreams**: [`substream_seed`] gives each parallel worker
//!   its own stream from one base seed
//!
//! ## Usage Example
//!
//! ```rust
//! use dalitz_engine::rng::{DecayRng, UniformSource};
//!
//! let mut rng = DecayRng::from_seed(12345);
//! let u = rng.next_uniform();
//! assert!((0.0..1.0).contains(&u));
//! ```

mod prng;
mod source;

pub use prng::{substream_seed, DecayRng};
pub use source::UniformSource;

#[cfg(test)]
pub(crate) use source::ScriptedSource;

#[cfg(test)]
mod tests;
