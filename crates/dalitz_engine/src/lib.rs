//! # Dalitz Engine (Kinematics Layer)
//!
//! Rejection-sampling generator of planar (Dalitz-style) coordinates for a
//! three-body decay with three identical daughters. The reference reaction is
//! K⁰ → π⁰ π⁰ π⁰.
//!
//! Each event is produced by:
//!
//! 1. drawing two uniform variates `u1`, `u2`
//! 2. mapping them onto a disc (inverse-transform radius, uniform angle)
//! 3. turning the point into three kinetic energies summing to Q
//! 4. converting energies to momentum magnitudes
//! 5. accepting iff the momenta can close into a triangle
//!
//! and retrying from step 1 on rejection.
//!
//! ## Module Structure
//!
//! - [`constants`]: physical constants, [`DecayParameters`], [`DalitzMapping`]
//! - [`rng`]: seeded uniform source and worker substreams
//! - [`kinematics`]: mapper, derivation and acceptance test
//! - [`generator`]: sequential and parallel event loops
//! - [`sink`]: dataset outputs
//! - [`error`]: error types
//!
//! ## Usage Example
//!
//! ```rust
//! use dalitz_engine::generator::{generate, GeneratorConfig};
//! use dalitz_engine::sink::MemorySink;
//!
//! let config = GeneratorConfig::builder()
//!     .n_events(1_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut sink = MemorySink::new();
//! let summary = generate(&config, &mut sink).unwrap();
//!
//! assert_eq!(summary.events_written, 1_000);
//! println!("acceptance rate: {:.3}", summary.statistics.acceptance_rate());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod constants;
pub mod error;
pub mod generator;
pub mod kinematics;
pub mod rng;
pub mod sink;

pub use constants::{DalitzMapping, DecayParameters};
pub use error::{ConfigError, GenerationError, SinkError};
pub use generator::{generate, EventGenerator, GeneratorConfig, ParallelGenerator, RunSummary};
pub use kinematics::{AcceptedEvent, DalitzKinematics};
pub use rng::DecayRng;
pub use sink::{DatasetFormat, EventSink, FileSink, MemorySink};
