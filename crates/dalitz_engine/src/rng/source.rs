//! Uniform variate sources consumed by the generator.

#[cfg(test)]
use std::collections::VecDeque;

/// Supplier of independent uniform variates in [0, 1).
pub trait UniformSource {
    /// Returns the next variate of the stream.
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Drives the generator through hand-picked candidates in tests.
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct ScriptedSource {
    draws: VecDeque<f64>,
    consumed: u64,
}

#[cfg(test)]
impl ScriptedSource {
    /// Panics if `draws` is empty or contains a value outside [0, 1).
    pub(crate) fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        assert!(
            draws.iter().all(|u| (0.0..1.0).contains(u)),
            "scripted draws must lie in [0, 1)"
        );
        Self {
            draws: draws.into(),
            consumed: 0,
        }
    }

    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }
}

#[cfg(test)]
impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.draws[0];
        self.draws.rotate_left(1);
        self.consumed += 1;
        value
    }
}
