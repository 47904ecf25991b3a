//! Run statistics.

use std::time::Duration;

use crate::kinematics::{ForbiddenReason, Rejection, Verdict};

/// Candidate counters of a run or of one worker stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Candidates evaluated.
    pub attempts: u64,
    /// Candidates accepted.
    pub accepted: u64,
    /// Early rejections with `T1 < 0`.
    pub negative_t1: u64,
    /// Early rejections with `T2 < 0`.
    pub negative_t2: u64,
    /// Early rejections with `T1 + T2 > Q`.
    pub exceeds_budget: u64,
    /// Rejections by the closure test.
    pub unclosed: u64,
}

impl RunStatistics {
    /// Counts one candidate.
    #[inline]
    pub fn record(&mut self, verdict: &Verdict) {
        self.attempts += 1;
        match verdict {
            Verdict::Accepted => self.accepted += 1,
            Verdict::Rejected(Rejection::Forbidden(ForbiddenReason::NegativeT1)) => {
                self.negative_t1 += 1
            }
            Verdict::Rejected(Rejection::Forbidden(ForbiddenReason::NegativeT2)) => {
                self.negative_t2 += 1
            }
            Verdict::Rejected(Rejection::Forbidden(ForbiddenReason::ExceedsBudget)) => {
                self.exceeds_budget += 1
            }
            Verdict::Rejected(Rejection::Unclosed) => self.unclosed += 1,
        }
    }

    /// Adds the counters of another stream.
    pub fn merge(&mut self, other: &RunStatistics) {
        self.attempts += other.attempts;
        self.accepted += other.accepted;
        self.negative_t1 += other.negative_t1;
        self.negative_t2 += other.negative_t2;
        self.exceeds_budget += other.exceeds_budget;
        self.unclosed += other.unclosed;
    }

    /// All early rejections.
    #[inline]
    pub fn forbidden(&self) -> u64 {
        self.negative_t1 + self.negative_t2 + self.exceeds_budget
    }

    /// All rejections.
    #[inline]
    pub fn rejected(&self) -> u64 {
        self.forbidden() + self.unclosed
    }

    /// Accepted fraction of attempts; 0 before the first attempt.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempts as f64
        }
    }
}

/// Outcome of a completed run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    /// Records written and finalised.
    pub events_written: u64,
    /// Candidate counters.
    pub statistics: RunStatistics,
    /// Wall-clock time of the generation loop.
    pub elapsed: Duration,
}

impl RunSummary {
    /// Accepted events per second of wall-clock time.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.events_written as f64 / secs
        } else {
            0.0
        }
    }
}
