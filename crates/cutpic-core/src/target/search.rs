//! The quality search state machine.
//!
//! One search covers one conversion: `Init -> Encoding -> Accepted`, with
//! `Encoding -> Encoding` taken while a lossy attempt is over budget and
//! reductions remain. Running out of reductions is still an acceptance; the
//! result's `iterations_used` tells the caller the bound was hit.

use super::{SearchParams, TargetSpec};

/// One encode of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeAttempt {
    /// Quality the attempt was encoded at (0.0 to 1.0)
    pub quality: f64,
    pub bytes: Vec<u8>,
}

impl EncodeAttempt {
    pub fn new(quality: f64, bytes: Vec<u8>) -> Self {
        Self { quality, bytes }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// What to do after an attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStep {
    /// Encode again at the given, lower quality.
    Retry { quality: f64 },
    /// The last attempt is the result.
    Accept,
}

/// Tracks the current quality and iteration of a running search.
#[derive(Debug, Clone)]
pub struct QualitySearch {
    spec: TargetSpec,
    params: SearchParams,
    iteration: u32,
}

impl QualitySearch {
    pub fn new(spec: TargetSpec, params: SearchParams) -> Self {
        Self {
            spec,
            params,
            iteration: 0,
        }
    }

    /// Quality to encode the next attempt at.
    pub fn quality(&self) -> f64 {
        self.params.quality_at(self.iteration)
    }

    /// Number of reductions taken so far.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn spec(&self) -> &TargetSpec {
        &self.spec
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// True once every allowed reduction has been taken.
    pub fn is_exhausted(&self) -> bool {
        self.iteration >= self.params.max_iterations
    }

    /// Decide the next step from the size of the attempt just produced.
    pub fn observe(&mut self, size_bytes: u64) -> SearchStep {
        let over_budget = size_bytes > self.spec.target_bytes;

        if self.spec.output_format.is_lossy() && over_budget && !self.is_exhausted() {
            self.iteration += 1;
            SearchStep::Retry {
                quality: self.quality(),
            }
        } else {
            SearchStep::Accept
        }
    }
}
