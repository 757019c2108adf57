//! Confidence gate
//!
//! Classifies an identification result by its confidence score. Results at or
//! above the threshold are accepted; results below it are handed back as a
//! `LowConfidence` choice the caller must resolve by either retrying with a
//! new image or force-accepting the result unmodified.

use crate::models::IdentificationResult;

/// Accept threshold (inclusive)
pub const ACCEPT_THRESHOLD: f64 = 0.5;

/// Classification of a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// confidence >= 0.5
    Accept,
    /// confidence < 0.5; caller must choose retry or force-accept
    LowConfidenceChoice,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accept => "Accept",
            Decision::LowConfidenceChoice => "LowConfidenceChoice",
        }
    }
}

/// Gate outcome carrying the result
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Accept(IdentificationResult),
    LowConfidenceChoice(LowConfidence),
}

impl GateDecision {
    pub fn decision(&self) -> Decision {
        match self {
            GateDecision::Accept(_) => Decision::Accept,
            GateDecision::LowConfidenceChoice(_) => Decision::LowConfidenceChoice,
        }
    }

    /// The result under consideration, regardless of branch
    pub fn result(&self) -> &IdentificationResult {
        match self {
            GateDecision::Accept(result) => result,
            GateDecision::LowConfidenceChoice(low) => low.result(),
        }
    }
}

/// A below-threshold result awaiting the caller's choice
///
/// Both resolutions consume the value, so exactly one of them happens.
#[derive(Debug, Clone, PartialEq)]
pub struct LowConfidence {
    result: IdentificationResult,
}

impl LowConfidence {
    /// Inspect without resolving
    pub fn result(&self) -> &IdentificationResult {
        &self.result
    }

    /// Present the result anyway, unmodified
    pub fn force_accept(self) -> IdentificationResult {
        tracing::info!(
            scientific_name = %self.result.scientific_name,
            confidence = self.result.confidence,
            "Low-confidence result force-accepted"
        );
        self.result
    }

    /// Discard the result; the caller re-enters the pipeline with a new image
    pub fn retry(self) {
        tracing::debug!(
            scientific_name = %self.result.scientific_name,
            confidence = self.result.confidence,
            "Low-confidence result discarded for retry"
        );
    }
}

/// Confidence gate
///
/// Pure: no retries, no side effects beyond logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceGate;

impl ConfidenceGate {
    pub fn new() -> Self {
        Self
    }

    /// Total function of confidence. NaN is below any threshold.
    pub fn classify(confidence: f64) -> Decision {
        if confidence >= ACCEPT_THRESHOLD {
            Decision::Accept
        } else {
            Decision::LowConfidenceChoice
        }
    }

    pub fn decide(&self, result: IdentificationResult) -> GateDecision {
        let decision = Self::classify(result.confidence);
        tracing::debug!(
            confidence = result.confidence,
            decision = decision.as_str(),
            "Confidence gate"
        );

        match decision {
            Decision::Accept => GateDecision::Accept(result),
            Decision::LowConfidenceChoice => GateDecision::LowConfidenceChoice(LowConfidence { result }),
        }
    }
}
