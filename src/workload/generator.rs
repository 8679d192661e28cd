use std::sync::Arc;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::args::PositiveUsize;
use crate::error::ValidationError;

use super::programs::PayloadTable;
use super::types::{CaseKind, CaseWeights, Language, WorkloadItem};

#[derive(Debug, Clone, Copy)]
pub struct WorkloadConfig {
    pub seed: u64,
    pub users: PositiveUsize,
    pub weights: CaseWeights,
}

/// Seeded source of workload items.
///
/// Each item consumes three draws in a fixed order (language, case kind,
/// identity), so two generators built from the same config replay the same
/// sequence.
#[derive(Debug)]
pub struct WorkloadGenerator {
    rng: StdRng,
    cases: WeightedIndex<f64>,
    users: usize,
    payloads: Arc<PayloadTable>,
}

impl WorkloadGenerator {
    /// Builds a generator for the given config and payload table.
    ///
    /// # Errors
    ///
    /// Returns an error when the case weights cannot be sampled.
    pub fn new(config: &WorkloadConfig, payloads: Arc<PayloadTable>) -> Result<Self, ValidationError> {
        config.weights.validate()?;
        let cases = WeightedIndex::new(CaseKind::ALL.map(|kind| config.weights.weight(kind)))
            .map_err(|err| ValidationError::CaseWeightsRejected {
                reason: err.to_string(),
            })?;
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            cases,
            users: config.users.get(),
            payloads,
        })
    }

    pub fn next_item(&mut self) -> WorkloadItem {
        let language = Language::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Language::Python);
        let case_kind = CaseKind::ALL
            .get(self.cases.sample(&mut self.rng))
            .copied()
            .unwrap_or(CaseKind::Success);
        let user = self.rng.gen_range(1..=self.users);
        let payload = self.payloads.payload(language, case_kind).unwrap_or_else(|| {
            debug!("No payload for {}/{}; sending empty code.", language, case_kind);
            Arc::from("")
        });

        WorkloadItem {
            language,
            case_kind,
            payload,
            identity: format!("user_{}", user),
        }
    }
}

impl Iterator for WorkloadGenerator {
    type Item = WorkloadItem;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_item())
    }
}
