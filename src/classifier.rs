//! Per-component pipeline: normalise, validate, analyse, fuse.

use crate::analysis::Analyses;
use crate::component::{AnalysisError, Component, RawComponent};
use crate::fusion::fuse;
use crate::result::Classification;
use crate::rules::Rules;
use crate::validation::{validate, Validation};


/// Classifies components against a borrowed rule set.
///
/// The classifier holds no mutable state, so one instance can be shared across
/// threads for a parallel batch.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    rules: &'a Rules,
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new(Rules::builtin())
    }
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a Rules {
        self.rules
    }

    /// Classifies one component, surfacing malformed records as errors.
    pub fn try_classify(&self, raw: &RawComponent) -> Result<Classification, AnalysisError> {
        let component = Component::from_raw(raw)?;

        if let Validation::Invalid(rejection) = validate(&component, &self.rules.validation) {
            tracing::warn!(
                component = %component.name,
                reason = %rejection.reason,
                "component rejected"
            );
            return Ok(Classification::invalid(rejection));
        }

        let analyses = Analyses::run(&component, self.rules);
        Ok(fuse(analyses, &self.rules.weights))
    }

    /// Classifies one component. Never fails: faults become an `error` result.
    pub fn classify(&self, raw: &RawComponent) -> Classification {
        self.try_classify(raw).unwrap_or_else(|err| {
            tracing::error!(component = %raw.name, error = %err, "analysis failed");
            Classification::error(err)
        })
    }
}
