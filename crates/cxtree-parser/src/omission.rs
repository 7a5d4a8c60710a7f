//! Out-of-band channel for attributes that produced no value.
//!
//! The serialized document only ever shows what was harvested; why a key is
//! missing is reported here, one [`Omission`] per skipped member per object.

use cxtree_core::{Category, Flavor, OmissionSummary, Skip};

/// A member that was skipped for one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    pub category: Category,
    pub flavor: Flavor,
    pub name: &'static str,
    pub skip: Skip,
}

impl Omission {
    /// `"<category>.<name>"`, the key used in [`OmissionSummary`].
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}.{}", self.category, self.name)
    }
}

/// Receives every omission raised during harvesting.
pub trait OmissionSink {
    fn omitted(&mut self, omission: Omission);
}

/// Drops omissions silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardOmissions;

impl OmissionSink for DiscardOmissions {
    fn omitted(&mut self, _omission: Omission) {}
}

/// Logs each omission at `trace`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceOmissions;

impl OmissionSink for TraceOmissions {
    fn omitted(&mut self, omission: Omission) {
        tracing::trace!(
            category = %omission.category,
            flavor = %omission.flavor,
            attribute = omission.name,
            reason = %omission.skip,
            "attribute omitted"
        );
    }
}

/// Counts omissions per attribute. Fault detail is kept only when asked for
/// with [`CollectOmissions::with_faults`], since it grows with the input.
#[derive(Debug, Default, Clone)]
pub struct CollectOmissions {
    summary: OmissionSummary,
    faults: Option<Vec<Omission>>,
}

impl CollectOmissions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keep every fault omission in order.
    #[must_use]
    pub fn with_faults() -> Self {
        Self {
            faults: Some(Vec::new()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn summary(&self) -> &OmissionSummary {
        &self.summary
    }

    /// Omissions caused by a front-end fault, in the order they happened.
    /// Empty unless built with [`CollectOmissions::with_faults`].
    #[must_use]
    pub fn faults(&self) -> &[Omission] {
        self.faults.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn into_summary(self) -> OmissionSummary {
        self.summary
    }
}

impl OmissionSink for CollectOmissions {
    fn omitted(&mut self, omission: Omission) {
        let counters = match omission.skip {
            Skip::NotApplicable => &mut self.summary.not_applicable,
            Skip::Fault(_) => &mut self.summary.faults,
        };
        *counters.entry(omission.key()).or_default() += 1;
        if let Some(faults) = self.faults.as_mut().filter(|_| omission.skip.is_fault()) {
            faults.push(omission);
        }
    }
}

impl<S: OmissionSink + ?Sized> OmissionSink for &mut S {
    fn omitted(&mut self, omission: Omission) {
        (**self).omitted(omission);
    }
}
