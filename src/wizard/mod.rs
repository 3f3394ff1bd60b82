//! Multi-step form navigation with per-step validation.
//!
//! Steps are an enum implementing [`Step`]. Each step's validator is
//! registered once in a [`StepResolver`] lookup table; [`Wizard`] only
//! advances past a step when that step's validator accepts the payload.
//!
//! Validators are supplied by the caller; this module defines no schemas
//! and does not touch list state.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use thiserror::Error;
use tracing::debug;

// ===== Step =====

/// A step of a multi-step form.
pub trait Step: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Every step, in display order.
    fn all() -> &'static [Self];

    /// Human-readable step title.
    fn title(&self) -> &'static str;

    /// Position of this step in [`Step::all`].
    fn index(&self) -> usize {
        Self::all().iter().position(|s| s == self).unwrap_or(0)
    }
}

// ===== Validation errors =====

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Field path, e.g. `"contacts[0].email"`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldIssue {
    /// Issue for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All issues found while validating one step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation issue(s): {}", .0.len(), summary(.0))]
pub struct ValidationErrors(pub Vec<FieldIssue>);

fn summary(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Issues for the given field only.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldIssue> + 'a {
        self.0.iter().filter(move |i| i.field == field)
    }
}

/// Collect issues and turn them into a result.
#[derive(Debug, Default)]
pub struct IssueCollector {
    issues: Vec<FieldIssue>,
}

impl IssueCollector {
    /// Empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue when `value` is blank.
    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.issues.push(FieldIssue::new(field, "is required"));
        }
        self
    }

    /// Record an issue when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.issues.push(FieldIssue::new(field, message));
        }
        self
    }

    /// `Ok` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns every recorded issue.
    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.issues)))
        }
    }
}

// ===== StepResolver =====

/// Validates the payload for one step.
pub type Validator<P> = Box<dyn Fn(&P) -> Result<(), ValidationErrors>>;

/// Lookup table from step to validator.
pub struct StepResolver<S: Step, P> {
    validators: HashMap<S, Validator<P>>,
}

impl<S: Step, P> Default for StepResolver<S, P> {
    fn default() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }
}

impl<S: Step, P> fmt::Debug for StepResolver<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps: Vec<&S> = self.validators.keys().collect();
        steps.sort_by_key(|s| s.index());
        f.debug_struct("StepResolver").field("steps", &steps).finish()
    }
}

impl<S: Step, P> StepResolver<S, P> {
    /// Empty table; steps without a validator always pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the validator for `step`, replacing any earlier one.
    pub fn with(
        mut self,
        step: S,
        validator: impl Fn(&P) -> Result<(), ValidationErrors> + 'static,
    ) -> Self {
        self.validators.insert(step, Box::new(validator));
        self
    }

    /// The validator registered for `step`.
    pub fn resolver_for(&self, step: S) -> Option<&Validator<P>> {
        self.validators.get(&step)
    }

    /// Validate `payload` against `step`'s validator.
    ///
    /// # Errors
    ///
    /// Returns the validator's issues.
    pub fn validate(&self, step: S, payload: &P) -> Result<(), ValidationErrors> {
        match self.resolver_for(step) {
            Some(validator) => validator(payload),
            None => Ok(()),
        }
    }
}

// ===== Wizard =====

/// Current position in a multi-step form.
#[derive(Debug)]
pub struct Wizard<S: Step, P> {
    resolver: StepResolver<S, P>,
    current: usize,
}

impl<S: Step, P> Wizard<S, P> {
    /// Start at the first step.
    pub fn new(resolver: StepResolver<S, P>) -> Self {
        Self {
            resolver,
            current: 0,
        }
    }

    /// The active step, `None` only when `S::all()` is empty.
    pub fn current(&self) -> Option<S> {
        S::all().get(self.current).copied()
    }

    /// Whether the active step is the last one.
    pub fn is_last(&self) -> bool {
        self.current + 1 >= S::all().len()
    }

    /// Validate the active step and move forward.
    ///
    /// On the last step a successful validation keeps the wizard in place.
    ///
    /// # Errors
    ///
    /// Returns the active step's issues and stays on it.
    pub fn next(&mut self, payload: &P) -> Result<Option<S>, ValidationErrors> {
        let Some(step) = self.current() else {
            return Ok(None);
        };
        self.resolver.validate(step, payload)?;

        if !self.is_last() {
            self.current += 1;
        }
        debug!(from = ?step, to = ?self.current(), "Wizard advanced");
        Ok(self.current())
    }

    /// Move back one step without validating.
    pub fn back(&mut self) -> Option<S> {
        self.current = self.current.saturating_sub(1);
        self.current()
    }

    /// Validate every step up to and including the active one.
    ///
    /// # Errors
    ///
    /// Returns the first failing step with its issues.
    pub fn validate_through_current(&self, payload: &P) -> Result<(), (S, ValidationErrors)> {
        for &step in S::all().iter().take(self.current + 1) {
            self.resolver.validate(step, payload).map_err(|e| (step, e))?;
        }
        Ok(())
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum InvestorStep {
        Details,
        Contacts,
        Review,
    }

    impl Step for InvestorStep {
        fn all() -> &'static [Self] {
            &[InvestorStep::Details, InvestorStep::Contacts, InvestorStep::Review]
        }

        fn title(&self) -> &'static str {
            match self {
                InvestorStep::Details => "Investor Details",
                InvestorStep::Contacts => "Contacts",
                InvestorStep::Review => "Review",
            }
        }
    }

    #[derive(Debug, Default)]
    struct Investor {
        name: String,
        contacts: Vec<String>,
    }

    fn resolver() -> StepResolver<InvestorStep, Investor> {
        StepResolver::new()
            .with(InvestorStep::Details, |p: &Investor| {
                IssueCollector::new().require("name", &p.name).finish()
            })
            .with(InvestorStep::Contacts, |p: &Investor| {
                IssueCollector::new()
                    .check(!p.contacts.is_empty(), "contacts", "at least one contact")
                    .finish()
            })
    }

    #[test]
    fn step_index_follows_declaration_order() {
        assert_eq!(InvestorStep::Details.index(), 0);
        assert_eq!(InvestorStep::Review.index(), 2);
        assert_eq!(InvestorStep::Contacts.title(), "Contacts");
    }

    #[test]
    fn resolver_for_returns_registered_validator() {
        let resolver = resolver();
        assert!(resolver.resolver_for(InvestorStep::Details).is_some());
        assert!(resolver.resolver_for(InvestorStep::Review).is_none());
    }

    #[test]
    fn step_without_validator_passes() {
        assert!(resolver()
            .validate(InvestorStep::Review, &Investor::default())
            .is_ok());
    }

    #[test]
    fn next_blocks_on_invalid_step() {
        let mut wizard = Wizard::new(resolver());
        let err = wizard.next(&Investor::default()).expect_err("name missing");

        assert_eq!(err.0, vec![FieldIssue::new("name", "is required")]);
        assert_eq!(wizard.current(), Some(InvestorStep::Details));
    }

    #[test]
    fn next_advances_through_valid_steps() {
        let mut wizard = Wizard::new(resolver());
        let payload = Investor {
            name: "Acme Holdings".to_string(),
            contacts: vec!["ops@acme.test".to_string()],
        };

        assert_eq!(wizard.next(&payload), Ok(Some(InvestorStep::Contacts)));
        assert_eq!(wizard.next(&payload), Ok(Some(InvestorStep::Review)));
        assert!(wizard.is_last());
        assert_eq!(wizard.next(&payload), Ok(Some(InvestorStep::Review)));
    }

    #[test]
    fn back_never_validates_and_stops_at_first() {
        let mut wizard = Wizard::new(resolver());
        let payload = Investor {
            name: "Acme".to_string(),
            contacts: Vec::new(),
        };
        wizard.next(&payload).expect("details valid");

        assert_eq!(wizard.back(), Some(InvestorStep::Details));
        assert_eq!(wizard.back(), Some(InvestorStep::Details));
    }

    #[test]
    fn validate_through_current_reports_failing_step() {
        let mut wizard = Wizard::new(resolver());
        let mut payload = Investor {
            name: "Acme".to_string(),
            contacts: vec!["a@b.test".to_string()],
        };
        wizard.next(&payload).expect("details valid");
        payload.name.clear();

        let (step, errors) = wizard
            .validate_through_current(&payload)
            .expect_err("name cleared");
        assert_eq!(step, InvestorStep::Details);
        assert_eq!(errors.for_field("name").count(), 1);
    }

    #[test]
    fn validation_errors_display_lists_issues() {
        let errors = ValidationErrors(vec![
            FieldIssue::new("name", "is required"),
            FieldIssue::new("contacts", "at least one contact"),
        ]);
        assert_eq!(
            errors.to_string(),
            "2 validation issue(s): name: is required; contacts: at least one contact"
        );
    }
}
