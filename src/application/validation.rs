//! Request validation
//!
//! Each request type is bound to one [`Validator`]. Validators look only at
//! the request: they never touch persistence and never mutate anything.
//! Failures come back as data, addressed by field, so they can be reported
//! to the caller as-is.

use serde::Serialize;

/// One broken rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of running a validator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Broken rules in the order they were declared
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationFailure {
                errors: self.errors,
            })
        }
    }
}

/// A request that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// A failure for a single field, for rules enforced outside a rule set
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed")?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

/// Checks a request of type `R`
pub trait Validator<R>: Send + Sync {
    fn validate(&self, request: &R) -> ValidationResult;
}

type Check<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

struct Rule<R> {
    field: &'static str,
    message: &'static str,
    check: Check<R>,
}

/// Declarative list of rules for one request type
///
/// Every rule is evaluated on every call; a failing rule does not stop the
/// ones after it.
pub struct RuleSet<R> {
    rules: Vec<Rule<R>>,
}

impl<R> RuleSet<R> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule: `check` must hold, otherwise `message` is reported for `field`
    pub fn rule(
        mut self,
        field: &'static str,
        message: &'static str,
        check: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Rule {
            field,
            message,
            check: Box::new(check),
        });
        self
    }
}

impl<R> Default for RuleSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Validator<R> for RuleSet<R> {
    fn validate(&self, request: &R) -> ValidationResult {
        let errors = self
            .rules
            .iter()
            .filter(|rule| !(rule.check)(request))
            .map(|rule| FieldError {
                field: rule.field,
                message: rule.message.to_string(),
            })
            .collect();
        ValidationResult { errors }
    }
}
