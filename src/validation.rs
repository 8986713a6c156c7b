//! Parameter Validation - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Errors block generation; advisories are recorded and never block.
//!
//! This is the caller-side gate: everything past it runs on pre-validated
//! ranges and is allowed to degrade silently instead of failing.

use serde::{Deserialize, Serialize};

use crate::params::GenerateParams;

/// Canvas sizes above this pixel count get an advisory; generation is slow
/// but still bounded, so it is not an error.
const LARGE_CANVAS_PIXELS: u64 = 16_000_000;

pub const MAX_STRIPE_COUNT: u32 = 5;
pub const MAX_EDGE_SOFTNESS: u32 = 5;
pub const MIN_INTENSITY: f64 = 0.1;
pub const MAX_INTENSITY: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error)
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, params: &GenerateParams) -> Vec<ValidationViolation>;
}

fn error(
    rule: &dyn ValidationRule,
    message: &str,
    expected: String,
    actual: String,
    remediation: &str,
) -> ValidationViolation {
    ValidationViolation {
        rule: rule.name().to_string(),
        severity: ViolationSeverity::Error,
        message: message.to_string(),
        expected: Some(expected),
        actual: Some(actual),
        remediation: vec![remediation.to_string()],
    }
}

// --- Concrete Rules ---

pub struct CanvasDimensionsRule;

impl ValidationRule for CanvasDimensionsRule {
    fn name(&self) -> &'static str { "canvas_dimensions" }

    fn validate(&self, params: &GenerateParams) -> Vec<ValidationViolation> {
        let mut violations = vec![];
        if params.width == 0 || params.height == 0 {
            violations.push(error(
                self,
                "Canvas dimensions must be positive",
                "width >= 1 and height >= 1".to_string(),
                format!("{}x{}", params.width, params.height),
                "Request a non-empty canvas",
            ));
        } else if u64::from(params.width) * u64::from(params.height) > LARGE_CANVAS_PIXELS {
            violations.push(ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Info,
                message: "Very large canvas; generation may be slow".to_string(),
                expected: Some(format!("<= {LARGE_CANVAS_PIXELS} pixels")),
                actual: Some(format!("{}x{}", params.width, params.height)),
                remediation: vec!["Consider a smaller canvas".to_string()],
            });
        }
        violations
    }
}

pub struct StripeCountRule;

impl ValidationRule for StripeCountRule {
    fn name(&self) -> &'static str { "stripe_count" }

    fn validate(&self, params: &GenerateParams) -> Vec<ValidationViolation> {
        if params.stripe_count > MAX_STRIPE_COUNT {
            vec![error(
                self,
                "Too many stripes",
                format!("0-{MAX_STRIPE_COUNT}"),
                params.stripe_count.to_string(),
                "Request at most five stripes",
            )]
        } else {
            vec![]
        }
    }
}

pub struct IntensityRule;

impl ValidationRule for IntensityRule {
    fn name(&self) -> &'static str { "intensity" }

    fn validate(&self, params: &GenerateParams) -> Vec<ValidationViolation> {
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&params.intensity) {
            vec![error(
                self,
                "Intensity out of range",
                format!("{MIN_INTENSITY}-{MAX_INTENSITY}"),
                params.intensity.to_string(),
                "Use an intensity between 0.1 and 1.0",
            )]
        } else {
            vec![]
        }
    }
}

pub struct EdgeSoftnessRule;

impl ValidationRule for EdgeSoftnessRule {
    fn name(&self) -> &'static str { "edge_softness" }

    fn validate(&self, params: &GenerateParams) -> Vec<ValidationViolation> {
        if params.edge_softness > MAX_EDGE_SOFTNESS {
            vec![error(
                self,
                "Edge softness out of range",
                format!("0-{MAX_EDGE_SOFTNESS}"),
                params.edge_softness.to_string(),
                "Use an edge softness between 0 (hard) and 5",
            )]
        } else {
            vec![]
        }
    }
}

pub struct WidthRangeRule;

impl ValidationRule for WidthRangeRule {
    fn name(&self) -> &'static str { "stripe_width_range" }

    fn validate(&self, params: &GenerateParams) -> Vec<ValidationViolation> {
        let range = params.stripe_width_range;
        let mut violations = vec![];
        if range.min == 0 {
            violations.push(error(
                self,
                "Stripe widths must be positive",
                "min >= 1".to_string(),
                range.to_string(),
                "Use a minimum width of at least one pixel",
            ));
        }
        if range.min > range.max {
            violations.push(error(
                self,
                "Stripe width range is inverted",
                "min <= max".to_string(),
                range.to_string(),
                "Swap the bounds, e.g. 5-20",
            ));
        }
        violations
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(CanvasDimensionsRule),
                Box::new(StripeCountRule),
                Box::new(IntensityRule),
                Box::new(EdgeSoftnessRule),
                Box::new(WidthRangeRule),
            ],
        }
    }

    pub fn validate(&self, params: &GenerateParams) -> ValidationResult {
        let mut all_violations = vec![];
        for rule in &self.rules {
            all_violations.extend(rule.validate(params));
        }

        // Errors block; warnings and advisories are recorded only.
        let has_errors = all_violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        ValidationResult {
            valid: !has_errors,
            violations: all_violations,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
