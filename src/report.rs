// src/report.rs - Check verdicts and the end-of-run summary

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Verdict produced by a single validator, before it is stamped and recorded.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub success: bool,
    pub message: String,
    pub payload: Option<Value>,
}

impl CheckOutcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: None,
        }
    }

    pub fn pass_with(message: impl Into<String>, payload: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    pub fn fail_with(message: impl Into<String>, payload: Value) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: Some(payload),
        }
    }
}

/// One recorded check: the outcome plus the check's name and a timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub test: String,
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
}

impl TestResult {
    pub fn record(test: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            test: test.into(),
            success: outcome.success,
            message: outcome.message,
            timestamp: Local::now(),
            response_data: outcome.payload,
        }
    }
}

/// Aggregated run statistics plus the per-check details.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub success_rate: f64,
    pub details: Vec<TestResult>,
}

impl RunSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let total_tests = results.len();
        let passed = results.iter().filter(|r| r.success).count();
        let failed = total_tests - passed;
        let success_rate = if total_tests > 0 {
            passed as f64 / total_tests as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_tests,
            passed,
            failed,
            success_rate,
            details: results.to_vec(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.total_tests > 0
    }

    /// Pretty-printed JSON for piping into other tooling.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
