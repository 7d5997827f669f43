//! Mock submission sink for testing

use crate::error::{FormError, FormResult};
use crate::sink::{SubmissionRecord, SubmissionSink};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::time::{Duration, sleep};

/// Sink that keeps every record it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Mock delivery delay
    delivery_delay_ms: u64,

    /// Failure message, if deliveries should fail
    failure: Option<String>,

    /// Delivered records
    records: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl RecordingSink {
    /// Create a new mock sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Set delivery delay for testing
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delivery_delay_ms = delay_ms;
        self
    }

    /// Configure to fail deliveries
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Records delivered so far
    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records delivered so far
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been delivered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn deliver(&self, record: &SubmissionRecord) -> FormResult<()> {
        if self.delivery_delay_ms > 0 {
            sleep(Duration::from_millis(self.delivery_delay_ms)).await;
        }

        if let Some(message) = &self.failure {
            return Err(FormError::delivery(self.name(), message.clone()));
        }

        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
