//! Consultant Report use case
//!
//! Per-consultant assigned/answered counters for the owner's `/stats`.

use crate::error::RoutingError;
use consult_domain::{Consultant, ConsultantRepository};
use std::sync::Arc;

pub struct ConsultantReportUseCase {
    consultants: Arc<dyn ConsultantRepository>,
}

impl ConsultantReportUseCase {
    pub fn new(consultants: Arc<dyn ConsultantRepository>) -> Self {
        Self { consultants }
    }

    /// Every consultant ever stored, including ones no longer on the roster.
    pub async fn execute(&self) -> Result<Vec<Consultant>, RoutingError> {
        Ok(self.consultants.list().await?)
    }
}
