//! Hopper discharge tracking
//!
//! A discharge records material being emptied from one hopper. It starts open
//! and may be completed once with an end time no earlier than its start.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::validation::{require_id, require_non_blank, require_not_before};
use core_kernel::{DischargeId, ValidationError};

use crate::error::WeighingError;

/// One discharge operation on a hopper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopperDischarge {
    id: DischargeId,
    hopper_id: String,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl HopperDischarge {
    /// Starts a discharge on a hopper
    ///
    /// # Errors
    ///
    /// Returns error if the id is nil or the hopper id is blank
    pub fn start(
        id: DischargeId,
        hopper_id: &str,
        started_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: require_id("discharge_id", id)?,
            hopper_id: require_non_blank("hopper_id", hopper_id)?,
            started_at,
            ended_at: None,
        })
    }

    pub fn id(&self) -> DischargeId {
        self.id
    }

    pub fn hopper_id(&self) -> &str {
        &self.hopper_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Returns true once an end time has been recorded
    pub fn is_completed(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Records the end of the discharge
    ///
    /// # Errors
    ///
    /// Returns `DischargeAlreadyCompleted` on a second call, and
    /// `InvalidValue` if `end_time` precedes the start.
    pub(crate) fn complete(&mut self, end_time: DateTime<Utc>) -> Result<(), WeighingError> {
        if self.is_completed() {
            return Err(WeighingError::DischargeAlreadyCompleted(self.id));
        }
        self.ended_at = Some(require_not_before("end_time", self.started_at, end_time)?);
        Ok(())
    }
}
