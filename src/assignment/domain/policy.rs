//! Employee selection rules.

use super::AssignmentPolicyError;
use crate::employee::domain::EmployeeId;
use serde::{Deserialize, Serialize};

/// An employee eligible for assignment, with its current load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    employee_id: EmployeeId,
    load: u64,
}

impl Candidate {
    /// Creates a candidate.
    #[must_use]
    pub const fn new(employee_id: EmployeeId, load: u64) -> Self {
        Self { employee_id, load }
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn employee_id(self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the number of tasks the employee carries.
    #[must_use]
    pub const fn load(self) -> u64 {
        self.load
    }

    /// Returns `true` when the employee carries no task.
    #[must_use]
    pub const fn is_free(self) -> bool {
        self.load == 0
    }

    const fn rank(self) -> (u64, EmployeeId) {
        (self.load, self.employee_id)
    }
}

/// Which rule produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// The employee had no tasks.
    FreeEmployee,
    /// The employee works on the parent task and is within the margin.
    ParentAffinity,
    /// The employee had the smallest load.
    LeastLoaded,
}

/// Outcome of the policy: who gets the task and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    employee_id: EmployeeId,
    load: u64,
    reason: SelectionReason,
}

impl Selection {
    const fn from_candidate(candidate: Candidate, reason: SelectionReason) -> Self {
        Self {
            employee_id: candidate.employee_id,
            load: candidate.load,
            reason,
        }
    }

    /// Returns the selected employee.
    #[must_use]
    pub const fn employee_id(self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the selected employee's load before this assignment.
    #[must_use]
    pub const fn load(self) -> u64 {
        self.load
    }

    /// Returns the rule that picked the employee.
    #[must_use]
    pub const fn reason(self) -> SelectionReason {
        self.reason
    }
}

/// Load-balancing policy with a parent-affinity override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentPolicy {
    affinity_margin: u64,
}

impl AssignmentPolicy {
    /// Margin used when none is configured.
    pub const DEFAULT_AFFINITY_MARGIN: u64 = 3;

    /// Creates a policy with the given affinity margin.
    ///
    /// The parent task's assignee is preferred while its load is strictly
    /// below the smallest load plus the margin. A margin of zero disables
    /// the override.
    #[must_use]
    pub const fn new(affinity_margin: u64) -> Self {
        Self { affinity_margin }
    }

    /// Returns the affinity margin.
    #[must_use]
    pub const fn affinity_margin(self) -> u64 {
        self.affinity_margin
    }

    /// Picks an employee for a task.
    ///
    /// Candidates are ranked by load, then identifier. The first free
    /// candidate wins; otherwise `parent_assignee` wins when it is within the
    /// affinity margin of the least-loaded candidate; otherwise the
    /// least-loaded candidate wins. A `parent_assignee` missing from
    /// `candidates` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentPolicyError::NoEmployees`] when `candidates` is
    /// empty.
    pub fn select(
        self,
        candidates: &[Candidate],
        parent_assignee: Option<EmployeeId>,
    ) -> Result<Selection, AssignmentPolicyError> {
        let mut ranked = candidates.to_vec();
        ranked.sort_by_key(|candidate| candidate.rank());

        let Some(least_loaded) = ranked.first().copied() else {
            return Err(AssignmentPolicyError::NoEmployees);
        };

        if let Some(free) = ranked.iter().copied().find(|candidate| candidate.is_free()) {
            return Ok(Selection::from_candidate(free, SelectionReason::FreeEmployee));
        }

        let parent = parent_assignee.and_then(|id| {
            ranked
                .iter()
                .copied()
                .find(|candidate| candidate.employee_id == id)
        });
        if let Some(affine) = parent {
            let threshold = least_loaded.load.saturating_add(self.affinity_margin);
            if affine.load < threshold {
                return Ok(Selection::from_candidate(
                    affine,
                    SelectionReason::ParentAffinity,
                ));
            }
        }

        Ok(Selection::from_candidate(
            least_loaded,
            SelectionReason::LeastLoaded,
        ))
    }
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AFFINITY_MARGIN)
    }
}
