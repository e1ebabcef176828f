//! Test-case reconciliation
//!
//! Editing a problem replaces its test-case list. Incoming entries that
//! carry an id update the persisted row in place, entries without one are
//! created, and persisted rows no entry refers to are deleted. The problem
//! fields and all three action sets are applied in one transaction.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{TestCase, TestCaseFields, TestCaseSpec},
};

/// A full edit of a problem
#[derive(Debug, Clone)]
pub struct ProblemEdit {
    pub title: String,
    pub description: String,
    pub test_cases: Vec<TestCaseSpec>,
}

/// Disjoint create/update/delete sets for one problem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub creates: Vec<TestCaseFields>,
    pub updates: Vec<(i32, TestCaseFields)>,
    pub deletes: Vec<i32>,
}

/// Counts of applied actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ReconcilePlan {
    /// Diff `incoming` against the problem's `persisted` test cases.
    ///
    /// Fails with `InvalidInput` when an id is listed twice and with
    /// `NotFound` when an id does not belong to the problem.
    pub fn compute(persisted: &[TestCase], incoming: &[TestCaseSpec]) -> AppResult<Self> {
        let known: HashSet<i32> = persisted.iter().map(|tc| tc.id).collect();
        let mut wanted: HashMap<i32, &TestCaseFields> = HashMap::new();

        let mut plan = Self::default();

        for spec in incoming {
            match spec {
                TestCaseSpec::New(fields) => plan.creates.push(fields.clone()),
                TestCaseSpec::Existing { id, fields } => {
                    if wanted.insert(*id, fields).is_some() {
                        return Err(AppError::InvalidInput(format!(
                            "Test case {} is listed more than once",
                            id
                        )));
                    }
                    if !known.contains(id) {
                        return Err(AppError::NotFound(format!(
                            "Test case {} does not belong to this problem",
                            id
                        )));
                    }
                    plan.updates.push((*id, fields.clone()));
                }
            }
        }

        plan.deletes = persisted
            .iter()
            .filter(|tc| !wanted.contains_key(&tc.id))
            .map(|tc| tc.id)
            .collect();

        Ok(plan)
    }

    pub fn summary(&self) -> ReconcileSummary {
        ReconcileSummary {
            created: self.creates.len(),
            updated: self.updates.len(),
            deleted: self.deletes.len(),
        }
    }
}

/// Applies problem edits
pub struct Reconciler;

impl Reconciler {
    /// Update the problem's fields and reconcile its test cases.
    ///
    /// Nothing is written unless every step succeeds.
    pub async fn reconcile_problem(
        store: &dyn Store,
        problem_id: i32,
        edit: &ProblemEdit,
    ) -> AppResult<ReconcileSummary> {
        let mut tx = store.begin().await?;

        let touched = tx
            .update_problem(problem_id, &edit.title, &edit.description)
            .await?;
        if touched == 0 {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        let persisted = tx.list_test_cases(problem_id).await?;
        let plan = ReconcilePlan::compute(&persisted, &edit.test_cases)?;

        if !plan.deletes.is_empty() {
            tx.delete_test_cases(problem_id, &plan.deletes).await?;
        }

        for fields in &plan.creates {
            tx.insert_test_case(problem_id, fields).await?;
        }

        for (id, fields) in &plan.updates {
            if tx.update_test_case(problem_id, *id, fields).await? == 0 {
                return Err(AppError::NotFound(format!("Test case {} not found", id)));
            }
        }

        tx.commit().await?;

        let summary = plan.summary();
        tracing::info!(
            problem_id,
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            "Reconciled test cases"
        );

        Ok(summary)
    }
}
