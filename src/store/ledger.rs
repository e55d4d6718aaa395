//! Pending commits awaiting confirmation.
//!
//! A calculation may be committed only if nothing it read has changed since
//! it ran. Each pending entry carries a fingerprint of the full
//! [`CalculationContext`]; a commit recomputes the fingerprint from freshly
//! resolved inputs and rejects the commit on mismatch. Entries older than the
//! ledger's time-to-live are dropped.
//!
//! Commits and work-log edits hold the ledger's write gate from the moment
//! they read inputs until their writes are done, so an edit either lands
//! before a commit resolves its inputs or after the commit has persisted.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationContext, MonthlyPayRecord, PayPeriod};

/// Minutes a calculation stays committable.
pub const PENDING_COMMIT_TTL_MINUTES: i64 = 60;

/// Hashes every input of a calculation run.
pub fn fingerprint(context: &CalculationContext) -> u64 {
    let mut hasher = DefaultHasher::new();
    context.hash(&mut hasher);
    hasher.finish()
}

/// A calculated month waiting to be committed.
#[derive(Debug, Clone)]
pub struct PendingCommit {
    /// Identifier handed to the caller.
    pub calculation_id: Uuid,
    /// Fingerprint of `context`.
    pub fingerprint: u64,
    /// The inputs the calculation ran on.
    pub context: CalculationContext,
    /// The rounded result to persist.
    pub record: MonthlyPayRecord,
    /// When the calculation was registered.
    pub created_at: DateTime<Utc>,
}

impl PendingCommit {
    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at > ttl
    }
}

/// Registry of pending commits.
#[derive(Debug)]
pub struct CommitLedger {
    pending: Mutex<HashMap<Uuid, PendingCommit>>,
    writes: Mutex<()>,
    ttl: Duration,
}

impl Default for CommitLedger {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(PENDING_COMMIT_TTL_MINUTES))
    }
}

impl CommitLedger {
    /// Creates an empty ledger with the default time-to-live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ledger whose entries expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            writes: Mutex::new(()),
            ttl,
        }
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, HashMap<Uuid, PendingCommit>>> {
        self.pending.lock().map_err(|_| EngineError::StoreUnavailable {
            message: "commit ledger lock poisoned".to_string(),
        })
    }

    /// Acquires the write gate shared by commits and work-log edits.
    ///
    /// Held across resolve, check and persist; never held across an await.
    pub fn write_gate(&self) -> EngineResult<MutexGuard<'_, ()>> {
        self.writes.lock().map_err(|_| EngineError::StoreUnavailable {
            message: "commit write gate poisoned".to_string(),
        })
    }

    /// Records a successful calculation and returns its id.
    pub fn register(
        &self,
        context: CalculationContext,
        record: MonthlyPayRecord,
    ) -> EngineResult<Uuid> {
        let calculation_id = Uuid::new_v4();
        let now = Utc::now();
        let pending = PendingCommit {
            calculation_id,
            fingerprint: fingerprint(&context),
            context,
            record,
            created_at: now,
        };
        let mut entries = self.lock()?;
        let ttl = self.ttl;
        entries.retain(|_, entry| !entry.is_expired(ttl, now));
        entries.insert(calculation_id, pending);
        Ok(calculation_id)
    }

    /// Removes and returns the pending commit if `current` still matches it.
    ///
    /// A stale entry is dropped as well, so it cannot be retried. An expired
    /// entry is treated as unknown.
    pub fn take_matching(
        &self,
        calculation_id: Uuid,
        current: &CalculationContext,
    ) -> EngineResult<PendingCommit> {
        let pending = self
            .lock()?
            .remove(&calculation_id)
            .filter(|entry| !entry.is_expired(self.ttl, Utc::now()))
            .ok_or_else(|| EngineError::CalculationNotFound {
                calculation_id: calculation_id.to_string(),
            })?;

        if pending.fingerprint != fingerprint(current) {
            debug!(calculation_id = %calculation_id, "Pending commit is stale");
            return Err(EngineError::StaleCalculation {
                calculation_id: calculation_id.to_string(),
            });
        }
        Ok(pending)
    }

    /// Drops every pending commit for an employee and period.
    ///
    /// Returns the number of entries dropped.
    pub fn invalidate(&self, employee_id: &str, period: PayPeriod) -> EngineResult<usize> {
        let mut pending = self.lock()?;
        let before = pending.len();
        pending.retain(|_, entry| {
            !(entry.context.employee.id == employee_id && entry.context.period == period)
        });
        Ok(before - pending.len())
    }

    /// Drops every entry past its time-to-live; returns how many were dropped.
    pub fn cleanup_expired(&self) -> EngineResult<usize> {
        let now = Utc::now();
        let mut pending = self.lock()?;
        let before = pending.len();
        pending.retain(|_, entry| !entry.is_expired(self.ttl, now));
        Ok(before - pending.len())
    }

    /// Number of pending commits.
    pub fn len(&self) -> EngineResult<usize> {
        Ok(self.lock()?.len())
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> EngineResult<bool> {
        Ok(self.lock()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contract, DailyRecord, Employee, WorkStatus};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn context(employee_id: &str, month: u32) -> CalculationContext {
        let employee = Employee {
            id: employee_id.to_string(),
            name: "Test Employee".to_string(),
            annual_salary: 36_000_000,
            hire_date: None,
            department: None,
            position: None,
        };
        let period = PayPeriod::new(2026, month).unwrap();
        let records = vec![DailyRecord::empty(period.first_day())];
        CalculationContext::new(employee, Contract::default(), period, records)
    }

    fn record(employee_id: &str) -> MonthlyPayRecord {
        MonthlyPayRecord {
            employee_id: employee_id.to_string(),
            year: 2026,
            month: 1,
            basic_salary: 0,
            fixed_overtime_allowance: 0,
            additional_overtime_premium: 0,
            bonus: 0,
            other_allowance: 0,
            meal_allowance: 0,
            vehicle_maintenance_fee: 0,
            research_expense: 0,
            childcare_allowance: 0,
            unpaid_days: 0,
            unauthorized_absence_days: 0,
        }
    }

    #[test]
    fn test_fingerprint_changes_with_any_input() {
        let base = context("emp_001", 1);
        let mut edited = base.clone();
        edited.records[0].status = WorkStatus::Absence;

        assert_eq!(fingerprint(&base), fingerprint(&base.clone()));
        assert_ne!(fingerprint(&base), fingerprint(&edited));
        assert_ne!(
            fingerprint(&base),
            fingerprint(&base.clone().with_salary_percentage(Decimal::from(90)))
        );
        assert_ne!(
            fingerprint(&base),
            fingerprint(&base.clone().with_ad_hoc_bonus(Some(10_000)))
        );
    }

    #[test]
    fn test_matching_commit_taken_once() {
        let ledger = CommitLedger::new();
        let id = ledger.register(context("emp_001", 1), record("emp_001")).unwrap();

        let taken = ledger.take_matching(id, &context("emp_001", 1)).unwrap();
        assert_eq!(taken.calculation_id, id);
        assert!(matches!(
            ledger.take_matching(id, &context("emp_001", 1)),
            Err(EngineError::CalculationNotFound { .. })
        ));
    }

    #[test]
    fn test_edited_inputs_make_commit_stale() {
        let ledger = CommitLedger::new();
        let id = ledger.register(context("emp_001", 1), record("emp_001")).unwrap();
        let mut edited = context("emp_001", 1);
        edited
            .records
            .push(DailyRecord::empty(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()));

        assert!(matches!(
            ledger.take_matching(id, &edited),
            Err(EngineError::StaleCalculation { .. })
        ));
        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn test_invalidate_only_matching_period() {
        let ledger = CommitLedger::new();
        ledger.register(context("emp_001", 1), record("emp_001")).unwrap();
        ledger.register(context("emp_001", 1), record("emp_001")).unwrap();
        ledger.register(context("emp_001", 2), record("emp_001")).unwrap();
        ledger.register(context("emp_002", 1), record("emp_002")).unwrap();

        let dropped = ledger
            .invalidate("emp_001", PayPeriod::new(2026, 1).unwrap())
            .unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(ledger.len().unwrap(), 2);
    }

    #[test]
    fn test_expired_entries_cannot_be_committed() {
        let ledger = CommitLedger::with_ttl(Duration::milliseconds(-1));
        let id = ledger.register(context("emp_001", 1), record("emp_001")).unwrap();

        assert!(matches!(
            ledger.take_matching(id, &context("emp_001", 1)),
            Err(EngineError::CalculationNotFound { .. })
        ));
    }

    #[test]
    fn test_cleanup_expired() {
        let expiring = CommitLedger::with_ttl(Duration::milliseconds(-1));
        expiring.register(context("emp_001", 1), record("emp_001")).unwrap();
        expiring.register(context("emp_002", 1), record("emp_002")).unwrap();
        // registering prunes the first entry before inserting the second
        assert_eq!(expiring.cleanup_expired().unwrap(), 1);
        assert!(expiring.is_empty().unwrap());

        let ledger = CommitLedger::new();
        ledger.register(context("emp_001", 1), record("emp_001")).unwrap();
        assert_eq!(ledger.cleanup_expired().unwrap(), 0);
        assert_eq!(ledger.len().unwrap(), 1);
    }

    #[test]
    fn test_poisoned_ledger_reports_store_unavailable() {
        let ledger = CommitLedger::new();
        let _ = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _entries = ledger.pending.lock().unwrap();
                    panic!("poison the ledger");
                })
                .join()
        });

        assert!(matches!(ledger.len(), Err(EngineError::StoreUnavailable { .. })));
        assert!(matches!(ledger.is_empty(), Err(EngineError::StoreUnavailable { .. })));
    }
}
