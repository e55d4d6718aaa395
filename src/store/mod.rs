//! Persistence collaborator and commit protocol.
//!
//! The engine never touches storage. Callers resolve a
//! [`crate::models::CalculationContext`] through a [`PayrollStore`], run the
//! calculation, and persist the outcome with [`commit`] only after the
//! [`CommitLedger`] confirms the inputs are unchanged.

mod ledger;
mod memory;

pub use ledger::{CommitLedger, PENDING_COMMIT_TTL_MINUTES, PendingCommit, fingerprint};
pub use memory::InMemoryStore;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{CalculationContext, Contract, DailyRecord, Employee, MonthlyPayRecord, PayPeriod};

/// Storage for employees, contract baselines, work logs and finalized pay.
pub trait PayrollStore: Send + Sync {
    /// Looks up an employee. Fails with `EmployeeNotFound`.
    fn employee(&self, employee_id: &str) -> EngineResult<Employee>;

    /// Looks up the contract baseline. Fails with `ContractNotFound`.
    fn contract_baseline(&self, employee_id: &str) -> EngineResult<Contract>;

    /// Returns the stored work log for a month, empty if none was saved.
    fn work_log(&self, employee_id: &str, period: PayPeriod) -> EngineResult<Vec<DailyRecord>>;

    /// Overwrites the whole month's work log.
    fn replace_work_log(
        &self,
        employee_id: &str,
        period: PayPeriod,
        records: Vec<DailyRecord>,
    ) -> EngineResult<()>;

    /// Saves finalized pay, replacing any earlier record for the same month.
    fn save_monthly_pay(&self, record: MonthlyPayRecord) -> EngineResult<()>;

    /// Returns finalized pay for a month, if committed.
    fn monthly_pay(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Option<MonthlyPayRecord>>;
}

/// Persists a pending calculation if its inputs are unchanged.
///
/// `resolve` reads the current inputs from `store` while the ledger's write
/// gate is held, so no work-log edit can land between the check and the
/// writes. On success the month's work log is overwritten with the in-period
/// records the calculation used and the monthly pay record is saved.
pub fn commit<F>(
    store: &dyn PayrollStore,
    ledger: &CommitLedger,
    calculation_id: Uuid,
    resolve: F,
) -> EngineResult<MonthlyPayRecord>
where
    F: FnOnce(&dyn PayrollStore) -> EngineResult<CalculationContext>,
{
    let _gate = ledger.write_gate()?;
    let current = resolve(store)?;
    let pending = ledger.take_matching(calculation_id, &current)?;
    let context = pending.context;

    let period = context.period;
    let records: Vec<DailyRecord> = context
        .records
        .into_iter()
        .filter(|record| period.contains_date(record.date))
        .collect();

    store.replace_work_log(&context.employee.id, period, records)?;
    store.save_monthly_pay(pending.record.clone())?;
    Ok(pending.record)
}

/// Overwrites a month's work log and drops the pending commits that read it.
///
/// Returns the number of pending commits invalidated.
pub fn edit_work_log(
    store: &dyn PayrollStore,
    ledger: &CommitLedger,
    employee_id: &str,
    period: PayPeriod,
    records: Vec<DailyRecord>,
) -> EngineResult<usize> {
    let _gate = ledger.write_gate()?;
    store.replace_work_log(employee_id, period, records)?;
    ledger.invalidate(employee_id, period)
}
