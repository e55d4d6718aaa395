//! In-memory payroll store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{Contract, DailyRecord, Employee, MonthlyPayRecord, PayPeriod};

use super::PayrollStore;

type MonthKey = (String, PayPeriod);

#[derive(Debug, Default)]
struct Tables {
    employees: HashMap<String, Employee>,
    contracts: HashMap<String, Contract>,
    work_logs: HashMap<MonthKey, Vec<DailyRecord>>,
    monthly_pay: HashMap<MonthKey, MonthlyPayRecord>,
}

/// A [`PayrollStore`] held entirely in memory behind a read-write lock.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Contract, Employee, PayPeriod};
/// use payroll_engine::store::{InMemoryStore, PayrollStore};
///
/// let store = InMemoryStore::new();
/// store.insert_employee(
///     Employee {
///         id: "emp_001".to_string(),
///         name: "Kim".to_string(),
///         annual_salary: 36_000_000,
///         hire_date: None,
///         department: None,
///         position: None,
///     },
///     Some(Contract { basic_salary: 2_500_000, ..Contract::default() }),
/// ).unwrap();
///
/// assert_eq!(store.contract_baseline("emp_001").unwrap().basic_salary, 2_500_000);
/// assert!(store.work_log("emp_001", PayPeriod::new(2026, 1).unwrap()).unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee and, optionally, their contract baseline.
    pub fn insert_employee(&self, employee: Employee, contract: Option<Contract>) -> EngineResult<()> {
        let mut tables = self.write()?;
        if let Some(contract) = contract {
            tables.contracts.insert(employee.id.clone(), contract);
        }
        tables.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| EngineError::StoreUnavailable {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| EngineError::StoreUnavailable {
            message: "store lock poisoned".to_string(),
        })
    }
}

impl PayrollStore for InMemoryStore {
    fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.read()?
            .employees
            .get(employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn contract_baseline(&self, employee_id: &str) -> EngineResult<Contract> {
        self.read()?
            .contracts
            .get(employee_id)
            .cloned()
            .ok_or_else(|| EngineError::ContractNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn work_log(&self, employee_id: &str, period: PayPeriod) -> EngineResult<Vec<DailyRecord>> {
        Ok(self
            .read()?
            .work_logs
            .get(&(employee_id.to_string(), period))
            .cloned()
            .unwrap_or_default())
    }

    fn replace_work_log(
        &self,
        employee_id: &str,
        period: PayPeriod,
        records: Vec<DailyRecord>,
    ) -> EngineResult<()> {
        let mut tables = self.write()?;
        if !tables.employees.contains_key(employee_id) {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }
        tables
            .work_logs
            .insert((employee_id.to_string(), period), records);
        Ok(())
    }

    fn save_monthly_pay(&self, record: MonthlyPayRecord) -> EngineResult<()> {
        let period = PayPeriod::new(record.year, record.month)?;
        let mut tables = self.write()?;
        if !tables.employees.contains_key(&record.employee_id) {
            return Err(EngineError::EmployeeNotFound {
                employee_id: record.employee_id.clone(),
            });
        }
        tables
            .monthly_pay
            .insert((record.employee_id.clone(), period), record);
        Ok(())
    }

    fn monthly_pay(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Option<MonthlyPayRecord>> {
        Ok(self
            .read()?
            .monthly_pay
            .get(&(employee_id.to_string(), period))
            .cloned())
    }
}
