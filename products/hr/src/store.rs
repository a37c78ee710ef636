use chrono::{Local, NaiveDate};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    error::{HrError, HrResult},
    model::{Employee, EmployeeId, EmployeePatch, NewEmployee},
};

/// In-memory employee collection.
///
/// The records and the id counter sit behind one lock, so id assignment and
/// every mutation are atomic with respect to each other. Ids start at 1 and
/// are never reused, even after a delete.
#[derive(Debug)]
pub struct EmployeeStore {
    inner: RwLock<Directory>,
}

#[derive(Debug)]
struct Directory {
    employees: Vec<Employee>,
    next_id: EmployeeId,
}

impl Directory {
    fn position(&self, id: EmployeeId) -> HrResult<usize> {
        self.employees
            .iter()
            .position(|employee| employee.id == id)
            .ok_or(HrError::NotFound(id))
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeStore {
    /// An empty store; the first employee created gets id 1.
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// A store holding the three demo employees (ids 1 to 3).
    pub fn seeded() -> Self {
        Self::from_records(demo_employees())
    }

    /// Build a store from existing records, continuing ids after the highest one.
    pub fn from_records(employees: Vec<Employee>) -> Self {
        let next_id = employees.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Directory { employees, next_id }),
        }
    }

    pub async fn list(&self) -> Vec<Employee> {
        self.inner.read().await.employees.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.employees.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.employees.is_empty()
    }

    pub async fn get(&self, id: EmployeeId) -> HrResult<Employee> {
        let directory = self.inner.read().await;
        let index = directory.position(id)?;
        Ok(directory.employees[index].clone())
    }

    pub async fn create(&self, payload: NewEmployee) -> HrResult<Employee> {
        self.create_on(payload, today()).await
    }

    /// Create with an explicit fallback hire date.
    pub async fn create_on(&self, payload: NewEmployee, today: NaiveDate) -> HrResult<Employee> {
        let mut directory = self.inner.write().await;
        let employee = payload.into_employee(directory.next_id, today)?;
        directory.next_id += 1;
        directory.employees.push(employee.clone());
        debug!(employee_id = employee.id, "employee appended");
        Ok(employee)
    }

    pub async fn update(&self, id: EmployeeId, patch: EmployeePatch) -> HrResult<Employee> {
        let mut directory = self.inner.write().await;
        let index = directory.position(id)?;
        let employee = &mut directory.employees[index];
        patch.apply_to(employee)?;
        debug!(employee_id = id, "employee merged");
        Ok(employee.clone())
    }

    pub async fn delete(&self, id: EmployeeId) -> HrResult<Employee> {
        let mut directory = self.inner.write().await;
        let index = directory.position(id)?;
        let removed = directory.employees.remove(index);
        debug!(employee_id = id, "employee removed");
        Ok(removed)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn demo_employees() -> Vec<Employee> {
    let employee = |id, [name, email, position, department, phone]: [&str; 5], hired| Employee {
        id,
        name: name.into(),
        email: email.into(),
        position: position.into(),
        department: department.into(),
        phone: phone.into(),
        hire_date: hired,
    };
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        employee(
            1,
            [
                "John Doe",
                "john.doe@company.com",
                "Software Engineer",
                "Engineering",
                "(555) 123-4567",
            ],
            date(2023, 1, 15),
        ),
        employee(
            2,
            [
                "Jane Smith",
                "jane.smith@company.com",
                "Product Manager",
                "Product",
                "(555) 987-6543",
            ],
            date(2022, 11, 8),
        ),
        employee(
            3,
            [
                "Mike Johnson",
                "mike.johnson@company.com",
                "Designer",
                "Design",
                "(555) 456-7890",
            ],
            date(2023, 3, 22),
        ),
    ]
}
