//! Directory search as offered by the employee list view.

use crate::model::Employee;

/// Case-insensitive substring match over name, position, department and email.
/// A blank term matches every employee.
pub fn matches(employee: &Employee, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        &employee.name,
        &employee.position,
        &employee.department,
        &employee.email,
    ]
    .into_iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the employees matching `term`, preserving their order.
pub fn filter(employees: Vec<Employee>, term: &str) -> Vec<Employee> {
    employees
        .into_iter()
        .filter(|employee| matches(employee, term))
        .collect()
}
