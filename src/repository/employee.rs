//! Employee repository

use crate::core::{PagedResult, QuerySpec, pipeline};
use crate::entities::Employee;
use crate::repository::base::RepositoryBase;
use crate::repository::context::RepositoryContext;
use anyhow::Result;
use uuid::Uuid;

#[derive(Clone)]
pub struct EmployeeRepository {
    context: RepositoryContext,
}

impl RepositoryBase<Employee> for EmployeeRepository {
    fn context(&self) -> &RepositoryContext {
        &self.context
    }
}

impl EmployeeRepository {
    pub fn new(context: RepositoryContext) -> Self {
        Self { context }
    }

    /// One page of a company's employees, filtered, searched and sorted
    pub async fn get_employees(
        &self,
        company_id: Uuid,
        spec: &QuerySpec,
    ) -> Result<PagedResult<Employee>> {
        let base = self.find_by_condition(move |e| e.company_id == company_id);
        pipeline::execute(base, spec).await
    }

    pub async fn get_employee(&self, company_id: Uuid, id: Uuid) -> Result<Option<Employee>> {
        self.find_by_condition(move |e| e.company_id == company_id && e.id == id)
            .first()
            .await
    }

    /// Load an employee tracked, ready to be modified and updated
    pub async fn get_employee_for_update(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Employee>> {
        self.find_by_condition_tracked(move |e| e.company_id == company_id && e.id == id)
            .first()
            .await
    }

    /// Attach the employee to a company and stage the insert
    pub fn create_employee_for_company(
        &self,
        company_id: Uuid,
        employee: &mut Employee,
    ) -> Result<()> {
        employee.company_id = company_id;
        self.create(employee)
    }

    pub fn delete_employee(&self, employee: &Employee) -> Result<()> {
        self.delete(employee)
    }
}
