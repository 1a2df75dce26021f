//! Repository manager: one unit of work per request

use crate::core::EntityStore;
use crate::repository::company::CompanyRepository;
use crate::repository::context::RepositoryContext;
use crate::repository::employee::EmployeeRepository;
use anyhow::Result;
use std::sync::Arc;

/// Entry point for a request's data access
///
/// All repositories handed out by one manager share a single unit of work,
/// so their staged changes are committed together by [`save`](Self::save).
///
/// # Example
/// ```rust,ignore
/// let manager = RepositoryManager::new(store.clone());
///
/// manager.company().create_company(&company)?;
/// manager.employee().create_employee_for_company(company.id, &mut employee)?;
/// manager.save().await?;
/// ```
#[derive(Clone)]
pub struct RepositoryManager {
    context: RepositoryContext,
    company: CompanyRepository,
    employee: EmployeeRepository,
}

impl RepositoryManager {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let context = RepositoryContext::new(store);
        Self {
            company: CompanyRepository::new(context.clone()),
            employee: EmployeeRepository::new(context.clone()),
            context,
        }
    }

    pub fn company(&self) -> &CompanyRepository {
        &self.company
    }

    pub fn employee(&self) -> &EmployeeRepository {
        &self.employee
    }

    pub fn context(&self) -> &RepositoryContext {
        &self.context
    }

    /// Commit the staged changes of every repository
    pub async fn save(&self) -> Result<usize> {
        self.context.save().await
    }
}
