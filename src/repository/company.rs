//! Company repository

use crate::core::pipeline;
use crate::entities::Company;
use crate::repository::base::RepositoryBase;
use crate::repository::context::RepositoryContext;
use anyhow::Result;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Clone)]
pub struct CompanyRepository {
    context: RepositoryContext,
}

impl RepositoryBase<Company> for CompanyRepository {
    fn context(&self) -> &RepositoryContext {
        &self.context
    }
}

impl CompanyRepository {
    pub fn new(context: RepositoryContext) -> Self {
        Self { context }
    }

    /// All companies, ordered by name
    pub async fn get_all_companies(&self) -> Result<Vec<Company>> {
        pipeline::sort(self.find_all(), None).to_vec().await
    }

    /// Companies whose name contains `term`, ignoring case, ordered by name
    ///
    /// A blank term matches every company.
    pub async fn search_companies(&self, term: &str) -> Result<Vec<Company>> {
        let query = pipeline::search(self.find_all(), Some(term));
        pipeline::sort(query, None).to_vec().await
    }

    pub async fn get_company(&self, id: Uuid) -> Result<Option<Company>> {
        self.find_by_condition(move |c| c.id == id).first().await
    }

    /// Load a company tracked, ready to be modified and updated
    pub async fn get_company_for_update(&self, id: Uuid) -> Result<Option<Company>> {
        self.find_by_condition_tracked(move |c| c.id == id)
            .first()
            .await
    }

    /// Companies whose id is in `ids`
    ///
    /// Unknown ids are skipped; compare the lengths to detect them.
    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Company>> {
        let ids: HashSet<Uuid> = ids.iter().copied().collect();
        self.find_by_condition(move |c| ids.contains(&c.id))
            .to_vec()
            .await
    }

    pub fn create_company(&self, company: &Company) -> Result<()> {
        self.create(company)
    }

    pub fn delete_company(&self, company: &Company) -> Result<()> {
        self.delete(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::seed;
    use crate::storage::InMemoryStore;
    use std::sync::Arc;

    fn repository() -> CompanyRepository {
        let store = InMemoryStore::seeded().unwrap();
        CompanyRepository::new(RepositoryContext::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn test_get_all_companies_ordered_by_name() {
        let repo = repository();
        repo.create_company(&Company::new(
            "Acme".to_string(),
            "1 Main St".to_string(),
            "Australia".to_string(),
        ))
        .unwrap();
        repo.context().save().await.unwrap();

        let names: Vec<String> = repo
            .get_all_companies()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(
            names,
            vec!["Acme", "PBX Digital Ltd.", "Pro Home Services Ltd."]
        );
    }

    #[tokio::test]
    async fn test_get_company() {
        let repo = repository();

        let found = repo.get_company(seed::PBX_DIGITAL_ID).await.unwrap();
        assert_eq!(found.map(|c| c.name).as_deref(), Some("PBX Digital Ltd."));

        let missing = repo.get_company(Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_by_ids_skips_unknown() {
        let repo = repository();
        let ids = [seed::PBX_DIGITAL_ID, Uuid::new_v4()];

        let found = repo.get_by_ids(&ids).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_ne!(found.len(), ids.len());
    }

    #[tokio::test]
    async fn test_delete_company() {
        let repo = repository();
        let company = repo
            .get_company_for_update(seed::PRO_HOME_SERVICES_ID)
            .await
            .unwrap()
            .unwrap();

        repo.delete_company(&company).unwrap();
        repo.context().save().await.unwrap();

        let remaining = repo.get_all_companies().await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn test_search_companies() {
        let repo = repository();

        let names = |companies: Vec<Company>| -> Vec<String> {
            companies.into_iter().map(|c| c.name).collect()
        };

        let found = repo.search_companies("  pro HOME ").await.unwrap();
        assert_eq!(names(found), vec!["Pro Home Services Ltd."]);

        let found = repo.search_companies("ltd").await.unwrap();
        assert_eq!(
            names(found),
            vec!["PBX Digital Ltd.", "Pro Home Services Ltd."]
        );

        assert_eq!(repo.search_companies("  ").await.unwrap().len(), 2);
        assert!(repo.search_companies("acme").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_are_not_tracked() {
        let repo = repository();

        repo.get_all_companies().await.unwrap();
        repo.get_company(seed::PBX_DIGITAL_ID).await.unwrap();
        assert!(repo.context().tracker().is_empty());

        repo.get_company_for_update(seed::PBX_DIGITAL_ID)
            .await
            .unwrap();
        assert_eq!(repo.context().tracker().len(), 1);
    }
}
