//! Repositories sharing one unit of work through the repository manager.

mod harness;

use harness::*;
use std::sync::Arc;

use entity_query::config::QueryConfig;
use entity_query::core::{DataError, EntityStore, QueryParams, StorageError, UnitOfWorkError};
use entity_query::entities::seed;
use entity_query::repository::{RepositoryBase, RepositoryManager};
use entity_query::storage::InMemoryStore;

#[tokio::test]
async fn test_listing_from_request_parameters() {
    init_tracing();
    let (store, acme) = staffed_store();
    let manager = RepositoryManager::new(Arc::new(store));

    let params: QueryParams = serde_json::from_str(
        r#"{"minAge": 30, "maxAge": 45, "orderBy": "age desc, name", "pageSize": 2}"#,
    )
    .unwrap();
    let spec = params.into_spec(&QueryConfig::default()).unwrap();

    let page = manager
        .employee()
        .get_employees(acme.id, &spec)
        .await
        .unwrap();

    assert_eq!(names(&page.items), vec!["Aroha", "Mere"]);
    assert_eq!(page.total_count(), 3);
    assert_eq!(page.meta.total_pages, 2);
    assert!(page.meta.has_next);
}

#[tokio::test]
async fn test_invalid_request_is_a_client_error() {
    let params = QueryParams {
        min_age: 60,
        max_age: 18,
        ..Default::default()
    };

    let err: anyhow::Error = params
        .into_spec(&QueryConfig::default())
        .unwrap_err()
        .into();

    let classified = DataError::classify(&err).expect("typed error");
    assert!(classified.is_client_error());
}

#[tokio::test]
async fn test_changes_across_repositories_commit_together() {
    let store = InMemoryStore::new();
    let manager = RepositoryManager::new(Arc::new(store.clone()));

    let acme = company("Acme");
    manager.company().create_company(&acme).unwrap();
    let mut hire = employee(uuid::Uuid::nil(), "Tama", 33, "Developer");
    manager
        .employee()
        .create_employee_for_company(acme.id, &mut hire)
        .unwrap();

    // Nothing is visible to another unit of work before save
    let observer = RepositoryManager::new(Arc::new(store.clone()));
    assert!(
        observer
            .company()
            .get_all_companies()
            .await
            .unwrap()
            .is_empty()
    );

    assert_eq!(manager.save().await.unwrap(), 2);

    let observer = RepositoryManager::new(Arc::new(store));
    let companies = observer
        .company()
        .get_all_companies()
        .await
        .unwrap();
    let hired = observer
        .employee()
        .get_employee(acme.id, hire.id)
        .await
        .unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(hired.map(|e| e.name).as_deref(), Some("Tama"));
}

#[tokio::test]
async fn test_rejected_batch_leaves_store_untouched() {
    let store = InMemoryStore::seeded().unwrap();
    let manager = RepositoryManager::new(Arc::new(store.clone()));

    let newcomer = company("Newcomer");
    manager.company().create_company(&newcomer).unwrap();

    // Updating a row that does not exist makes the whole batch fail
    let ghost = employee(newcomer.id, "Ghost", 40, "Nobody");
    manager.employee().update(&ghost).unwrap();

    let err = manager.save().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StorageError>(),
        Some(StorageError::MissingRow { .. })
    ));

    assert_eq!(store.row_count("companies").unwrap(), 2);
    assert!(!manager.context().is_committed());
}

#[tokio::test]
async fn test_save_twice_is_rejected() {
    let store: Arc<dyn EntityStore> = Arc::new(InMemoryStore::seeded().unwrap());
    let manager = RepositoryManager::new(store);

    manager.company().create_company(&company("Once")).unwrap();
    manager.save().await.unwrap();

    let err = manager.save().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<UnitOfWorkError>(),
        Some(UnitOfWorkError::AlreadyCommitted)
    ));
}

#[tokio::test]
async fn test_tracked_update_flow() {
    let store = InMemoryStore::seeded().unwrap();
    let manager = RepositoryManager::new(Arc::new(store.clone()));

    let mut company = manager
        .company()
        .get_company_for_update(seed::PBX_DIGITAL_ID)
        .await
        .unwrap()
        .expect("seeded company");

    company.address = "Manukau, Auckland, NZ".to_string();
    manager.company().update(&company).unwrap();
    assert_eq!(manager.save().await.unwrap(), 1);

    let reader = RepositoryManager::new(Arc::new(store));
    let reloaded = reader
        .company()
        .get_company(seed::PBX_DIGITAL_ID)
        .await
        .unwrap()
        .expect("seeded company");
    assert_eq!(reloaded.address, "Manukau, Auckland, NZ");
}

#[tokio::test]
async fn test_reverted_update_saves_final_state() {
    let store = InMemoryStore::seeded().unwrap();
    let manager = RepositoryManager::new(Arc::new(store.clone()));

    let mut company = manager
        .company()
        .get_company_for_update(seed::PBX_DIGITAL_ID)
        .await
        .unwrap()
        .expect("seeded company");
    let original_name = company.name.clone();

    company.name = "Temp".to_string();
    manager.company().update(&company).unwrap();

    company.name = original_name.clone();
    manager.company().update(&company).unwrap();
    assert_eq!(manager.context().pending_changes(), 0);

    manager.save().await.unwrap();

    let reader = RepositoryManager::new(Arc::new(store));
    let stored = reader
        .company()
        .get_company(seed::PBX_DIGITAL_ID)
        .await
        .unwrap()
        .expect("seeded company");
    assert_eq!(stored.name, original_name);
    assert_eq!(stored, company);
}

#[tokio::test]
async fn test_store_failure_reaches_caller() {
    let store = UnreachableStore::shared();
    let manager = RepositoryManager::new(store.clone());

    let err = manager
        .company()
        .get_all_companies()
        .await
        .unwrap_err();
    let classified = DataError::classify(&err).expect("typed error");
    assert_eq!(classified.error_code(), "STORAGE_UNAVAILABLE");
    assert!(!classified.is_client_error());

    manager.company().create_company(&company("Lost")).unwrap();
    assert!(manager.save().await.is_err());
    assert_eq!(manager.context().pending_changes(), 1);
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_concurrent_listings_share_a_store() {
    let (store, acme) = staffed_store();
    let store: Arc<dyn EntityStore> = Arc::new(store);

    let handles: Vec<_> = (1..=6)
        .map(|page_number| {
            let manager = RepositoryManager::new(store.clone());
            let company_id = acme.id;
            tokio::spawn(async move {
                let spec = entity_query::core::QuerySpec::builder()
                    .sort("name")
                    .page_size(1)
                    .page_number(page_number)
                    .build()
                    .unwrap();
                manager
                    .employee()
                    .get_employees(company_id, &spec)
                    .await
                    .unwrap()
            })
        })
        .collect();

    let pages = futures::future::join_all(handles).await;
    let listed: Vec<String> = pages
        .into_iter()
        .map(|page| page.unwrap().items.remove(0).name)
        .collect();

    assert_eq!(listed, vec!["Aroha", "bob", "Jane", "John", "Johnny", "Mere"]);
}
