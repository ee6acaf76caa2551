//! Generic and soft-delete CRUD behavior against a live database

mod common;

use catalog_common::{Pagination, RepositoryError};
use catalog_metadata::DataEntity;
use catalog_ownership::{Owner, Role};
use catalog_repository::CrudRepository;
use common::{random_name, TestApp};

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_create_then_get_returns_same_entity() {
    let app = TestApp::new().await.unwrap();
    let owners = &app.catalog.ownership.owners;

    let created = owners.create(&Owner::new(random_name("owner"))).await.unwrap();
    let fetched = owners.get(created.id.unwrap()).await.unwrap();

    assert_eq!(fetched, Some(created));
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_soft_delete_hides_row_from_get_and_list() {
    let app = TestApp::new().await.unwrap();
    let owners = &app.catalog.ownership.owners;

    let name = random_name("owner");
    let created = owners.create(&Owner::new(name.clone())).await.unwrap();
    let id = created.id.unwrap();

    let deleted = owners.delete(id).await.unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert!(deleted.deleted_at.is_some());

    assert_eq!(owners.get(id).await.unwrap(), None);
    assert_eq!(owners.get_by_name(&name).await.unwrap(), None);

    let page = owners
        .list(Pagination::new(1, 10), Some(&name))
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.data.is_empty());

    // Second delete finds no live row
    assert_eq!(owners.delete(id).await.unwrap(), None);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_update_persists_and_bumps_updated_at() {
    let app = TestApp::new().await.unwrap();
    let roles = &app.catalog.ownership.roles;

    let mut role = roles.create(&Role::new(random_name("role"))).await.unwrap();
    let before = role.updated_at;

    role.name = random_name("renamed");
    let updated = roles.update(&role).await.unwrap();

    assert_eq!(updated.name, role.name);
    assert!(updated.updated_at >= before);
    assert_eq!(roles.get(role.id.unwrap()).await.unwrap(), Some(updated));
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_update_deleted_row_is_not_found() {
    let app = TestApp::new().await.unwrap();
    let roles = &app.catalog.ownership.roles;

    let role = roles.create(&Role::new(random_name("role"))).await.unwrap();
    roles.delete(role.id.unwrap()).await.unwrap();

    let err = roles.update(&role).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_list_filters_by_name_case_insensitively() {
    let app = TestApp::new().await.unwrap();
    let owners = &app.catalog.ownership.owners;

    let marker = random_name("Search");
    let matching = owners
        .bulk_create(&[
            Owner::new(format!("{}-a", marker)),
            Owner::new(format!("{}-b", marker)),
        ])
        .await
        .unwrap();
    owners.create(&Owner::new(random_name("other"))).await.unwrap();

    let first = owners
        .list(Pagination::new(1, 1), Some(&marker.to_lowercase()))
        .await
        .unwrap();
    assert_eq!(first.total, 2);
    assert!(first.has_next);
    assert_eq!(first.data, vec![matching[0].clone()]);

    let second = owners
        .list(Pagination::new(2, 1), Some(&marker.to_uppercase()))
        .await
        .unwrap();
    assert!(!second.has_next);
    assert_eq!(second.data, vec![matching[1].clone()]);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_list_by_ids_restricts_results() {
    let app = TestApp::new().await.unwrap();
    let entities = &app.catalog.metadata.data_entities;

    let created = entities
        .bulk_create(&[
            DataEntity::new(random_name("//a"), "a"),
            DataEntity::new(random_name("//b"), "b"),
            DataEntity::new(random_name("//c"), "c"),
        ])
        .await
        .unwrap();
    let ids = [created[0].id.unwrap(), created[2].id.unwrap()];

    let page = entities
        .list_by_ids(Pagination::new(1, 10), None, &ids)
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.data, vec![created[0].clone(), created[2].clone()]);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_bulk_update_is_all_or_nothing() {
    let app = TestApp::new().await.unwrap();
    let entities = &app.catalog.metadata.data_entities;

    let mut created = entities
        .bulk_create(&[
            DataEntity::new(random_name("//x"), "x"),
            DataEntity::new(random_name("//y"), "y"),
        ])
        .await
        .unwrap();

    created[0].internal_name = Some("curated".to_string());
    let mut missing = created[1].clone();
    missing.id = Some(i64::MAX);

    let err = entities
        .bulk_update(&[created[0].clone(), missing])
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    let untouched = entities.get(created[0].id.unwrap()).await.unwrap().unwrap();
    assert_eq!(untouched.internal_name, None);

    let updated = entities.bulk_update(&created).await.unwrap();
    assert_eq!(updated[0].internal_name.as_deref(), Some("curated"));
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_get_by_oddrn() {
    let app = TestApp::new().await.unwrap();
    let entity = app.create_data_entity().await.unwrap();

    let found = app
        .catalog
        .metadata
        .data_entities
        .get_by_oddrn(entity.oddrn.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(found, Some(entity));
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_duplicate_live_name_is_already_exists() {
    let app = TestApp::new().await.unwrap();
    let owners = &app.catalog.ownership.owners;

    let name = random_name("owner");
    owners.create(&Owner::new(name.clone())).await.unwrap();
    let err = owners.create(&Owner::new(name)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists));
}
