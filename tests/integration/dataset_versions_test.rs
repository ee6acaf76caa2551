//! Dataset version repository against a live database

mod common;

use catalog_datasets::{DatasetField, DatasetVersion};
use catalog_metadata::DataEntity;
use catalog_repository::CrudRepository;
use common::{random_name, TestApp};

/// Data entity plus `count` consecutive versions of its dataset
async fn dataset_with_versions(app: &TestApp, count: i64) -> (DataEntity, Vec<DatasetVersion>) {
    let entity = app.create_data_entity().await.unwrap();
    let oddrn = entity.oddrn.clone().unwrap();

    let versions: Vec<DatasetVersion> = (1..=count)
        .map(|v| DatasetVersion::new(oddrn.clone(), format!("hash-{}", v), v))
        .collect();
    let created = app
        .catalog
        .datasets
        .dataset_versions
        .bulk_create(&versions)
        .await
        .unwrap();

    (entity, created)
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_versions_are_ordered() {
    let app = TestApp::new().await.unwrap();
    let (entity, created) = dataset_with_versions(&app, 3).await;

    let versions = app
        .catalog
        .datasets
        .dataset_versions
        .get_versions(entity.oddrn.as_deref().unwrap())
        .await
        .unwrap();

    assert_eq!(versions, created);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_latest_and_penultimate_versions() {
    let app = TestApp::new().await.unwrap();
    let repo = &app.catalog.datasets.dataset_versions;
    let (first_entity, first_versions) = dataset_with_versions(&app, 3).await;
    let (second_entity, second_versions) = dataset_with_versions(&app, 1).await;

    let mut latest = repo
        .get_latest_versions(&[first_entity.id.unwrap(), second_entity.id.unwrap()])
        .await
        .unwrap();
    latest.sort_by_key(|v| v.id);
    assert_eq!(
        latest,
        vec![first_versions[2].clone(), second_versions[0].clone()]
    );

    let penultimate = repo.get_penultimate_versions(&latest).await.unwrap();
    assert_eq!(penultimate, vec![first_versions[1].clone()]);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_structure_with_linked_fields() {
    let app = TestApp::new().await.unwrap();
    let repo = &app.catalog.datasets.dataset_versions;
    let (entity, versions) = dataset_with_versions(&app, 2).await;
    let oddrn = entity.oddrn.clone().unwrap();

    let fields = app
        .catalog
        .datasets
        .dataset_fields
        .bulk_create(&[
            DatasetField::new("id", format!("{}/id", oddrn)),
            DatasetField::new(random_name("col"), format!("{}/col", oddrn)),
        ])
        .await
        .unwrap();
    let field_ids: Vec<i64> = fields.iter().filter_map(|f| f.id).collect();

    let old_id = versions[0].id.unwrap();
    let new_id = versions[1].id.unwrap();
    assert_eq!(repo.link_fields(old_id, &field_ids[..1]).await.unwrap(), 1);
    assert_eq!(repo.link_fields(new_id, &field_ids).await.unwrap(), 2);
    // Existing links are skipped
    assert_eq!(repo.link_fields(new_id, &field_ids).await.unwrap(), 0);

    let latest = repo
        .get_latest_dataset_version(entity.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.dataset_version, versions[1]);
    assert_eq!(latest.fields, fields);

    let old = repo.get_dataset_version(old_id).await.unwrap().unwrap();
    assert_eq!(old.fields, vec![fields[0].clone()]);

    let by_version = repo
        .get_dataset_version_fields(&[old_id, new_id])
        .await
        .unwrap();
    assert_eq!(by_version[&old_id].len(), 1);
    assert_eq!(by_version[&new_id], fields);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_link_fields_beyond_single_statement_limit() {
    let app = TestApp::new().await.unwrap();
    let repo = &app.catalog.datasets.dataset_versions;
    let (entity, versions) = dataset_with_versions(&app, 1).await;
    let oddrn = entity.oddrn.clone().unwrap();

    // 40,000 links of two columns exceed the bind limit of one statement
    let fields: Vec<DatasetField> = (0..40_000)
        .map(|i| DatasetField::new(format!("col{}", i), format!("{}/col{}", oddrn, i)))
        .collect();
    let fields = app
        .catalog
        .datasets
        .dataset_fields
        .bulk_create(&fields)
        .await
        .unwrap();
    let field_ids: Vec<i64> = fields.iter().filter_map(|f| f.id).collect();

    let version_id = versions[0].id.unwrap();
    assert_eq!(repo.link_fields(version_id, &field_ids).await.unwrap(), 40_000);

    let structure = repo.get_dataset_version(version_id).await.unwrap().unwrap();
    assert_eq!(structure.fields.len(), 40_000);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_missing_version_is_none() {
    let app = TestApp::new().await.unwrap();
    let repo = &app.catalog.datasets.dataset_versions;

    assert!(repo.get_dataset_version(i64::MAX).await.unwrap().is_none());
    assert!(repo
        .get_latest_dataset_version(i64::MAX)
        .await
        .unwrap()
        .is_none());
}
