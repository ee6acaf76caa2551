//! Metadata field value repository against a live database
//!
//! Run with `cargo test -p catalog-integration-tests -- --ignored`.

mod common;

use catalog_common::RepositoryError;
use catalog_metadata::{
    MetadataField, MetadataFieldValue, MetadataKey, MetadataOrigin, MetadataType,
};
use catalog_repository::CrudRepository;
use common::{assert_same_elements, metadata_field_value, random_name, TestApp};

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_bulk_create_returns_inserted_values() {
    let app = TestApp::new().await.unwrap();
    let values_repo = &app.catalog.metadata.metadata_field_values;

    let entity = app.create_data_entity().await.unwrap();
    let first_field = app.create_metadata_field().await.unwrap();
    let second_field = app.create_metadata_field().await.unwrap();

    let values = vec![
        metadata_field_value(&first_field, &entity),
        metadata_field_value(&second_field, &entity),
    ];
    let created = values_repo.bulk_create(&values).await.unwrap();

    assert_eq!(created.len(), 2);
    assert_same_elements(&created, &values);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_bulk_create_empty_input() {
    let app = TestApp::new().await.unwrap();
    let created = app
        .catalog
        .metadata
        .metadata_field_values
        .bulk_create(&[])
        .await
        .unwrap();
    assert!(created.is_empty());
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_bulk_create_beyond_single_statement_limit() {
    let app = TestApp::new().await.unwrap();
    let entity = app.create_data_entity().await.unwrap();

    // 20,000 rows of four columns exceed the bind limit of one statement
    let prefix = random_name("bulk");
    let fields: Vec<MetadataField> = (0..20_000)
        .map(|i| {
            MetadataField::new(
                format!("{}-{}", prefix, i),
                MetadataType::String,
                MetadataOrigin::External,
            )
        })
        .collect();
    let fields = app
        .catalog
        .metadata
        .metadata_fields
        .bulk_create(&fields)
        .await
        .unwrap();

    let values: Vec<MetadataFieldValue> = fields
        .iter()
        .map(|field| metadata_field_value(field, &entity))
        .collect();
    let created = app
        .catalog
        .metadata
        .metadata_field_values
        .bulk_create(&values)
        .await
        .unwrap();

    assert_eq!(created, values);

    let stored = app
        .catalog
        .metadata
        .metadata_field_values
        .list_by_data_entity_ids(&[entity.id.unwrap()])
        .await
        .unwrap();
    assert_eq!(stored.len(), 20_000);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_update_persists_new_value() {
    let app = TestApp::new().await.unwrap();
    let values_repo = &app.catalog.metadata.metadata_field_values;

    let entity = app.create_data_entity().await.unwrap();
    let field = app.create_metadata_field().await.unwrap();
    let value = metadata_field_value(&field, &entity);

    let mut created = values_repo.create(&value).await.unwrap();
    assert_eq!(created, value);

    created.value = Some("updated".to_string());
    let updated = values_repo.update(&created).await.unwrap();
    assert_eq!(updated, created);

    let stored = values_repo
        .list_by_data_entity_ids(&[entity.id.unwrap()])
        .await
        .unwrap();
    assert_eq!(stored, vec![created]);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_update_missing_key_is_not_found() {
    let app = TestApp::new().await.unwrap();
    let entity = app.create_data_entity().await.unwrap();
    let field = app.create_metadata_field().await.unwrap();

    let err = app
        .catalog
        .metadata
        .metadata_field_values
        .update(&metadata_field_value(&field, &entity))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_get_dtos_by_data_entity_id() {
    let app = TestApp::new().await.unwrap();
    let values_repo = &app.catalog.metadata.metadata_field_values;

    let first_entity = app.create_data_entity().await.unwrap();
    let second_entity = app.create_data_entity().await.unwrap();
    let field = app.create_metadata_field().await.unwrap();

    let first_value = metadata_field_value(&field, &first_entity);
    let second_value = metadata_field_value(&field, &second_entity);
    values_repo
        .bulk_create(&[first_value.clone(), second_value])
        .await
        .unwrap();

    let dtos = values_repo
        .get_dtos_by_data_entity_id(first_entity.id.unwrap())
        .await
        .unwrap();

    assert_eq!(dtos.len(), 1);
    let dto = &dtos[0];
    assert!(dto.metadata_field.id.is_some());
    assert_eq!(dto.metadata_field.name, field.name);
    assert_eq!(dto.metadata_field.field_type, field.field_type);
    assert_eq!(dto.metadata_field.origin, field.origin);
    assert_eq!(dto.metadata_field_value.data_entity_id, first_value.data_entity_id);
    assert_eq!(dto.metadata_field_value.value, first_value.value);
    assert_eq!(
        dto.metadata_field_value.metadata_field_id,
        first_value.metadata_field_id
    );
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_get_dtos_skips_deleted_fields() {
    let app = TestApp::new().await.unwrap();
    let values_repo = &app.catalog.metadata.metadata_field_values;

    let entity = app.create_data_entity().await.unwrap();
    let field = app.create_metadata_field().await.unwrap();
    values_repo
        .create(&metadata_field_value(&field, &entity))
        .await
        .unwrap();

    app.catalog
        .metadata
        .metadata_fields
        .delete(field.id.unwrap())
        .await
        .unwrap();

    let dtos = values_repo
        .get_dtos_by_data_entity_id(entity.id.unwrap())
        .await
        .unwrap();
    assert!(dtos.is_empty());
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_list_by_data_entity_ids() {
    let app = TestApp::new().await.unwrap();
    let values_repo = &app.catalog.metadata.metadata_field_values;

    let first_entity = app.create_data_entity().await.unwrap();
    let second_entity = app.create_data_entity().await.unwrap();
    let first_field = app.create_metadata_field().await.unwrap();
    let second_field = app.create_metadata_field().await.unwrap();

    let first_value = metadata_field_value(&first_field, &first_entity);
    let second_value = metadata_field_value(&second_field, &first_entity);
    let third_value = metadata_field_value(&first_field, &second_entity);
    values_repo
        .bulk_create(&[first_value.clone(), second_value.clone(), third_value])
        .await
        .unwrap();

    let listed = values_repo
        .list_by_data_entity_ids(&[first_entity.id.unwrap()])
        .await
        .unwrap();

    assert_same_elements(&listed, &[first_value, second_value]);
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_delete_removes_value() {
    let app = TestApp::new().await.unwrap();
    let values_repo = &app.catalog.metadata.metadata_field_values;

    let entity = app.create_data_entity().await.unwrap();
    let field = app.create_metadata_field().await.unwrap();
    values_repo
        .create(&metadata_field_value(&field, &entity))
        .await
        .unwrap();

    let deleted = values_repo
        .delete(entity.id.unwrap(), field.id.unwrap())
        .await
        .unwrap();
    assert!(deleted.is_some());

    let remaining = values_repo
        .list_by_data_entity_ids(&[entity.id.unwrap()])
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[test_log::test(tokio::test)]
#[ignore] // Requires database setup
async fn test_list_fields_by_keys() {
    let app = TestApp::new().await.unwrap();
    let field = app.create_metadata_field().await.unwrap();
    let name = field.name.clone().unwrap();

    let found = app
        .catalog
        .metadata
        .metadata_fields
        .list_by_keys(&[
            MetadataKey::new(name.clone(), MetadataType::String),
            MetadataKey::new(name, MetadataType::Integer),
        ])
        .await
        .unwrap();

    assert_eq!(found, vec![field]);
}

#[test]
fn test_value_fixture_is_active() {
    let value = MetadataFieldValue::new(1, 2, "x");
    assert!(value.active);
}
