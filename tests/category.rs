use std::sync::Arc;

use dark_kitchen::config::DbConfig;
use dark_kitchen::db::ConnectionProvider;
use dark_kitchen::entities::setup_schema;
use dark_kitchen::error::DataError;
use dark_kitchen::forms::CategoryForm;
use dark_kitchen::repository::CategoryRepository;
use validator::Validate;

async fn repository() -> CategoryRepository {
    let provider = Arc::new(ConnectionProvider::new(DbConfig::from_url("sqlite::memory:")));
    let db = provider.acquire().await.expect("failed to connect");
    setup_schema(&db).await.expect("failed to create schema");
    CategoryRepository::new(provider)
}

fn form(name: &str, description: Option<&str>) -> CategoryForm {
    CategoryForm {
        name: name.to_owned(),
        description: description.map(str::to_owned),
    }
}

#[tokio::test]
async fn create_backfills_id_and_reads_back() {
    let repository = repository().await;
    let mut record = form("Bebidas", Some("Drinks")).into_record();
    repository.create(&mut record).await.expect("create failed");
    assert!(record.category_id > 0);

    let found = repository
        .read_by_id(record.category_id)
        .await
        .expect("read failed")
        .expect("category missing");
    assert_eq!(found.name, "Bebidas");
    assert_eq!(found.description.as_deref(), Some("Drinks"));
    assert!(found.active);
}

#[tokio::test]
async fn read_all_lists_active_rows_ordered_by_name() {
    let repository = repository().await;
    for name in ["Postres", "Bebidas", "Antojitos"] {
        let mut record = form(name, None).into_record();
        repository.create(&mut record).await.expect("create failed");
    }

    let all = repository.read_all().await.expect("read failed");
    let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Antojitos", "Bebidas", "Postres"]);
}

#[tokio::test]
async fn soft_delete_hides_the_row_but_keeps_it() {
    let repository = repository().await;
    let mut bebidas = form("Bebidas", None).into_record();
    let mut postres = form("Postres", None).into_record();
    repository.create(&mut bebidas).await.expect("create failed");
    repository.create(&mut postres).await.expect("create failed");

    repository
        .delete(bebidas.category_id)
        .await
        .expect("delete failed");

    let all = repository.read_all().await.expect("read failed");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Postres");

    // the row itself survives with the flag flipped
    let found = repository
        .read_by_id(bebidas.category_id)
        .await
        .expect("read failed")
        .expect("row must still exist");
    assert_eq!(found.name, "Bebidas");
    assert!(!found.active);
}

#[tokio::test]
async fn update_overwrites_fields_and_can_reactivate() {
    let repository = repository().await;
    let mut record = form("Bebidas", None).into_record();
    repository.create(&mut record).await.expect("create failed");
    repository
        .delete(record.category_id)
        .await
        .expect("delete failed");

    record.name = "Bebidas frías".to_owned();
    record.description = Some("Aguas y refrescos".to_owned());
    record.active = true;
    repository.update(&record).await.expect("update failed");

    let all = repository.read_all().await.expect("read failed");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Bebidas frías");
    assert_eq!(all[0].description.as_deref(), Some("Aguas y refrescos"));
}

#[tokio::test]
async fn update_of_missing_id_fails() {
    let repository = repository().await;
    let mut ghost = form("Fantasma", None).into_record();
    ghost.category_id = 4242;
    let err = repository.update(&ghost).await.expect_err("update must fail");
    assert!(matches!(err, DataError::NotFound));
}

#[test]
fn form_requires_a_name() {
    assert!(form("", None).validate().is_err());
    assert!(form("Bebidas", None).validate().is_ok());
}
