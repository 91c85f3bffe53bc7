use super::*;
use crate::FetchError;
use async_trait::async_trait;

struct StaticSource(Vec<Project>);

#[async_trait]
impl ProjectSource for StaticSource {
    async fn fetch_projects(&self) -> Result<Vec<Project>, FetchError> {
        Ok(self.0.clone())
    }
}

struct UnreachableSource;

#[async_trait]
impl ProjectSource for UnreachableSource {
    async fn fetch_projects(&self) -> Result<Vec<Project>, FetchError> {
        Err(FetchError::InvalidUrl {
            url: "nowhere".to_string(),
            source: url::ParseError::EmptyHost,
        })
    }
}

#[test]
fn new_store_is_loading_with_no_rows() {
    let store = CatalogueStore::new();
    assert!(store.state().is_loading());
    assert!(store.records().is_empty());
    assert!(store.table().visible_rows().is_empty());
}

#[tokio::test]
async fn successful_fetch_populates_store() {
    let store = CatalogueStore::load(&StaticSource(vec![
        Project::new("Leaf Plates", "Manufacturing", 210000u64, "plates.pdf"),
        Project::new("Tent House", "Service", 400000u64, "tent.pdf"),
    ]))
    .await;

    assert_eq!(store.records().len(), 2);
    assert!(store.state().failure().is_none());
    assert_eq!(store.table().view().filtered_count, 2);
}

#[tokio::test]
async fn empty_catalogue_is_loaded_not_failed() {
    let store = CatalogueStore::load(&StaticSource(Vec::new())).await;
    assert!(matches!(store.state(), LoadState::Loaded(records) if records.is_empty()));
}

#[tokio::test]
async fn failed_fetch_is_distinct_from_empty() {
    let store = CatalogueStore::load(&UnreachableSource).await;

    let reason = store.state().failure().expect("failure reason");
    assert!(reason.contains("nowhere"));
    assert!(store.records().is_empty());

    let table = store.table();
    let view = table.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.total_count, 0);
}

#[test]
fn load_state_from_result() {
    let loaded: LoadState<u32> = LoadState::from_result(Ok::<_, String>(3));
    assert_eq!(loaded.loaded(), Some(&3));

    let failed: LoadState<u32> = LoadState::from_result(Err("timed out"));
    assert_eq!(failed.failure(), Some("timed out"));
    assert_eq!(failed.loaded(), None);
}
