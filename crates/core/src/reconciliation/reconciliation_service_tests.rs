use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::{Error, Result};
use crate::reconciliation::{
    ImportSummary, MappingRepositoryTrait, ReconciliationService, ReconciliationServiceTrait,
    SkuMapping,
};
use crate::stock_report::{StockReport, StockReportRow};

#[derive(Default)]
struct MockMappingRepository {
    rows: Mutex<BTreeMap<String, SkuMapping>>,
}

#[async_trait]
impl MappingRepositoryTrait for MockMappingRepository {
    fn list(&self) -> Result<Vec<SkuMapping>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    fn get(&self, internal_sku: &str) -> Result<Option<SkuMapping>> {
        Ok(self.rows.lock().unwrap().get(internal_sku).cloned())
    }

    fn find_by_external(&self, external_sku: &str) -> Result<Option<SkuMapping>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|m| m.external_sku == external_sku)
            .cloned())
    }

    async fn upsert(&self, mapping: SkuMapping) -> Result<SkuMapping> {
        self.rows
            .lock()
            .unwrap()
            .insert(mapping.internal_sku.clone(), mapping.clone());
        Ok(mapping)
    }

    async fn delete(&self, internal_sku: &str) -> Result<usize> {
        Ok(self.rows.lock().unwrap().remove(internal_sku).map_or(0, |_| 1))
    }
}

fn service() -> ReconciliationService {
    ReconciliationService::new(Arc::new(MockMappingRepository::default()))
}

fn report(label: &str, rows: &[(&str, i64)]) -> StockReport {
    StockReport {
        label: label.to_string(),
        rows: rows
            .iter()
            .map(|(sku, qty)| StockReportRow {
                sku: sku.to_string(),
                name: format!("Produto {}", sku),
                quantity: *qty,
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_saving_same_mapping_twice_keeps_one_row() {
    let svc = service();
    let first = svc.save_mapping("CAM-001", "MLB123").await.unwrap().unwrap();
    let second = svc.save_mapping("CAM-001", " MLB123 ").await.unwrap().unwrap();
    assert_eq!(first, second);
    assert_eq!(svc.list_mappings().unwrap().len(), 1);
}

#[tokio::test]
async fn test_external_sku_owned_by_another_internal_sku_conflicts() {
    let svc = service();
    svc.save_mapping("CAM-001", "MLB123").await.unwrap();
    let res = svc.save_mapping("CAL-002", "MLB123").await;
    assert!(matches!(res, Err(Error::Conflict(_))));
    assert!(svc.list_mappings().unwrap().iter().all(|m| m.internal_sku == "CAM-001"));
}

#[tokio::test]
async fn test_empty_external_removes_mapping() {
    let svc = service();
    svc.save_mapping("CAM-001", "MLB123").await.unwrap();
    assert_eq!(svc.save_mapping("CAM-001", "  ").await.unwrap(), None);
    assert!(svc.list_mappings().unwrap().is_empty());
    // Removing an absent mapping is a no-op.
    assert_eq!(svc.save_mapping("CAM-001", "").await.unwrap(), None);
    assert!(matches!(
        svc.save_mapping(" ", "MLB1").await,
        Err(Error::Validation(_))
    ));
}

#[tokio::test]
async fn test_remapping_frees_previous_external_sku() {
    let svc = service();
    svc.save_mapping("CAM-001", "MLB123").await.unwrap();
    svc.save_mapping("CAM-001", "MLB456").await.unwrap();
    svc.save_mapping("CAL-002", "MLB123").await.unwrap();
    assert_eq!(svc.list_mappings().unwrap().len(), 2);
}

#[tokio::test]
async fn test_selectable_excludes_skus_of_other_products() {
    let svc = service();
    svc.save_mapping("CAM-001", "MLB123").await.unwrap();
    let candidates: Vec<String> = ["MLB123", "MLB456", "MLB456", ""]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(
        svc.selectable_external_skus("CAL-002", &candidates).unwrap(),
        vec!["MLB456".to_string()]
    );
    // The current mapping stays selectable for its own SKU.
    assert_eq!(
        svc.selectable_external_skus("CAM-001", &candidates).unwrap(),
        vec!["MLB123".to_string(), "MLB456".to_string()]
    );
}

#[tokio::test]
async fn test_import_applies_each_row() {
    let svc = service();
    svc.save_mapping("BON-9", "MLB9").await.unwrap();
    let csv = "internal_sku,external_sku\nCAM-001,MLB1\nCAL-002,MLB2\nBON-9,\n";
    let summary = svc.import_mappings(csv).await.unwrap();
    assert_eq!(summary, ImportSummary { saved: 2, removed: 1 });
    assert_eq!(svc.list_mappings().unwrap().len(), 2);

    let conflicting = "internal_sku,external_sku\nBON-9,MLB1\n";
    assert!(matches!(
        svc.import_mappings(conflicting).await,
        Err(Error::Conflict(_))
    ));
}

#[tokio::test]
async fn test_reconcile_joins_through_mapping() {
    let svc = service();
    svc.save_mapping("CAM-001", "MLB1").await.unwrap();
    svc.save_mapping("CAL-002", "MLB2").await.unwrap();

    let internal = report("ledger", &[("CAM-001", 10), ("CAL-002", 3), ("BON-9", 1)]);
    let external = report("Mercado Livre", &[("MLB1", 7), ("MLB1", 1)]);
    let rows = svc.reconcile(&internal, &external).unwrap();
    assert_eq!(rows.len(), 3);

    let cam = rows.iter().find(|r| r.internal_sku == "CAM-001").unwrap();
    assert_eq!(cam.external_quantity, Some(8));
    assert_eq!(cam.difference, Some(2));

    let cal = rows.iter().find(|r| r.internal_sku == "CAL-002").unwrap();
    assert_eq!(cal.external_sku.as_deref(), Some("MLB2"));
    assert_eq!(cal.external_quantity, None);

    let bon = rows.iter().find(|r| r.internal_sku == "BON-9").unwrap();
    assert_eq!(bon.external_sku, None);
    assert_eq!(bon.difference, None);
}
