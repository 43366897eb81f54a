//! 集成測試

use atelier_calc::{ConsumptionCalculator, SummaryLine};
use atelier_core::{
    CatalogItem, CompletionOutcome, Fabric, FabricLink, Material, MaterialLink, OrderStatus,
    PriceUpdate, Product, SewingTeam,
};
use atelier_store::{MappingKind, MemoryStore, NewOrder};
use chrono::NaiveDate;
use rstest::rstest;
use rust_decimal::Decimal;
use uuid::Uuid;

/// 工坊目錄：襯衫（布料 + 鈕扣）與短褲（布料 + 縫線）
struct Workshop {
    store: MemoryStore,
    cotton: Uuid,
}

fn workshop() -> Workshop {
    let mut store = MemoryStore::new();

    let cotton = store
        .add_fabric(Fabric::new("BAWEŁNA").with_price(Decimal::from(20)))
        .unwrap();
    let button = store.add_material(Material::new("GUZIK")).unwrap();
    let thread = store.add_material(Material::new("NIĆ")).unwrap();

    store
        .add_product(
            Product::new("KOSZULA")
                .with_fabric(cotton, Decimal::new(15, 1))
                .with_material(button, "4 szt"),
        )
        .unwrap();
    store
        .add_product(
            Product::new("SZORTY")
                .with_fabric(cotton, Decimal::new(8, 1))
                .with_material(thread, "0.1 m")
                .with_material(button, "abc"),
        )
        .unwrap();

    Workshop { store, cotton }
}

fn deadline() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 15).unwrap()
}

#[test]
fn test_order_summary_for_single_line() {
    // 場景：3 件襯衫
    let mut shop = workshop();
    let order_id = shop
        .store
        .create_order(NewOrder::new("Butik Lena", deadline(), "Marta").with_line("koszula", "m", 3))
        .unwrap();

    let summary = ConsumptionCalculator::new(&shop.store)
        .summarize_order(order_id)
        .unwrap();

    assert_eq!(
        summary,
        vec![
            SummaryLine::new("BAWEŁNA", "4.50 metra"),
            SummaryLine::new("GUZIK", "12 szt"),
        ]
    );
}

#[test]
fn test_decimal_quantities_sum_exactly() {
    // 場景：同一產品兩行 2 + 3 件，每件 0.1 m 縫線；無法解析的 "abc" 不出現
    let mut shop = workshop();
    let order_id = shop
        .store
        .create_order(
            NewOrder::new("Butik Lena", deadline(), "Marta")
                .with_line("SZORTY", "S", 2)
                .with_line("SZORTY", "L", 3),
        )
        .unwrap();

    let summary = ConsumptionCalculator::new(&shop.store)
        .summarize_order(order_id)
        .unwrap();

    assert_eq!(
        summary,
        vec![
            SummaryLine::new("BAWEŁNA", "4 metra"),
            SummaryLine::new("NIĆ", "0.50 m"),
        ]
    );
    assert!(summary.iter().all(|line| line.name != "GUZIK"));
}

#[test]
fn test_full_production_flow_feeds_report() {
    let mut shop = workshop();
    let planned = shop
        .store
        .create_order(
            NewOrder::new("Butik Lena", deadline(), "Marta")
                .with_fabric(shop.cotton)
                .with_line("KOSZULA", "M", 3),
        )
        .unwrap();
    let recorded = shop
        .store
        .create_order(NewOrder::new("Sklep Ola", deadline(), "Marta").with_line("KOSZULA", "L", 2))
        .unwrap();

    // 裁剪 → 縫紉 → 分工完成
    shop.store.assign_cutting_table(planned, "stol-2").unwrap();
    shop.store.assign_cutting_table(planned, "skrojone").unwrap();
    shop.store.assign_team(planned, "OBA").unwrap();
    assert_eq!(
        shop.store.complete_part(planned, Some("zespol-1")).unwrap(),
        CompletionOutcome::PartCompleted {
            team: Some(SewingTeam::Team1)
        }
    );
    assert_eq!(
        shop.store.complete_part(planned, Some("zespol-2")).unwrap(),
        CompletionOutcome::Completed
    );

    // 手動記錄的實際用量取代計劃用量
    shop.store
        .record_usage(recorded, [("bawełna", "10 m"), ("guzik", "9 szt")])
        .unwrap();
    shop.store.set_status(recorded, OrderStatus::Completed).unwrap();

    let calculator = ConsumptionCalculator::new(&shop.store);
    let report = calculator.summarize_completed(None).unwrap();

    assert_eq!(report.fabric_totals["BAWEŁNA"], Decimal::new(145, 1));
    assert_eq!(report.material_totals["GUZIK"]["szt"], Decimal::from(21));
    assert!(report.known_materials.contains("GUZIK"));

    // 篩選 "GUZ"
    let filtered = calculator.summarize_completed(Some("GUZ")).unwrap();
    assert!(filtered.fabric_totals.is_empty());
    assert_eq!(filtered.material_totals.keys().collect::<Vec<_>>(), vec!["GUZIK"]);
}

#[test]
fn test_deleted_order_leaves_report() {
    let mut shop = workshop();
    let order_id = shop
        .store
        .create_order(NewOrder::new("Butik Lena", deadline(), "Marta").with_line("KOSZULA", "M", 1))
        .unwrap();
    shop.store.record_usage(order_id, [("BAWEŁNA", "3 m")]).unwrap();
    shop.store.set_status(order_id, OrderStatus::Completed).unwrap();
    shop.store.delete_order(order_id).unwrap();

    let report = ConsumptionCalculator::new(&shop.store)
        .summarize_completed(None)
        .unwrap();

    assert!(report.is_empty());
}

#[test]
fn test_price_sync_flows_into_cost_estimate() {
    let mut shop = workshop();
    let koszula = shop.store.product_by_name("KOSZULA").unwrap().id;
    shop.store
        .set_production_price(koszula, Decimal::from(30))
        .unwrap();

    let order_id = shop
        .store
        .create_order(NewOrder::new("Butik Lena", deadline(), "Marta").with_line("KOSZULA", "M", 2))
        .unwrap();

    let before = ConsumptionCalculator::new(&shop.store)
        .estimate_cost(order_id)
        .unwrap();
    assert_eq!(before.labour, Decimal::from(60));
    assert_eq!(before.fabrics, Decimal::from(60));
    assert!(before.unpriced.contains("GUZIK"));

    // ERP 目錄 → 對應為新材料 → 價格同步
    shop.store.replace_catalog(vec![CatalogItem {
        symbol: "GZ-01".to_string(),
        name: "Guzik perłowy".to_string(),
    }]);
    let pearl = shop
        .store
        .map_catalog_item("GZ-01", "GUZIK PERŁOWY", MappingKind::Material)
        .unwrap();
    let updates = PriceUpdate::parse_batch(r#"[{"symbol": "GZ-01", "price": 0.25}]"#).unwrap();
    assert_eq!(shop.store.apply_price_updates(&updates), 1);

    shop.store
        .set_recipe(
            koszula,
            vec![FabricLink {
                fabric_id: shop.cotton,
                usage_meters: Decimal::new(15, 1),
            }],
            vec![MaterialLink {
                material_id: pearl,
                quantity: "4 szt".to_string(),
            }],
        )
        .unwrap();

    let after = ConsumptionCalculator::new(&shop.store)
        .estimate_cost(order_id)
        .unwrap();
    assert_eq!(after.materials, Decimal::from(2));
    assert_eq!(after.total, Decimal::from(122));
    assert!(after.unpriced.is_empty());
}

#[rstest]
#[case(Some("GUZ"), &[], &["GUZIK"])]
#[case(Some("baw"), &["BAWEŁNA"], &[])]
#[case(Some("NI"), &[], &["NIĆ"])]
#[case(Some("  "), &["BAWEŁNA"], &["GUZIK", "NIĆ"])]
#[case(None, &["BAWEŁNA"], &["GUZIK", "NIĆ"])]
fn test_report_filter_cases(
    #[case] filter: Option<&str>,
    #[case] fabrics: &[&str],
    #[case] materials: &[&str],
) {
    let mut shop = workshop();
    let order_id = shop
        .store
        .create_order(
            NewOrder::new("Butik Lena", deadline(), "Marta")
                .with_line("KOSZULA", "M", 2)
                .with_line("SZORTY", "S", 1),
        )
        .unwrap();
    shop.store.set_status(order_id, OrderStatus::Completed).unwrap();

    let report = ConsumptionCalculator::new(&shop.store)
        .summarize_completed(filter)
        .unwrap();

    assert_eq!(report.fabric_totals.keys().map(String::as_str).collect::<Vec<_>>(), fabrics);
    assert_eq!(report.material_totals.keys().map(String::as_str).collect::<Vec<_>>(), materials);
}
