// ==========================================
// PredefinedMasterSeeder / LegacyExcelImporter 集成测试
// ==========================================
// 测试范围:
// 1. 预置配置注册 + 幂等重跑
// 2. 历史固定集合 -> 动态集合迁移（盖章 system_migration）
// 3. 历史 Excel 工作表导入: 拆分、清洗、自然键去重
// ==========================================

mod test_helpers;

use std::sync::Arc;

use garment_mrp::domain::masters::Color;
use garment_mrp::domain::predefined::PREDEFINED_MASTER_IDS;
use garment_mrp::engine::{PredefinedMasterSeeder, MIGRATION_ACTOR};
use garment_mrp::importer::legacy_excel::{
    LegacyExcelImporter, SHEET_COLOR_ID, SHEET_UNITS_MASTER,
};
use garment_mrp::importer::sheet_reader::{Sheet, SheetSet};
use garment_mrp::repository::collections::COLORS;
use serde_json::json;
use test_helpers::{test_actor, TestEnv};

fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

// ==========================================
// Seeder 测试
// ==========================================

#[test]
fn test_initialize_首次注册全部预置配置() {
    let env = TestEnv::new();
    let seeder = PredefinedMasterSeeder::new(Arc::clone(&env.store));

    let outcome = seeder.initialize(&test_actor()).expect("初始化失败");
    assert_eq!(outcome.created, PREDEFINED_MASTER_IDS.len());
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.migrated, 0);

    for id in PREDEFINED_MASTER_IDS {
        let config = env.config_api.get(id).expect("预置配置应已注册");
        assert!(!config.fields.is_empty());
    }
}

#[test]
fn test_initialize_重跑幂等() {
    let env = TestEnv::new();
    let seeder = PredefinedMasterSeeder::new(Arc::clone(&env.store));
    seeder.initialize(&test_actor()).unwrap();

    let second = seeder.initialize(&test_actor()).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, PREDEFINED_MASTER_IDS.len());
    assert_eq!(second.migrated, 0);
}

#[test]
fn test_initialize_迁移历史颜色数据() {
    let env = TestEnv::new();

    // 预置配置注册前写入历史固定集合
    env.master_api
        .create(COLORS, &Color::new("Navy", "NVY"))
        .unwrap();
    env.master_api
        .create(COLORS, &Color::new("Coral", "CRL"))
        .unwrap();

    let seeder = PredefinedMasterSeeder::new(Arc::clone(&env.store));
    let outcome = seeder.initialize(&test_actor()).unwrap();
    assert_eq!(outcome.migrated, 2);

    let migrated = env.dynamic_api.list("color_master").expect("动态集合应存在");
    assert_eq!(migrated.len(), 2);
    assert_eq!(migrated[0]["created_by"], json!(MIGRATION_ACTOR));
    assert!(migrated[0]["id"].is_string());

    // 重跑不重复迁移
    let second = seeder.initialize(&test_actor()).unwrap();
    assert_eq!(second.migrated, 0);
    assert_eq!(env.dynamic_api.list("color_master").unwrap().len(), 2);
}

#[test]
fn test_status_报表区分新旧数据() {
    let env = TestEnv::new();
    env.master_api
        .create(COLORS, &Color::new("Navy", "NVY"))
        .unwrap();

    let seeder = PredefinedMasterSeeder::new(Arc::clone(&env.store));

    let before = seeder.status().unwrap();
    let color_status = before.iter().find(|s| s.id == "color_master").unwrap();
    assert!(!color_status.initialized);
    assert_eq!(color_status.old_data_count, 1);
    assert_eq!(color_status.new_data_count, 0);

    seeder.initialize(&test_actor()).unwrap();

    let after = seeder.status().unwrap();
    let color_status = after.iter().find(|s| s.id == "color_master").unwrap();
    assert!(color_status.initialized);
    assert_eq!(color_status.new_data_count, 1);
}

// ==========================================
// 历史 Excel 导入测试
// ==========================================

#[test]
fn test_legacy_import_颜色拆分与去重() {
    let env = TestEnv::new();

    // 第 2 列 "CODE/Name" 拆分；重复 code 去重；格式不符静默跳过
    let sheets = SheetSet::new(vec![Sheet::from_text_rows(
        SHEET_COLOR_ID,
        rows(&[
            &["Sl", "Color"],
            &["1", "NVY/Navy"],
            &["2", "NVY/Navy Again"],
            &["3", "no-separator"],
            &["4", "CRL/Coral"],
        ]),
    )]);

    let importer = LegacyExcelImporter::new(Arc::clone(&env.store));
    let outcome = importer.import(&sheets).expect("导入失败");
    assert_eq!(outcome.colors_added, 2);
    assert!(outcome.errors.is_empty());

    let colors: Vec<Color> = env.master_api.list(COLORS).unwrap();
    let codes: Vec<&str> = colors.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["NVY", "CRL"]);
    assert_eq!(colors[0].name, "Navy");
}

#[test]
fn test_legacy_import_重跑不产生重复() {
    let env = TestEnv::new();
    let sheets = SheetSet::new(vec![Sheet::from_text_rows(
        SHEET_UNITS_MASTER,
        rows(&[&["Unit"], &["Meters"], &["Pieces"]]),
    )]);

    let importer = LegacyExcelImporter::new(Arc::clone(&env.store));
    let first = importer.import(&sheets).unwrap();
    let second = importer.import(&sheets).unwrap();

    assert_eq!(first.sizes_added, 2);
    assert_eq!(second.sizes_added, 0, "自然键去重应拦住重复导入");
}
