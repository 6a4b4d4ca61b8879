// ==========================================
// BatchOrchestrator 端到端测试
// ==========================================
// 测试目标: 先修复关联、再重分配，结果可序列化输出
// ==========================================


use school_reconcile::config::{ConfigManager, EngineConfig};
use school_reconcile::domain::TargetSource;
use school_reconcile::engine::{BatchOrchestrator, RunMode};
use test_helpers::*;

#[tokio::test]
async fn test_full_batch_reconciles_before_redistributing() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).unwrap();

    insert_department(&conn, "d1", "ไฟฟ้า", None);
    insert_level(&conn, "l1", "ปวช.1");
    insert_program(&conn, "p1", "เทคโนโลยีไฟฟ้า", None, None, Some("l1"));
    insert_classroom(&conn, "c1", "ห้องรวม", None, None, None);
    insert_classroom(&conn, "c2", "ปวช.1/1 ไฟฟ้า", Some("d1"), Some("p1"), Some("l1"));
    insert_students(&conn, "s", 130, Some("d1"), Some("c1"), None, Some("l1"));

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let config = EngineConfig::load(&config_manager).await.unwrap();

    let orchestrator = BatchOrchestrator::new(open_store(&db_path), config);
    let result = orchestrator.run(RunMode::All).unwrap();

    let reconcile = result.reconcile.as_ref().expect("reconcile report");
    assert_eq!(reconcile.programs.fixed_count, 1);
    assert_eq!(reconcile.students.fixed_count, 130);

    // 学生已补齐专业，整组命中完全一致的既有班级
    let redistribute = result.redistribute.as_ref().expect("redistribute report");
    assert_eq!(redistribute.group_count, 1);
    assert_eq!(redistribute.groups[0].target_classroom_id, "c2");
    assert_eq!(redistribute.groups[0].target_source, TargetSource::ExactKey);
    assert_eq!(classroom_size(&conn, "c2"), 130);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["mode"], "all");
    assert_eq!(json["redistribute"]["groups"][0]["target_source"], "EXACT_KEY");
}

#[test]
fn test_reconcile_only_mode_skips_redistribution() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).unwrap();

    insert_classroom(&conn, "c1", "ห้องรวม", None, None, None);
    insert_students(&conn, "s", 120, None, Some("c1"), None, None);

    let orchestrator = BatchOrchestrator::new(open_store(&db_path), default_config());
    let result = orchestrator.run(RunMode::Reconcile).unwrap();

    assert!(result.reconcile.is_some());
    assert!(result.redistribute.is_none());
    assert_eq!(classroom_size(&conn, "c1"), 120);
}
