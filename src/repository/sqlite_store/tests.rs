use super::SqliteEntityStore;
use crate::domain::{Classroom, GroupKey};
use crate::repository::entity_store::{ClassroomStore, OrgStore, StudentStore};
use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::init_schema(&conn).unwrap();

    conn.execute_batch(
        r#"
        INSERT INTO department (id, name, description) VALUES
            ('d1', 'ไฟฟ้า', NULL),
            ('d2', 'การบัญชี', 'บริหารธุรกิจ');
        INSERT INTO level (id, level_name) VALUES ('l1', 'ปวช.1'), ('l2', 'ปวส.1');
        INSERT INTO program (id, name, description, department_id, level_id) VALUES
            ('p1', 'ไฟฟ้ากำลัง', NULL, 'd1', 'l1'),
            ('p2', 'การบัญชี', NULL, NULL, 'l1'),
            ('p3', 'ไฟฟ้ากำลัง ปวส.', NULL, 'd1', 'l2');
        INSERT INTO classroom (id, name, department_id, program_id, level_id) VALUES
            ('c1', 'ปวช.1/1 ไฟฟ้า', 'd1', NULL, 'l1'),
            ('c2', 'ปวช.1/2 ไฟฟ้า', 'd1', 'p1', 'l1');
        INSERT INTO student (id, department_id, classroom_id, program_id, level_id) VALUES
            ('s1', NULL, 'c1', NULL, 'l1'),
            ('s2', 'd1', 'c1', 'p1', 'l1'),
            ('s3', 'd2', 'c2', NULL, 'l1');
        "#,
    )
    .unwrap();

    Arc::new(Mutex::new(conn))
}

#[test]
fn test_counts() {
    let store = SqliteEntityStore::from_connection(setup_test_db());

    assert_eq!(store.count_programs().unwrap(), 3);
    assert_eq!(store.count_programs_missing_department().unwrap(), 1);
    assert_eq!(store.count_students().unwrap(), 3);
    assert_eq!(store.count_students_missing_program().unwrap(), 2);
    assert_eq!(store.count_classroom_members("c1").unwrap(), 2);
}

#[test]
fn test_program_lookups_follow_insertion_order() {
    let store = SqliteEntityStore::from_connection(setup_test_db());

    let by_dept = store.find_program_by_department("d1").unwrap().unwrap();
    assert_eq!(by_dept.id, "p1");

    let by_dept_level = store.find_program_by_department_level("d1", "l2").unwrap();
    assert_eq!(by_dept_level.map(|p| p.id).as_deref(), Some("p3"));

    let by_level: Vec<String> = store
        .list_programs_by_level("l1")
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(by_level, vec!["p1", "p2"]);

    assert!(store.find_program_by_level("l9").unwrap().is_none());

    let all: Vec<String> = store
        .list_all_programs()
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(all, vec!["p1", "p2", "p3"]);
}

#[test]
fn test_students_missing_program_carry_classroom() {
    let store = SqliteEntityStore::from_connection(setup_test_db());

    let profiles = store.list_students_missing_program().unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].student.id, "s1");
    assert_eq!(profiles[0].classroom_name.as_deref(), Some("ปวช.1/1 ไฟฟ้า"));
    assert_eq!(profiles[0].classroom_department_id.as_deref(), Some("d1"));
    assert_eq!(profiles[1].student.id, "s3");
}

#[test]
fn test_update_unknown_row_is_not_found() {
    let store = SqliteEntityStore::from_connection(setup_test_db());

    let result = store.update_program_department("missing", "d1");
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

    let result = store.update_student_classroom("missing", "c1");
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_update_with_dangling_reference_is_foreign_key_violation() {
    let store = SqliteEntityStore::from_connection(setup_test_db());

    let result = store.update_program_department("p2", "d404");
    assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));
}

#[test]
fn test_populations_sorted_by_count() {
    let store = SqliteEntityStore::from_connection(setup_test_db());

    let populations = store.list_classroom_populations().unwrap();
    assert_eq!(populations.len(), 2);
    assert_eq!(populations[0].classroom_id, "c1");
    assert_eq!(populations[0].member_count, 2);
    assert_eq!(populations[1].member_count, 1);
}

#[test]
fn test_classroom_lookup_excludes_source_and_matches_null() {
    let store = SqliteEntityStore::from_connection(setup_test_db());

    let key = GroupKey {
        program_id: None,
        department_id: Some("d1".to_string()),
        level_id: Some("l1".to_string()),
    };
    // c1 是唯一 program_id 为 NULL 的候选，但被排除
    assert!(store.find_classroom_by_key(&key, "c1").unwrap().is_none());
    assert_eq!(
        store.find_classroom_by_key(&key, "c2").unwrap().map(|c| c.id).as_deref(),
        Some("c1")
    );

    let fallback = store
        .find_classroom_by_department_level(Some("d1"), Some("l1"), "c1")
        .unwrap();
    assert_eq!(fallback.map(|c| c.id).as_deref(), Some("c2"));

    assert_eq!(store.count_classrooms_for(Some("l1"), Some("d1")).unwrap(), 2);
    assert_eq!(store.count_classrooms_for(Some("l1"), None).unwrap(), 0);
}

#[test]
fn test_create_classroom_and_move_student() {
    let conn = setup_test_db();
    let store = SqliteEntityStore::from_connection(conn.clone());

    let created_at = NaiveDate::from_ymd_opt(2026, 5, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    let classroom = Classroom {
        id: "c-new".to_string(),
        name: "ปวช.1 1/3 ไฟฟ้า".to_string(),
        department_id: Some("d1".to_string()),
        program_id: None,
        level_id: Some("l1".to_string()),
        created_at,
    };
    store.create_classroom(&classroom).unwrap();
    store.update_student_classroom("s1", "c-new").unwrap();

    let found = store
        .find_classroom_by_department_level(Some("d1"), Some("l1"), "c1")
        .unwrap()
        .unwrap();
    assert_eq!(found.id, "c2");

    let members = store.list_students_in_classroom("c-new").unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, "s1");

    let stored_at: String = conn
        .lock()
        .unwrap()
        .query_row(
            "SELECT created_at FROM classroom WHERE id = ?1",
            params!["c-new"],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored_at, "2026-05-01 08:30:00");
}

#[test]
fn test_malformed_created_at_is_field_error() {
    let conn = setup_test_db();
    conn.lock()
        .unwrap()
        .execute(
            "UPDATE classroom SET created_at = 'not-a-date' WHERE id = 'c2'",
            [],
        )
        .unwrap();
    let store = SqliteEntityStore::from_connection(conn);

    let result = store.find_classroom_by_department_level(Some("d1"), Some("l1"), "c1");
    match result {
        Err(RepositoryError::FieldValueError { field, .. }) => {
            assert_eq!(field, "classroom.created_at")
        }
        other => panic!("expected FieldValueError, got {:?}", other),
    }
}
