use super::*;
use crate::domain::{Program, Student};

fn student(id: &str, program: Option<&str>, dept: Option<&str>, level: Option<&str>) -> Student {
    Student {
        id: id.to_string(),
        department_id: dept.map(str::to_string),
        classroom_id: Some("c1".to_string()),
        program_id: program.map(str::to_string),
        level_id: level.map(str::to_string),
    }
}

fn program(name: &str) -> Program {
    Program {
        id: "p1".to_string(),
        name: name.to_string(),
        description: None,
        department_id: None,
        level_id: None,
    }
}

// ==========================================
// 分组
// ==========================================

#[test]
fn test_group_members_is_stable_partition() {
    let members = vec![
        student("s1", Some("p1"), Some("d1"), Some("l1")),
        student("s2", None, Some("d1"), Some("l1")),
        student("s3", Some("p1"), Some("d1"), Some("l1")),
        student("s4", None, Some("d1"), Some("l1")),
        student("s5", Some("p1"), Some("d2"), Some("l1")),
    ];

    let groups = group_members(&members);
    assert_eq!(groups.len(), 3);

    let ids: Vec<Vec<&str>> = groups
        .iter()
        .map(|g| g.members.iter().map(|s| s.id.as_str()).collect())
        .collect();
    assert_eq!(ids, vec![vec!["s1", "s3"], vec!["s2", "s4"], vec!["s5"]]);

    assert_eq!(groups[1].key.program_id, None);
    assert_eq!(groups[1].key.to_string(), "(unknown, d1, l1)");
    assert_eq!(groups[2].representative().map(|s| s.id.as_str()), Some("s5"));
}

#[test]
fn test_group_members_empty() {
    assert!(group_members(&[]).is_empty());
}

// ==========================================
// 命名
// ==========================================

#[test]
fn test_section_label() {
    assert_eq!(section_label(0), "1/1");
    assert_eq!(section_label(2), "1/3");
    assert_eq!(section_label(9), "1/10");
    assert_eq!(section_label(10), "2/1");
    assert_eq!(section_label(-3), "1/1");
}

#[test]
fn test_build_classroom_name_full() {
    let p = program("การบัญชี (ทวิภาคี)");
    let name = build_classroom_name("ปวช.1", 2, Some("การบัญชี"), Some(&p));
    assert_eq!(name, "ปวช.1 1/3 การบัญชี (ทวิภาคี)");
}

#[test]
fn test_build_classroom_name_skips_duplicate_qualifier() {
    let p = program("ไฟฟ้ากำลัง (ทวิภาคี)");
    let name = build_classroom_name("ปวส.1 (ทวิภาคี)", 0, None, Some(&p));
    assert_eq!(name, "ปวส.1 (ทวิภาคี) 1/1");
}

#[test]
fn test_build_classroom_name_minimal() {
    assert_eq!(build_classroom_name("ปวช.2", 11, Some("  "), None), "ปวช.2 2/2");
    assert_eq!(
        build_classroom_name("ปวช.2", 0, None, Some(&program("ช่างยนต์"))),
        "ปวช.2 1/1"
    );
}

#[test]
fn test_noop_report() {
    let report = RedistributionReport::no_op(
        None,
        Vec::new(),
        false,
        chrono::NaiveDateTime::default(),
        chrono::NaiveDateTime::default(),
    );
    assert!(report.is_noop());
    assert_eq!(report.hotspot_size_before, report.hotspot_size_after);
}

#[test]
fn test_reduction_pct() {
    assert_eq!(report::reduction_pct(150, 0), 100.0);
    assert_eq!(report::reduction_pct(120, 80), 33.33);
    assert_eq!(report::reduction_pct(0, 0), 0.0);
}
