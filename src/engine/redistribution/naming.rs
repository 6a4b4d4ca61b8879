use crate::domain::Program;

/// 每个大号下的小号数量
const SECTIONS_PER_MAJOR: i64 = 10;

/// 班级编号 "大号/小号"
///
/// existing 为同 (年级, 系部) 下已有班级数: 0 -> "1/1", 9 -> "1/10", 10 -> "2/1"
pub fn section_label(existing: i64) -> String {
    let n = existing.max(0);
    format!(
        "{}/{}",
        n / SECTIONS_PER_MAJOR + 1,
        n % SECTIONS_PER_MAJOR + 1
    )
}

/// 新班级命名: 年级名 + 编号 [+ 系部名] [+ 专业括号限定语]
///
/// 括号限定语已出现在名称中时不重复追加
pub fn build_classroom_name(
    base_name: &str,
    existing: i64,
    department_name: Option<&str>,
    program: Option<&Program>,
) -> String {
    let mut name = format!("{} {}", base_name.trim(), section_label(existing));

    if let Some(dept) = department_name.map(str::trim).filter(|d| !d.is_empty()) {
        name.push(' ');
        name.push_str(dept);
    }

    if let Some(qualifier) = program.and_then(Program::parenthetical_qualifier) {
        if !name.contains(qualifier) {
            name.push(' ');
            name.push_str(qualifier);
        }
    }

    name
}
