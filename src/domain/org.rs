// ==========================================
// 学籍数据修复引擎 - 组织结构实体
// ==========================================
// 职责: 系部 (Department) / 年级 (Level) / 专业 (Program)
// 红线: 系部与年级为只读参考数据，引擎只回填 Program.department_id
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Department - 系部
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

// ==========================================
// Level - 年级/层次
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub level_name: String, // 显示名称 (如 "ปวช.1")
}

// ==========================================
// Program - 专业
// ==========================================
// department_id 为空即"未关联实体"，由 DepartmentResolver 回填
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub department_id: Option<String>,
    pub level_id: Option<String>,
}

impl Program {
    /// 名称 + 描述拼接文本（用于词元重叠评分）
    pub fn match_text(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => format!("{} {}", self.name, desc),
            _ => self.name.clone(),
        }
    }

    /// 提取名称中的括号限定语，如 "การบัญชี (ทวิภาคี)" -> "(ทวิภาคี)"
    pub fn parenthetical_qualifier(&self) -> Option<&str> {
        let start = self.name.find('(')?;
        let end = self.name[start..].find(')')? + start;
        let inner = self.name[start + 1..end].trim();
        if inner.is_empty() {
            return None;
        }
        Some(&self.name[start..=end])
    }
}

impl Department {
    pub fn match_text(&self) -> String {
        match self.description.as_deref() {
            Some(desc) if !desc.trim().is_empty() => format!("{} {}", self.name, desc),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(name: &str) -> Program {
        Program {
            id: "p1".to_string(),
            name: name.to_string(),
            description: None,
            department_id: None,
            level_id: None,
        }
    }

    #[test]
    fn test_parenthetical_qualifier() {
        assert_eq!(
            program("การบัญชี (ทวิภาคี)").parenthetical_qualifier(),
            Some("(ทวิภาคี)")
        );
        assert_eq!(program("การบัญชี").parenthetical_qualifier(), None);
        assert_eq!(program("การบัญชี ()").parenthetical_qualifier(), None);
        assert_eq!(program("การบัญชี (ทวิภาคี").parenthetical_qualifier(), None);
    }

    #[test]
    fn test_match_text_skips_blank_description() {
        let mut p = program("ไฟฟ้ากำลัง");
        assert_eq!(p.match_text(), "ไฟฟ้ากำลัง");
        p.description = Some("  ".to_string());
        assert_eq!(p.match_text(), "ไฟฟ้ากำลัง");
        p.description = Some("งานติดตั้ง".to_string());
        assert_eq!(p.match_text(), "ไฟฟ้ากำลัง งานติดตั้ง");
    }
}
