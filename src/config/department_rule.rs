// ==========================================
// 学籍数据修复引擎 - 系部人工规则表
// ==========================================
// 职责: (关键词, 系部名谓词) 有序规则表，优先于所有自动匹配阶段
// 存储: config_kv（key='department_rules'，JSON 数组）
// ==========================================

use crate::engine::token_matcher::contains_substring;
use serde::{Deserialize, Serialize};

/// 系部名谓词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentNameMatch {
    Contains(String),
    Equals(String),
    StartsWith(String),
}

impl DepartmentNameMatch {
    /// 大小写不敏感判断
    pub fn matches(&self, department_name: &str) -> bool {
        let name = department_name.trim().to_lowercase();
        match self {
            DepartmentNameMatch::Contains(term) => contains_substring(&name, term),
            DepartmentNameMatch::Equals(term) => name == term.trim().to_lowercase(),
            DepartmentNameMatch::StartsWith(term) => {
                let term = term.trim().to_lowercase();
                !term.is_empty() && name.starts_with(&term)
            }
        }
    }
}

/// 人工规则: 专业名包含 keyword 时，选首个满足 department 谓词的系部
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRule {
    pub keyword: String,
    pub department: DepartmentNameMatch,
}

impl DepartmentRule {
    pub fn contains(keyword: &str, department_term: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            department: DepartmentNameMatch::Contains(department_term.to_string()),
        }
    }

    /// 规则是否适用于该专业名
    pub fn applies_to(&self, program_name: &str) -> bool {
        contains_substring(program_name, &self.keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_json_shape() {
        let raw = r#"[
            {"keyword": "ยานยนต์", "department": {"contains": "ช่างยนต์"}},
            {"keyword": "Computer", "department": {"equals": "เทคโนโลยีสารสนเทศ"}}
        ]"#;
        let rules: Vec<DepartmentRule> = serde_json::from_str(raw).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], DepartmentRule::contains("ยานยนต์", "ช่างยนต์"));
        assert!(rules[1].applies_to("computer business"));
        assert!(!rules[1].applies_to("การบัญชี"));
    }

    #[test]
    fn test_name_predicates() {
        assert!(DepartmentNameMatch::Contains("ยนต์".into()).matches("ช่างยนต์"));
        assert!(DepartmentNameMatch::Equals("IT".into()).matches(" it "));
        assert!(!DepartmentNameMatch::Equals("IT".into()).matches("IT Support"));
        assert!(DepartmentNameMatch::StartsWith("ช่าง".into()).matches("ช่างกลโรงงาน"));
        assert!(!DepartmentNameMatch::StartsWith("".into()).matches("ช่างกลโรงงาน"));
    }
}
