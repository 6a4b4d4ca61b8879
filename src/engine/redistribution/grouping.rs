use crate::domain::{GroupKey, Student};
use std::collections::HashMap;

/// 一个分组: 复合键 + 组内成员（保持原始顺序）
#[derive(Debug, Clone)]
pub struct MemberGroup<'a> {
    pub key: GroupKey,
    pub members: Vec<&'a Student>,
}

impl MemberGroup<'_> {
    /// 组代表成员（首个成员）
    pub fn representative(&self) -> Option<&Student> {
        self.members.first().copied()
    }
}

/// 按 (program_id, department_id, level_id) 稳定分组
///
/// 组的顺序 = 键首次出现顺序；组内成员保持输入顺序
pub fn group_members(members: &[Student]) -> Vec<MemberGroup<'_>> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<MemberGroup<'_>> = Vec::new();

    for student in members {
        let key = GroupKey {
            program_id: student.program_id.clone(),
            department_id: student.department_id.clone(),
            level_id: student.level_id.clone(),
        };
        match index.get(&key) {
            Some(&idx) => groups[idx].members.push(student),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(MemberGroup {
                    key,
                    members: vec![student],
                });
            }
        }
    }

    groups
}
