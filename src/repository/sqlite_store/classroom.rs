// ==========================================
// SqliteEntityStore - 班级
// ==========================================
// 说明: 分组键缺失分量以 NULL 绑定，使用 IS 比较
// ==========================================

use super::{ensure_affected, SqliteEntityStore, TS_FORMAT};
use crate::domain::{Classroom, ClassroomPopulation, GroupKey};
use crate::repository::entity_store::ClassroomStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

const CLASSROOM_COLUMNS: &str = "id, name, department_id, program_id, level_id, created_at";

/// 班级原始行（created_at 保持原始文本，解析失败时按字段错误上报）
struct ClassroomRow {
    id: String,
    name: String,
    department_id: Option<String>,
    program_id: Option<String>,
    level_id: Option<String>,
    created_at: String,
}

fn map_classroom(row: &Row<'_>) -> SqliteResult<ClassroomRow> {
    Ok(ClassroomRow {
        id: row.get(0)?,
        name: row.get(1)?,
        department_id: row.get(2)?,
        program_id: row.get(3)?,
        level_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl ClassroomRow {
    fn into_classroom(self) -> RepositoryResult<Classroom> {
        let created_at = NaiveDateTime::parse_from_str(&self.created_at, TS_FORMAT).map_err(|e| {
            RepositoryError::FieldValueError {
                field: "classroom.created_at".to_string(),
                message: format!("{} (id={}, value={})", e, self.id, self.created_at),
            }
        })?;
        Ok(Classroom {
            id: self.id,
            name: self.name,
            department_id: self.department_id,
            program_id: self.program_id,
            level_id: self.level_id,
            created_at,
        })
    }
}

impl ClassroomStore for SqliteEntityStore {
    fn list_classroom_populations(&self) -> RepositoryResult<Vec<ClassroomPopulation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.id, c.name, COUNT(s.id) AS member_count
            FROM classroom c
            LEFT JOIN student s ON s.classroom_id = c.id
            GROUP BY c.id
            ORDER BY member_count DESC, MIN(c.rowid) ASC
            "#,
        )?;

        let populations = stmt
            .query_map([], |row| {
                Ok(ClassroomPopulation {
                    classroom_id: row.get(0)?,
                    name: row.get(1)?,
                    member_count: row.get(2)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(populations)
    }

    fn count_classroom_members(&self, classroom_id: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM student WHERE classroom_id = ?1",
            params![classroom_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn find_classroom_by_key(
        &self,
        key: &GroupKey,
        exclude_id: &str,
    ) -> RepositoryResult<Option<Classroom>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM classroom \
             WHERE program_id IS ?1 AND department_id IS ?2 AND level_id IS ?3 AND id <> ?4 \
             ORDER BY rowid ASC LIMIT 1",
            CLASSROOM_COLUMNS
        );
        let row = conn
            .query_row(
                &sql,
                params![key.program_id, key.department_id, key.level_id, exclude_id],
                map_classroom,
            )
            .optional()?;
        row.map(ClassroomRow::into_classroom).transpose()
    }

    fn find_classroom_by_department_level(
        &self,
        department_id: Option<&str>,
        level_id: Option<&str>,
        exclude_id: &str,
    ) -> RepositoryResult<Option<Classroom>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM classroom \
             WHERE department_id IS ?1 AND level_id IS ?2 AND id <> ?3 \
             ORDER BY rowid ASC LIMIT 1",
            CLASSROOM_COLUMNS
        );
        let row = conn
            .query_row(&sql, params![department_id, level_id, exclude_id], map_classroom)
            .optional()?;
        row.map(ClassroomRow::into_classroom).transpose()
    }

    fn count_classrooms_for(
        &self,
        level_id: Option<&str>,
        department_id: Option<&str>,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM classroom WHERE level_id IS ?1 AND department_id IS ?2",
            params![level_id, department_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn create_classroom(&self, classroom: &Classroom) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            INSERT INTO classroom (id, name, department_id, program_id, level_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                classroom.id,
                classroom.name,
                classroom.department_id,
                classroom.program_id,
                classroom.level_id,
                classroom.created_at.format(TS_FORMAT).to_string(),
            ],
        )?;
        ensure_affected(affected, "classroom", &classroom.id)
    }
}
