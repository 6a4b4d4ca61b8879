// ==========================================
// SqliteEntityStore - 学生
// ==========================================

use super::{ensure_affected, SqliteEntityStore};
use crate::domain::{Student, StudentProfile};
use crate::repository::entity_store::StudentStore;
use crate::repository::error::RepositoryResult;
use rusqlite::{params, Result as SqliteResult, Row};

fn map_student(row: &Row<'_>) -> SqliteResult<Student> {
    Ok(Student {
        id: row.get(0)?,
        department_id: row.get(1)?,
        classroom_id: row.get(2)?,
        program_id: row.get(3)?,
        level_id: row.get(4)?,
    })
}

impl SqliteEntityStore {
    fn count_students_where(&self, where_clause: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT COUNT(*) FROM student WHERE {}", where_clause);
        let count = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    fn list_students_where(&self, where_clause: &str, arg: &str) -> RepositoryResult<Vec<Student>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT id, department_id, classroom_id, program_id, level_id \
             FROM student WHERE {} ORDER BY rowid ASC",
            where_clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let students = stmt
            .query_map(params![arg], map_student)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(students)
    }
}

impl StudentStore for SqliteEntityStore {
    fn count_students(&self) -> RepositoryResult<i64> {
        self.count_students_where("1 = 1")
    }

    fn count_students_missing_program(&self) -> RepositoryResult<i64> {
        self.count_students_where("program_id IS NULL")
    }

    fn list_students_missing_program(&self) -> RepositoryResult<Vec<StudentProfile>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                s.id, s.department_id, s.classroom_id, s.program_id, s.level_id,
                c.name, c.department_id
            FROM student s
            LEFT JOIN classroom c ON c.id = s.classroom_id
            WHERE s.program_id IS NULL
            ORDER BY s.rowid ASC
            "#,
        )?;

        let profiles = stmt
            .query_map([], |row| {
                Ok(StudentProfile {
                    student: map_student(row)?,
                    classroom_name: row.get(5)?,
                    classroom_department_id: row.get(6)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(profiles)
    }

    fn list_students_by_program(&self, program_id: &str) -> RepositoryResult<Vec<Student>> {
        self.list_students_where("program_id = ?1", program_id)
    }

    fn list_students_in_classroom(&self, classroom_id: &str) -> RepositoryResult<Vec<Student>> {
        self.list_students_where("classroom_id = ?1", classroom_id)
    }

    fn update_student_program(&self, student_id: &str, program_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE student SET program_id = ?1 WHERE id = ?2",
            params![program_id, student_id],
        )?;
        ensure_affected(affected, "student", student_id)
    }

    fn update_student_classroom(
        &self,
        student_id: &str,
        classroom_id: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE student SET classroom_id = ?1 WHERE id = ?2",
            params![classroom_id, student_id],
        )?;
        ensure_affected(affected, "student", student_id)
    }
}
