// ==========================================
// SqliteEntityStore - 系部/年级/专业
// ==========================================

use super::{ensure_affected, SqliteEntityStore};
use crate::domain::{Department, Level, Program};
use crate::repository::entity_store::OrgStore;
use crate::repository::error::RepositoryResult;
use rusqlite::{params, OptionalExtension, Result as SqliteResult, Row};

const PROGRAM_COLUMNS: &str = "id, name, description, department_id, level_id";

fn map_program(row: &Row<'_>) -> SqliteResult<Program> {
    Ok(Program {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        department_id: row.get(3)?,
        level_id: row.get(4)?,
    })
}

fn map_department(row: &Row<'_>) -> SqliteResult<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

impl SqliteEntityStore {
    /// 按条件查询首个专业
    fn first_program(
        &self,
        where_clause: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> RepositoryResult<Option<Program>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM program WHERE {} ORDER BY rowid ASC LIMIT 1",
            PROGRAM_COLUMNS, where_clause
        );
        let program = conn.query_row(&sql, args, map_program).optional()?;
        Ok(program)
    }

    /// 按条件查询专业列表
    fn list_programs(
        &self,
        where_clause: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> RepositoryResult<Vec<Program>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM program WHERE {} ORDER BY rowid ASC",
            PROGRAM_COLUMNS, where_clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let programs = stmt
            .query_map(args, map_program)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(programs)
    }
}

impl OrgStore for SqliteEntityStore {
    fn list_departments(&self) -> RepositoryResult<Vec<Department>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, description FROM department ORDER BY rowid ASC")?;
        let departments = stmt
            .query_map([], map_department)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(departments)
    }

    fn find_department(&self, department_id: &str) -> RepositoryResult<Option<Department>> {
        let conn = self.get_conn()?;
        let department = conn
            .query_row(
                "SELECT id, name, description FROM department WHERE id = ?1",
                params![department_id],
                map_department,
            )
            .optional()?;
        Ok(department)
    }

    fn find_level(&self, level_id: &str) -> RepositoryResult<Option<Level>> {
        let conn = self.get_conn()?;
        let level = conn
            .query_row(
                "SELECT id, level_name FROM level WHERE id = ?1",
                params![level_id],
                |row| {
                    Ok(Level {
                        id: row.get(0)?,
                        level_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(level)
    }

    fn find_program(&self, program_id: &str) -> RepositoryResult<Option<Program>> {
        self.first_program("id = ?1", &[&program_id])
    }

    fn list_all_programs(&self) -> RepositoryResult<Vec<Program>> {
        self.list_programs("1 = 1", &[])
    }

    fn count_programs(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM program", [], |row| row.get(0))?;
        Ok(count)
    }

    fn count_programs_missing_department(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM program WHERE department_id IS NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn list_programs_missing_department(&self) -> RepositoryResult<Vec<Program>> {
        self.list_programs("department_id IS NULL", &[])
    }

    fn find_program_by_department_level(
        &self,
        department_id: &str,
        level_id: &str,
    ) -> RepositoryResult<Option<Program>> {
        self.first_program(
            "department_id = ?1 AND level_id = ?2",
            &[&department_id, &level_id],
        )
    }

    fn find_program_by_department(&self, department_id: &str) -> RepositoryResult<Option<Program>> {
        self.first_program("department_id = ?1", &[&department_id])
    }

    fn list_programs_by_level(&self, level_id: &str) -> RepositoryResult<Vec<Program>> {
        self.list_programs("level_id = ?1", &[&level_id])
    }

    fn find_program_by_level(&self, level_id: &str) -> RepositoryResult<Option<Program>> {
        self.first_program("level_id = ?1", &[&level_id])
    }

    fn update_program_department(
        &self,
        program_id: &str,
        department_id: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE program SET department_id = ?1 WHERE id = ?2",
            params![department_id, program_id],
        )?;
        ensure_affected(affected, "program", program_id)
    }
}
