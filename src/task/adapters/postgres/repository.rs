//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{TaskRecord, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        PersistedTaskData, Priority, SortDirection, SortField, Subject, Task, TaskId, TaskOrder,
        TaskQuery, TaskSort, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Text;
use thiserror::Error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema for the `tasks` table.
pub const TASKS_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

type BoxedTaskQuery = tasks::BoxedQuery<'static, Pg>;

/// A stored column holds a value the domain does not recognise.
#[derive(Debug, Error)]
#[error("invalid persisted {column} value: {value}")]
struct InvalidColumnValue {
    column: &'static str,
    value: i16,
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table and its indexes when missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when no connection can be
    /// obtained or the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(TASKS_SCHEMA_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let record = to_record(task);

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&record)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let statement = build_list_query(query);
        self.run_blocking(move |connection| {
            let rows = statement
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn build_list_query(query: &TaskQuery) -> BoxedTaskQuery {
    let filter = query.filter();
    let mut statement = tasks::table.into_boxed::<Pg>();

    if let Some(subject) = filter.subject() {
        statement = statement.filter(tasks::subject.eq(subject.rank()));
    }
    if let Some(status) = filter.status() {
        statement = statement.filter(tasks::status.eq(status.rank()));
    }
    if let Some(priority) = filter.priority() {
        statement = statement.filter(tasks::priority.eq(priority.rank()));
    }
    if let Some(search) = filter.search() {
        let pattern = format!("%{}%", escape_like(search));
        statement = statement.filter(
            tasks::title
                .ilike(pattern.clone())
                .or(tasks::description.ilike(pattern)),
        );
    }

    apply_sort(statement, query.sort())
}

/// Orders by one column; `NULL` sorts as the smallest value.
macro_rules! order_by_column {
    ($statement:expr, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Ascending => $statement.order_by($column.asc().nulls_first()),
            SortDirection::Descending => $statement.order_by($column.desc().nulls_last()),
        }
    };
}

fn apply_sort(statement: BoxedTaskQuery, sort: TaskSort) -> BoxedTaskQuery {
    let direction = sort.direction;
    let ordered = match sort.field {
        SortField::CreatedAt => order_by_column!(statement, tasks::created_at, direction),
        SortField::UpdatedAt => order_by_column!(statement, tasks::updated_at, direction),
        SortField::Title => order_by_column!(statement, code_point("title"), direction),
        SortField::Description => {
            order_by_column!(statement, code_point("description"), direction)
        }
        SortField::DueDate => order_by_column!(statement, tasks::due_date, direction),
        SortField::Priority => order_by_column!(statement, tasks::priority, direction),
        SortField::Subject => order_by_column!(statement, tasks::subject, direction),
        SortField::Category => order_by_column!(statement, code_point("category"), direction),
        SortField::Status => order_by_column!(statement, tasks::status, direction),
        SortField::Order => order_by_column!(statement, tasks::board_order, direction),
        SortField::Completed => order_by_column!(statement, tasks::completed, direction),
    };
    ordered
        .then_order_by(tasks::created_at.asc())
        .then_order_by(tasks::id.asc())
}

/// Text column compared byte-wise, which for UTF-8 is code point order.
fn code_point(column: &str) -> SqlLiteral<Text> {
    sql::<Text>(&format!("tasks.{column} COLLATE \"C\""))
}

/// Escapes `LIKE` metacharacters so search text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_record(task: &Task) -> TaskRecord {
    TaskRecord {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        completed: task.completed(),
        priority: task.priority().rank(),
        due_date: task.due_date(),
        category: task.category().to_owned(),
        subject: task.subject().rank(),
        status: task.status().rank(),
        board_order: task.order().to_persisted(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        completed,
        priority,
        due_date,
        category,
        subject,
        status,
        board_order,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        completed,
        priority: Priority::from_rank(priority).ok_or_else(|| invalid("priority", priority))?,
        due_date,
        category,
        subject: Subject::from_rank(subject).ok_or_else(|| invalid("subject", subject))?,
        status: TaskStatus::from_rank(status).ok_or_else(|| invalid("status", status))?,
        order: TaskOrder::new(i64::from(board_order)).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn invalid(column: &'static str, value: i16) -> TaskRepositoryError {
    TaskRepositoryError::persistence(InvalidColumnValue { column, value })
}
