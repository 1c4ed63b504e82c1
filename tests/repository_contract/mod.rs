//! Behaviour every `TaskRepository` adapter must share.
//!
//! Each check tags its tasks with a fresh token and restricts every listing
//! to that token through the search filter, so checks can run in parallel
//! against a shared database. Tasks are deleted again before a check
//! returns.

use chrono::{DateTime, TimeZone, Utc};
use collabtask::task::{
    domain::{
        PersistedTaskData, Priority, SortDirection, SortField, Subject, Task, TaskFilter,
        TaskId, TaskOrder, TaskQuery, TaskSort, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use eyre::{WrapErr, ensure};
use uuid::Uuid;

/// Result type for contract checks.
pub type CheckResult = eyre::Result<()>;

/// Builds stored tasks with whole-second timestamps, which every backend
/// round-trips exactly.
pub struct TaskFactory {
    token: String,
    created: Vec<TaskId>,
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            created: Vec::new(),
        }
    }
}

impl TaskFactory {
    /// Token prefixed to every title this factory builds.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Builds a task titled `<token> <title>`, created `minute` minutes
    /// past a fixed hour, and records it for cleanup.
    pub fn build(&mut self, title: &str, minute: u32) -> Task {
        let id = TaskId::new();
        self.created.push(id);
        let at = instant(minute);
        Task::from_persisted(PersistedTaskData {
            id,
            title: format!("{} {title}", self.token),
            description: format!("notes for {title}"),
            completed: false,
            priority: Priority::Medium,
            due_date: None,
            category: "general".to_owned(),
            subject: Subject::General,
            status: TaskStatus::ToDo,
            order: TaskOrder::default(),
            created_at: at,
            updated_at: at,
        })
    }

    /// Lists only this factory's tasks with the given sort.
    pub fn query(&self, sort: TaskSort) -> TaskQuery {
        TaskQuery::new(TaskFilter::default().with_search(self.token.clone()), sort)
    }

    /// Deletes every task this factory built.
    pub async fn cleanup(self, repository: &dyn TaskRepository) -> CheckResult {
        for id in self.created {
            repository.delete(id).await.wrap_err("cleanup delete")?;
        }
        Ok(())
    }
}

fn instant(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 8, minute, 0)
        .single()
        .expect("fixed instant is unambiguous")
}

fn with(task: &Task, edit: impl FnOnce(&mut PersistedTaskData)) -> Task {
    let mut data = PersistedTaskData {
        id: task.id(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        completed: task.completed(),
        priority: task.priority(),
        due_date: task.due_date(),
        category: task.category().to_owned(),
        subject: task.subject(),
        status: task.status(),
        order: task.order(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    };
    edit(&mut data);
    Task::from_persisted(data)
}

fn short_titles(tasks: &[Task], token: &str) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.title().trim_start_matches(token).trim().to_owned())
        .collect()
}

/// Stored tasks read back unchanged, and a second store of the same ID is
/// refused.
pub async fn store_and_find_round_trip(repository: &dyn TaskRepository) -> CheckResult {
    let mut factory = TaskFactory::default();
    let task = with(&factory.build("essay", 0), |data| {
        data.priority = Priority::High;
        data.subject = Subject::SecondLanguage;
        data.status = TaskStatus::InProgress;
        data.order = TaskOrder::from_index(4);
        data.due_date = Some(instant(30));
        data.category = "homework".to_owned();
    });

    repository.store(&task).await.wrap_err("store task")?;
    let found = repository.find_by_id(task.id()).await.wrap_err("find task")?;
    ensure!(found.as_ref() == Some(&task), "round trip changed the task: {found:?}");

    let duplicate = repository.store(&task).await;
    ensure!(
        matches!(duplicate, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected duplicate error, got {duplicate:?}"
    );

    factory.cleanup(repository).await
}

/// Updates overwrite every field, including clearing the due date, and
/// updating an unknown ID is reported.
pub async fn update_overwrites_and_reports_missing(repository: &dyn TaskRepository) -> CheckResult {
    let mut factory = TaskFactory::default();
    let original = with(&factory.build("lab", 0), |data| {
        data.due_date = Some(instant(10));
    });
    repository.store(&original).await.wrap_err("store task")?;

    let changed = with(&original, |data| {
        data.due_date = None;
        data.completed = true;
        data.status = TaskStatus::Completed;
        data.updated_at = instant(5);
    });
    repository.update(&changed).await.wrap_err("update task")?;
    let found = repository.find_by_id(original.id()).await.wrap_err("find task")?;
    ensure!(found.as_ref() == Some(&changed), "update not applied: {found:?}");

    let stranger = factory.build("stranger", 0);
    let missing = repository.update(&stranger).await;
    ensure!(
        matches!(missing, Err(TaskRepositoryError::NotFound(_))),
        "expected not found, got {missing:?}"
    );

    factory.cleanup(repository).await
}

/// Delete reports whether a task was removed.
pub async fn delete_reports_removal(repository: &dyn TaskRepository) -> CheckResult {
    let mut factory = TaskFactory::default();
    let task = factory.build("reading", 0);
    repository.store(&task).await.wrap_err("store task")?;

    ensure!(repository.delete(task.id()).await?, "first delete should remove");
    ensure!(!repository.delete(task.id()).await?, "second delete should find nothing");
    let found = repository.find_by_id(task.id()).await?;
    ensure!(found.is_none(), "deleted task still readable");

    factory.cleanup(repository).await
}

/// Enumerated fields sort by rank and missing due dates sort lowest.
pub async fn sorts_by_rank_and_due_date(repository: &dyn TaskRepository) -> CheckResult {
    let mut factory = TaskFactory::default();
    let high = with(&factory.build("high", 0), |data| {
        data.priority = Priority::High;
        data.due_date = Some(instant(50));
    });
    let low = with(&factory.build("low", 1), |data| {
        data.priority = Priority::Low;
    });
    let medium = with(&factory.build("medium", 2), |data| {
        data.priority = Priority::Medium;
        data.due_date = Some(instant(40));
    });
    for task in [&high, &low, &medium] {
        repository.store(task).await.wrap_err("store task")?;
    }
    let token = factory.token().to_owned();

    let by_priority = repository
        .find(&factory.query(TaskSort::new(SortField::Priority, SortDirection::Ascending)))
        .await?;
    ensure!(
        short_titles(&by_priority, &token) == ["low", "medium", "high"],
        "priority order wrong: {:?}",
        short_titles(&by_priority, &token)
    );

    let due_ascending = repository
        .find(&factory.query(TaskSort::new(SortField::DueDate, SortDirection::Ascending)))
        .await?;
    ensure!(
        short_titles(&due_ascending, &token) == ["low", "medium", "high"],
        "due date ascending wrong: {:?}",
        short_titles(&due_ascending, &token)
    );

    let due_descending = repository
        .find(&factory.query(TaskSort::new(SortField::DueDate, SortDirection::Descending)))
        .await?;
    ensure!(
        short_titles(&due_descending, &token) == ["high", "medium", "low"],
        "due date descending wrong: {:?}",
        short_titles(&due_descending, &token)
    );

    let newest = repository.find(&factory.query(TaskSort::default())).await?;
    ensure!(
        short_titles(&newest, &token) == ["medium", "low", "high"],
        "default order wrong: {:?}",
        short_titles(&newest, &token)
    );

    factory.cleanup(repository).await
}

/// Text sorts by code point, so uppercase letters precede lowercase ones,
/// and tasks that tie on the sort key keep the order they were stored in.
pub async fn sorts_text_by_code_point(repository: &dyn TaskRepository) -> CheckResult {
    let mut factory = TaskFactory::default();
    let apple = factory.build("apple", 0);
    let banana = factory.build("Banana", 1);
    let cherry = factory.build("cherry", 2);
    for task in [&apple, &banana, &cherry] {
        repository.store(task).await.wrap_err("store task")?;
    }
    let token = factory.token().to_owned();

    let by_title = repository
        .find(&factory.query(TaskSort::new(SortField::Title, SortDirection::Ascending)))
        .await?;
    ensure!(
        short_titles(&by_title, &token) == ["Banana", "apple", "cherry"],
        "title order wrong: {:?}",
        short_titles(&by_title, &token)
    );

    let tied = repository
        .find(&factory.query(TaskSort::new(SortField::Category, SortDirection::Descending)))
        .await?;
    ensure!(
        short_titles(&tied, &token) == ["apple", "Banana", "cherry"],
        "ties left store order: {:?}",
        short_titles(&tied, &token)
    );

    factory.cleanup(repository).await
}

/// Filters combine, and search treats wildcard characters literally and
/// ignores case.
pub async fn filters_and_literal_search(repository: &dyn TaskRepository) -> CheckResult {
    let mut factory = TaskFactory::default();
    let discount = factory.build("50% OFF", 0);
    let near_miss = factory.build("500 off", 1);
    let history = with(&factory.build("history", 2), |data| {
        data.subject = Subject::History;
        data.status = TaskStatus::Completed;
    });
    for task in [&discount, &near_miss, &history] {
        repository.store(task).await.wrap_err("store task")?;
    }
    let token = factory.token().to_owned();

    let literal = TaskQuery::new(
        TaskFilter::default().with_search(format!("{} 50% off", token.to_uppercase())),
        TaskSort::default(),
    );
    let found = repository.find(&literal).await?;
    ensure!(
        found.iter().map(Task::id).collect::<Vec<_>>() == [discount.id()],
        "literal search wrong: {:?}",
        short_titles(&found, &token)
    );

    let filtered = TaskQuery::new(
        TaskFilter::default()
            .with_search(token.clone())
            .with_subject(Subject::History)
            .with_status(TaskStatus::Completed),
        TaskSort::default(),
    );
    let matching = repository.find(&filtered).await?;
    ensure!(
        matching.iter().map(Task::id).collect::<Vec<_>>() == [history.id()],
        "filters wrong: {:?}",
        short_titles(&matching, &token)
    );

    let unknown = repository.find_by_id(TaskId::new()).await?;
    ensure!(unknown.is_none(), "unknown ID should read as None");
    factory.cleanup(repository).await
}
