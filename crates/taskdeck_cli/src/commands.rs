//! Command handlers for the taskdeck binary.
//!
//! # Responsibility
//! - Wire the parsed arguments to core service calls.
//! - Keep user-facing output (tables, warnings, summaries) in one place.

use crate::cli::{AddArgs, Cli, Commands, EditArgs, ExportArgs, ListArgs};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use taskdeck_core::db::open_db;
use taskdeck_core::{
    default_log_level, init_logging, is_near_due, near_due_tasks, MemoryBackend, RepoError,
    ReminderScheduler, SqliteTaskRepository, Status, Task, TaskDraft, TaskFilter, TaskPatch,
    TaskService, TaskValidationError,
};

pub fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        let log_dir = if log_dir.is_absolute() {
            log_dir.clone()
        } else {
            std::env::current_dir()
                .context("failed to resolve current directory for --log-dir")?
                .join(log_dir)
        };
        if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open task database `{}`", cli.db.display()))?;
    let repo = SqliteTaskRepository::try_new(&conn)?;
    let mut service = TaskService::load(repo)?;
    let mut scheduler = ReminderScheduler::new(MemoryBackend::granted());
    let now = Local::now().naive_local();

    match cli.command {
        Commands::List(args) => list(&service, &args, now),
        Commands::Add(args) => add(&mut service, &mut scheduler, args, now)?,
        Commands::Edit(args) => edit(&mut service, args)?,
        Commands::Done { id } => done(&mut service, id)?,
        Commands::Rm { id } => remove(&mut service, &mut scheduler, id)?,
        Commands::Move { from, to } => reorder(&service, from, to, now)?,
        Commands::Stats => stats(&service),
        Commands::Export(args) => export(&service, &args)?,
        Commands::Import { path } => import(&mut service, &path)?,
    }

    Ok(())
}

fn list(
    service: &TaskService<SqliteTaskRepository<'_>>,
    args: &ListArgs,
    now: NaiveDateTime,
) {
    let near_due = near_due_tasks(service.tasks(), now).len();
    if near_due > 0 {
        println!("You have {near_due} task(s) due within the next 24 hours\n");
    }

    let filter = TaskFilter {
        category: args.category,
        priority: args.priority,
        status: args.status,
        search: args.search.clone(),
    };
    let tasks = service.filter(&filter);
    print_table(&tasks, now);
}

fn add(
    service: &mut TaskService<SqliteTaskRepository<'_>>,
    scheduler: &mut ReminderScheduler<MemoryBackend>,
    args: AddArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let draft = TaskDraft {
        title: args.title,
        description: args.description,
        category: args.category.unwrap_or_default(),
        priority: args.priority.unwrap_or_default(),
        status: args.status.unwrap_or_default(),
        due_date: args.date,
        due_time: args.time,
        notes: args.notes,
    };

    let task = match service.create(draft) {
        Ok(task) => task,
        Err(RepoError::Validation(TaskValidationError::BlankTitle)) => {
            bail!("a title is required");
        }
        Err(err) => return Err(err.into()),
    };
    println!("Task created: {} ({})", task.title, task.id);

    if scheduler.schedule_for(&task, now) {
        println!("Reminder scheduled one hour before the due time");
    }

    Ok(())
}

fn edit(service: &mut TaskService<SqliteTaskRepository<'_>>, args: EditArgs) -> Result<()> {
    let patch = TaskPatch {
        title: args.title,
        description: args.description,
        category: args.category,
        priority: args.priority,
        status: args.status,
        due_date: schedule_field(args.date, args.clear_date),
        due_time: schedule_field(args.time, args.clear_time),
        notes: args.notes,
    };

    if patch == TaskPatch::default() {
        bail!("nothing to change; pass at least one field flag");
    }

    match service.update(args.id, &patch) {
        Ok(Some(task)) => println!("Task updated: {} ({})", task.title, task.id),
        Ok(None) => println!("No task with id {} — nothing changed", args.id),
        Err(RepoError::Validation(TaskValidationError::BlankTitle)) => {
            bail!("a title is required");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn done(service: &mut TaskService<SqliteTaskRepository<'_>>, id: i64) -> Result<()> {
    match service.get(id) {
        Some(task) if task.is_completed() => {
            println!("Task is already completed");
            return Ok(());
        }
        Some(_) => {}
        None => {
            println!("No task with id {id} — nothing changed");
            return Ok(());
        }
    }

    service.update(id, &TaskPatch::status(Status::Completed))?;
    println!("Task completed");
    Ok(())
}

fn remove(
    service: &mut TaskService<SqliteTaskRepository<'_>>,
    scheduler: &mut ReminderScheduler<MemoryBackend>,
    id: i64,
) -> Result<()> {
    scheduler.cancel(id);
    if service.delete(id)? {
        println!("Task deleted");
    } else {
        println!("No task with id {id} — nothing changed");
    }
    Ok(())
}

fn reorder(
    service: &TaskService<SqliteTaskRepository<'_>>,
    from: usize,
    to: usize,
    now: NaiveDateTime,
) -> Result<()> {
    let mut view: Vec<Task> = service.tasks().to_vec();
    splice(&mut view, from, to)?;
    print_table(&view, now);
    println!("\nOrder updated (display only, not persisted)");
    Ok(())
}

fn stats(service: &TaskService<SqliteTaskRepository<'_>>) {
    let stats = service.stats();
    println!("total:              {}", stats.total);
    println!("completed:          {}", stats.completed);
    println!("pending:            {}", stats.pending);
    println!("high priority open: {}", stats.high_priority_open);
}

fn export(service: &TaskService<SqliteTaskRepository<'_>>, args: &ExportArgs) -> Result<()> {
    let payload = service.export_json()?;

    if args.stdout {
        println!("{payload}");
        return Ok(());
    }

    let path = args.path.clone().unwrap_or_else(|| {
        format!("taskdeck-backup-{}.json", Local::now().format("%Y-%m-%d")).into()
    });
    std::fs::write(&path, &payload)
        .with_context(|| format!("failed to write backup `{}`", path.display()))?;
    println!("Backup written to {}", path.display());
    Ok(())
}

fn import(
    service: &mut TaskService<SqliteTaskRepository<'_>>,
    path: &std::path::Path,
) -> Result<()> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;

    let count = service.import_json(&payload)?;
    if count == 0 {
        bail!("import failed: no tasks were imported");
    }
    println!("{count} task(s) imported");
    Ok(())
}

/// Client-side list splice: removes the item at `from` and reinserts it at
/// `to`. Positions are 1-based as printed by the list view.
fn splice(view: &mut Vec<Task>, from: usize, to: usize) -> Result<()> {
    let len = view.len();
    if from == 0 || to == 0 || from > len || to > len {
        bail!("positions must be between 1 and {len}");
    }
    let item = view.remove(from - 1);
    view.insert(to - 1, item);
    Ok(())
}

fn print_table(tasks: &[Task], now: NaiveDateTime) {
    if tasks.is_empty() {
        println!("No tasks match");
        return;
    }

    println!(
        "  {:<15} {:<32} {:<10} {:<8} {:<12} DUE",
        "ID", "TITLE", "CATEGORY", "PRIORITY", "STATUS"
    );
    for task in tasks {
        let due = match (task.due_date, task.due_time) {
            (Some(date), Some(time)) => format!("{date} {}", time.format("%H:%M")),
            (Some(date), None) => date.to_string(),
            _ => "-".to_string(),
        };
        let flag = if is_near_due(task, now) { "!" } else { " " };
        println!(
            "{flag} {:<15} {:<32} {:<10} {:<8} {:<12} {due}",
            task.id, task.title, task.category, task.priority, task.status
        );
    }
}

fn schedule_field<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}
