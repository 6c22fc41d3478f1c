//! Numbered console menu over the task store.
//!
//! # Responsibility
//! - Map menu choices 1-7 onto store operations.
//! - Print tasks as `id. title - category - due_date - priority - status`.
//!
//! # Invariants
//! - Store errors are printed and the loop continues.
//! - End of input ends the loop like choosing "Exit".

use crate::validators::Prompter;
use log::info;
use std::io::{self, BufRead, ErrorKind, Write};
use taskman_core::{NewTask, StoreError, Task, TaskStore, TaskUpdate};

const MENU_TEXT: &str = "
1. List tasks
2. Add task
3. Edit task
4. Mark task completed
5. Delete tasks
6. Search tasks
7. Exit";

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    List,
    Add,
    Edit,
    Complete,
    Delete,
    Search,
    Exit,
}

impl MenuAction {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::List),
            "2" => Some(Self::Add),
            "3" => Some(Self::Edit),
            "4" => Some(Self::Complete),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Search),
            "7" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'s, R, W> {
    store: &'s mut TaskStore,
    prompter: Prompter<R, W>,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(store: &'s mut TaskStore, input: R, output: W) -> Self {
        Self {
            store,
            prompter: Prompter::new(input, output),
        }
    }

    /// Runs until "Exit" is chosen or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                    writeln!(self.prompter.output())?;
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        writeln!(self.prompter.output(), "Bye")?;
        info!("event=menu_exit module=cli status=ok");
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Handles one choice. Returns `false` on exit.
    fn step(&mut self) -> io::Result<bool> {
        writeln!(self.prompter.output(), "{MENU_TEXT}")?;
        let choice = self.prompter.ask("Choose an action: ")?;
        let Some(action) = MenuAction::from_choice(&choice) else {
            writeln!(self.prompter.output(), "Unknown choice")?;
            return Ok(true);
        };

        match action {
            MenuAction::List => self.list()?,
            MenuAction::Add => self.add()?,
            MenuAction::Edit => self.edit()?,
            MenuAction::Complete => self.complete()?,
            MenuAction::Delete => self.delete()?,
            MenuAction::Search => self.search()?,
            MenuAction::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn list(&mut self) -> io::Result<()> {
        let category = self.prompter.ask("Category (leave blank for all): ")?;
        let tasks = self.store.list(Some(category.as_str()));
        write_tasks(self.prompter.output(), &tasks)
    }

    fn add(&mut self) -> io::Result<()> {
        let title = self.prompter.non_empty("Title: ")?;
        let description = self.prompter.non_empty("Description: ")?;
        let category = self.prompter.non_empty("Category: ")?;
        let due_date = self.prompter.date("Due date (YYYY-MM-DD): ")?;
        let priority = self.prompter.priority("Priority (Low/Medium/High): ")?;

        let new_task = NewTask::new(title.clone(), description, category, due_date, priority);
        match self.store.add(new_task) {
            Ok(id) => writeln!(self.prompter.output(), "Task '{title}' added with ID {id}"),
            Err(err) => report(self.prompter.output(), &err),
        }
    }

    fn edit(&mut self) -> io::Result<()> {
        if !self.ensure_tasks()? {
            return Ok(());
        }
        let id = self.prompter.existing_task_id(self.store, "Task ID: ")?;
        let update = TaskUpdate {
            title: Some(self.prompter.ask("New title (leave blank to skip): ")?),
            description: Some(self.prompter.ask("New description (leave blank to skip): ")?),
            category: Some(self.prompter.ask("New category (leave blank to skip): ")?),
            due_date: self
                .prompter
                .optional_date("New due date (YYYY-MM-DD) (leave blank to skip): ")?,
            priority: self
                .prompter
                .optional_priority("New priority (Low/Medium/High) (leave blank to skip): ")?,
            status: None,
        };

        match self.store.edit(id, &update) {
            Ok(()) => writeln!(self.prompter.output(), "Task with ID {id} updated"),
            Err(err) => report(self.prompter.output(), &err),
        }
    }

    fn complete(&mut self) -> io::Result<()> {
        if !self.ensure_tasks()? {
            return Ok(());
        }
        let id = self.prompter.existing_task_id(self.store, "Task ID: ")?;
        match self.store.mark_completed(id) {
            Ok(()) => writeln!(self.prompter.output(), "Task with ID {id} marked completed"),
            Err(err) => report(self.prompter.output(), &err),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let id = self
            .prompter
            .optional_task_id("Task ID (leave blank to delete by category): ")?;
        let category = match id {
            Some(_) => String::new(),
            None => self.prompter.ask("Category: ")?,
        };

        match self.store.delete(id, Some(category.as_str())) {
            Ok(removed) => writeln!(self.prompter.output(), "Deleted {removed} task(s)"),
            Err(err) => report(self.prompter.output(), &err),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let keyword = self.prompter.non_empty("Keyword: ")?;
        let tasks = self.store.search(&keyword);
        write_tasks(self.prompter.output(), &tasks)
    }

    fn ensure_tasks(&mut self) -> io::Result<bool> {
        if self.store.is_empty() {
            writeln!(self.prompter.output(), "No tasks yet")?;
            return Ok(false);
        }
        Ok(true)
    }
}

fn write_tasks<W: Write>(output: &mut W, tasks: &[&Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(output, "No tasks found");
    }
    for task in tasks {
        writeln!(output, "{task}")?;
    }
    Ok(())
}

fn report<W: Write>(output: &mut W, err: &StoreError) -> io::Result<()> {
    writeln!(output, "Error: {err}")
}

#[cfg(test)]
mod tests {
    use super::{Menu, MenuAction};
    use std::io::Cursor;
    use taskman_core::{NewTask, Priority, TaskStatus, TaskStore};
    use tempfile::TempDir;

    fn run(store: &mut TaskStore, script: &str) -> String {
        let mut menu = Menu::new(store, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        menu.run().expect("menu should run to completion");
        String::from_utf8(menu.into_output()).expect("output should be UTF-8")
    }

    fn empty_store() -> (TempDir, TaskStore) {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let store = TaskStore::load(dir.path().join("tasks.json")).expect("store should load");
        (dir, store)
    }

    #[test]
    fn choices_map_to_actions() {
        assert_eq!(MenuAction::from_choice(" 1 "), Some(MenuAction::List));
        assert_eq!(MenuAction::from_choice("7"), Some(MenuAction::Exit));
        assert_eq!(MenuAction::from_choice("8"), None);
    }

    #[test]
    fn add_then_list_prints_task_line() {
        let (_dir, mut store) = empty_store();
        let out = run(
            &mut store,
            "2\nMeeting\nDiscuss\nWork\n2024-02-30\n2024-11-30\nhigh\n1\n\n7\n",
        );

        assert!(out.contains("Task 'Meeting' added with ID 1"));
        assert!(out.contains("1. Meeting - Work - 2024-11-30 - High - Incomplete"));
        assert!(out.contains("valid YYYY-MM-DD"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn edit_skips_blank_answers() {
        let (_dir, mut store) = empty_store();
        store
            .add(NewTask::new("Meeting", "Discuss", "Work", "2024-11-30", Priority::High))
            .expect("add should succeed");

        let out = run(&mut store, "3\n1\nStandup\n\n\n\nlow\n7\n");

        assert!(out.contains("Task with ID 1 updated"));
        let task = store.get(1).expect("task should exist");
        assert_eq!(task.title, "Standup");
        assert_eq!(task.description, "Discuss");
        assert_eq!(task.due_date, "2024-11-30");
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn complete_and_search() {
        let (_dir, mut store) = empty_store();
        store
            .add(NewTask::new("Meeting", "Discuss", "Work", "2024-11-30", Priority::High))
            .expect("add should succeed");
        store
            .add(NewTask::new("Commute", "Drive", "Personal", "2024-11-30", Priority::Medium))
            .expect("add should succeed");

        let out = run(&mut store, "4\n9\n2\n6\ndrive\n7\n");

        assert!(out.contains("Task with ID 9 does not exist"));
        assert!(out.contains("Task with ID 2 marked completed"));
        assert!(out.contains("2. Commute - Personal - 2024-11-30 - Medium - Complete"));
        assert!(!out.contains("1. Meeting - "));
        assert_eq!(store.get(2).map(|task| task.status), Some(TaskStatus::Complete));
    }

    #[test]
    fn delete_by_category_and_usage_error() {
        let (_dir, mut store) = empty_store();
        store
            .add(NewTask::new("Meeting", "Discuss", "Work", "2024-11-30", Priority::High))
            .expect("add should succeed");
        store
            .add(NewTask::new("Commute", "Drive", "Personal", "2024-11-30", Priority::Medium))
            .expect("add should succeed");

        let out = run(&mut store, "5\n\n\n5\n\nWork\n7\n");

        assert!(out.contains("Error: specify a task id or a category to delete"));
        assert!(out.contains("Deleted 1 task(s)"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].id, 2);
    }

    #[test]
    fn edit_on_empty_store_does_not_prompt_for_id() {
        let (_dir, mut store) = empty_store();
        let out = run(&mut store, "3\n7\n");
        assert!(out.contains("No tasks yet"));
        assert!(!out.contains("Task ID: "));
    }

    #[test]
    fn unknown_choice_and_end_of_input() {
        let (_dir, mut store) = empty_store();
        let out = run(&mut store, "9\n");
        assert!(out.contains("Unknown choice"));
        assert!(out.ends_with("Bye\n"));
    }
}
