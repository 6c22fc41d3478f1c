//! Case-insensitive keyword search over task title and description.

use crate::model::task::Task;

/// Prepared keyword, lowercased once per search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    needle: String,
}

impl KeywordQuery {
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.to_lowercase(),
        }
    }

    /// Returns whether `task` title or description contains the keyword.
    ///
    /// An empty keyword matches every task.
    pub fn matches(&self, task: &Task) -> bool {
        contains_folded(&task.title, &self.needle)
            || contains_folded(&task.description, &self.needle)
    }
}

/// Returns the tasks matching `keyword`, in their original order.
pub fn search_tasks<'a>(tasks: &'a [Task], keyword: &str) -> Vec<&'a Task> {
    let query = KeywordQuery::new(keyword);
    tasks.iter().filter(|task| query.matches(task)).collect()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
