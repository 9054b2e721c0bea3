//! Commit callback that remembers what it was given.

use std::sync::Arc;

use parking_lot::Mutex;

/// Collects every collection passed to a commit callback.
///
/// Clones share the same log.
#[derive(Debug)]
pub struct CommitRecorder<T> {
    commits: Arc<Mutex<Vec<Vec<T>>>>,
}

impl<T> Clone for CommitRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            commits: Arc::clone(&self.commits),
        }
    }
}

impl<T> Default for CommitRecorder<T> {
    fn default() -> Self {
        Self {
            commits: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone + 'static> CommitRecorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback to hand to the controller.
    pub fn callback(&self) -> impl FnMut(&[T]) + 'static {
        let commits = Arc::clone(&self.commits);
        move |items: &[T]| commits.lock().push(items.to_vec())
    }

    /// Number of commits received.
    pub fn count(&self) -> usize {
        self.commits.lock().len()
    }

    /// The most recent committed collection.
    pub fn last(&self) -> Option<Vec<T>> {
        self.commits.lock().last().cloned()
    }

    pub fn commits(&self) -> Vec<Vec<T>> {
        self.commits.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_commits() {
        let recorder = CommitRecorder::<u32>::new();
        let mut callback = recorder.callback();

        callback(&[1, 2]);
        callback(&[3]);

        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.last(), Some(vec![3]));
        assert_eq!(recorder.commits(), vec![vec![1, 2], vec![3]]);
    }
}
