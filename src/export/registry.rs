use std::collections::HashSet;

/// Filenames already claimed during one run.
#[derive(Debug, Default)]
pub struct FilenameRegistry {
    seen: HashSet<String>,
}

impl FilenameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `filename`. Returns `false` if it was already claimed.
    pub fn insert(&mut self, filename: &str) -> bool {
        if self.seen.contains(filename) {
            return false;
        }
        self.seen.insert(filename.to_string())
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.seen.contains(filename)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
