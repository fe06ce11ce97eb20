use std::ops::Index;

use crate::model::entity::FileEntry;
use crate::model::ByteMeasure;

/// Ordered batch of files uploaded as one request.
///
/// Order matters: progress is apportioned front to back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileCollection {
    entries: Vec<FileEntry>,
    /// Index of the entry believed to be transferring.
    current: Option<usize>,
}

impl FileCollection {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self {
            entries,
            current: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    pub fn current(&self) -> Option<&FileEntry> {
        self.current.and_then(|index| self.entries.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Set every entry's uploaded size to 0 and forget the current entry.
    pub fn reset_progress(&mut self) {
        self.current = None;
        for entry in self.entries.iter_mut() {
            entry.set_uploaded_size(0);
        }
    }

    /// Apportion `loaded` cumulative bytes over the entries and return the
    /// index of the current entry.
    ///
    /// Each entry takes as much of the remainder as its size allows. The
    /// first entry that exhausts the remainder becomes current; entries after
    /// it get 0. When `loaded` covers everything the last entry is current.
    /// Every call recomputes from scratch.
    pub fn distribute(&mut self, loaded: u64) -> Option<usize> {
        let mut remaining = loaded;
        self.current = None;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            let uploaded = remaining.min(entry.size());
            entry.set_uploaded_size(uploaded);
            remaining -= uploaded;
            if remaining == 0 && self.current.is_none() {
                self.current = Some(index);
            }
        }
        if self.current.is_none() && !self.entries.is_empty() {
            self.current = Some(self.entries.len() - 1);
        }
        self.current
    }
}

impl ByteMeasure for FileCollection {
    fn size(&self) -> u64 {
        self.entries.iter().map(ByteMeasure::size).sum()
    }

    fn uploaded_size(&self) -> u64 {
        self.entries.iter().map(ByteMeasure::uploaded_size).sum()
    }
}

impl Index<usize> for FileCollection {
    type Output = FileEntry;

    fn index(&self, index: usize) -> &FileEntry {
        &self.entries[index]
    }
}

impl From<Vec<FileEntry>> for FileCollection {
    fn from(entries: Vec<FileEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<FileEntry> for FileCollection {
    fn from_iter<T: IntoIterator<Item = FileEntry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FileCollection {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
