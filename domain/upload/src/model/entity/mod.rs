mod file_collection;
mod file_entry;

#[rustfmt::skip]
pub use {
    file_collection::FileCollection,
    file_entry::FileEntry,
};
