//! File System Operations
//!
//! Staging, hashing and atomic promotion of image trees on local disk.

mod local;

pub use local::{
    collect_files, copy_file, copy_tree, ensure_within, hash_file, promote_dir, rel_string,
    remove_tree, write_atomic, CopyOutcome,
};
