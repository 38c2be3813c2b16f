//! User patch files
//!
//! A patch file is a JSON array of patches for one dialect. It is the only
//! persisted record of user intent and is always rewritten wholesale.

mod storage;

pub use storage::{encode_patches, load_patches, save_patches};
