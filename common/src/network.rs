//! Local network attachments and how they are enumerated and filtered.

pub mod attachment;
pub mod blacklist;
pub mod interface;
pub mod range;
