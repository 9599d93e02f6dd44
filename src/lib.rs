/// Folder
pub mod dataloader;
pub mod text;
pub mod util;

/// Files
pub mod config;
pub mod err;

pub mod prelude {
    pub use crate::config::IteratorCfg;
    pub use crate::dataloader::{epoch, DataLoader, SequenceBatch, TweetIterator};
    pub use crate::err::LoaderError;
    pub use crate::text::{WordVectorTable, WordVectors};
}
