pub mod databatch;
pub mod dataloader;

pub mod manifest;
pub mod corpus;
pub mod cursor;
pub mod tweet_iterator;
pub mod prefetch;
pub mod protobuf;

pub use databatch::*;
pub use dataloader::*;
pub use manifest::*;
pub use corpus::*;
pub use cursor::*;
pub use tweet_iterator::*;
pub use prefetch::*;
pub use protobuf::*;
