mod util;
pub mod array_helpers;

pub use util::*;
pub use array_helpers::*;
