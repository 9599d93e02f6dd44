pub mod tokenizer;
pub mod word_vectors;

pub use tokenizer::*;
pub use word_vectors::*;
