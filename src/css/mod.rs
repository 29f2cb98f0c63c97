//! CSS values: tokenizer, cursor, dimension parsing and computation.

pub mod tokenizer;
pub mod cursor;
pub mod dimension;
pub mod compute;
