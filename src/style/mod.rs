//! Styling: per-view style values, the style scope seam and the default
//! stylesheet scope.

mod parser;
pub mod scope;
pub mod sheet;
mod tokenizer;
pub mod values;

pub use scope::StyleScope;
pub use sheet::SheetScope;
pub use values::{StyleValue, ValueSource, ViewStyle};
