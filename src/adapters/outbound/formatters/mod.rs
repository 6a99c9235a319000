/// Formatter adapters rendering a tree snapshot
mod json_formatter;
mod text_formatter;

pub use json_formatter::JsonTreeFormatter;
pub use text_formatter::TextTreeFormatter;
