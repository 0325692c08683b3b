/// Formatter adapters for the supported graph output formats
mod json_formatter;
mod markdown_formatter;

#[cfg(test)]
pub(crate) mod fixtures;

pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
