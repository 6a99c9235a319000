use crate::adapters::outbound::formatters::{JsonTreeFormatter, TextTreeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::TreeFormatter;

/// Rendering options for the text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOptions {
    /// Paint labels in their annotation color
    pub colored: bool,
    /// Prefix labels with their icon name
    pub icons: bool,
}

/// Factory for creating tree formatters
///
/// Picks the formatter adapter for an output format so the CLI never names
/// concrete adapters.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use pkg_explorer::application::dto::OutputFormat;
    /// use pkg_explorer::application::factories::{FormatterFactory, TextOptions};
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, TextOptions::default());
    /// ```
    pub fn create(format: OutputFormat, options: TextOptions) -> Box<dyn TreeFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextTreeFormatter::new(options.colored, options.icons)),
            OutputFormat::Json => Box::new(JsonTreeFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Rendering text tree...",
            OutputFormat::Json => "📝 Rendering JSON tree...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{SnapshotMetadata, TreeNodeView, TreeSnapshot};

    fn snapshot() -> TreeSnapshot {
        TreeSnapshot {
            metadata: SnapshotMetadata::new(None, None, true, 1),
            roots: vec![TreeNodeView {
                label: "workset".to_string(),
                icon: Some("briefcase".to_string()),
                color: None,
                truncated: false,
                children: Vec::new(),
            }],
        }
    }

    #[test]
    fn test_create_text_formatter() {
        let options = TextOptions {
            colored: false,
            icons: true,
        };
        let output = FormatterFactory::create(OutputFormat::Text, options)
            .format(&snapshot())
            .unwrap();
        assert_eq!(output, "[briefcase] workset\n");
    }

    #[test]
    fn test_create_json_formatter() {
        let output = FormatterFactory::create(OutputFormat::Json, TextOptions::default())
            .format(&snapshot())
            .unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&output).is_ok());
    }

    #[test]
    fn test_progress_message() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Rendering JSON tree..."
        );
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Text),
            "📝 Rendering text tree..."
        );
    }
}
