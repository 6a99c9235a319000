use crate::application::read_models::TreeSnapshot;
use crate::ports::outbound::TreeFormatter;
use crate::shared::Result;

/// JsonTreeFormatter adapter rendering the snapshot as nested JSON
///
/// Colors are written in their display form (`selected`, `#ff8000`, ...);
/// empty fields are omitted.
pub struct JsonTreeFormatter;

impl JsonTreeFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonTreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFormatter for JsonTreeFormatter {
    fn format(&self, snapshot: &TreeSnapshot) -> Result<String> {
        let mut json = serde_json::to_string_pretty(snapshot)?;
        json.push('\n');
        Ok(json)
    }
}
