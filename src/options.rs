use serde::{Deserialize, Serialize};

use crate::mode::BindingMode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOptions {
    /// Use this dialect instead of detecting it from the document's
    /// declaration elements.
    #[serde(default)]
    pub dialect: Option<BindingMode>,
}

impl RenameOptions {
    pub fn with_dialect(dialect: BindingMode) -> Self {
        Self {
            dialect: Some(dialect),
        }
    }
}
