//! Domain settings passed explicitly to the code that needs them.
//!
//! The API loads these from the environment at startup; tests construct
//! them directly.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::shortcode::ShortCodeConfig;
use crate::uploads::UploadLimits;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub short_code: ShortCodeConfig,
    pub uploads: UploadLimits,
}

impl AppSettings {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.short_code.validate()?;
        self.uploads.validate()
    }
}
