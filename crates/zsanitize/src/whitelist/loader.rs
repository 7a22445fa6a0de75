//! JSON loading and saving for [`Whitelist`]
//!
//! ```json
//! {
//!     "stripWhitespace": true,
//!     "stripComments": false,
//!     "elements": { "a": ["href", "title"], "p": [] }
//! }
//! ```
//!
//! Every key is optional. Unknown keys are ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::whitelist::Whitelist;

impl Whitelist {
    /// Parse a whitelist from JSON text
    pub fn from_json_str(s: &str) -> Result<Self> {
        let whitelist: Self = serde_json::from_str(s)?;
        debug!(elements = whitelist.len(), "loaded whitelist");
        Ok(whitelist)
    }

    /// Parse a whitelist from JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let whitelist: Self = serde_json::from_slice(bytes)?;
        debug!(elements = whitelist.len(), "loaded whitelist");
        Ok(whitelist)
    }

    /// Parse a whitelist from a JSON stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let whitelist: Self = serde_json::from_reader(reader)?;
        debug!(elements = whitelist.len(), "loaded whitelist");
        Ok(whitelist)
    }

    /// Load a whitelist from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading whitelist");
        let file = File::open(path).map_err(|err| {
            Error::with_message(
                ErrorKind::Io,
                format!("failed to open {}: {err}", path.display()),
            )
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serialize to compact JSON in the same shape the loaders accept
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
