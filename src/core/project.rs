use crate::config::LiveLinkConfig;
use crate::core::live_link::send_to_blender;
use crate::core::tree::generate_script_header;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Accumulates one Python script out of several tree builds and raw snippets.
pub struct BlenderProject {
    script: String,
}

impl Default for BlenderProject {
    fn default() -> Self {
        Self::new()
    }
}

impl BlenderProject {
    pub fn new() -> Self {
        Self {
            script: generate_script_header(),
        }
    }

    pub fn add_script(mut self, script: &str) -> Self {
        self.script.push_str(script);
        self
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn into_script(self) -> String {
        self.script
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.script).map_err(|source| Error::WriteScript {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote script to {}", path.display());
        Ok(())
    }

    pub fn send(&self, link: &LiveLinkConfig) -> Result<()> {
        log::trace!("{}", self.script);
        send_to_blender(&self.script, link)
    }
}
