//! Page read/write abstraction.
//!
//! The [`PageClient`] trait decouples orchestration from the page backend
//! (currently the `notion-cli` binary). Tests use scripted clients that return
//! canned page JSON and record updates without spawning processes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument};

use crate::io::config::{CliConfig, DATA_PLACEHOLDER, PAGE_ID_PLACEHOLDER};
use crate::io::process::run_command_with_timeout;

/// Abstraction over page backends.
pub trait PageClient {
    /// Fetch a page and return its raw JSON text.
    fn fetch_page(&self, page_id: &str) -> Result<String>;

    /// Replace the page's properties with the JSON object stored at `data_path`.
    fn update_page(&self, page_id: &str, data_path: &Path) -> Result<()>;
}

/// Client that shells out to the page CLI from the temp directory.
#[derive(Debug, Clone)]
pub struct CliPageClient {
    config: CliConfig,
    workdir: PathBuf,
}

impl CliPageClient {
    pub fn new(config: CliConfig, workdir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            workdir: workdir.into(),
        }
    }

    fn run(&self, label: &str, args: Vec<String>) -> Result<Vec<u8>> {
        let output = run_command_with_timeout(
            &self.config.program,
            &args,
            &self.workdir,
            self.config.timeout(),
            self.config.output_limit_bytes,
        )
        .with_context(|| format!("run {label}"))?;
        output.ensure_success(label)?;
        Ok(output.stdout)
    }
}

impl PageClient for CliPageClient {
    #[instrument(skip(self))]
    fn fetch_page(&self, page_id: &str) -> Result<String> {
        let args = expand_args(&self.config.fetch_args, page_id, "");
        let stdout = self.run("page fetch", args)?;
        let raw = String::from_utf8(stdout)
            .map_err(|err| anyhow!("page fetch returned non-utf8 output: {err}"))?;
        debug!(bytes = raw.len(), "page fetched");
        Ok(raw)
    }

    #[instrument(skip(self), fields(data_path = %data_path.display()))]
    fn update_page(&self, page_id: &str, data_path: &Path) -> Result<()> {
        let data = data_arg(data_path, &self.workdir);
        let args = expand_args(&self.config.update_args, page_id, &data);
        self.run("page update", args)?;
        info!("page updated");
        Ok(())
    }
}

/// Substitute `{page_id}` and `{data}` in each argument template.
pub fn expand_args(templates: &[String], page_id: &str, data: &str) -> Vec<String> {
    templates
        .iter()
        .map(|arg| {
            arg.replace(PAGE_ID_PLACEHOLDER, page_id)
                .replace(DATA_PLACEHOLDER, data)
        })
        .collect()
}

/// Data file argument: relative to the working directory when it lives there.
fn data_arg(data_path: &Path, workdir: &Path) -> String {
    data_path
        .strip_prefix(workdir)
        .unwrap_or(data_path)
        .to_string_lossy()
        .into_owned()
}
