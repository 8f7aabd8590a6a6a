//! Orchestration for reassigning people on one or more pages.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::core::extract::{extract_people, page_record, properties_payload};
use crate::core::fields::FieldConfig;
use crate::core::reassign::reassign;
use crate::core::types::{MembershipSets, ReassignSummary};
use crate::io::artifacts::{write_json, write_raw};
use crate::io::config::{AppConfig, load_config};
use crate::io::membership::load_membership;
use crate::io::page_client::PageClient;
use crate::io::paths::AppPaths;

/// Inputs shared by every page in a run; read-only once loaded.
#[derive(Debug, Clone)]
pub struct AdjustContext {
    pub paths: AppPaths,
    pub config: AppConfig,
    pub fields: FieldConfig,
    pub members: MembershipSets,
}

impl AdjustContext {
    /// Create directories, then load config and both member lists.
    ///
    /// Any failure here aborts the whole run.
    pub fn load(paths: AppPaths) -> Result<Self> {
        paths.ensure_dirs()?;
        let config = load_config(&paths.config_path).context("load config")?;
        let members = load_membership(&paths).context("load member lists")?;
        info!(
            current = members.current_ids().len(),
            ignored = members.ignore_len(),
            "member lists loaded"
        );
        Ok(Self {
            fields: config.field_config(),
            paths,
            config,
            members,
        })
    }
}

/// Result of processing a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Properties were reassigned and written back.
    Updated(ReassignSummary),
    /// The page has no people-typed properties; nothing was written back.
    NoPeopleFields,
}

/// Outcome of one page within a multi-page run.
#[derive(Debug)]
pub struct PageReport {
    pub page_id: String,
    pub result: Result<PageOutcome>,
}

/// Fetch, reassign and write back a single page.
///
/// Every intermediate document is written to the temp directory so a failed
/// update can be inspected or replayed by hand.
#[instrument(skip(ctx, client))]
pub fn adjust_page<C: PageClient>(
    ctx: &AdjustContext,
    client: &C,
    page_id: &str,
) -> Result<PageOutcome> {
    let paths = &ctx.paths;

    let raw = client.fetch_page(page_id).context("fetch page")?;
    write_raw(&paths.page_path, &raw)?;
    let value: Value = serde_json::from_str(&raw).context("parse page json")?;

    let record = page_record(&value)?;
    let Some(extracted) = extract_people(record)? else {
        info!("no people properties found");
        return Ok(PageOutcome::NoPeopleFields);
    };
    write_json(&paths.extracted_path, &extracted)?;

    let (updated, summary) = reassign(&extracted, &ctx.fields, &ctx.members);
    write_json(&paths.updated_people_path, &updated)?;
    write_json(&paths.updated_data_path, &properties_payload(&updated)?)?;

    client
        .update_page(page_id, &paths.updated_data_path)
        .context("update page")?;
    info!(
        moved = summary.moved.len(),
        added = summary.added.len(),
        "page reassigned"
    );
    Ok(PageOutcome::Updated(summary))
}

/// Process pages in order. A failing page is recorded and does not stop the run.
pub fn adjust_pages<C: PageClient>(
    ctx: &AdjustContext,
    client: &C,
    page_ids: &[String],
) -> Vec<PageReport> {
    page_ids
        .iter()
        .map(|page_id| {
            let result = adjust_page(ctx, client, page_id);
            if let Err(err) = &result {
                let chain = format!("{err:#}");
                warn!(page_id = %page_id, err = %chain, "page failed");
            }
            PageReport {
                page_id: page_id.clone(),
                result,
            }
        })
        .collect()
}

/// Human-readable lines for one page report (stdout for success, stderr for errors).
pub fn render_report(report: &PageReport) -> Vec<String> {
    let id = &report.page_id;
    match &report.result {
        Ok(PageOutcome::Updated(summary)) => {
            let mut lines = vec![format!(
                "page: id={} outcome=updated moved={} added={}",
                id,
                summary.moved.len(),
                summary.added.len()
            )];
            lines.extend(summary.moved.iter().map(|m| {
                format!(
                    "page: id={} moved person={} from={:?} to={:?}",
                    id, m.person_id, m.field, m.archive_field
                )
            }));
            lines.extend(
                summary
                    .added
                    .iter()
                    .map(|person| format!("page: id={} added person={}", id, person)),
            );
            lines
        }
        Ok(PageOutcome::NoPeopleFields) => vec![format!(
            "page: id={} outcome=skipped reason=no-people-properties",
            id
        )],
        Err(err) => vec![format!("error: page={} {:#}", id, err)],
    }
}
