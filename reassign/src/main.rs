use anyhow::Result;
use clap::Parser;
use tracing::debug;

use reassign::adjust::{AdjustContext, adjust_pages, render_report};
use reassign::exit_codes;
use reassign::io::page_client::CliPageClient;
use reassign::io::paths::AppPaths;
use reassign::logging;

#[derive(Parser, Debug)]
#[command(
    name = "reassign",
    version,
    about = "Move former staff to \"(previous staff)\" fields and add current staff on pages"
)]
struct Cli {
    /// Page ids to process, in order.
    #[arg(required = true, value_name = "PAGE_ID")]
    page_ids: Vec<String>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let paths = AppPaths::from_home()?;
    println!("config: dir={}", paths.config_dir.display());
    println!("config: tmp={}", paths.tmp_dir.display());

    let ctx = AdjustContext::load(paths)?;
    let client = CliPageClient::new(ctx.config.cli.clone(), ctx.paths.tmp_dir.clone());

    debug!(pages = cli.page_ids.len(), "processing pages");
    for report in adjust_pages(&ctx, &client, &cli.page_ids) {
        for line in render_report(&report) {
            if report.result.is_err() {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        }
    }
    Ok(exit_codes::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_multiple_page_ids() {
        let cli = Cli::parse_from(["reassign", "p1", "p2"]);
        assert_eq!(cli.page_ids, vec!["p1".to_string(), "p2".to_string()]);
    }

    #[test]
    fn page_id_is_required() {
        assert!(Cli::try_parse_from(["reassign"]).is_err());
    }
}
