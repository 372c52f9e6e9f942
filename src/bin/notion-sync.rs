// Push a formatted transcript document into a Notion database: parse its
// front matter into page properties, map the Markdown body to block records,
// and publish them in capped batches (page creation first, then appends).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;

use podscribe::notion::batch::BatchPlan;
use podscribe::notion::blocks::{Block, markdown_to_blocks};
use podscribe::notion::client::NotionClient;
use podscribe::notion::front_matter;
use podscribe::notion::properties::page_properties;

#[derive(Parser, Debug)]
#[command(name = "notion-sync")]
#[command(about = "Publish a Markdown transcript to a Notion database")]
struct Args {
    /// Markdown file to publish.
    #[arg(long = "file")]
    file: PathBuf,

    /// Notion integration token. Falls back to NOTION_TOKEN.
    #[arg(long = "token")]
    token: Option<String>,

    /// Target database id. Falls back to NOTION_DATABASE_ID.
    #[arg(long = "database-id")]
    database_id: Option<String>,
}

fn main() -> ExitCode {
    podscribe::logging::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("[ERROR] {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let token = resolve(args.token, "NOTION_TOKEN", "--token")?;
    let database_id = resolve(args.database_id, "NOTION_DATABASE_ID", "--database-id")?;

    if !args.file.is_file() {
        bail!("file not found: {}", args.file.display());
    }

    println!("{}", "=".repeat(50));
    println!("notion-sync");
    println!("{}", "=".repeat(50));
    println!();
    println!("[INFO] file: {}", args.file.display());
    println!("[INFO] database: {}...", &database_id[..database_id.len().min(8)]);

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let metadata = front_matter::parse(&content);
    let properties = page_properties(&metadata);

    println!("[INFO] converting Markdown to block records...");
    let records: Vec<_> = markdown_to_blocks(&content)
        .iter()
        .map(Block::to_json)
        .collect();
    let plan = BatchPlan::new(records);
    println!("[INFO] {} blocks total", plan.total());

    let client = NotionClient::new(token)?;

    println!("[INFO] creating page...");
    let page = client.create_page(&database_id, properties, plan.create)?;
    println!("[INFO] page created: {}", page.id);

    let appends = plan.appends.len();
    for (index, batch) in plan.appends.into_iter().enumerate() {
        client.append_children(&page.id, batch)?;
        println!("[INFO] appended batch {}/{}", index + 1, appends);
    }

    println!();
    println!("[SUCCESS] published");
    if let Some(url) = page.url {
        println!("page: {url}");
    }

    Ok(())
}

fn resolve(flag: Option<String>, env_var: &str, flag_name: &str) -> Result<String> {
    if let Some(value) = flag {
        return Ok(value);
    }
    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => bail!("missing credential: set {env_var} or pass {flag_name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_require_file() {
        let err = Args::try_parse_from(["notion-sync"])
            .err()
            .expect("expected missing-args error");
        assert!(err.to_string().contains("--file"));
    }

    #[test]
    fn resolve_prefers_explicit_flag() -> Result<()> {
        let value = resolve(
            Some("secret".to_string()),
            "PODSCRIBE_TEST_UNSET_VAR",
            "--token",
        )?;
        assert_eq!(value, "secret");
        Ok(())
    }

    #[test]
    fn resolve_reports_missing_credential() {
        let err = resolve(None, "PODSCRIBE_TEST_UNSET_VAR", "--token").unwrap_err();
        assert!(err.to_string().contains("PODSCRIBE_TEST_UNSET_VAR"));
        assert!(err.to_string().contains("--token"));
    }
}
