//! Thin blocking client for the two Notion endpoints publishing needs.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::{Value, json};

const API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// A page created by [`NotionClient::create_page`].
#[derive(Debug, Clone)]
pub struct CreatedPage {
    pub id: String,
    pub url: Option<String>,
}

pub struct NotionClient {
    http: Client,
    token: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent("podscribe-notion-sync")
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            token: token.into(),
        })
    }

    /// Create a database page with up to 100 child blocks.
    pub fn create_page(
        &self,
        database_id: &str,
        properties: Value,
        children: Vec<Value>,
    ) -> Result<CreatedPage> {
        let body = json!({
            "parent": {"database_id": database_id},
            "properties": properties,
            "children": children,
        });

        let response: Value = self
            .http
            .post(format!("{API_BASE}/pages"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .context("page-creation request failed")?
            .error_for_status()
            .context("page creation rejected")?
            .json()
            .context("page-creation response was not JSON")?;

        let id = response["id"]
            .as_str()
            .context("page-creation response carried no id")?
            .to_string();
        let url = response["url"].as_str().map(str::to_string);

        Ok(CreatedPage { id, url })
    }

    /// Append up to 100 child blocks to an existing page or block.
    pub fn append_children(&self, block_id: &str, children: Vec<Value>) -> Result<()> {
        self.http
            .patch(format!("{API_BASE}/blocks/{block_id}/children"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&json!({"children": children}))
            .send()
            .context("append request failed")?
            .error_for_status()
            .context("append rejected")?;

        Ok(())
    }
}
