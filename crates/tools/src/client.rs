//! Client Tools
//!
//! Input contract and declaration for the `create_client` tool.

use std::collections::HashMap;

use guildhall_core::error::CoreResult;
use guildhall_llm::types::{ParameterSchema, ToolDefinition};
use serde::{Deserialize, Serialize};

use crate::validate;

/// Company size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Startup,
    Smb,
    Mid,
    Enterprise,
}

impl SizeTier {
    /// Storage string for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeTier::Startup => "startup",
            SizeTier::Smb => "smb",
            SizeTier::Mid => "mid",
            SizeTier::Enterprise => "enterprise",
        }
    }
}

/// Validated input for `create_client`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInput {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub size_tier: Option<SizeTier>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ClientInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("create_client", args)?;
        validate::non_empty("create_client", "name", &input.name)?;
        if let Some(url) = &input.website_url {
            validate::valid_url("create_client", "website_url", url)?;
        }
        Ok(input)
    }
}

/// Declaration for the `create_client` tool.
pub fn create_client_tool() -> ToolDefinition {
    ToolDefinition {
        name: "create_client".to_string(),
        description: "Create a new client record in the database. Use this when you have \
                      gathered enough information about a client from the conversation. Always \
                      confirm the details with the user before calling this tool."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "name".to_string(),
                    ParameterSchema::string(Some("Client's company or full name (required)")),
                ),
                (
                    "industry".to_string(),
                    ParameterSchema::string(Some(
                        "Industry or sector the client operates in (e.g., Technology, Healthcare, Finance)",
                    )),
                ),
                (
                    "size_tier".to_string(),
                    ParameterSchema::string_enum(
                        Some(
                            "Company size: startup (1-10 employees), smb (11-100), mid \
                             (101-1000), enterprise (1000+)",
                        ),
                        &["startup", "smb", "mid", "enterprise"],
                    ),
                ),
                (
                    "website_url".to_string(),
                    ParameterSchema::string(Some("Client's website URL (must be valid URL format)")),
                ),
                (
                    "notes".to_string(),
                    ParameterSchema::string(Some("Additional notes or context about the client")),
                ),
            ]),
            vec!["name".to_string()],
        ),
    }
}
