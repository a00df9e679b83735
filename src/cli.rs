use clap::{Parser, Subcommand};

use crate::models::{Id, Resource};

#[derive(Parser, Debug)]
#[command(name = "contentdesk")]
#[command(about = "Terminal admin console for the content backend")]
#[command(version)]
pub struct Cli {
    /// Base URL of the content backend (overrides CONTENTDESK_API_URL)
    #[arg(long, global = true, env = "CONTENTDESK_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive console (default)
    Tui,

    /// Print a resource collection as a table
    List {
        /// posts, campaigns, platforms, tags, post-types, post-statuses or topics
        resource: String,
    },

    /// Print one entity as JSON
    Show {
        /// Any listable resource, or chapters
        resource: String,

        /// Entity id
        id: Id,
    },

    /// Print a learning topic and its chapters
    Topic {
        /// Topic id
        id: Id,
    },
}

impl Commands {
    pub fn parse_resource(resource: &str) -> Result<Resource, anyhow::Error> {
        match resource.to_lowercase().as_str() {
            "posts" | "post" => Ok(Resource::Posts),
            "campaigns" | "campaign" => Ok(Resource::Campaigns),
            "platforms" | "platform" => Ok(Resource::Platforms),
            "tags" | "tag" => Ok(Resource::Tags),
            "post-types" | "post_types" | "post-type" => Ok(Resource::PostTypes),
            "post-statuses" | "post_statuses" | "post-status" => Ok(Resource::PostStatuses),
            "topics" | "topic" => Ok(Resource::Topics),
            "chapters" | "chapter" => Ok(Resource::Chapters),
            other => Err(anyhow::anyhow!(
                "Unsupported resource: {}. Supported resources: posts, campaigns, platforms, \
                 tags, post-types, post-statuses, topics, chapters",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        assert_eq!(Commands::parse_resource("Tags").unwrap(), Resource::Tags);
        assert_eq!(Commands::parse_resource("post-statuses").unwrap(), Resource::PostStatuses);
        assert_eq!(Commands::parse_resource("chapter").unwrap(), Resource::Chapters);
        assert!(Commands::parse_resource("videos").is_err());
    }

    #[test]
    fn test_default_command_is_console() {
        let cli = Cli::parse_from(["contentdesk"]);
        assert_eq!(cli.command, None);

        let cli = Cli::parse_from(["contentdesk", "--api-url", "http://cms.local/", "show", "posts", "5"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://cms.local/"));
        assert_eq!(
            cli.command,
            Some(Commands::Show {
                resource: "posts".to_string(),
                id: 5
            })
        );
    }
}
