use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContextBuilder;
use crate::config::load_config;
use crate::error::TrackerResult;

/// Show only the ends of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 12 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

pub async fn handle_auth(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_auth_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_auth_impl(matches: &ArgMatches) -> TrackerResult<()> {
    if let Some(token) = matches.get_one::<String>("token") {
        let mut context = CliContextBuilder::new()
            .with_token(Some(token.clone()))
            .with_project_id(matches.get_one::<u64>("project-id").copied())
            .with_api_url(matches.get_one::<String>("api-url").cloned())
            .build()?;
        let path = context.save()?;
        println!("Credentials saved to {}", path.display());

        // Test the token against the project when we know one
        if let Ok(project_id) = context.project_id() {
            let client = context.client()?;
            match client.get_memberships(project_id).await {
                Ok(memberships) => println!(
                    "{} Connected to project {} ({} members)",
                    "✅".green(),
                    project_id,
                    memberships.len()
                ),
                Err(e) => println!("{} Failed to reach project {}: {}", "❌".red(), project_id, e),
            }
        }
    } else if matches.get_flag("show") {
        let config = load_config();
        match config.token {
            Some(token) => println!("Token: {}", mask_token(&token)),
            None => println!("No token configured"),
        }
        match config.project_id {
            Some(project_id) => println!("Project ID: {}", project_id),
            None => println!("No project ID configured"),
        }
        if let Some(api_url) = config.api_url {
            println!("API URL: {}", api_url);
        }
    } else {
        println!("Usage: tracker-stories auth --token <TOKEN> [--project-id <ID>] or tracker-stories auth --show");
    }
    Ok(())
}
