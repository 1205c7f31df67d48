use std::fs;
use std::io::IsTerminal;

use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContextBuilder;
use crate::error::{ErrorContext, TrackerResult};
use crate::filtering::StoryQuery;
use crate::formatting::{parse_field_list, project_fields, render, OutputFormat};
use crate::logging::log_info;
use crate::models::MembershipIndex;
use crate::processing::{process_stories, raw_records};

pub async fn handle_stories(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    handle_stories_impl(matches).await.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}

async fn handle_stories_impl(matches: &ArgMatches) -> TrackerResult<()> {
    let labels: Vec<String> = matches
        .get_many::<String>("label")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let format = matches
        .get_one::<String>("format")
        .map(|f| f.parse::<OutputFormat>())
        .transpose()?
        .unwrap_or_default();
    let fields = matches
        .get_one::<String>("fields")
        .map(|f| parse_field_list(f))
        .unwrap_or_default();
    let output = matches.get_one::<String>("output");

    let mut context = CliContextBuilder::new()
        .with_token(matches.get_one::<String>("token").cloned())
        .with_project_id(matches.get_one::<u64>("project-id").copied())
        .build()?;
    let project_id = context.project_id()?;
    let client = context.client()?;

    let mut query = StoryQuery::new().labels(labels.iter().cloned());
    if let Some(date) = matches.get_one::<String>("updated-after") {
        query = query.updated_after(date.clone());
    }
    if let Some(date) = matches.get_one::<String>("updated-before") {
        query = query.updated_before(date.clone());
    }

    let records = if matches.get_flag("raw") {
        let stories = client
            .get_stories(project_id, &query)
            .await
            .with_context(|| format!("Fetching stories for project {}", project_id))?;
        log_info(&format!("Fetched {} stories", stories.len()));
        raw_records(stories, &labels)?
    } else {
        let memberships = client
            .get_memberships(project_id)
            .await
            .with_context(|| format!("Fetching memberships for project {}", project_id))?;
        let index = MembershipIndex::from_memberships(memberships);
        log_info(&format!("Indexed {} project members", index.len()));

        let stories = client
            .get_stories(project_id, &query)
            .await
            .with_context(|| format!("Fetching stories for project {}", project_id))?;
        log_info(&format!("Fetched {} stories", stories.len()));

        process_stories(stories, &labels, &index)?
    };

    let records = project_fields(records, &fields)?;

    match output {
        Some(path) => {
            let rendered = render(&records, format, false)?;
            fs::write(path, rendered).with_context(|| format!("Writing {}", path))?;
            log_info(&format!("Wrote {} stories as {} to {}", records.len(), format, path));
            println!(
                "{} Wrote {} stories to {}",
                "✅".green(),
                records.len(),
                path.bold()
            );
        }
        None => {
            let colorize = std::io::stdout().is_terminal();
            print!("{}", render(&records, format, colorize)?);
        }
    }

    Ok(())
}
