use std::process;

use clap::{value_parser, Arg, ArgAction, Command};

use tracker_stories::commands::{handle_auth, handle_stories};
use tracker_stories::constants::{PROJECT_ID_ENV, TOKEN_ENV};
use tracker_stories::formatting::OutputFormat;
use tracker_stories::logging::{init_logging, log_error, log_info, log_panic_info};
use tracker_stories::validation::{date_value_parser, token_value_parser};

fn build_cli() -> Command {
    Command::new("tracker-stories")
        .about("Pull Pivotal Tracker stories with owners, transitions and cycle times")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Echo log lines to stderr")
                .action(ArgAction::SetTrue)
                .global(true)
        )
        .subcommand(
            Command::new("stories")
                .about("Fetch stories and report their cycle times")
                .arg(
                    Arg::new("token")
                        .long("token")
                        .short('t')
                        .value_name("TOKEN")
                        .env(TOKEN_ENV)
                        .hide_env_values(true)
                        .help("A valid Pivotal Tracker API token")
                        .value_parser(token_value_parser)
                )
                .arg(
                    Arg::new("project-id")
                        .long("project-id")
                        .short('p')
                        .value_name("PROJECT_ID")
                        .env(PROJECT_ID_ENV)
                        .help("A valid Pivotal Tracker project ID")
                        .value_parser(value_parser!(u64))
                )
                .arg(
                    Arg::new("label")
                        .long("label")
                        .short('l')
                        .value_name("LABEL")
                        .help("Only stories carrying this label (repeat to require several)")
                        .action(ArgAction::Append)
                )
                .arg(
                    Arg::new("updated-after")
                        .long("updated-after")
                        .value_name("YYYY-MM-DD")
                        .help("Only stories last updated after this date")
                        .value_parser(date_value_parser)
                )
                .arg(
                    Arg::new("updated-before")
                        .long("updated-before")
                        .value_name("YYYY-MM-DD")
                        .help("Only stories last updated before this date")
                        .value_parser(date_value_parser)
                )
                .arg(
                    Arg::new("fields")
                        .long("fields")
                        .value_name("FIELDS")
                        .help("Comma-separated list of fields to output, e.g. id,name,final_cycle_time")
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format")
                        .value_parser(OutputFormat::NAMES)
                        .default_value("json")
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .help("Write to this file instead of stdout")
                )
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .help("Skip name resolution and cycle times; output stories as the API returns them")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("auth")
                .about("Save or show credentials")
                .arg(
                    Arg::new("token")
                        .long("token")
                        .value_name("TOKEN")
                        .help("Save this API token")
                        .value_parser(token_value_parser)
                )
                .arg(
                    Arg::new("project-id")
                        .long("project-id")
                        .value_name("PROJECT_ID")
                        .help("Save this project as the default")
                        .value_parser(value_parser!(u64))
                        .requires("token")
                )
                .arg(
                    Arg::new("api-url")
                        .long("api-url")
                        .value_name("URL")
                        .help("Save a different API base URL")
                        .requires("token")
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show saved credentials")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("token")
                )
        )
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = init_logging(matches.get_flag("verbose")) {
        eprintln!("Warning: could not set up logging: {}", e);
    }
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic_info(info);
        default_hook(info);
    }));

    let result = match matches.subcommand() {
        Some(("stories", sub_matches)) => handle_stories(sub_matches).await,
        Some(("auth", sub_matches)) => handle_auth(sub_matches).await,
        _ => {
            eprintln!("Unknown command. Use 'tracker-stories --help' for available commands.");
            process::exit(1);
        }
    };

    match result {
        Ok(()) => log_info("Done"),
        Err(e) => {
            log_error(&e.to_string());
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
