//! mixmaster-client CLI entry point.

use clap::Parser;
use mixmaster_client::cli::covers::CoversAction;
use mixmaster_client::cli::events::EventsAction;
use mixmaster_client::cli::tracks::TracksAction;
use mixmaster_client::cli::{Cli, Commands, OutputFormat};
use mixmaster_client::client::MixmasterClient;
use mixmaster_client::output::{format_output, pretty};
use mixmaster_core::track::{CoverUploadResponse, UploadUrlRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = MixmasterClient::new(&cli.base_url);

    match cli.command {
        Commands::Events(events_cmd) => match events_cmd.action {
            EventsAction::List { upcoming, sort } => {
                let events = client
                    .list_events(EventsAction::list_query(upcoming, sort))
                    .await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&events, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_events(&events)),
                }
            }
            EventsAction::Get { id } => {
                let event = client.get_event(&id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&event, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_event(&event)),
                }
            }
            EventsAction::Create(args) => {
                let event = client.create_event(&args.load_payload()?).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&event, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_event(&event))
                    }
                }
            }
            EventsAction::Update { id, args } => {
                let event = client.update_event(&id, &args.load_payload()?).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&event, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Updated:\n{}", pretty::format_event(&event))
                    }
                }
            }
            EventsAction::Delete { id } => {
                let deleted = client.delete_event(&id).await?;
                if !cli.quiet {
                    println!("Deleted event {}", deleted);
                }
            }
        },
        Commands::Tracks(tracks_cmd) => match tracks_cmd.action {
            TracksAction::Upload { file } => {
                let track = client.upload_track(&file).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&track, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Uploaded:\n{}", pretty::format_track(&track))
                    }
                }
            }
            TracksAction::UploadUrl {
                file_name,
                content_type,
            } => {
                let mut request = UploadUrlRequest::new(file_name);
                if let Some(content_type) = content_type {
                    request = request.with_content_type(content_type);
                }
                let response = client.request_upload_url(&request).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&response, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_upload_url(&response)),
                }
            }
        },
        Commands::Covers(covers_cmd) => match covers_cmd.action {
            CoversAction::Upload { file } => {
                let cover_image_url = client.upload_cover(&file).await?;
                match cli.format {
                    OutputFormat::Json => println!(
                        "{}",
                        format_output(&CoverUploadResponse { cover_image_url }, cli.format)
                    ),
                    OutputFormat::Pretty => println!("Cover: {cover_image_url}"),
                }
            }
        },
        Commands::Health => {
            let readiness = client.readiness().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&readiness, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_readiness(&readiness)),
            }
            if !readiness.ready {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
