use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;

use syno_api::auth::{AuthApi, LoginRequest};
use syno_api::filestation::{FileStationApi, ListRequest, ListShareRequest};
use syno_api::{Client, Error};

mod error_codes;

/// Synology DSM Web API client
#[derive(Parser, Debug)]
#[command(name = "syno")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the NAS, e.g. https://nas.example:5001
    #[arg(long, env = "SYNOLOGY_BASE_URL")]
    base_url: String,

    #[arg(long, env = "SYNOLOGY_USERNAME", default_value = "")]
    username: String,

    #[arg(long, env = "SYNOLOGY_PASSWORD", default_value = "")]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump API descriptors known to the gateway
    Info {
        /// API names to query; all known APIs when omitted
        names: Vec<String>,
    },
    /// List the contents of a folder
    List {
        folder_path: String,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        #[arg(long, default_value_t = 0)]
        limit: u64,
    },
    /// List shared folders
    ListShare,
    /// Fetch metadata for one or more paths
    GetInfo { paths: Vec<String> },
    /// Download a file
    Download {
        path: String,
        /// Destination; defaults to the remote file name
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", render(&*e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new(&args.base_url)?;

    // Discovery needs no session.
    if let Command::Info { names } = &args.command {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let descriptors = client.api_info(&names)?;
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    let auth = AuthApi::new(&client);
    let session = uuid::Uuid::new_v4().to_string();
    let login = auth.login(&LoginRequest {
        account: args.username.clone(),
        passwd: args.password.clone(),
        session: session.clone(),
    })?;
    client.set_param("_sid", login.sid);

    let result = dispatch(&client, &args.command);

    if let Err(e) = auth.logout(&session) {
        tracing::warn!(error = %e, "logout failed");
    }

    result
}

fn dispatch(client: &Client, command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    let api = FileStationApi::new(client);
    match command {
        Command::Info { .. } => unreachable!("handled before login"),
        Command::List {
            folder_path,
            offset,
            limit,
        } => {
            let page = api.list(&ListRequest {
                folder_path: folder_path.clone(),
                offset: *offset,
                limit: *limit,
                additional: vec!["size".into(), "time".into(), "owner".into(), "perm".into()],
                ..Default::default()
            })?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::ListShare => {
            let page = api.list_share(&ListShareRequest {
                additional: vec!["real_path".into(), "owner".into(), "volume_status".into()],
                ..Default::default()
            })?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::GetInfo { paths } => {
            let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
            let info = api.get_info(&paths, &["size", "time", "owner", "perm", "type"])?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Download { path, output } => {
            let destination = match output {
                Some(output) => output.clone(),
                None => PathBuf::from(path.rsplit('/').next().unwrap_or(path)),
            };
            let mut stream = api.download(&[path.as_str()], "download")?;
            let mut file = std::fs::File::create(&destination)?;
            let bytes = io::copy(&mut stream, &mut file)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "path": path,
                    "output": destination,
                    "bytes": bytes,
                }))?
            );
        }
    }
    Ok(())
}

/// Render an error for the terminal, attaching the File Station code
/// table where it applies.
fn render(error: &(dyn std::error::Error + 'static)) -> String {
    if let Some(Error::Api { code, .. }) = error.downcast_ref::<Error>() {
        if let Some(message) = error_codes::describe(*code) {
            return format!("{} ({})", error, message);
        }
    }
    error.to_string()
}
