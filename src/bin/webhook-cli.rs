use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde_json::Value;

use drive_image_finder::auth::freshness::now_secs;
use drive_image_finder::auth::signature::SIGNATURE_VERSION;
use drive_image_finder::auth::{CanonicalPaths, Secret, SignedMessage};
use drive_image_finder::config::AuthConfig;

#[derive(Parser)]
#[command(name = "webhook-cli")]
#[command(about = "Sign and send webhook requests the way the calling platform does", long_about = None)]
struct Cli {
    /// Base64 shared secret.
    #[arg(short, long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    secret: String,

    /// Timestamp to sign (seconds since epoch). Defaults to now.
    #[arg(short, long)]
    timestamp: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the signature headers for a canonical path and body
    Sign {
        #[arg(short, long, default_value = "/content/resources/find")]
        path: String,
        #[arg(short, long, default_value = "{}")]
        body: String,
    },
    /// Send a signed find request and print the response
    Find {
        #[arg(short, long, default_value = "http://localhost:3000/content/resources/find")]
        url: String,
        /// Continuation token from a previous page.
        #[arg(short, long)]
        continuation: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let secret = Secret::from_base64(&cli.secret)?;
    let timestamp = cli
        .timestamp
        .unwrap_or_else(|| format!("{}", now_secs().floor() as u64));
    let names = AuthConfig::default();

    match cli.command {
        Commands::Sign { path, body } => {
            let signature =
                secret.sign(&SignedMessage::new(SIGNATURE_VERSION, &timestamp, &path, body.as_bytes()));
            println!("{}: {}", names.timestamp_header, timestamp);
            println!("{}: {}", names.signatures_header, signature);
        }
        Commands::Find { url, continuation } => {
            let url = Url::parse(&url)?;
            let paths = CanonicalPaths::default();
            let canonical = paths
                .resolve(url.path())
                .ok_or_else(|| format!("{} does not end in a known route", url.path()))?;

            let body = match continuation {
                Some(token) => serde_json::json!({ "continuation": token }).to_string(),
                None => "{}".to_string(),
            };
            let signature = secret.sign(&SignedMessage::new(
                SIGNATURE_VERSION,
                &timestamp,
                canonical,
                body.as_bytes(),
            ));

            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(
                names.timestamp_header.as_str().parse::<reqwest::header::HeaderName>()?,
                HeaderValue::from_str(&timestamp)?,
            );
            headers.insert(
                names.signatures_header.as_str().parse::<reqwest::header::HeaderName>()?,
                HeaderValue::from_str(&signature)?,
            );

            let res = reqwest::Client::new()
                .post(url)
                .headers(headers)
                .body(body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
