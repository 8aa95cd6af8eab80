use clap::{Parser, Subcommand};
use reqwest::multipart::Form;

#[derive(Parser)]
#[command(name = "mock-probe")]
#[command(about = "Send game-client requests to a running Ben10 mock server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET /status
    Status,
    /// GET /readme.txt
    Readme,
    /// GET /list.xml
    Files,
    /// GET /update
    Update,
    /// POST the login form to /serverside/newCode.php
    Login {
        #[arg(long, default_value = "ben10player")]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        hardware: String,
        #[arg(long, default_value = "")]
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Status => client.get(format!("{base}/status")),
        Commands::Readme => client.get(format!("{base}/readme.txt")),
        Commands::Files => client.get(format!("{base}/list.xml")),
        Commands::Update => client.get(format!("{base}/update")),
        Commands::Login {
            username,
            password,
            hardware,
            code,
        } => {
            let form = Form::new()
                .text("username", username)
                .text("password", password)
                .text("hardware", hardware)
                .text("code", code);
            client
                .post(format!("{base}/serverside/newCode.php"))
                .multipart(form)
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    println!("{} ({})", status, content_type);
    let body = res.text().await?;
    if !body.is_empty() {
        println!("{}", body);
    }

    if !status.is_success() {
        eprintln!("Error: mock server returned status {}", status);
    }
    Ok(())
}
