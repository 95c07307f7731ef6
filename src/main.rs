// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! jarclient CLI - Stateful HTTP Request Helper
//!
//! Example usage and demonstration of the jarclient library.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use jarclient::{
    host_of, CallOptions, HttpClient, HttpClientConfig, Payload, ReqwestTransport,
    TransportConfig,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jarclient=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: jarclient fetch <url> [--raw] [--insecure] [--proxy URL] [--timeout MS]");
                return ExitCode::from(1);
            }
            match parse_fetch_flags(&args[3..]) {
                Ok((options, transport)) => fetch_url(&args[2], options, transport).await,
                Err(msg) => {
                    eprintln!("{}", msg);
                    ExitCode::from(1)
                }
            }
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("jarclient {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"jarclient - Stateful HTTP Request Helper

USAGE:
    jarclient <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url>     Fetch a URL and display the normalized response
    help            Show this help message
    version         Show version information

FETCH OPTIONS:
    --raw           Keep the body as text instead of parsing JSON
    --insecure      Accept invalid TLS certificates
    --proxy <URL>   Send the request through a proxy
    --timeout <MS>  Deadline for the call in milliseconds

EXAMPLES:
    jarclient fetch "https://api64.ipify.org?format=json"
    jarclient fetch https://example.com --raw --timeout 5000
"#
    );
}

fn parse_fetch_flags(flags: &[String]) -> Result<(CallOptions, TransportConfig), String> {
    let mut options = CallOptions::new();
    let mut transport = TransportConfig::default();
    let mut iter = flags.iter();

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--raw" => options = options.raw(),
            "--insecure" => transport.accept_invalid_certs = true,
            "--proxy" => {
                let proxy = iter.next().ok_or("--proxy needs a URL")?;
                options = options.custom_proxy(proxy.as_str());
            }
            "--timeout" => {
                let ms = iter
                    .next()
                    .and_then(|v| v.parse::<u64>().ok())
                    .ok_or("--timeout needs a number of milliseconds")?;
                options = options.custom_timeout(Duration::from_millis(ms));
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok((options, transport))
}

async fn fetch_url(url: &str, options: CallOptions, transport: TransportConfig) -> ExitCode {
    println!("Fetching: {}", url);

    let transport = Arc::new(ReqwestTransport::with_config(transport));
    let client = HttpClient::with_transport(HttpClientConfig::default(), transport);

    match client.do_request(url, None, Some(options)).await {
        Ok(response) => {
            println!("\n=== Response ===");
            println!("Status: {}", response.status);
            if let Some(content_type) = response.header("content-type") {
                println!("Content-Type: {}", content_type);
            }

            println!("\n=== Body ===");
            match &response.payload {
                Payload::Json(value) => println!("{:#}", value),
                Payload::Text(text) => println!("{}", text),
                Payload::HttpError(body) => println!("[HTTP error] {:?}", body),
            }

            if let Some(cookies) = client.cookies(host_of(url)) {
                println!("\n=== Cookies ({}) ===", cookies.len());
                for cookie in cookies.values() {
                    match cookie.expires {
                        Some(expires) => println!("  - {} (expires {})", cookie.to_header_value(), expires),
                        None => println!("  - {} (session)", cookie.to_header_value()),
                    }
                }
            }

            if response.is_http_error() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Failed to fetch URL: {}", e);
            ExitCode::from(1)
        }
    }
}
