use std::env;

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = hearth::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("compare") => {
            let mut args = vec![raw_args[0].clone()];
            args.extend(raw_args.iter().skip(2).cloned());
            match hearth::api::run_compare_command(args) {
                Ok(json) => println!("{json}"),
                Err(message) => {
                    eprintln!("{message}");
                    std::process::exit(2);
                }
            }
        }
        _ => {
            eprintln!("Usage: cargo run -- serve [port] | compare [--flags]");
            std::process::exit(1);
        }
    }
}
