use std::net::SocketAddr;

use anyhow::Context;
use colored::Colorize;

use cadence_server::{CadenceServer, ServerConfig};

use crate::cli::{Cli, Command, ServeArgs};

/// Resolve the effective configuration: defaults, then the optional file,
/// then `CADENCE_*` environment variables, then `--bind`.
pub fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    let config = match cli.config_path() {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    let mut config = config.with_env().context("applying environment overrides")?;
    if let Command::Serve(ServeArgs {
        bind: Some(addr), ..
    }) = &cli.command
    {
        config.bind_addr = *addr;
    }
    Ok(config)
}

pub async fn run_command(cli: Cli, config: ServerConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(_) => cmd_serve(config).await,
        Command::Config(_) => cmd_config(&config),
    }
}

async fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    let server = CadenceServer::in_memory(config);
    let listener = server
        .bind()
        .await
        .with_context(|| format!("binding {}", server.config().bind_addr))?;
    let addr = listener.local_addr()?;
    print!("{}", banner(addr, server.config()));
    server
        .serve_on(listener)
        .await
        .context("server stopped with an error")
}

/// Startup summary, printed once the listener is bound.
fn banner(addr: SocketAddr, config: &ServerConfig) -> String {
    let mut out = format!(
        "{} Cadence listening on {}\n",
        "✓".green().bold(),
        addr.to_string().bold()
    );
    out.push_str(&format!("  Store: {}\n", "in-memory".cyan()));
    out.push_str(&format!("  Timeout: {}s\n", config.request_timeout_secs));
    if config.cors_permissive {
        out.push_str(&format!("  CORS: {}\n", "permissive".yellow()));
    }
    out
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
