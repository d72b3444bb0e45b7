//! GPIO Status - Raspberry Pi header diagnostics binary
//!
//! Serves the GPIO status report over HTTP, or prints it once.

use clap::{Args, Parser, Subcommand};
use gpio_status::{
    config::{DEFAULT_COMMAND_TIMEOUT_MS, DEFAULT_CONFIG_TOOL, DEFAULT_GPIO_TOOL},
    start_web_server, Board, StatusAggregator, StatusReport, StatusRequest, SystemCommandRunner,
    ToolConfig, WebConfig, DEFAULT_WEB_PORT,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "gpio_status")]
#[command(about = "Raspberry Pi GPIO header status")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Reports pin levels, functions and interface flags of a Raspberry Pi GPIO header")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// OS configuration tool used for interface flags
    #[arg(long, default_value = DEFAULT_CONFIG_TOOL)]
    config_tool: String,

    /// GPIO tool used for pin state and functions
    #[arg(long, default_value = DEFAULT_GPIO_TOOL)]
    gpio_tool: String,

    /// Timeout for each external command in milliseconds
    #[arg(long, default_value_t = DEFAULT_COMMAND_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Board revision code to use instead of /proc/cpuinfo
    #[arg(long)]
    revision: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve(ServeArgs),

    /// Print one status report and exit
    Status(StatusArgs),

    /// Show board information
    Info,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Dashboard assets directory (optional)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,
}

#[derive(Args)]
struct StatusArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,

    /// Leave hardware facts out of the report
    #[arg(long)]
    no_hw: bool,

    /// Leave supported function lists out of the report
    #[arg(long)]
    no_funcs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve(args)) => serve_command(&cli, args).await?,
        Some(Commands::Status(args)) => status_command(&cli, args).await?,
        Some(Commands::Info) => info_command(&cli)?,
        None => serve_command(&cli, &ServeArgs::default()).await?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(log_level(cli), &directives))
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Level picked by `--debug` / `--verbose`, WARN otherwise.
fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// `RUST_LOG` directives layered over the CLI level. Empty directives leave
/// the CLI level in force.
fn log_filter(level: Level, directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives)
}

fn tool_config(cli: &Cli) -> ToolConfig {
    ToolConfig::default()
        .with_config_tool(&cli.config_tool)
        .with_gpio_tool(&cli.gpio_tool)
        .with_command_timeout_ms(cli.timeout_ms)
        .with_revision_override(cli.revision.clone())
}

fn build_aggregator(cli: &Cli) -> StatusAggregator {
    let config = tool_config(cli);
    let board = match Board::detect(&config) {
        Ok(board) => Some(board),
        Err(e) => {
            warn!("Board detection failed, pin data will be unavailable: {}", e);
            None
        }
    };
    let runner = Arc::new(SystemCommandRunner::new(config.command_timeout()));
    StatusAggregator::new(runner, config, board)
}

async fn serve_command(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    info!("Starting GPIO status service...");

    let aggregator = build_aggregator(cli);

    let web_config = WebConfig::new(&cli.host, cli.port)
        .with_dashboard_dir(args.static_dir.clone())
        .with_cors(!args.no_cors);

    info!("Web server configuration:");
    info!("  - Bind address: {}", web_config.bind_address());
    info!("  - CORS enabled: {}", web_config.enable_cors);
    if let Some(dir) = &web_config.dashboard_dir {
        info!("  - Dashboard: {}", dir.display());
    }
    info!("  - Command timeout: {}ms", cli.timeout_ms);

    start_web_server(web_config, aggregator).await?;

    Ok(())
}

async fn status_command(cli: &Cli, args: &StatusArgs) -> anyhow::Result<()> {
    let aggregator = build_aggregator(cli);
    let request = StatusRequest {
        hw: !args.no_hw,
        funcs: !args.no_funcs,
    };
    let report = aggregator.get_status(request).await?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "pretty" => print_pretty_report(&report),
        other => anyhow::bail!("Unsupported format: {}. Use 'json' or 'pretty'", other),
    }

    Ok(())
}

fn info_command(cli: &Cli) -> anyhow::Result<()> {
    let board = Board::detect(&tool_config(cli))?;
    let facts = &board.facts;

    println!("Raspberry Pi {} (revision {})", facts.model, facts.revision);
    println!("  PCB revision: {}", facts.pcb_revision);
    println!("  Released: {}", facts.released);
    println!("  SoC: {}", facts.soc);
    println!("  Manufacturer: {}", facts.manufacturer);
    println!("  Memory: {} MB", facts.memory);
    println!("  Storage: {}", facts.storage);
    println!("  USB ports: {} ({} USB3)", facts.usb, facts.usb3);
    println!("  Ethernet: {} ({} Mbps)", facts.ethernet, facts.eth_speed);
    println!("  WiFi: {}", yes_no(facts.wifi));
    println!("  Bluetooth: {}", yes_no(facts.bluetooth));
    println!("  Camera / display ports: {} CSI, {} DSI", facts.csi, facts.dsi);
    println!(
        "  Header: {} pins ({} rows x {} columns)",
        board.layout.pins.len(),
        board.layout.rows,
        board.layout.columns
    );

    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn print_pretty_report(report: &StatusReport) {
    println!(
        "Tools: raspi-config {}, raspi-gpio {}",
        yes_no(report.commands.raspi_config),
        yes_no(report.commands.raspi_gpio)
    );

    let Some(status) = &report.status else {
        println!("Required tools not installed; no pin data available.");
        return;
    };

    if let Some(hardware) = &report.hardware {
        println!("Board: Raspberry Pi {} ({} MB, {})", hardware.model, hardware.memory, hardware.soc);
    }

    if let Some(services) = &report.services {
        println!(
            "Interfaces: camera={} ssh={} spi={} i2c={} serial={} serial_hw={} one_wire={} remote_gpio={}",
            yes_no(services.camera),
            yes_no(services.ssh),
            yes_no(services.spi),
            yes_no(services.i2c),
            yes_no(services.serial),
            yes_no(services.serial_hw),
            yes_no(services.one_wire),
            yes_no(services.remote_gpio)
        );
    }

    println!();
    println!("{:>4}  {:<8} {:>5}  {:<6} {:<8} FUNCS", "PIN", "NAME", "LEVEL", "PULL", "FUNC");
    for pin in &status.pins {
        match &pin.status {
            Some(bcm) => println!(
                "{:>4}  {:<8} {:>5}  {:<6} {:<8} {}",
                pin.physical_name,
                pin.name,
                bcm.current_value,
                bcm.pull,
                bcm.current_func,
                bcm.funcs.as_deref().map(|f| f.join(" ")).unwrap_or_default()
            ),
            None => println!("{:>4}  {:<8}", pin.physical_name, pin.name),
        }
    }
}
