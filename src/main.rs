use clap::Parser;
use gps_clock::utils::{logger, validation::Validate};
use gps_clock::{ClockEngine, CliConfig, SerialByteSource, TerminalDisplay, ZoneSelection};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting gps-clock CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if cli.list_ports {
        let ports = SerialByteSource::list_ports()?;
        if ports.is_empty() {
            println!("No serial ports found");
        } else {
            println!("Available ports:");
            for (index, port) in ports.iter().enumerate() {
                println!("{}: {}", index + 1, port);
            }
        }
        return Ok(());
    }

    // 合併並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration resolution failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    // 開啟序列埠,整個程式唯一允許致命失敗的資源
    let source = match SerialByteSource::open(&config.port, config.baud) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("❌ Failed to open {}: {}", config.port, e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let zone = ZoneSelection::new(config.zone.clone());
    let display = TerminalDisplay::new();
    let mut engine = ClockEngine::new(source, display, zone, config.mode);

    tracing::info!("🕐 Clock running in {} (Ctrl-C to exit)", config.zone);

    tokio::select! {
        _ = engine.run() => {}
        _ = tokio::signal::ctrl_c() => {
            println!();
            tracing::info!("🛑 Shutting down");
        }
    }

    Ok(())
}
