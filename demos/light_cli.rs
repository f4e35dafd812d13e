//! CLI application for controlling an Elgato light.
//!
//! This example stands in for a desktop front end: it picks a fixture at
//! startup, calls the control operations and renders the returned state.
//!
//! Run with: cargo run --example light_cli -- --help

use std::time::Duration;

use clap::{Parser, Subcommand};
use elgato_light_rs::{ClientConfig, Fixture, Light, LightControl};

#[derive(Parser)]
#[command(name = "light-cli")]
#[command(about = "Control an Elgato Key Light or Ring Light from the command line", long_about = None)]
struct Cli {
    /// IP address or hostname of the light
    #[arg(short, long, global = true, default_value = "127.0.0.1")]
    address: String,

    /// HTTP port of the light
    #[arg(short, long, global = true, default_value_t = Light::DEFAULT_PORT)]
    port: u16,

    /// Request timeout in milliseconds
    #[arg(short, long, global = true, default_value = "1000")]
    timeout_ms: u64,

    /// Use a simulated light when the real one cannot be reached
    #[arg(short, long, global = true)]
    simulate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the current status of the light
    Status,

    /// Turn the light on
    On,

    /// Turn the light off
    Off,

    /// Toggle the light on/off
    Toggle,

    /// Set brightness (0-100)
    Brightness { level: i32 },

    /// Raise brightness by an amount
    Brighter { amount: i32 },

    /// Lower brightness by an amount
    Dimmer { amount: i32 },

    /// Set color temperature in Kelvin (2900-7000)
    Temperature { kelvin: i32 },

    /// Raise color temperature by an amount of Kelvin
    Cooler { amount: i32 },

    /// Lower color temperature by an amount of Kelvin
    Warmer { amount: i32 },

    /// Show hardware and firmware details
    Details,

    /// Get detailed diagnostics
    Diagnostics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = ClientConfig::with_timeout(Duration::from_millis(cli.timeout_ms));

    let mut light = if cli.simulate {
        Fixture::connect_or_simulate(&cli.address, cli.port, config).await?
    } else {
        match Light::connect_with(&cli.address, cli.port, config).await {
            Ok(light) => Fixture::from(light),
            Err(e) => {
                eprintln!(
                    "Cannot Connect: unable to connect to Elgato light @ {}:{} ({})",
                    cli.address, cli.port, e
                );
                std::process::exit(1);
            }
        }
    };

    let result = match cli.command {
        Commands::Status => Ok(()),
        Commands::On => light.turn_on().await,
        Commands::Off => light.turn_off().await,
        Commands::Toggle => light.toggle().await,
        Commands::Brightness { level } => light.set_brightness(level).await,
        Commands::Brighter { amount } => light.increase_brightness(amount).await,
        Commands::Dimmer { amount } => light.decrease_brightness(amount).await,
        Commands::Temperature { kelvin } => light.set_color_temperature(kelvin).await,
        Commands::Cooler { amount } => light.increase_color_temperature(amount).await,
        Commands::Warmer { amount } => light.decrease_color_temperature(amount).await,
        Commands::Details => {
            let id = light.identity();
            println!("Details:");
            println!("  Name: {}", id.display_name());
            println!("  Product: {}", id.product_name());
            println!("  IP Address: {}:{}", id.address, id.port);
            println!("  Serial #: {}", id.serial_number());
            println!("  Hardware Rev #: {}", id.hardware_board_type());
            println!("  Firmware Version: {}", id.firmware_version());
            println!("  Firmware Build: {}", id.firmware_build_number());
            return Ok(());
        }
        Commands::Diagnostics => {
            match &light {
                Fixture::Remote(remote) => {
                    println!(
                        "\nDiagnostics:\n{}",
                        serde_json::to_string_pretty(&remote.diagnostics())?
                    );
                }
                Fixture::Simulated(_) => println!("{light} is simulated, nothing to diagnose"),
            }
            return Ok(());
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match light.refresh().await {
        Ok(state) => println!("{} - {}", light.identity().product_name(), state),
        Err(e) => {
            eprintln!("Error getting status: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
