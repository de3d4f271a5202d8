//! Records `get_info` responses from the live API as reference fixtures.
//!
//! ```text
//! cargo run --example generate_references -- --sensor <SERIAL> --controller <SERIAL>
//! ```
//!
//! Serials default to `NETRO_SENS_SERIAL` / `NETRO_CTRL_SERIAL`, read from the
//! environment or a `.env` file.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use netro_client::{Envelope, NetroClient, NetroResult, ReqwestTransport, DEFAULT_BASE_URL};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Soil sensor serial.
    #[arg(short = 's', long)]
    sensor: Option<String>,

    /// Controller serial.
    #[arg(short = 'c', long)]
    controller: Option<String>,

    /// API base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory the fixtures are written to.
    #[arg(short = 'o', long, default_value = "tests/reference_data")]
    output_dir: PathBuf,
}

fn serial_from(arg: Option<String>, var: &str) -> Option<String> {
    arg.or_else(|| std::env::var(var).ok())
}

fn write_fixture(path: &Path, envelope: &Envelope) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(envelope)?;
    std::fs::write(path, json + "\n")?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn data_keys(envelope: &Envelope, section: &str) -> Vec<String> {
    envelope
        .data()
        .and_then(|data| data.get(section))
        .and_then(|section| section.as_object())
        .map(|fields| fields.keys().cloned().collect())
        .unwrap_or_default()
}

async fn fetch(client: &NetroClient<ReqwestTransport>, serial: &str) -> NetroResult<Envelope> {
    client.devices().get_info(serial).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let (Some(sensor), Some(controller)) = (
        serial_from(cli.sensor, "NETRO_SENS_SERIAL"),
        serial_from(cli.controller, "NETRO_CTRL_SERIAL"),
    ) else {
        error!("Both a sensor and a controller serial are required");
        error!("Pass --sensor/--controller or set NETRO_SENS_SERIAL and NETRO_CTRL_SERIAL");
        std::process::exit(2);
    };

    std::fs::create_dir_all(&cli.output_dir)?;

    let client = NetroClient::builder().base_url(&cli.base_url).build()?;

    info!("Fetching sensor info...");
    let sensor_info = fetch(&client, &sensor).await?;
    write_fixture(&cli.output_dir.join("sensor_response.json"), &sensor_info)?;

    info!("Fetching controller info...");
    let controller_info = fetch(&client, &controller).await?;
    write_fixture(&cli.output_dir.join("controller_response.json"), &controller_info)?;

    info!("Sensor fields: {:?}", data_keys(&sensor_info, "sensor"));
    info!("Controller fields: {:?}", data_keys(&controller_info, "device"));

    Ok(())
}
