//! Print the UID of every card presented to an SL030 reader.
//!
//! # Usage
//! ```bash
//! # Block on the detect line (BCM 4) of a reader at 0x50 on /dev/i2c-1
//! sl030-poll --bus 1 --address 0x50 --detect 4
//!
//! # No detect line wired: select once a second
//! sl030-poll --address 0x50 --interval-ms 1000
//! ```

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use sl030::{Card, Config, GpioDetect, GpioWake, I2cTransport, NoSignal, Sl030, WakeSignal};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// I2C bus number
    #[arg(long, default_value_t = 1)]
    bus: u8,
    /// Reader slave address, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_address, default_value = "0x50")]
    address: u16,
    /// BCM pin wired to the card detect output
    #[arg(long)]
    detect: Option<u8>,
    /// BCM pin wired to the wake input
    #[arg(long)]
    wake: Option<u8>,
    /// Delay between command and response read
    #[arg(long, default_value_t = 100)]
    settle_ms: u64,
    /// Select interval when no detect pin is given
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,
}

fn parse_address(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address {:?}: {}", s, e))
}

fn print_card(card: &Card) {
    println!("type={:#04X} uid={}", card.card_type, card.uid_hex());
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config {
        settle_delay: Duration::from_millis(cli.settle_ms),
        ..Config::default()
    };

    info!("Opening SL030 on i2c-{} at {:#04X}", cli.bus, cli.address);
    let transport = I2cTransport::new(cli.bus, cli.address)?;
    let reader = Sl030::with_config(transport, config);

    match cli.wake {
        Some(pin) => {
            let mut reader = reader.with_wake(GpioWake::new(pin)?)?;
            reader.wake()?;
            run(reader, &cli)
        }
        None => run(reader, &cli),
    }
}

fn run<W: WakeSignal>(
    mut reader: Sl030<I2cTransport, NoSignal, W>,
    cli: &Cli,
) -> Result<(), Box<dyn Error>> {
    match cli.detect {
        Some(pin) => {
            let mut reader = reader.with_detect(GpioDetect::new(pin)?);
            info!("Waiting for cards on detect pin {}", pin);
            loop {
                match reader.poll()? {
                    Some(card) => print_card(&card),
                    None => warn!("Card left the field before it could be selected"),
                }
            }
        }
        None => {
            let interval = Duration::from_millis(cli.interval_ms);
            info!("No detect pin, selecting every {:?}", interval);
            loop {
                if let Some(card) = reader.select()? {
                    print_card(&card);
                }
                std::thread::sleep(interval);
            }
        }
    }
}
