use std::process::ExitCode;

use log::{error, info};

use gaugedeck::config::Config;
use gaugedeck::controller::Controller;
use gaugedeck::errors::Error;
use gaugedeck::hardware::{LinuxI2c, LinuxPin, Pca9685};
use gaugedeck::io::{HostLink, Serial};

/// Analog servos want a 20ms frame.
const PWM_FREQUENCY: u16 = 50;

fn run() -> Result<(), Error> {
    // Optional config file path as the single argument; defaults otherwise.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut link = Serial::new(config.serial_port.clone(), config.baud_rate);
    link.open()?;
    info!("host link open on {}", link);

    let bus = LinuxI2c::open(config.i2c_bus, config.i2c_address)?;
    let driver = Pca9685::new(Box::new(bus), PWM_FREQUENCY)?;
    info!(
        "PCA9685 at 0x{:02X} on bus {} running at {}Hz",
        config.i2c_address, config.i2c_bus, PWM_FREQUENCY
    );

    let button_pin = LinuxPin::open_pullup(config.button_pin)?;
    let switch_pin = LinuxPin::open_pullup(config.switch_pin)?;

    let mut controller = Controller::new(
        &config,
        Box::new(link),
        Box::new(driver),
        Box::new(button_pin),
        Box::new(switch_pin),
    );
    controller.run()
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
