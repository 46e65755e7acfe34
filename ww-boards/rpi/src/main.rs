use embassy_executor::Spawner;
use file_journal::FileJournal;
use simulated_clock::SimulatedClock;
use ww_common::*;
use ww_core::main_task;
use ww_core::services::HttpForecastSource;

mod config;
mod drivers;

use crate::drivers::{EvdevJoystick, IioSensor, SenseHatMatrix, TunTapNetwork};

struct Platform;

fn hardware_error(device: &str, e: std::io::Error) -> SystemError {
    error!("{} init failed: {}", device, e);
    SystemError::HardwareError(HardwareError::CommunicationError)
}

impl PlatformTrait for Platform {
    type MatrixDevice = SenseHatMatrix;

    type JoystickDevice = EvdevJoystick;

    type SensorDevice = IioSensor;

    type TelegraphDevice = NoTelegraph;

    type LogDevice = FileJournal;

    type ForecastDevice = HttpForecastSource;

    type ClockDevice = SimulatedClock;

    async fn init(spawner: Spawner) -> SystemResult<PlatformContext<Self>> {
        let config = config::load_config();

        let matrix = SenseHatMatrix::open().map_err(|e| hardware_error("LED matrix", e))?;
        let joystick = EvdevJoystick::open().map_err(|e| hardware_error("Joystick", e))?;
        let sensor = IioSensor::open().map_err(|e| hardware_error("HTS221", e))?;
        let log_storage =
            FileJournal::create(config::log_path()).map_err(|e| hardware_error("Journal file", e))?;

        let network = TunTapNetwork::new(spawner, &config::tap_interface())?;
        let forecast_source = HttpForecastSource::new(network.stack(), &config.forecast_config);

        Ok(PlatformContext {
            matrix,
            joystick,
            sensor,
            telegraph: NoTelegraph,
            log_storage,
            forecast_source,
            // wall time comes from the host clock (NTP-synced by the OS)
            clock: SimulatedClock::from_system(config.forecast_config.utc_offset_hours),
            config,
        })
    }

    fn sys_reset() {
        info!("Raspberry Pi platform reset");
        std::process::exit(1);
    }

    fn sys_stop() {
        info!("Raspberry Pi platform stop");
        std::process::exit(0);
    }

    fn init_logger() {
        env_logger::init();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    Platform::init_logger();
    match Platform::init(spawner).await {
        Ok(platform_ctx) => {
            if let Err(e) = main_task::<Platform>(spawner, platform_ctx).await {
                error!("Main task error: {:?}", e);
                Platform::sys_stop();
            }
        }
        Err(e) => {
            error!("Platform init error: {:?}", e);
            Platform::sys_reset();
        }
    }
}
