use embassy_executor::Spawner;
use embassy_time::Duration;
use file_journal::FileJournal;
use simulated_clock::SimulatedClock;
use ww_common::*;
use ww_core::main_task;

mod config;
mod drivers;

use crate::drivers::{
    CannedForecastSource, LoopbackTelegraph, SimulatedSensor, StdinJoystick, TerminalMatrix,
};

struct Platform;

impl PlatformTrait for Platform {
    type MatrixDevice = TerminalMatrix;

    type JoystickDevice = StdinJoystick;

    type SensorDevice = SimulatedSensor;

    type TelegraphDevice = LoopbackTelegraph;

    type LogDevice = FileJournal;

    type ForecastDevice = CannedForecastSource;

    type ClockDevice = SimulatedClock;

    async fn init(_spawner: Spawner) -> SystemResult<PlatformContext<Self>> {
        let config = config::load_config();
        let log_storage = FileJournal::create(config::log_path()).map_err(|e| {
            error!("Journal file init failed: {}", e);
            SystemError::HardwareError(HardwareError::CommunicationError)
        })?;

        // clear screen once; frames redraw from the top-left corner
        print!("\x1b[2J");

        Ok(PlatformContext {
            matrix: TerminalMatrix::new(),
            joystick: StdinJoystick::spawn(),
            sensor: SimulatedSensor::new(31.0),
            telegraph: LoopbackTelegraph::new(),
            log_storage,
            forecast_source: CannedForecastSource::new(Duration::from_millis(800)),
            clock: SimulatedClock::from_system(config.forecast_config.utc_offset_hours),
            config,
        })
    }

    fn sys_reset() {
        info!("Simulator platform reset");
    }

    fn sys_stop() {
        info!("Simulator platform stop");
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
        }
    }
}
