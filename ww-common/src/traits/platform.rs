use embassy_executor::Spawner;

use crate::{
    DeviceConfig, EnvironmentSensor, ForecastSource, Joystick, LogStorage, MatrixDisplay,
    SystemResult, Telegraph, WallClock,
};

pub trait PlatformTrait: Sized {
    type MatrixDevice: MatrixDisplay;

    type JoystickDevice: Joystick;

    type SensorDevice: EnvironmentSensor;

    type TelegraphDevice: Telegraph;

    type LogDevice: LogStorage;

    type ForecastDevice: ForecastSource;

    type ClockDevice: WallClock;

    /// Initialize the logger (optional)
    fn init_logger() {}

    async fn init(spawner: Spawner) -> SystemResult<PlatformContext<Self>>;

    /// Resets the board
    fn sys_reset();

    fn sys_stop();
}

pub struct PlatformContext<P: PlatformTrait> {
    pub matrix: P::MatrixDevice,
    pub joystick: P::JoystickDevice,
    pub sensor: P::SensorDevice,
    pub telegraph: P::TelegraphDevice,
    pub log_storage: P::LogDevice,
    pub forecast_source: P::ForecastDevice,
    pub clock: P::ClockDevice,
    pub config: DeviceConfig,
}
