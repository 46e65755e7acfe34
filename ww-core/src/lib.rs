#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

extern crate alloc;

use embassy_executor::Spawner;
use embassy_futures::select::{Either4, select4};
use embassy_time::{Duration, Instant, Timer};
use ww_common::*;

pub mod managers;
pub mod services;

use crate::managers::{StateManager, TickInput, TickSchedule};
use crate::services::{
    AmbientCell, DisplayService, ForecastChannel, ForecastFetcher, ForecastWorker, Journal, Lcg,
    LogService, SensorService,
};

pub const BANNER: &str = "Weather Awareness 0.1";

/// Run the device until power-off.
///
/// Only returns when start-up fails. All loops share this one task; the
/// fast clock, the slow clock, the forecast worker and the journal writer
/// interleave at their await points.
pub async fn main_task<P: PlatformTrait>(
    _spawner: Spawner,
    ctx: PlatformContext<P>,
) -> SystemResult<()> {
    let PlatformContext {
        matrix,
        mut joystick,
        sensor,
        telegraph,
        log_storage,
        forecast_source,
        clock,
        config,
    } = ctx;

    info!("weather-awareness starting...");

    let journal = Journal::new(config.log_config.mirror_enabled);
    let forecast_channel = ForecastChannel::new();
    let ambient = AmbientCell::new();

    write_banner(&journal, &clock);

    let mut state_manager = StateManager::new(
        DisplayService::new(matrix),
        ForecastFetcher::new(&forecast_channel, &config.forecast_config),
        &journal,
        Lcg::new(),
        config.state_config,
    );
    state_manager.initialize()?;

    let mut log_service = LogService::new(log_storage, &config.log_config);
    let mut worker = ForecastWorker::new(
        forecast_source,
        &telegraph,
        &journal,
        &config.forecast_config,
    );
    let mut sensor_service = SensorService::new(
        sensor,
        &telegraph,
        &journal,
        &ambient,
        &config.sensor_config,
    );

    journal.mark_initialized();
    info!("Main task started");

    let fast = fast_loop(
        &mut state_manager,
        &mut joystick,
        &clock,
        &ambient,
        Duration::from_millis(config.timing_config.fast_tick_ms),
    );
    let slow = sensor_service.run(Duration::from_millis(config.timing_config.slow_tick_ms));

    match select4(
        fast,
        slow,
        worker.run(&forecast_channel),
        log_service.run(&journal),
    )
    .await
    {
        Either4::First(never)
        | Either4::Second(never)
        | Either4::Third(never)
        | Either4::Fourth(never) => match never {},
    }
}

fn write_banner<C: WallClock>(journal: &Journal, clock: &C) {
    let now = clock.now();
    journal.write(BANNER);
    journal.write("---------------");
    journal!(journal, "Initialized {}", now);
    journal!(journal, "{}", now.time());
}

/// Fast clock. Each pass runs to completion before the next deadline is
/// awaited, so passes never overlap; deadlines that elapse during a long pass
/// are dropped by the schedule instead of queued.
async fn fast_loop<D: MatrixDisplay, J: Joystick, C: WallClock>(
    state_manager: &mut StateManager<'_, D>,
    joystick: &mut J,
    clock: &C,
    ambient: &AmbientCell,
    period: Duration,
) -> ! {
    info!("Fast clock started, period {} ms", period.as_millis());
    let mut schedule = TickSchedule::new(period, Instant::now());

    loop {
        Timer::at(schedule.deadline()).await;

        let buttons = joystick.sample().unwrap_or_else(|e| {
            warn!("Joystick read failed: {:?}", e);
            ButtonSample::RELEASED
        });
        state_manager.run_pass(TickInput {
            buttons,
            now: clock.now().time(),
            ambient: ambient.get(),
        });

        let skipped = schedule.advance(Instant::now());
        if skipped > 0 {
            debug!(
                "Fast clock overran, {} ticks dropped ({} total)",
                skipped,
                schedule.skipped()
            );
        }
    }
}
