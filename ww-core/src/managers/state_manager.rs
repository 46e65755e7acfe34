use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb888;
use heapless::String;
use jiff::civil::Time;
use ww_common::*;

use crate::journal;
use crate::services::{
    Debouncer, DisplayService, FetchStatus, ForecastFetcher, Journal, Lcg, is_daytime,
};

/// Everything the controller knows between passes.
#[derive(Debug)]
pub struct ControllerState {
    pub current: StateId,
    /// True for exactly the first pass after a transition.
    pub just_entered: bool,
    pub cycle_count: u32,
    pub entry_cycle: u32,
    pub record: Option<ForecastRecord>,
    pub temp_choice: Choice,
    pub forecast_choice: Choice,
    pub target_temp: i32,
    pub glyph: Option<Glyph>,
    pub text_color: Rgb888,
    pub debouncer: Debouncer,
}

impl ControllerState {
    pub const fn new() -> Self {
        Self {
            current: StateId::Startup,
            just_entered: true,
            cycle_count: 0,
            entry_cycle: 0,
            record: None,
            temp_choice: Choice::Pending,
            forecast_choice: Choice::Pending,
            target_temp: 0,
            glyph: None,
            text_color: WHITE,
            debouncer: Debouncer::new(),
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.cycle_count.wrapping_sub(self.entry_cycle)
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs sampled by the fast clock for one pass.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub buttons: ButtonSample,
    pub now: Time,
    pub ambient: i32,
}

pub struct StateManager<'a, D: MatrixDisplay> {
    state: ControllerState,
    display: DisplayService<D>,
    fetcher: ForecastFetcher<'a>,
    journal: &'a Journal,
    rng: Lcg,
    config: StateConfig,
}

impl<'a, D: MatrixDisplay> StateManager<'a, D> {
    pub fn new(
        display: DisplayService<D>,
        fetcher: ForecastFetcher<'a>,
        journal: &'a Journal,
        rng: Lcg,
        config: StateConfig,
    ) -> Self {
        Self {
            state: ControllerState::new(),
            display,
            fetcher,
            journal,
            rng,
            config,
        }
    }

    pub fn initialize(&mut self) -> SystemResult<()> {
        info!("Initializing state manager");
        self.display.initialize()?;
        Ok(())
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn current(&self) -> StateId {
        self.state.current
    }

    pub fn display(&self) -> &DisplayService<D> {
        &self.display
    }

    /// One fast-clock pass: debounce, count, then run the current state.
    pub fn run_pass(&mut self, input: TickInput) -> StateId {
        let pressed = self.state.debouncer.update(input.buttons);
        self.state.cycle_count = self.state.cycle_count.wrapping_add(1);
        let entering = core::mem::replace(&mut self.state.just_entered, false);

        match self.state.current {
            StateId::Startup => self.transition_to(StateId::LightShow1),
            StateId::LightShow1 => {
                self.light_show(entering, self.config.light_show_1_cycles, input.now)
            }
            StateId::GetForecast => self.get_forecast(),
            StateId::AskTemp => self.ask_temp(entering, pressed, input.now),
            StateId::AskForecast => self.ask_forecast(entering, pressed),
            StateId::LightShow2 => {
                self.state.text_color = WHITE;
                self.light_show(entering, self.config.light_show_2_cycles, input.now)
            }
            StateId::MonitorDay => self.monitor(true, input),
            StateId::MonitorNight => self.monitor(false, input),
            StateId::WeatherError => self.show(MISTY_ROSE, "??", YELLOW),
        }

        self.state.current
    }

    fn transition_to(&mut self, next: StateId) {
        info!("Transitioning from {:?} to {:?}", self.state.current, next);
        self.state.current = next;
        self.state.just_entered = true;
        journal!(self.journal, "Current state: {}", next);
    }

    fn show(&mut self, background: Rgb888, text: &str, color: Rgb888) {
        if let Err(e) = self.display.show_text(background, text, color) {
            error!("Failed to paint matrix: {:?}", e);
        }
    }

    fn present(&mut self) {
        if let Err(e) = self.display.present() {
            error!("Failed to paint matrix: {:?}", e);
        }
    }

    fn daytime(&self, now: Time) -> Option<bool> {
        self.state
            .record
            .as_ref()
            .map(|r| is_daytime(now, r.sunrise, r.sunset))
    }

    fn light_show(&mut self, entering: bool, dwell: u32, now: Time) {
        if entering {
            self.state.entry_cycle = self.state.cycle_count;
            return;
        }

        self.display.paint_random(&mut self.rng);
        self.present();

        if self.state.elapsed() <= dwell {
            return;
        }

        let next = match self.state.current {
            StateId::LightShow1 => StateId::GetForecast,
            _ => match self.daytime(now) {
                Some(true) => StateId::MonitorDay,
                Some(false) => StateId::MonitorNight,
                None => StateId::WeatherError,
            },
        };
        self.transition_to(next);
    }

    fn get_forecast(&mut self) {
        if self.fetcher.start() {
            self.display.fill(ORANGE);
            self.present();
        }

        match self.fetcher.poll() {
            FetchStatus::Pending => {}
            FetchStatus::Ready(Ok(record)) => {
                info!("Forecast received: high {} low {}", record.high, record.low);
                self.state.record = Some(record);
                self.display.fill(PURPLE);
                self.present();
                self.transition_to(StateId::AskTemp);
            }
            FetchStatus::Ready(Err(e)) => {
                warn!("Forecast failed: {}", e);
                self.transition_to(StateId::WeatherError);
            }
        }
    }

    fn ask_temp(&mut self, entering: bool, pressed: bool, now: Time) {
        if entering {
            let Some(record) = self.state.record.as_ref() else {
                self.transition_to(StateId::WeatherError);
                return;
            };
            self.state.target_temp = if is_daytime(now, record.sunrise, record.sunset) {
                record.high
            } else {
                record.low
            };
            self.state.temp_choice = Choice::Pending;

            let text = number(self.state.target_temp);
            self.show(BLACK, &text, self.state.text_color);
            return;
        }

        if !pressed {
            return;
        }

        let text = number(self.state.target_temp);
        let color = self.state.text_color;
        let input = self.state.debouncer.last();
        if input.is_reject() {
            self.state.temp_choice = Choice::Rejected;
            self.show(RED, &text, color);
        } else if input.is_confirm() {
            self.state.temp_choice = Choice::Confirmed;
            self.show(GREEN, &text, color);
        } else if self.state.temp_choice.is_made() {
            info!("Temperature answer: {:?}", self.state.temp_choice);
            self.transition_to(StateId::AskForecast);
        }
    }

    fn ask_forecast(&mut self, entering: bool, pressed: bool) {
        if entering {
            self.state.forecast_choice = Choice::Pending;
            if let Some(glyph) = self
                .state
                .record
                .as_ref()
                .and_then(|r| glyph_for(r.icon.as_str()))
            {
                self.state.glyph = Some(glyph);
            } else {
                debug!("No glyph for icon, keeping previous");
            }
            let (text, color) = self.glyph_parts();
            self.show(BLACK, text, color);
            return;
        }

        if !pressed {
            return;
        }

        let (text, color) = self.glyph_parts();
        let input = self.state.debouncer.last();
        if input.is_reject() {
            self.state.forecast_choice = Choice::Rejected;
            self.show(RED, text, color);
        } else if input.is_confirm() {
            self.state.forecast_choice = Choice::Confirmed;
            self.show(GREEN, text, color);
        } else if self.state.forecast_choice.is_made() {
            info!("Forecast answer: {:?}", self.state.forecast_choice);
            self.transition_to(StateId::LightShow2);
        }
    }

    fn glyph_parts(&self) -> (&'static str, Rgb888) {
        match self.state.glyph {
            Some(glyph) => (glyph.text, glyph.color),
            None => ("", self.state.text_color),
        }
    }

    fn monitor(&mut self, day: bool, input: TickInput) {
        let Some((is_day, high, low)) = self
            .state
            .record
            .as_ref()
            .map(|r| (is_daytime(input.now, r.sunrise, r.sunset), r.high, r.low))
        else {
            self.transition_to(StateId::WeatherError);
            return;
        };

        if is_day != day {
            self.transition_to(if is_day {
                StateId::MonitorDay
            } else {
                StateId::MonitorNight
            });
            return;
        }

        let (background, period) = if day {
            let bg = if input.ambient >= high { YELLOW_GREEN } else { FIREBRICK };
            (bg, self.config.monitor_day_period)
        } else {
            let bg = if input.ambient <= low { BROWN } else { CHARTREUSE };
            (bg, self.config.monitor_night_period)
        };

        let text = number(input.ambient);
        self.show(background, &text, self.state.text_color);

        if period != 0 && self.state.cycle_count % period == 0 {
            self.transition_to(StateId::LightShow2);
        }
    }
}

fn number(value: i32) -> String<12> {
    let mut s = String::new();
    let _ = write!(s, "{}", value);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ForecastChannel;

    struct NullMatrix;

    impl MatrixDisplay for NullMatrix {
        type Error = ();

        fn show(&mut self, _frame: &Frame) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    const NOON: Time = Time::constant(12, 0, 0, 0);

    fn record() -> ForecastRecord {
        ForecastRecord {
            high: 20,
            low: 5,
            icon: String::try_from("01").unwrap(),
            condition: String::try_from("Clear").unwrap(),
            sunrise: Time::constant(6, 0, 0, 0),
            sunset: Time::constant(18, 0, 0, 0),
        }
    }

    fn input(now: Time) -> TickInput {
        TickInput {
            buttons: ButtonSample::RELEASED,
            now,
            ambient: 0,
        }
    }

    fn manager<'a>(channel: &'a ForecastChannel, journal: &'a Journal) -> StateManager<'a, NullMatrix> {
        let fetcher = ForecastFetcher::new(channel, &ForecastConfig::default());
        let mut manager = StateManager::new(
            DisplayService::new(NullMatrix),
            fetcher,
            journal,
            Lcg::with_seed(1),
            StateConfig::default(),
        );
        manager.initialize().unwrap();
        manager
    }

    #[test]
    fn test_light_show_1_dwell() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);

        assert_eq!(sm.run_pass(input(NOON)), StateId::LightShow1);
        // entry pass snapshots the cycle
        sm.run_pass(input(NOON));
        let entry = sm.state().entry_cycle;
        while sm.state().cycle_count - entry < 40 {
            assert_eq!(sm.run_pass(input(NOON)), StateId::LightShow1);
        }
        assert_eq!(sm.state().elapsed(), 40);
        assert_eq!(sm.run_pass(input(NOON)), StateId::GetForecast);
        assert_eq!(sm.state().elapsed(), 41);
    }

    #[test]
    fn test_weather_error_is_terminal() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        sm.state.current = StateId::GetForecast;
        sm.state.just_entered = true;

        sm.run_pass(input(NOON));
        assert!(sm.fetcher.is_pending());
        assert_eq!(sm.display().frame().count(ORANGE), 64);

        channel.result.signal(Err(FetchError::IncompleteData));
        assert_eq!(sm.run_pass(input(NOON)), StateId::WeatherError);
        for _ in 0..100 {
            assert_eq!(sm.run_pass(input(NOON)), StateId::WeatherError);
        }
        assert_eq!(sm.display().frame().pixel(7, 7), Some(MISTY_ROSE));
        assert!(sm.display().frame().count(YELLOW) > 0);
    }

    #[test]
    fn test_monitor_day_exits_at_sunset() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        sm.state.record = Some(record());
        sm.state.current = StateId::MonitorDay;

        let mut tick = input(NOON);
        tick.ambient = 21;
        assert_eq!(sm.run_pass(tick), StateId::MonitorDay);
        assert_eq!(sm.display().frame().pixel(7, 7), Some(YELLOW_GREEN));

        tick.ambient = 19;
        assert_eq!(sm.run_pass(tick), StateId::MonitorDay);
        assert_eq!(sm.display().frame().pixel(7, 7), Some(FIREBRICK));

        tick.now = Time::constant(18, 0, 1, 0);
        assert_eq!(sm.run_pass(tick), StateId::MonitorNight);
    }

    #[test]
    fn test_monitor_night_colors() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        sm.state.record = Some(record());
        sm.state.current = StateId::MonitorNight;

        let mut tick = input(Time::constant(23, 0, 0, 0));
        tick.ambient = 5;
        sm.run_pass(tick);
        assert_eq!(sm.display().frame().pixel(7, 7), Some(BROWN));
        tick.ambient = 6;
        sm.run_pass(tick);
        assert_eq!(sm.display().frame().pixel(7, 7), Some(CHARTREUSE));
    }

    #[test]
    fn test_monitor_night_loops_back_to_light_show() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        sm.state.record = Some(record());
        sm.state.current = StateId::MonitorNight;
        sm.state.cycle_count = 498;

        let tick = input(Time::constant(2, 0, 0, 0));
        assert_eq!(sm.run_pass(tick), StateId::MonitorNight);
        assert_eq!(sm.run_pass(tick), StateId::LightShow2);
    }

    #[test]
    fn test_monitor_day_loops_back_to_light_show() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        sm.state.record = Some(record());
        sm.state.current = StateId::MonitorDay;
        sm.state.cycle_count = 4998;

        assert_eq!(sm.run_pass(input(NOON)), StateId::MonitorDay);
        assert_eq!(sm.run_pass(input(NOON)), StateId::LightShow2);
        assert_eq!(sm.state().cycle_count, 5000);
    }

    #[test]
    fn test_monitor_night_exits_at_sunrise() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        sm.state.record = Some(record());
        sm.state.current = StateId::MonitorNight;

        assert_eq!(
            sm.run_pass(input(Time::constant(5, 59, 59, 0))),
            StateId::MonitorNight
        );
        assert_eq!(
            sm.run_pass(input(Time::constant(6, 0, 0, 0))),
            StateId::MonitorDay
        );
    }

    #[test]
    fn test_light_show_2_ends_in_monitor_night() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        sm.state.record = Some(record());
        sm.state.text_color = RED;
        sm.state.current = StateId::LightShow2;
        sm.state.just_entered = true;

        let night = input(Time::constant(22, 0, 0, 0));
        // entry pass, then 60 painted passes within the dwell
        for _ in 0..61 {
            assert_eq!(sm.run_pass(night), StateId::LightShow2);
        }
        assert_eq!(sm.state().text_color, WHITE);
        assert_eq!(sm.run_pass(night), StateId::MonitorNight);
        assert_eq!(sm.state().elapsed(), 61);
    }

    #[test]
    fn test_ask_forecast_unknown_icon_keeps_glyph() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        let mut rec = record();
        rec.icon = String::try_from("07").unwrap();
        sm.state.record = Some(rec);
        sm.state.glyph = glyph_for("10");
        sm.state.current = StateId::AskForecast;
        sm.state.just_entered = true;

        sm.run_pass(input(NOON));
        assert_eq!(sm.state().glyph, glyph_for("10"));
        assert!(sm.display().frame().count(BLUE) > 0);
    }

    #[test]
    fn test_transitions_are_journaled() {
        let channel = ForecastChannel::new();
        let journal = Journal::new(false);
        let mut sm = manager(&channel, &journal);
        assert!(journal.try_next_line().is_none());
        sm.run_pass(input(NOON));
        assert_eq!(
            journal.try_next_line().unwrap().as_str(),
            "Current state: LIGHT_SHOW_1"
        );
    }
}
