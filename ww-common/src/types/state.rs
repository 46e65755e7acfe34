use core::fmt;

/// The controller's states, in the order a normal run visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateId {
    #[default]
    Startup,
    LightShow1,
    GetForecast,
    AskTemp,
    AskForecast,
    LightShow2,
    MonitorDay,
    MonitorNight,
    WeatherError,
}

impl StateId {
    /// Journal name, e.g. `LIGHT_SHOW_1`.
    pub const fn name(self) -> &'static str {
        match self {
            StateId::Startup => "STARTUP",
            StateId::LightShow1 => "LIGHT_SHOW_1",
            StateId::GetForecast => "GET_FORECAST",
            StateId::AskTemp => "ASK_TEMP",
            StateId::AskForecast => "ASK_FORECAST",
            StateId::LightShow2 => "LIGHT_SHOW_2",
            StateId::MonitorDay => "MONITOR_DAY",
            StateId::MonitorNight => "MONITOR_NIGHT",
            StateId::WeatherError => "WEATHER_ERROR",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, StateId::WeatherError)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
