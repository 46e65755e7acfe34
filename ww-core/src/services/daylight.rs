use jiff::civil::Time;

/// True unless `now` falls before sunrise or after sunset. Only the time of
/// day is compared.
pub fn is_daytime(now: Time, sunrise: Time, sunset: Time) -> bool {
    !(now < sunrise || now > sunset)
}
