//! Decoding of the OpenWeatherMap XML forecast into a [`ForecastRecord`].

use heapless::String;
use jiff::{
    Span,
    civil::{DateTime, Time},
};
use roxmltree::{Document, Node};

use crate::{ConditionName, FetchError, ForecastRecord, IconCode, fold_temperature};

/// Parse a forecast document.
///
/// Temperatures are rounded half-to-even and sign-folded. Sun times are
/// shifted by `utc_offset_hours` and reduced to their time of day. Any
/// missing or unparseable required value fails the whole record.
pub fn decode_forecast(xml: &str, utc_offset_hours: i8) -> Result<ForecastRecord, FetchError> {
    let doc = Document::parse(xml).map_err(|_| FetchError::Malformed)?;
    let root = doc.root();

    let temperature = find(root, "temperature")?;
    let high = parse_temperature(temperature.attribute("max"))?;
    let low = parse_temperature(temperature.attribute("min"))?;

    let symbol = find(root, "symbol")?;
    let condition = symbol
        .attribute("name")
        .ok_or(FetchError::IncompleteData)?;
    let variant = symbol.attribute("var").ok_or(FetchError::IncompleteData)?;

    let sun = find(root, "sun")?;
    let sunrise = parse_sun_time(sun.attribute("rise"), utc_offset_hours)?;
    let sunset = parse_sun_time(sun.attribute("set"), utc_offset_hours)?;

    Ok(ForecastRecord {
        high,
        low,
        icon: icon_code(variant)?,
        condition: condition_name(condition),
        sunrise,
        sunset,
    })
}

fn find<'a, 'input>(root: Node<'a, 'input>, tag: &str) -> Result<Node<'a, 'input>, FetchError> {
    root.descendants()
        .find(|n| n.has_tag_name(tag))
        .ok_or(FetchError::IncompleteData)
}

/// Plausible forecast temperatures in °C.
const TEMPERATURE_RANGE: core::ops::RangeInclusive<f64> = -100.0..=100.0;

fn parse_temperature(value: Option<&str>) -> Result<i32, FetchError> {
    let value = value.ok_or(FetchError::IncompleteData)?;
    let celsius: f64 = value
        .trim()
        .parse()
        .map_err(|_| FetchError::IncompleteData)?;
    if !TEMPERATURE_RANGE.contains(&celsius) {
        return Err(FetchError::IncompleteData);
    }
    Ok(fold_temperature(libm::rint(celsius) as i32))
}

fn parse_sun_time(value: Option<&str>, utc_offset_hours: i8) -> Result<Time, FetchError> {
    let value = value.ok_or(FetchError::IncompleteData)?;
    let value = value.trim().trim_end_matches('Z');
    let utc: DateTime = value.parse().map_err(|_| FetchError::IncompleteData)?;
    let local = utc
        .checked_add(Span::new().hours(i64::from(utc_offset_hours)))
        .map_err(|_| FetchError::IncompleteData)?;
    Ok(local.time())
}

fn icon_code(variant: &str) -> Result<IconCode, FetchError> {
    let code = variant.get(..2).ok_or(FetchError::IncompleteData)?;
    String::try_from(code).map_err(|_| FetchError::IncompleteData)
}

fn condition_name(name: &str) -> ConditionName {
    let mut out = ConditionName::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<weatherdata>
  <location><name>Toronto</name></location>
  <sun rise="2024-01-01T06:00:00Z" set="2024-01-01T18:00:00Z"/>
  <forecast>
    <time from="2024-01-01T12:00:00" to="2024-01-01T15:00:00">
      <symbol number="800" name="Clear" var="01d"/>
      <temperature unit="celsius" value="12.5" min="5" max="20"/>
    </time>
  </forecast>
</weatherdata>"#;

    #[test]
    fn test_decode_clear() {
        let record = decode_forecast(CLEAR, -5).unwrap();
        assert_eq!(record.high, 20);
        assert_eq!(record.low, 5);
        assert_eq!(record.icon.as_str(), "01");
        assert_eq!(record.condition.as_str(), "Clear");
        assert_eq!(record.sunrise, Time::constant(1, 0, 0, 0));
        assert_eq!(record.sunset, Time::constant(13, 0, 0, 0));
    }

    #[test]
    fn test_no_offset() {
        let record = decode_forecast(CLEAR, 0).unwrap();
        assert_eq!(record.sunrise, Time::constant(6, 0, 0, 0));
        assert_eq!(record.sunset, Time::constant(18, 0, 0, 0));
    }

    #[test]
    fn test_offset_wraps_midnight() {
        let xml = CLEAR.replace("T06:00:00Z", "T02:30:00Z");
        let record = decode_forecast(&xml, -5).unwrap();
        assert_eq!(record.sunrise, Time::constant(21, 30, 0, 0));
    }

    #[test]
    fn test_half_to_even_rounding() {
        let xml = CLEAR.replace(r#"min="5" max="20""#, r#"min="2.5" max="3.5""#);
        let record = decode_forecast(&xml, 0).unwrap();
        assert_eq!(record.low, 2);
        assert_eq!(record.high, 4);
    }

    #[test]
    fn test_cold_values_are_folded() {
        let xml = CLEAR.replace(r#"min="5" max="20""#, r#"min="-14.2" max="-9.6""#);
        let record = decode_forecast(&xml, 0).unwrap();
        assert_eq!(record.low, 14);
        // -9.6 rounds to -10, which is folded as well
        assert_eq!(record.high, 10);
    }

    #[test]
    fn test_missing_field() {
        let xml = CLEAR.replace(r#" max="20""#, "");
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));

        let xml = CLEAR.replace(r#" var="01d""#, "");
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));

        let xml = CLEAR.replace(r#" set="2024-01-01T18:00:00Z""#, "");
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));
    }

    #[test]
    fn test_unparseable_field() {
        let xml = CLEAR.replace(r#"max="20""#, r#"max="warm""#);
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));

        let xml = CLEAR.replace("2024-01-01T06:00:00Z", "sunrise");
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));

        let xml = CLEAR.replace(r#"var="01d""#, r#"var="1""#);
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));
    }

    #[test]
    fn test_out_of_range_temperature() {
        let xml = CLEAR.replace(r#"min="5""#, r#"min="-3e9""#);
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));

        let xml = CLEAR.replace(r#"max="20""#, r#"max="inf""#);
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));

        let xml = CLEAR.replace(r#"max="20""#, r#"max="NaN""#);
        assert_eq!(decode_forecast(&xml, 0), Err(FetchError::IncompleteData));
    }

    #[test]
    fn test_not_xml() {
        assert_eq!(
            decode_forecast("<weatherdata><sun", 0),
            Err(FetchError::Malformed)
        );
    }
}
