use std::env;

use chrono_tz::Tz;
use log::{debug, warn};

/// Parses an IANA zone name such as `Europe/Berlin`.
pub fn parse_zone(name: &str) -> Option<Tz> {
    name.trim().parse().ok()
}

/// The zone the process formats in by default.
///
/// `TZ` wins when it names an IANA zone, then the system setting, then UTC.
pub fn server_timezone() -> Tz {
    if let Some(tz) = env::var("TZ")
        .ok()
        .and_then(|name| parse_zone(name.trim_start_matches(':')))
    {
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => match parse_zone(&name) {
            Some(tz) => tz,
            None => {
                warn!("system timezone {name:?} is not a known IANA zone, using UTC");
                Tz::UTC
            }
        },
        Err(err) => {
            debug!("unable to read the system timezone ({err}), using UTC");
            Tz::UTC
        }
    }
}
