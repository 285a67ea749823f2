use chrono::{FixedOffset, TimeZone};
use solcalc::format::{time_string, ClockPrecision};
use solcalc::{get_azimuth_elevation, get_solar_times, CivilInstant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let edt = FixedOffset::west_opt(4 * 3600).ok_or("bad offset")?;
    let instant = edt
        .with_ymd_and_hms(2017, 5, 21, 9, 0, 0)
        .single()
        .ok_or("ambiguous local time")?;

    let times = get_solar_times(41.503081, -81.58916, &instant)?;
    println!("Solar noon: {}", times.solar_noon);
    println!("Sunrise:    {}", times.sunrise);
    println!("Sunset:     {}", times.sunset);

    let pos = get_azimuth_elevation(&instant, 41.503081, -81.58916)?.rounded(-2);
    let clock = time_string(instant.minutes_since_midnight(), ClockPrecision::Minutes)
        .unwrap_or_default();
    println!(
        "At {clock}: azimuth {}°, elevation {}°",
        pos.azimuth, pos.elevation
    );
    Ok(())
}
