use glam::Vec3;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Scale applied to catalog distances (light-years) so the full catalog
/// fits inside the working volume of the scene.
pub const DISPLAY_SCALE: f64 = 0.5;

static RA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)h(\d+)m([\d.]+)s").unwrap());

static DEC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]?)(\d+)°(\d+)′(\d+(?:\.\d+)?)″").unwrap());

/// Parses a right ascension such as `14h29m43s` into radians.
///
/// Input that does not match the pattern yields `0.0`; a bad coordinate
/// places the star on the zero meridian instead of dropping it.
pub fn ra_to_radians(ra: &str) -> f64 {
    let Some(caps) = RA_REGEX.captures(ra) else {
        debug!("unparseable right ascension {:?}, using 0", ra);
        return 0.0;
    };
    let hours: f64 = caps[1].parse().unwrap_or(0.0);
    let minutes: f64 = caps[2].parse().unwrap_or(0.0);
    let seconds: f64 = caps[3].parse().unwrap_or(0.0);

    let total_hours = hours + minutes / 60.0 + seconds / 3600.0;
    (total_hours * 15.0).to_radians()
}

/// Parses a declination such as `−62°40′46″` into radians.
///
/// Both the ASCII hyphen and the Unicode minus sign (U+2212) mark a
/// southern declination. Non-matching input yields `0.0`.
pub fn dec_to_radians(dec: &str) -> f64 {
    let normalized = dec.replace('\u{2212}', "-");
    let Some(caps) = DEC_REGEX.captures(&normalized) else {
        debug!("unparseable declination {:?}, using 0", dec);
        return 0.0;
    };
    let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
    let degrees: f64 = caps[2].parse().unwrap_or(0.0);
    let minutes: f64 = caps[3].parse().unwrap_or(0.0);
    let seconds: f64 = caps[4].parse().unwrap_or(0.0);

    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    (sign * magnitude).to_radians()
}

/// Converts equatorial coordinates plus distance into a scene position.
///
/// RA is the azimuth around the y axis and Dec the elevation above the
/// y = 0 reference plane.
pub fn ra_dec_to_xyz(ra: &str, dec: &str, distance_ly: f64) -> Vec3 {
    let ra_rad = ra_to_radians(ra);
    let dec_rad = dec_to_radians(dec);
    spherical_to_cartesian(ra_rad, dec_rad, distance_ly)
}

fn spherical_to_cartesian(ra_rad: f64, dec_rad: f64, distance_ly: f64) -> Vec3 {
    let scaled = distance_ly * DISPLAY_SCALE;
    let x = scaled * dec_rad.cos() * ra_rad.cos();
    let y = scaled * dec_rad.sin();
    let z = scaled * dec_rad.cos() * ra_rad.sin();
    Vec3::new(x as f32, y as f32, z as f32)
}
