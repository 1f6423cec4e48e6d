use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Simplistic transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. No sanity check: Sign taken from degree-component,
/// minutes forced to unsigned by u16 type, but passing a negative value for
/// seconds leads to undefined behaviour.
pub fn dms_to_dd(d: i32, m: u16, s: f64) -> f64 {
    d.signum() as f64 * (d.abs() as f64 + (m as f64 + s / 60.) / 60.)
}

/// Transformation from the packed "HP notation", DDD.MMSSsss, to
/// degrees-with-decimals. The digits are split in decimal arithmetic,
/// so e.g. 55.3 (55°30') does not suffer from its binary representation
/// being slightly below 55.3. Non-finite input gives NaN.
pub fn hp_to_dd(hp: f64) -> f64 {
    let Ok(packed) = Decimal::from_str(&hp.abs().to_string()) else {
        return f64::NAN;
    };
    let hundred = Decimal::from(100);
    let d = packed.trunc();
    let mm = (packed - d) * hundred;
    let m = mm.trunc();
    let s = (mm - m) * hundred;

    let (Some(d), Some(m), Some(s)) = (d.to_f64(), m.to_f64(), s.to_f64()) else {
        return f64::NAN;
    };
    hp.signum() * (d + (m + s / 60.) / 60.)
}

/// Transformation from degrees-with-decimals to the packed "HP notation",
/// DDD.MMSSsss
pub fn dd_to_hp(dd: f64) -> f64 {
    let dms = Dms::from_dd(dd);
    let packed = dms.degrees as f64 + dms.minutes as f64 / 100. + dms.seconds / 10_000.;
    if dms.negative {
        -packed
    } else {
        packed
    }
}

/// An angle split into sexagesimal components
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Dms {
    pub fn from_dd(dd: f64) -> Dms {
        let abs = dd.abs();
        let mut d = abs.floor();
        let mm = (abs - d) * 60.;
        let mut m = mm.floor();
        let mut s = (mm - m) * 60.;

        // Floating point noise may leave e.g. 30' as 29' 59.99999999999"
        if 60. - s < 1e-9 {
            s = 0.;
            m += 1.;
        }
        if m >= 60. {
            m -= 60.;
            d += 1.;
        }
        Dms {
            negative: dd.is_sign_negative() && dd != 0.,
            degrees: d as u32,
            minutes: m as u32,
            seconds: s,
        }
    }

    pub fn to_dd(&self) -> f64 {
        let sign = if self.negative { -1. } else { 1. };
        sign * (self.degrees as f64 + (self.minutes as f64 + self.seconds / 60.) / 60.)
    }
}

/// Formats as "-37 57 03.72030". The formatter precision (default: 5)
/// applies to the seconds, and rounding is carried into minutes and degrees.
impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(5);
        let scale = 10_f64.powi(precision as i32);
        let mut seconds = (self.seconds * scale).round() / scale;
        let mut minutes = self.minutes;
        let mut degrees = self.degrees;
        if seconds >= 60. {
            seconds -= 60.;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes -= 60;
            degrees += 1;
        }
        let sign = if self.negative { "-" } else { "" };
        let width = if precision > 0 { precision + 3 } else { 2 };
        write!(f, "{sign}{degrees} {minutes:02} {seconds:0width$.precision$}")
    }
}

// ----- Tests ---------------------------------------------------------------------
