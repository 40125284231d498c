//! Geographic coordinate types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse a literal `"<lat>,<lng>"` pair.
    ///
    /// Both parts must be plain decimal numbers, optionally signed. Whitespace
    /// around either number is allowed. Latitude must lie within ±90 and
    /// longitude within ±180. Anything else (street names, extra commas,
    /// exponents, out-of-range values) returns `None`, so the caller can fall
    /// back to geocoding the text.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_cost_server::domain::Coordinates;
    ///
    /// let c = Coordinates::parse_literal("-23.55,-46.63").unwrap();
    /// assert_eq!(c, Coordinates::new(-23.55, -46.63));
    ///
    /// assert!(Coordinates::parse_literal("Rua Augusta, 100").is_none());
    /// ```
    pub fn parse_literal(s: &str) -> Option<Self> {
        let (lat, lng) = s.trim().split_once(',')?;
        let (lat, lng) = (lat.trim(), lng.trim());

        if !is_decimal(lat) || !is_decimal(lng) {
            return None;
        }

        let coords = Self {
            lat: lat.parse().ok()?,
            lng: lng.parse().ok()?,
        };
        coords.is_valid().then_some(coords)
    }

    /// Whether both values are finite and within the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Format as `lng,lat`, the order routing services expect in URL paths.
    pub fn lng_lat(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Matches `[+-]?digits(.digits)?`.
fn is_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());

    all_digits(int_part) && frac_part.is_none_or(all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_decimals() {
        assert_eq!(
            Coordinates::parse_literal("-23.55,-46.63"),
            Some(Coordinates::new(-23.55, -46.63))
        );
        assert_eq!(
            Coordinates::parse_literal("+1.5,2"),
            Some(Coordinates::new(1.5, 2.0))
        );
    }

    #[test]
    fn allows_whitespace_around_numbers() {
        assert_eq!(
            Coordinates::parse_literal("  -23.55 , -46.63 "),
            Some(Coordinates::new(-23.55, -46.63))
        );
    }

    #[test]
    fn rejects_addresses() {
        assert!(Coordinates::parse_literal("Av. Paulista, 1000").is_none());
        assert!(Coordinates::parse_literal("1000, Av. Paulista").is_none());
        assert!(Coordinates::parse_literal("").is_none());
        assert!(Coordinates::parse_literal(",").is_none());
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(Coordinates::parse_literal("1.,2").is_none());
        assert!(Coordinates::parse_literal(".5,2").is_none());
        assert!(Coordinates::parse_literal("1e3,2").is_none());
        assert!(Coordinates::parse_literal("1,2,3").is_none());
        assert!(Coordinates::parse_literal("--1,2").is_none());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Coordinates::parse_literal("123,456").is_none());
        assert!(Coordinates::parse_literal("-90.5,10").is_none());
        assert!(Coordinates::parse_literal("10,180.01").is_none());
        assert_eq!(
            Coordinates::parse_literal("90,-180"),
            Some(Coordinates::new(90.0, -180.0))
        );

        let huge = format!("1{},1", "0".repeat(400));
        assert!(Coordinates::parse_literal(&huge).is_none());
    }

    #[test]
    fn lng_lat_order() {
        let c = Coordinates::new(-23.55, -46.63);
        assert_eq!(c.lng_lat(), "-46.63,-23.55");
        assert_eq!(c.to_string(), "-23.55,-46.63");
    }
}
