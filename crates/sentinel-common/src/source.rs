//! Satellite sources served by the imagery endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SentinelError;

/// One of the supported Sentinel missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SatelliteSource {
    /// Sentinel-1 SAR (GRD IW)
    S1,
    /// Sentinel-2 multispectral (L1C)
    S2,
    /// Sentinel-3 OLCI
    S3,
    /// Sentinel-5 Precursor atmospheric gases
    S5P,
}

impl SatelliteSource {
    pub const ALL: [SatelliteSource; 4] = [
        SatelliteSource::S1,
        SatelliteSource::S2,
        SatelliteSource::S3,
        SatelliteSource::S5P,
    ];

    /// Key of this source inside the `wms_token` config object.
    pub fn credential_key(&self) -> &'static str {
        match self {
            SatelliteSource::S1 => "sentinel1",
            SatelliteSource::S2 => "sentinel2",
            SatelliteSource::S3 => "sentinel3",
            SatelliteSource::S5P => "sentinel5p",
        }
    }

    /// Short identifier, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SatelliteSource::S1 => "S1",
            SatelliteSource::S2 => "S2",
            SatelliteSource::S3 => "S3",
            SatelliteSource::S5P => "S5P",
        }
    }

    /// Whether this source measures gas concentrations rather than visual imagery.
    pub fn is_gas_source(&self) -> bool {
        matches!(self, SatelliteSource::S5P)
    }
}

impl FromStr for SatelliteSource {
    type Err = SentinelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S1" => Ok(SatelliteSource::S1),
            "S2" => Ok(SatelliteSource::S2),
            "S3" => Ok(SatelliteSource::S3),
            "S5P" => Ok(SatelliteSource::S5P),
            _ => Err(SentinelError::UnknownSource(s.to_string())),
        }
    }
}

impl fmt::Display for SatelliteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source() {
        assert_eq!("S1".parse::<SatelliteSource>().unwrap(), SatelliteSource::S1);
        assert_eq!("s5p".parse::<SatelliteSource>().unwrap(), SatelliteSource::S5P);
        assert_eq!(" S2 ".parse::<SatelliteSource>().unwrap(), SatelliteSource::S2);
    }

    #[test]
    fn test_parse_unknown_source() {
        for bad in ["S4", "", "sentinel2", "S5"] {
            assert!(matches!(
                bad.parse::<SatelliteSource>(),
                Err(SentinelError::UnknownSource(_))
            ));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for source in SatelliteSource::ALL {
            assert_eq!(source.to_string().parse::<SatelliteSource>().unwrap(), source);
        }
    }
}
