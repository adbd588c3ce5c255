//! Local timestamping of fleet readings
//!
//! Records are stamped in São Paulo time whatever the host time zone is.
//! Brazil dropped daylight saving in 2019, so the zone is a fixed UTC-03:00.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use nutriscan_types::FleetReading;
use serde::{Deserialize, Serialize};

use crate::model::FleetFields;

/// Seconds São Paulo is behind UTC
pub const SAO_PAULO_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Date and time strings attached to a fleet reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetTimestamp {
    /// DD/MM/YYYY
    pub date: String,
    /// HH:MM:SS
    pub time: String,
}

/// The instant as São Paulo wall-clock time (UTC-03:00)
pub fn to_sao_paulo(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    // west_opt only fails outside +-24h
    let zone = FixedOffset::west_opt(SAO_PAULO_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    now.with_timezone(&zone)
}

pub fn stamp_at(now: DateTime<Utc>) -> FleetTimestamp {
    let local = to_sao_paulo(now);
    FleetTimestamp {
        date: local.format("%d/%m/%Y").to_string(),
        time: local.format("%H:%M:%S").to_string(),
    }
}

pub fn stamp_now() -> FleetTimestamp {
    stamp_at(Utc::now())
}

pub fn stamp_reading(fields: FleetFields, timestamp: FleetTimestamp) -> FleetReading {
    FleetReading {
        bus_prefix: fields.bus_prefix,
        odometer_km: fields.odometer_km,
        liters: fields.liters,
        pump_number: fields.pump_number,
        date: timestamp.date,
        time: timestamp.time,
    }
}
