//! Fleet capture: which photos a refuelling record needs and what the model reads from them

use serde::{Deserialize, Serialize};

/// One photo position in a fleet capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhotoSlot {
    /// Bus exterior showing the fleet prefix
    Prefix,
    /// Dashboard showing the odometer
    Odometer,
    /// Pump display showing liters dispensed
    Liters,
    /// Pump or nozzle number
    Pump,
}

impl PhotoSlot {
    pub fn label(&self) -> &'static str {
        match self {
            PhotoSlot::Prefix => "Prefixo",
            PhotoSlot::Odometer => "Odômetro",
            PhotoSlot::Liters => "Litros",
            PhotoSlot::Pump => "Bomba",
        }
    }
}

/// How many photos a capture is made of
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FleetLayout {
    /// Prefix, odometer, and one pump photo carrying both liters and pump number
    #[default]
    Three,
    /// Prefix, odometer, liters, and pump number each photographed separately
    Four,
}

impl FleetLayout {
    /// Required photos, in the order they are sent to the model
    pub fn required_slots(&self) -> &'static [PhotoSlot] {
        match self {
            FleetLayout::Three => &[PhotoSlot::Prefix, PhotoSlot::Odometer, PhotoSlot::Pump],
            FleetLayout::Four => &[
                PhotoSlot::Prefix,
                PhotoSlot::Odometer,
                PhotoSlot::Liters,
                PhotoSlot::Pump,
            ],
        }
    }

    pub fn photo_count(&self) -> usize {
        self.required_slots().len()
    }

    /// Name of the downloadable row, e.g. `registro_2031.csv`
    pub fn export_file_name(&self, bus_prefix: &str) -> String {
        let stem = match self {
            FleetLayout::Three => "registro",
            FleetLayout::Four => "abastecimento",
        };
        format!("{}_{}.csv", stem, sanitize_for_file_name(bus_prefix))
    }
}

impl std::fmt::Display for FleetLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetLayout::Three => write!(f, "three"),
            FleetLayout::Four => write!(f, "four"),
        }
    }
}

fn sanitize_for_file_name(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "sem_prefixo".to_string()
    } else {
        cleaned
    }
}

/// Photos supplied by the user, keyed by slot
#[derive(Debug, Clone)]
pub struct FleetPhotos<T> {
    pub prefix: Option<T>,
    pub odometer: Option<T>,
    pub liters: Option<T>,
    pub pump: Option<T>,
}

impl<T> Default for FleetPhotos<T> {
    fn default() -> Self {
        Self {
            prefix: None,
            odometer: None,
            liters: None,
            pump: None,
        }
    }
}

impl<T> FleetPhotos<T> {
    pub fn get(&self, slot: PhotoSlot) -> Option<&T> {
        match slot {
            PhotoSlot::Prefix => self.prefix.as_ref(),
            PhotoSlot::Odometer => self.odometer.as_ref(),
            PhotoSlot::Liters => self.liters.as_ref(),
            PhotoSlot::Pump => self.pump.as_ref(),
        }
    }

    fn take(&mut self, slot: PhotoSlot) -> Option<T> {
        match slot {
            PhotoSlot::Prefix => self.prefix.take(),
            PhotoSlot::Odometer => self.odometer.take(),
            PhotoSlot::Liters => self.liters.take(),
            PhotoSlot::Pump => self.pump.take(),
        }
    }

    /// Required slots for `layout` that have no photo
    pub fn missing(&self, layout: FleetLayout) -> Vec<PhotoSlot> {
        layout
            .required_slots()
            .iter()
            .copied()
            .filter(|slot| self.get(*slot).is_none())
            .collect()
    }

    /// Photos in model order, or the list of missing slots.
    ///
    /// Photos outside the layout are dropped.
    pub fn into_ordered(mut self, layout: FleetLayout) -> Result<Vec<T>, Vec<PhotoSlot>> {
        let missing = self.missing(layout);
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(layout
            .required_slots()
            .iter()
            .filter_map(|slot| self.take(*slot))
            .collect())
    }
}

/// Fields the model reads from a fleet capture, before the local timestamp is added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetFields {
    pub bus_prefix: String,
    pub odometer_km: i64,
    pub liters: f64,
    pub pump_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_slots_order() {
        assert_eq!(
            FleetLayout::Three.required_slots(),
            &[PhotoSlot::Prefix, PhotoSlot::Odometer, PhotoSlot::Pump]
        );
        assert_eq!(FleetLayout::Four.photo_count(), 4);
        assert_eq!(FleetLayout::Four.required_slots()[2], PhotoSlot::Liters);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(FleetLayout::Three.export_file_name("2031"), "registro_2031.csv");
        assert_eq!(
            FleetLayout::Four.export_file_name("2031"),
            "abastecimento_2031.csv"
        );
        assert_eq!(
            FleetLayout::Three.export_file_name("A/12 3"),
            "registro_A_12_3.csv"
        );
        assert_eq!(FleetLayout::Three.export_file_name("  "), "registro_sem_prefixo.csv");
    }

    #[test]
    fn test_missing_slots() {
        let photos = FleetPhotos {
            prefix: Some("p.jpg"),
            odometer: None,
            liters: None,
            pump: Some("b.jpg"),
        };
        assert_eq!(photos.missing(FleetLayout::Three), vec![PhotoSlot::Odometer]);
        assert_eq!(
            photos.missing(FleetLayout::Four),
            vec![PhotoSlot::Odometer, PhotoSlot::Liters]
        );
    }

    #[test]
    fn test_into_ordered_complete() {
        let photos = FleetPhotos {
            prefix: Some(1),
            odometer: Some(2),
            liters: Some(3),
            pump: Some(4),
        };
        assert_eq!(photos.clone().into_ordered(FleetLayout::Four), Ok(vec![1, 2, 3, 4]));
        // liters photo is not part of the three-photo layout
        assert_eq!(photos.into_ordered(FleetLayout::Three), Ok(vec![1, 2, 4]));
    }

    #[test]
    fn test_into_ordered_incomplete() {
        let photos: FleetPhotos<u8> = FleetPhotos {
            prefix: Some(1),
            ..Default::default()
        };
        assert_eq!(
            photos.into_ordered(FleetLayout::Three),
            Err(vec![PhotoSlot::Odometer, PhotoSlot::Pump])
        );
    }
}
