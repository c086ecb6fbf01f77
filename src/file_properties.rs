// File-backed data properties records for every data category
use crate::data_properties::*;
use crate::units::Energy;
use crate::zaid::Zaid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a data table lives: file, starting line, format version and table
/// name. Shared by every file-backed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLocation {
    pub file_path: PathBuf,
    pub file_start_line: usize,
    pub file_version: u32,
    pub table_name: String,
}

impl FileLocation {
    pub fn new(
        file_path: impl Into<PathBuf>,
        file_start_line: usize,
        file_version: u32,
        table_name: impl Into<String>,
    ) -> Self {
        FileLocation {
            file_path: file_path.into(),
            file_start_line,
            file_version,
            table_name: table_name.into(),
        }
    }
}

/// Atomic (photon or electron) data for an element.
///
/// Implements the photoatomic, adjoint photoatomic, electroatomic and
/// adjoint electroatomic traits depending on the file type parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicDataFile<F> {
    pub zaid: Zaid,
    pub file_type: F,
    pub location: FileLocation,
}

impl<F> AtomicDataFile<F> {
    pub fn new(zaid: Zaid, file_type: F, location: FileLocation) -> Self {
        AtomicDataFile {
            zaid,
            file_type,
            location,
        }
    }
}

/// Nuclear or adjoint nuclear data evaluated at one temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuclearDataFile<F> {
    pub zaid: Zaid,
    pub atomic_weight_ratio: f64,
    pub evaluation_temperature: Energy,
    pub file_type: F,
    pub location: FileLocation,
}

impl<F> NuclearDataFile<F> {
    /// # Arguments
    /// * `evaluation_temperature` - Either an [`Energy`] in MeV or a
    ///   [`crate::Temperature`] in kelvin
    pub fn new(
        zaid: Zaid,
        atomic_weight_ratio: f64,
        evaluation_temperature: impl Into<Energy>,
        file_type: F,
        location: FileLocation,
    ) -> Self {
        NuclearDataFile {
            zaid,
            atomic_weight_ratio,
            evaluation_temperature: evaluation_temperature.into(),
            file_type,
            location,
        }
    }
}

/// Photonuclear or adjoint photonuclear data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonuclearDataFile<F> {
    pub zaid: Zaid,
    pub atomic_weight_ratio: f64,
    pub file_type: F,
    pub location: FileLocation,
}

impl<F> PhotonuclearDataFile<F> {
    pub fn new(zaid: Zaid, atomic_weight_ratio: f64, file_type: F, location: FileLocation) -> Self {
        PhotonuclearDataFile {
            zaid,
            atomic_weight_ratio,
            file_type,
            location,
        }
    }
}

/// Thermal or adjoint thermal scattering data for a named moderator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalNuclearDataFile<F> {
    pub name: String,
    pub zaids: BTreeSet<Zaid>,
    pub evaluation_temperature: Energy,
    pub file_type: F,
    pub location: FileLocation,
}

impl<F> ThermalNuclearDataFile<F> {
    pub fn new(
        name: impl Into<String>,
        zaids: impl IntoIterator<Item = Zaid>,
        evaluation_temperature: impl Into<Energy>,
        file_type: F,
        location: FileLocation,
    ) -> Self {
        ThermalNuclearDataFile {
            name: name.into(),
            zaids: zaids.into_iter().collect(),
            evaluation_temperature: evaluation_temperature.into(),
            file_type,
            location,
        }
    }
}

macro_rules! file_location_properties {
    ($record:ident) => {
        impl<F: std::fmt::Debug + Send + Sync> DataProperties for $record<F> {
            fn file_path(&self) -> &Path {
                &self.location.file_path
            }

            fn file_start_line(&self) -> usize {
                self.location.file_start_line
            }

            fn file_version(&self) -> u32 {
                self.location.file_version
            }

            fn table_name(&self) -> &str {
                &self.location.table_name
            }
        }
    };
}

file_location_properties!(AtomicDataFile);
file_location_properties!(NuclearDataFile);
file_location_properties!(PhotonuclearDataFile);
file_location_properties!(ThermalNuclearDataFile);

macro_rules! atomic_properties {
    ($trait_:ident, $file_type:ty) => {
        impl $trait_ for AtomicDataFile<$file_type> {
            fn zaid(&self) -> Zaid {
                self.zaid
            }

            fn file_type(&self) -> $file_type {
                self.file_type
            }

            fn clone_properties(&self) -> Arc<dyn $trait_> {
                Arc::new(self.clone())
            }
        }
    };
}

atomic_properties!(PhotoatomicDataProperties, PhotoatomicDataFileType);
atomic_properties!(AdjointPhotoatomicDataProperties, AdjointPhotoatomicDataFileType);
atomic_properties!(ElectroatomicDataProperties, ElectroatomicDataFileType);
atomic_properties!(AdjointElectroatomicDataProperties, AdjointElectroatomicDataFileType);

macro_rules! nuclear_properties {
    ($trait_:ident, $file_type:ty) => {
        impl $trait_ for NuclearDataFile<$file_type> {
            fn zaid(&self) -> Zaid {
                self.zaid
            }

            fn atomic_weight_ratio(&self) -> f64 {
                self.atomic_weight_ratio
            }

            fn evaluation_temperature_in_mev(&self) -> Energy {
                self.evaluation_temperature
            }

            fn file_type(&self) -> $file_type {
                self.file_type
            }

            fn clone_properties(&self) -> Arc<dyn $trait_> {
                Arc::new(self.clone())
            }
        }
    };
}

nuclear_properties!(NuclearDataProperties, NuclearDataFileType);
nuclear_properties!(AdjointNuclearDataProperties, AdjointNuclearDataFileType);

macro_rules! photonuclear_properties {
    ($trait_:ident, $file_type:ty) => {
        impl $trait_ for PhotonuclearDataFile<$file_type> {
            fn zaid(&self) -> Zaid {
                self.zaid
            }

            fn atomic_weight_ratio(&self) -> f64 {
                self.atomic_weight_ratio
            }

            fn file_type(&self) -> $file_type {
                self.file_type
            }

            fn clone_properties(&self) -> Arc<dyn $trait_> {
                Arc::new(self.clone())
            }
        }
    };
}

photonuclear_properties!(PhotonuclearDataProperties, PhotonuclearDataFileType);
photonuclear_properties!(AdjointPhotonuclearDataProperties, AdjointPhotonuclearDataFileType);

macro_rules! thermal_properties {
    ($trait_:ident, $file_type:ty) => {
        impl $trait_ for ThermalNuclearDataFile<$file_type> {
            fn name(&self) -> &str {
                &self.name
            }

            fn zaids(&self) -> Vec<Zaid> {
                self.zaids.iter().copied().collect()
            }

            fn has_data_for_zaid(&self, zaid: Zaid) -> bool {
                self.zaids.contains(&zaid)
            }

            fn evaluation_temperature_in_mev(&self) -> Energy {
                self.evaluation_temperature
            }

            fn file_type(&self) -> $file_type {
                self.file_type
            }

            fn clone_properties(&self) -> Arc<dyn $trait_> {
                Arc::new(self.clone())
            }
        }
    };
}

thermal_properties!(ThermalNuclearDataProperties, ThermalNuclearDataFileType);
thermal_properties!(AdjointThermalNuclearDataProperties, AdjointThermalNuclearDataFileType);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Temperature;

    #[test]
    fn test_nuclear_record_accepts_kelvin() {
        let record = NuclearDataFile::new(
            Zaid::new(1001),
            0.999167,
            Temperature::from_kelvin(293.6),
            NuclearDataFileType::AceFile,
            FileLocation::new("neutron/h1.txt", 0, 80, "1001.80c"),
        );
        let temperature = NuclearDataProperties::evaluation_temperature_in_mev(&record);
        assert!((temperature.to_temperature().kelvin() - 293.6).abs() < 1e-9);
        assert_eq!(DataProperties::file_version(&record), 80);
        assert_eq!(record.table_name(), "1001.80c");
    }

    #[test]
    fn test_clone_properties_is_independent() {
        let record = Arc::new(AtomicDataFile::new(
            Zaid::new(1000),
            PhotoatomicDataFileType::NativeEprFile,
            FileLocation::new("photoatomic/h.xml", 0, 1, "h_native"),
        ));
        let as_dyn: Arc<dyn PhotoatomicDataProperties> = record.clone();
        let copy = as_dyn.clone_properties();
        assert!(!Arc::ptr_eq(&as_dyn, &copy));
        assert_eq!(copy.table_name(), "h_native");
        assert_eq!(copy.file_type(), PhotoatomicDataFileType::NativeEprFile);
    }

    #[test]
    fn test_thermal_record_zaids() {
        let record = ThermalNuclearDataFile::new(
            "H2O",
            [Zaid::new(1001), Zaid::new(8016)],
            Temperature::from_kelvin(293.6),
            ThermalNuclearDataFileType::AceFile,
            FileLocation::new("thermal/lwtr.txt", 0, 20, "lwtr.20t"),
        );
        assert!(ThermalNuclearDataProperties::has_data_for_zaid(&record, Zaid::new(1001)));
        assert!(!ThermalNuclearDataProperties::has_data_for_zaid(&record, Zaid::new(1002)));
        assert_eq!(ThermalNuclearDataProperties::name(&record), "H2O");
    }
}
