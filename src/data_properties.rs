//! Capability traits for the evaluated-data records stored by the registry.
//!
//! The registry never looks inside a record beyond the accessors declared
//! here. Each data category has its own trait and file-type enum; the
//! `clone_properties` method of every trait is the deep-copy primitive used
//! by `deep_clone` and `partial_deep_clone`.

use crate::record_map::{NamedRecord, TemperatureRecord, VersionedRecord};
use crate::units::Energy;
use crate::zaid::Zaid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

macro_rules! file_type_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant => write!(f, $label)),+
                }
            }
        }
    };
}

file_type_enum!(
    /// File formats that can hold nuclear (neutron) data
    NuclearDataFileType { AceFile => "ACE", NativeFile => "Native" }
);
file_type_enum!(
    /// File formats that can hold thermal nuclear (S(alpha,beta)) data
    ThermalNuclearDataFileType { AceFile => "ACE", NativeFile => "Native" }
);
file_type_enum!(
    /// File formats that can hold adjoint nuclear data
    AdjointNuclearDataFileType { NativeFile => "Native" }
);
file_type_enum!(
    /// File formats that can hold adjoint thermal nuclear data
    AdjointThermalNuclearDataFileType { NativeFile => "Native" }
);
file_type_enum!(
    /// File formats that can hold photonuclear data
    PhotonuclearDataFileType { AceFile => "ACE", NativeFile => "Native" }
);
file_type_enum!(
    /// File formats that can hold adjoint photonuclear data
    AdjointPhotonuclearDataFileType { NativeFile => "Native" }
);
file_type_enum!(
    /// File formats that can hold photoatomic data
    PhotoatomicDataFileType { AceFile => "ACE", AceEprFile => "ACE EPR", NativeEprFile => "Native EPR" }
);
file_type_enum!(
    /// File formats that can hold adjoint photoatomic data
    AdjointPhotoatomicDataFileType { NativeEprFile => "Native EPR" }
);
file_type_enum!(
    /// File formats that can hold electroatomic data
    ElectroatomicDataFileType { AceFile => "ACE", AceEprFile => "ACE EPR", NativeEprFile => "Native EPR" }
);
file_type_enum!(
    /// File formats that can hold adjoint electroatomic data
    AdjointElectroatomicDataFileType { NativeEprFile => "Native EPR" }
);

/// Location of a record inside a data file, shared by every category.
pub trait DataProperties: fmt::Debug + Send + Sync {
    /// Path to the file holding the data
    fn file_path(&self) -> &Path;
    /// Line (or record) at which the data starts in the file
    fn file_start_line(&self) -> usize;
    /// Version of the file format
    fn file_version(&self) -> u32;
    /// Table name inside the file (e.g. "1001.80c")
    fn table_name(&self) -> &str;
}

/// Nuclear data evaluated at one temperature.
pub trait NuclearDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn atomic_weight_ratio(&self) -> f64;
    fn evaluation_temperature_in_mev(&self) -> Energy;
    fn file_type(&self) -> NuclearDataFileType;
    fn clone_properties(&self) -> Arc<dyn NuclearDataProperties>;
}

/// Thermal scattering data for a named moderator (e.g. "H2O").
pub trait ThermalNuclearDataProperties: DataProperties {
    fn name(&self) -> &str;
    /// ZAIDs the data applies to
    fn zaids(&self) -> Vec<Zaid>;
    fn has_data_for_zaid(&self, zaid: Zaid) -> bool {
        self.zaids().contains(&zaid)
    }
    fn evaluation_temperature_in_mev(&self) -> Energy;
    fn file_type(&self) -> ThermalNuclearDataFileType;
    fn clone_properties(&self) -> Arc<dyn ThermalNuclearDataProperties>;
}

/// Adjoint nuclear data evaluated at one temperature.
pub trait AdjointNuclearDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn atomic_weight_ratio(&self) -> f64;
    fn evaluation_temperature_in_mev(&self) -> Energy;
    fn file_type(&self) -> AdjointNuclearDataFileType;
    fn clone_properties(&self) -> Arc<dyn AdjointNuclearDataProperties>;
}

/// Adjoint thermal scattering data for a named moderator.
pub trait AdjointThermalNuclearDataProperties: DataProperties {
    fn name(&self) -> &str;
    fn zaids(&self) -> Vec<Zaid>;
    fn has_data_for_zaid(&self, zaid: Zaid) -> bool {
        self.zaids().contains(&zaid)
    }
    fn evaluation_temperature_in_mev(&self) -> Energy;
    fn file_type(&self) -> AdjointThermalNuclearDataFileType;
    fn clone_properties(&self) -> Arc<dyn AdjointThermalNuclearDataProperties>;
}

/// Photonuclear data (not temperature dependent).
pub trait PhotonuclearDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn atomic_weight_ratio(&self) -> f64;
    fn file_type(&self) -> PhotonuclearDataFileType;
    fn clone_properties(&self) -> Arc<dyn PhotonuclearDataProperties>;
}

/// Adjoint photonuclear data (not temperature dependent).
pub trait AdjointPhotonuclearDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn atomic_weight_ratio(&self) -> f64;
    fn file_type(&self) -> AdjointPhotonuclearDataFileType;
    fn clone_properties(&self) -> Arc<dyn AdjointPhotonuclearDataProperties>;
}

/// Photoatomic data for an element.
pub trait PhotoatomicDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn file_type(&self) -> PhotoatomicDataFileType;
    fn clone_properties(&self) -> Arc<dyn PhotoatomicDataProperties>;
}

/// Adjoint photoatomic data for an element.
pub trait AdjointPhotoatomicDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn file_type(&self) -> AdjointPhotoatomicDataFileType;
    fn clone_properties(&self) -> Arc<dyn AdjointPhotoatomicDataProperties>;
}

/// Electroatomic data for an element.
pub trait ElectroatomicDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn file_type(&self) -> ElectroatomicDataFileType;
    fn clone_properties(&self) -> Arc<dyn ElectroatomicDataProperties>;
}

/// Adjoint electroatomic data for an element.
pub trait AdjointElectroatomicDataProperties: DataProperties {
    fn zaid(&self) -> Zaid;
    fn file_type(&self) -> AdjointElectroatomicDataFileType;
    fn clone_properties(&self) -> Arc<dyn AdjointElectroatomicDataProperties>;
}

// Plug each category trait object into the generic record maps
macro_rules! versioned_record {
    ($trait_:ident, $file_type:ty, $category:literal) => {
        impl VersionedRecord for dyn $trait_ {
            type FileType = $file_type;
            const CATEGORY: &'static str = $category;

            fn file_type(&self) -> Self::FileType {
                $trait_::file_type(self)
            }

            fn file_version(&self) -> u32 {
                DataProperties::file_version(self)
            }

            fn deep_clone(&self) -> Arc<Self> {
                self.clone_properties()
            }
        }
    };
}

macro_rules! temperature_record {
    ($trait_:ident) => {
        impl TemperatureRecord for dyn $trait_ {
            fn evaluation_temperature_in_mev(&self) -> Energy {
                $trait_::evaluation_temperature_in_mev(self)
            }
        }
    };
}

macro_rules! named_record {
    ($trait_:ident) => {
        impl NamedRecord for dyn $trait_ {
            fn name(&self) -> &str {
                $trait_::name(self)
            }
        }
    };
}

versioned_record!(NuclearDataProperties, NuclearDataFileType, "nuclear");
versioned_record!(ThermalNuclearDataProperties, ThermalNuclearDataFileType, "thermal nuclear");
versioned_record!(AdjointNuclearDataProperties, AdjointNuclearDataFileType, "adjoint nuclear");
versioned_record!(
    AdjointThermalNuclearDataProperties,
    AdjointThermalNuclearDataFileType,
    "adjoint thermal nuclear"
);
versioned_record!(PhotonuclearDataProperties, PhotonuclearDataFileType, "photonuclear");
versioned_record!(
    AdjointPhotonuclearDataProperties,
    AdjointPhotonuclearDataFileType,
    "adjoint photonuclear"
);
versioned_record!(PhotoatomicDataProperties, PhotoatomicDataFileType, "photoatomic");
versioned_record!(
    AdjointPhotoatomicDataProperties,
    AdjointPhotoatomicDataFileType,
    "adjoint photoatomic"
);
versioned_record!(ElectroatomicDataProperties, ElectroatomicDataFileType, "electroatomic");
versioned_record!(
    AdjointElectroatomicDataProperties,
    AdjointElectroatomicDataFileType,
    "adjoint electroatomic"
);

temperature_record!(NuclearDataProperties);
temperature_record!(ThermalNuclearDataProperties);
temperature_record!(AdjointNuclearDataProperties);
temperature_record!(AdjointThermalNuclearDataProperties);

named_record!(ThermalNuclearDataProperties);
named_record!(AdjointThermalNuclearDataProperties);
