mod data;
// Modules, with the types re-exported for Rust usage
mod archive;
mod atom;
mod config;
mod data_properties;
mod database;
mod error;
mod file_properties;
mod nuclide;
mod record_map;
mod scattering_center;
mod units;
mod zaid;

pub use archive::{AtomArchive, DatabaseArchive, NuclideArchive};
pub use atom::{AtomProperties, SharedAtomProperties};
pub use config::{Config, CONFIG, DEFAULT_DATABASE_FILE_NAME};
pub use data::element_symbol;
pub use data_properties::{
    AdjointElectroatomicDataFileType, AdjointElectroatomicDataProperties,
    AdjointNuclearDataFileType, AdjointNuclearDataProperties, AdjointPhotoatomicDataFileType,
    AdjointPhotoatomicDataProperties, AdjointPhotonuclearDataFileType,
    AdjointPhotonuclearDataProperties, AdjointThermalNuclearDataFileType,
    AdjointThermalNuclearDataProperties, DataProperties, ElectroatomicDataFileType,
    ElectroatomicDataProperties, NuclearDataFileType, NuclearDataProperties,
    PhotoatomicDataFileType, PhotoatomicDataProperties, PhotonuclearDataFileType,
    PhotonuclearDataProperties, ThermalNuclearDataFileType, ThermalNuclearDataProperties,
};
pub use database::PropertiesDatabase;
pub use error::{PropertiesError, Result};
pub use file_properties::{
    AtomicDataFile, FileLocation, NuclearDataFile, PhotonuclearDataFile, ThermalNuclearDataFile,
};
pub use nuclide::NuclideProperties;
pub use record_map::{
    NamedRecord, NamedTemperatureRecordMap, TemperatureRecord, TemperatureRecordMap,
    VersionedRecord, VersionedRecordMap,
};
pub use scattering_center::ScatteringCenterProperties;
pub use units::{Energy, Temperature, BOLTZMANN_CONSTANT_MEV_PER_K, NEUTRON_REST_MASS_AMU};
pub use zaid::Zaid;
