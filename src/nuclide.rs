// Struct representing a nuclide - composes shared atom properties with
// nuclide specific (temperature dependent) data records
use crate::atom::{check_atomic_weight_ratio, AtomProperties, SharedAtomProperties};
use crate::config::Config;
use crate::data_properties::*;
use crate::error::{PropertiesError, Result};
use crate::record_map::{NamedTemperatureRecordMap, TemperatureRecordMap, VersionedRecordMap};
use crate::scattering_center::ScatteringCenterProperties;
use crate::units::{Energy, Temperature, NEUTRON_REST_MASS_AMU};
use crate::zaid::Zaid;
use log::warn;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLockReadGuard, RwLockWriteGuard};

fn category_of<R: ?Sized + crate::record_map::VersionedRecord>() -> &'static str {
    R::CATEGORY
}

// Operation family of a (file type, version, temperature) keyed category
macro_rules! temperature_category {
    (
        $field:ident: $trait_:ident, $file_type:ty,
        set: $set:ident,
        available: $available:ident,
        available_for_version: $available_for_version:ident,
        available_at: $available_at:ident,
        file_types: $file_types:ident,
        versions: $versions:ident,
        recommended_version: $recommended:ident,
        temps_in_mev: $temps_in_mev:ident,
        temps: $temps:ident,
        get: $get:ident,
        records: $records:ident $(,)?
    ) => {
        #[doc = concat!("Store ", stringify!($field), " data properties at their evaluation temperature.")]
        ///
        /// # Errors
        /// * `ZaidMismatch` if the record belongs to another nuclide
        /// * `InvalidData` if the evaluation temperature is negative or not finite
        pub fn $set(&mut self, properties: Arc<dyn $trait_>) -> Result<()> {
            self.check_zaid(category_of::<dyn $trait_>(), properties.zaid())?;
            self.$field.insert(properties)?;
            Ok(())
        }

        pub fn $available(&self, file_type: $file_type) -> bool {
            self.$field.is_available(file_type)
        }

        pub fn $available_for_version(&self, file_type: $file_type, version: u32) -> bool {
            self.$field.is_available_for_version(file_type, version)
        }

        /// True if data exists at exactly this evaluation temperature
        /// (given in MeV or kelvin)
        pub fn $available_at(
            &self,
            file_type: $file_type,
            version: u32,
            temperature: impl Into<Energy>,
        ) -> bool {
            self.$field
                .is_available_at(file_type, version, temperature.into())
        }

        pub fn $file_types(&self) -> BTreeSet<$file_type> {
            self.$field.file_types()
        }

        pub fn $versions(&self, file_type: $file_type) -> BTreeSet<u32> {
            self.$field.versions(file_type)
        }

        pub fn $recommended(&self, file_type: $file_type) -> Result<u32> {
            self.$field.recommended_version(file_type)
        }

        /// Ascending evaluation temperatures in MeV
        pub fn $temps_in_mev(&self, file_type: $file_type, version: u32) -> Vec<Energy> {
            self.$field.evaluation_temps_in_mev(file_type, version)
        }

        /// Ascending evaluation temperatures in kelvin
        pub fn $temps(&self, file_type: $file_type, version: u32) -> Vec<Temperature> {
            self.$field.evaluation_temps(file_type, version)
        }

        /// Data evaluated at (or, unless `require_exact_match`, nearest to)
        /// the requested temperature.
        ///
        /// # Errors
        /// * `RecordNotFound` if nothing is stored for (file type, version)
        /// * `RequestNotSatisfiable` if an exact match is required but absent
        pub fn $get(
            &self,
            file_type: $file_type,
            version: u32,
            temperature: impl Into<Energy>,
            require_exact_match: bool,
        ) -> Result<Arc<dyn $trait_>> {
            self.$field
                .get(file_type, version, temperature.into(), require_exact_match)
        }

        pub fn $records(&self) -> impl Iterator<Item = &Arc<dyn $trait_>> + '_ {
            self.$field.records()
        }
    };
}

// Operation family of a (name, file type, version, temperature) keyed category
macro_rules! thermal_category {
    (
        $field:ident: $trait_:ident, $file_type:ty,
        set: $set:ident,
        names: $names:ident,
        available: $available:ident,
        available_for_version: $available_for_version:ident,
        available_at: $available_at:ident,
        file_types: $file_types:ident,
        versions: $versions:ident,
        recommended_version: $recommended:ident,
        temps_in_mev: $temps_in_mev:ident,
        temps: $temps:ident,
        get: $get:ident,
        records: $records:ident $(,)?
    ) => {
        #[doc = concat!("Store ", stringify!($field), " data properties under their name and evaluation temperature.")]
        ///
        /// # Errors
        /// * `ZaidMismatch` if the data does not apply to this nuclide
        /// * `InvalidData` if the evaluation temperature is negative or not finite
        pub fn $set(&mut self, properties: Arc<dyn $trait_>) -> Result<()> {
            if !properties.has_data_for_zaid(self.zaid) {
                return Err(PropertiesError::ZaidMismatch {
                    category: category_of::<dyn $trait_>(),
                    record: format!("{:?}", properties.zaids()),
                    owner: self.zaid.name(),
                });
            }
            self.$field.insert(properties)?;
            Ok(())
        }

        /// Every stored moderator name
        pub fn $names(&self) -> BTreeSet<String> {
            self.$field.names()
        }

        pub fn $available(&self, name: &str, file_type: $file_type) -> bool {
            self.$field.is_available(name, file_type)
        }

        pub fn $available_for_version(&self, name: &str, file_type: $file_type, version: u32) -> bool {
            self.$field.is_available_for_version(name, file_type, version)
        }

        pub fn $available_at(
            &self,
            name: &str,
            file_type: $file_type,
            version: u32,
            temperature: impl Into<Energy>,
        ) -> bool {
            self.$field
                .is_available_at(name, file_type, version, temperature.into())
        }

        pub fn $file_types(&self, name: &str) -> BTreeSet<$file_type> {
            self.$field.file_types(name)
        }

        pub fn $versions(&self, name: &str, file_type: $file_type) -> BTreeSet<u32> {
            self.$field.versions(name, file_type)
        }

        pub fn $recommended(&self, name: &str, file_type: $file_type) -> Result<u32> {
            self.$field.recommended_version(name, file_type)
        }

        pub fn $temps_in_mev(&self, name: &str, file_type: $file_type, version: u32) -> Vec<Energy> {
            self.$field.evaluation_temps_in_mev(name, file_type, version)
        }

        pub fn $temps(&self, name: &str, file_type: $file_type, version: u32) -> Vec<Temperature> {
            self.$field.evaluation_temps(name, file_type, version)
        }

        pub fn $get(
            &self,
            name: &str,
            file_type: $file_type,
            version: u32,
            temperature: impl Into<Energy>,
            require_exact_match: bool,
        ) -> Result<Arc<dyn $trait_>> {
            self.$field
                .get(name, file_type, version, temperature.into(), require_exact_match)
        }

        pub fn $records(&self) -> impl Iterator<Item = &Arc<dyn $trait_>> + '_ {
            self.$field.records()
        }
    };
}

// Operation family of a (file type, version) keyed nuclide category
macro_rules! versioned_category {
    (
        $field:ident: $trait_:ident, $file_type:ty,
        set: $set:ident,
        available: $available:ident,
        available_for_version: $available_for_version:ident,
        file_types: $file_types:ident,
        versions: $versions:ident,
        recommended_version: $recommended:ident,
        get: $get:ident,
        records: $records:ident $(,)?
    ) => {
        #[doc = concat!("Store ", stringify!($field), " data properties.")]
        pub fn $set(&mut self, properties: Arc<dyn $trait_>) -> Result<()> {
            self.check_zaid(category_of::<dyn $trait_>(), properties.zaid())?;
            self.$field.insert(properties);
            Ok(())
        }

        pub fn $available(&self, file_type: $file_type) -> bool {
            self.$field.is_available(file_type)
        }

        pub fn $available_for_version(&self, file_type: $file_type, version: u32) -> bool {
            self.$field.is_available_for_version(file_type, version)
        }

        pub fn $file_types(&self) -> BTreeSet<$file_type> {
            self.$field.file_types()
        }

        pub fn $versions(&self, file_type: $file_type) -> BTreeSet<u32> {
            self.$field.versions(file_type)
        }

        pub fn $recommended(&self, file_type: $file_type) -> Result<u32> {
            self.$field.recommended_version(file_type)
        }

        pub fn $get(&self, file_type: $file_type, version: u32) -> Result<Arc<dyn $trait_>> {
            self.$field.get(file_type, version)
        }

        pub fn $records(&self) -> impl Iterator<Item = &Arc<dyn $trait_>> + '_ {
            self.$field.records()
        }
    };
}

// Atomic categories are forwarded to the (possibly shared) atom properties
macro_rules! delegated_atomic_category {
    (
        $trait_:ident, $file_type:ty,
        set: $set:ident,
        available: $available:ident,
        available_for_version: $available_for_version:ident,
        file_types: $file_types:ident,
        versions: $versions:ident,
        recommended_version: $recommended:ident,
        get: $get:ident $(,)?
    ) => {
        /// Stored on the atom properties, visible to every holder of them
        pub fn $set(&mut self, properties: Arc<dyn $trait_>) -> Result<()> {
            self.with_atom_mut(|atom| atom.$set(properties))
        }

        pub fn $available(&self, file_type: $file_type) -> bool {
            self.with_atom(|atom| atom.$available(file_type))
        }

        pub fn $available_for_version(&self, file_type: $file_type, version: u32) -> bool {
            self.with_atom(|atom| atom.$available_for_version(file_type, version))
        }

        pub fn $file_types(&self) -> BTreeSet<$file_type> {
            self.with_atom(|atom| atom.$file_types())
        }

        pub fn $versions(&self, file_type: $file_type) -> BTreeSet<u32> {
            self.with_atom(|atom| atom.$versions(file_type))
        }

        pub fn $recommended(&self, file_type: $file_type) -> Result<u32> {
            self.with_atom(|atom| atom.$recommended(file_type))
        }

        pub fn $get(&self, file_type: $file_type, version: u32) -> Result<Arc<dyn $trait_>> {
            self.with_atom(|atom| atom.$get(file_type, version))
        }
    };
}

/// Core data model for a single nuclide and the evaluated data available
/// for it.
///
/// The atomic half (photoatomic and electroatomic data) lives in an
/// [`AtomProperties`] held by shared ownership. A nuclide built with
/// [`NuclideProperties::new`] owns a fresh one; a nuclide built with
/// [`NuclideProperties::with_atom_properties`] aliases an existing one, so
/// atomic data set through any holder is seen by all of them.
///
/// Cloning:
/// * `clone` shares the atom properties and every record.
/// * [`deep_clone`](Self::deep_clone) shares nothing.
/// * [`partial_deep_clone`](Self::partial_deep_clone) shares the atom
///   properties but copies every nuclide record.
#[derive(Debug, Clone)]
pub struct NuclideProperties {
    zaid: Zaid,
    atomic_weight_ratio: f64,
    atom: SharedAtomProperties,
    nuclear: TemperatureRecordMap<dyn NuclearDataProperties>,
    thermal_nuclear: NamedTemperatureRecordMap<dyn ThermalNuclearDataProperties>,
    adjoint_nuclear: TemperatureRecordMap<dyn AdjointNuclearDataProperties>,
    adjoint_thermal_nuclear: NamedTemperatureRecordMap<dyn AdjointThermalNuclearDataProperties>,
    photonuclear: VersionedRecordMap<dyn PhotonuclearDataProperties>,
    adjoint_photonuclear: VersionedRecordMap<dyn AdjointPhotonuclearDataProperties>,
}

impl NuclideProperties {
    /// Create a nuclide that exclusively owns fresh atom properties.
    ///
    /// # Errors
    /// * `InvalidData` if `atomic_weight_ratio` is not strictly positive
    pub fn new(zaid: Zaid, atomic_weight_ratio: f64) -> Result<Self> {
        let atom = AtomProperties::new(zaid.atom(), atomic_weight_ratio)?;
        Ok(Self::from_parts(zaid, atomic_weight_ratio, atom.into_shared()))
    }

    /// Create a nuclide that shares existing atom properties.
    ///
    /// The atom properties should describe the element of `zaid`; this is
    /// the caller's responsibility and is only reported as a warning.
    ///
    /// # Errors
    /// * `InvalidData` if `atomic_weight_ratio` is not strictly positive
    pub fn with_atom_properties(
        atom: SharedAtomProperties,
        zaid: Zaid,
        atomic_weight_ratio: f64,
    ) -> Result<Self> {
        check_atomic_weight_ratio(zaid, atomic_weight_ratio)?;
        {
            let atom_zaid = atom
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .zaid();
            if atom_zaid.atom() != zaid.atom() {
                warn!(
                    "Nuclide {} shares atom properties of a different element ({})",
                    zaid.name(),
                    atom_zaid.name()
                );
            }
        }
        Ok(Self::from_parts(zaid, atomic_weight_ratio, atom))
    }

    fn from_parts(zaid: Zaid, atomic_weight_ratio: f64, atom: SharedAtomProperties) -> Self {
        NuclideProperties {
            zaid,
            atomic_weight_ratio,
            atom,
            nuclear: TemperatureRecordMap::new(),
            thermal_nuclear: NamedTemperatureRecordMap::new(),
            adjoint_nuclear: TemperatureRecordMap::new(),
            adjoint_thermal_nuclear: NamedTemperatureRecordMap::new(),
            photonuclear: VersionedRecordMap::new(),
            adjoint_photonuclear: VersionedRecordMap::new(),
        }
    }

    pub fn zaid(&self) -> Zaid {
        self.zaid
    }

    /// Atomic weight relative to the neutron mass
    pub fn atomic_weight_ratio(&self) -> f64 {
        self.atomic_weight_ratio
    }

    /// Atomic weight in amu
    pub fn atomic_weight(&self) -> f64 {
        self.atomic_weight_ratio * NEUTRON_REST_MASS_AMU
    }

    /// Handle to the atom properties (shared with this nuclide)
    pub fn atom_properties(&self) -> SharedAtomProperties {
        Arc::clone(&self.atom)
    }

    /// True if both nuclides hold the very same atom properties
    pub fn shares_atom_properties_with(&self, other: &NuclideProperties) -> bool {
        Arc::ptr_eq(&self.atom, &other.atom)
    }

    /// Run `f` with read access to the atom properties. The lock is released
    /// before this returns.
    pub fn with_atom<T>(&self, f: impl FnOnce(&AtomProperties) -> T) -> T {
        f(&self.atom())
    }

    /// Run `f` with write access to the atom properties (affects every
    /// holder). The lock is released before this returns.
    pub fn with_atom_mut<T>(&mut self, f: impl FnOnce(&mut AtomProperties) -> T) -> T {
        f(&mut self.atom_mut())
    }

    /// Read access to the atom properties.
    ///
    /// The guard locks the atom properties of every nuclide sharing them.
    /// Calling an atomic setter on any of those nuclides while it is alive
    /// deadlocks; prefer [`with_atom`](Self::with_atom) for short reads.
    pub fn atom(&self) -> RwLockReadGuard<'_, AtomProperties> {
        self.atom
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write access to the atom properties (affects every holder).
    ///
    /// Any access through a sharing nuclide blocks until the guard is dropped.
    pub fn atom_mut(&mut self) -> RwLockWriteGuard<'_, AtomProperties> {
        self.atom
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_zaid(&self, category: &'static str, record_zaid: Zaid) -> Result<()> {
        if record_zaid == self.zaid {
            Ok(())
        } else {
            Err(PropertiesError::ZaidMismatch {
                category,
                record: record_zaid.name(),
                owner: self.zaid.name(),
            })
        }
    }

    temperature_category!(
        nuclear: NuclearDataProperties, NuclearDataFileType,
        set: set_nuclear_data_properties,
        available: nuclear_data_available,
        available_for_version: nuclear_data_available_for_version,
        available_at: nuclear_data_available_at,
        file_types: nuclear_data_file_types,
        versions: nuclear_data_file_versions,
        recommended_version: recommended_nuclear_data_file_version,
        temps_in_mev: nuclear_data_evaluation_temps_in_mev,
        temps: nuclear_data_evaluation_temps,
        get: nuclear_data_properties,
        records: nuclear_records,
    );

    temperature_category!(
        adjoint_nuclear: AdjointNuclearDataProperties, AdjointNuclearDataFileType,
        set: set_adjoint_nuclear_data_properties,
        available: adjoint_nuclear_data_available,
        available_for_version: adjoint_nuclear_data_available_for_version,
        available_at: adjoint_nuclear_data_available_at,
        file_types: adjoint_nuclear_data_file_types,
        versions: adjoint_nuclear_data_file_versions,
        recommended_version: recommended_adjoint_nuclear_data_file_version,
        temps_in_mev: adjoint_nuclear_data_evaluation_temps_in_mev,
        temps: adjoint_nuclear_data_evaluation_temps,
        get: adjoint_nuclear_data_properties,
        records: adjoint_nuclear_records,
    );

    thermal_category!(
        thermal_nuclear: ThermalNuclearDataProperties, ThermalNuclearDataFileType,
        set: set_thermal_nuclear_data_properties,
        names: thermal_nuclear_data_names,
        available: thermal_nuclear_data_available,
        available_for_version: thermal_nuclear_data_available_for_version,
        available_at: thermal_nuclear_data_available_at,
        file_types: thermal_nuclear_data_file_types,
        versions: thermal_nuclear_data_file_versions,
        recommended_version: recommended_thermal_nuclear_data_file_version,
        temps_in_mev: thermal_nuclear_data_evaluation_temps_in_mev,
        temps: thermal_nuclear_data_evaluation_temps,
        get: thermal_nuclear_data_properties,
        records: thermal_nuclear_records,
    );

    thermal_category!(
        adjoint_thermal_nuclear: AdjointThermalNuclearDataProperties, AdjointThermalNuclearDataFileType,
        set: set_adjoint_thermal_nuclear_data_properties,
        names: adjoint_thermal_nuclear_data_names,
        available: adjoint_thermal_nuclear_data_available,
        available_for_version: adjoint_thermal_nuclear_data_available_for_version,
        available_at: adjoint_thermal_nuclear_data_available_at,
        file_types: adjoint_thermal_nuclear_data_file_types,
        versions: adjoint_thermal_nuclear_data_file_versions,
        recommended_version: recommended_adjoint_thermal_nuclear_data_file_version,
        temps_in_mev: adjoint_thermal_nuclear_data_evaluation_temps_in_mev,
        temps: adjoint_thermal_nuclear_data_evaluation_temps,
        get: adjoint_thermal_nuclear_data_properties,
        records: adjoint_thermal_nuclear_records,
    );

    versioned_category!(
        photonuclear: PhotonuclearDataProperties, PhotonuclearDataFileType,
        set: set_photonuclear_data_properties,
        available: photonuclear_data_available,
        available_for_version: photonuclear_data_available_for_version,
        file_types: photonuclear_data_file_types,
        versions: photonuclear_data_file_versions,
        recommended_version: recommended_photonuclear_data_file_version,
        get: photonuclear_data_properties,
        records: photonuclear_records,
    );

    versioned_category!(
        adjoint_photonuclear: AdjointPhotonuclearDataProperties, AdjointPhotonuclearDataFileType,
        set: set_adjoint_photonuclear_data_properties,
        available: adjoint_photonuclear_data_available,
        available_for_version: adjoint_photonuclear_data_available_for_version,
        file_types: adjoint_photonuclear_data_file_types,
        versions: adjoint_photonuclear_data_file_versions,
        recommended_version: recommended_adjoint_photonuclear_data_file_version,
        get: adjoint_photonuclear_data_properties,
        records: adjoint_photonuclear_records,
    );

    delegated_atomic_category!(
        PhotoatomicDataProperties, PhotoatomicDataFileType,
        set: set_photoatomic_data_properties,
        available: photoatomic_data_available,
        available_for_version: photoatomic_data_available_for_version,
        file_types: photoatomic_data_file_types,
        versions: photoatomic_data_file_versions,
        recommended_version: recommended_photoatomic_data_file_version,
        get: photoatomic_data_properties,
    );

    delegated_atomic_category!(
        AdjointPhotoatomicDataProperties, AdjointPhotoatomicDataFileType,
        set: set_adjoint_photoatomic_data_properties,
        available: adjoint_photoatomic_data_available,
        available_for_version: adjoint_photoatomic_data_available_for_version,
        file_types: adjoint_photoatomic_data_file_types,
        versions: adjoint_photoatomic_data_file_versions,
        recommended_version: recommended_adjoint_photoatomic_data_file_version,
        get: adjoint_photoatomic_data_properties,
    );

    delegated_atomic_category!(
        ElectroatomicDataProperties, ElectroatomicDataFileType,
        set: set_electroatomic_data_properties,
        available: electroatomic_data_available,
        available_for_version: electroatomic_data_available_for_version,
        file_types: electroatomic_data_file_types,
        versions: electroatomic_data_file_versions,
        recommended_version: recommended_electroatomic_data_file_version,
        get: electroatomic_data_properties,
    );

    delegated_atomic_category!(
        AdjointElectroatomicDataProperties, AdjointElectroatomicDataFileType,
        set: set_adjoint_electroatomic_data_properties,
        available: adjoint_electroatomic_data_available,
        available_for_version: adjoint_electroatomic_data_available_for_version,
        file_types: adjoint_electroatomic_data_file_types,
        versions: adjoint_electroatomic_data_file_versions,
        recommended_version: recommended_adjoint_electroatomic_data_file_version,
        get: adjoint_electroatomic_data_properties,
    );

    /// Nuclear data of the recommended version for a file type, resolved at
    /// a temperature under the global [`Config`] temperature policy.
    pub fn nuclear_data_properties_for_temperature(
        &self,
        file_type: NuclearDataFileType,
        temperature: impl Into<Energy>,
    ) -> Result<Arc<dyn NuclearDataProperties>> {
        let version = self.recommended_nuclear_data_file_version(file_type)?;
        let require_exact_match = Config::global().require_exact_temperature;
        self.nuclear_data_properties(file_type, version, temperature, require_exact_match)
    }

    /// Copy sharing nothing with the original: fresh atom properties with
    /// copied atomic records, and copied nuclide records.
    pub fn deep_clone(&self) -> Self {
        let atom = self.atom().deep_clone();
        NuclideProperties {
            atom: atom.into_shared(),
            ..self.deep_clone_nuclide_records()
        }
    }

    /// Copy sharing the atom properties with the original while copying
    /// every nuclide record.
    ///
    /// Atomic data is usually common to all isotopes of an element, so only
    /// the nuclide specific data is duplicated.
    pub fn partial_deep_clone(&self) -> Self {
        self.deep_clone_nuclide_records()
    }

    fn deep_clone_nuclide_records(&self) -> Self {
        NuclideProperties {
            zaid: self.zaid,
            atomic_weight_ratio: self.atomic_weight_ratio,
            atom: Arc::clone(&self.atom),
            nuclear: self.nuclear.deep_clone(),
            thermal_nuclear: self.thermal_nuclear.deep_clone(),
            adjoint_nuclear: self.adjoint_nuclear.deep_clone(),
            adjoint_thermal_nuclear: self.adjoint_thermal_nuclear.deep_clone(),
            photonuclear: self.photonuclear.deep_clone(),
            adjoint_photonuclear: self.adjoint_photonuclear.deep_clone(),
        }
    }
}

impl ScatteringCenterProperties for NuclideProperties {
    fn zaid(&self) -> Zaid {
        self.zaid
    }

    fn atomic_weight_ratio(&self) -> f64 {
        self.atomic_weight_ratio
    }

    fn is_nuclide(&self) -> bool {
        true
    }

    fn as_nuclide(&self) -> Option<&NuclideProperties> {
        Some(self)
    }

    fn clone_properties(&self) -> Box<dyn ScatteringCenterProperties> {
        Box::new(self.clone())
    }

    fn deep_clone_properties(&self) -> Box<dyn ScatteringCenterProperties> {
        Box::new(self.deep_clone())
    }

    fn photoatomic_data_available(&self, file_type: PhotoatomicDataFileType) -> bool {
        NuclideProperties::photoatomic_data_available(self, file_type)
    }

    fn adjoint_photoatomic_data_available(&self, file_type: AdjointPhotoatomicDataFileType) -> bool {
        NuclideProperties::adjoint_photoatomic_data_available(self, file_type)
    }

    fn electroatomic_data_available(&self, file_type: ElectroatomicDataFileType) -> bool {
        NuclideProperties::electroatomic_data_available(self, file_type)
    }

    fn adjoint_electroatomic_data_available(
        &self,
        file_type: AdjointElectroatomicDataFileType,
    ) -> bool {
        NuclideProperties::adjoint_electroatomic_data_available(self, file_type)
    }

    fn nuclear_data_available(&self, file_type: NuclearDataFileType) -> bool {
        NuclideProperties::nuclear_data_available(self, file_type)
    }

    fn adjoint_nuclear_data_available(&self, file_type: AdjointNuclearDataFileType) -> bool {
        NuclideProperties::adjoint_nuclear_data_available(self, file_type)
    }

    fn photonuclear_data_available(&self, file_type: PhotonuclearDataFileType) -> bool {
        NuclideProperties::photonuclear_data_available(self, file_type)
    }

    fn adjoint_photonuclear_data_available(
        &self,
        file_type: AdjointPhotonuclearDataFileType,
    ) -> bool {
        NuclideProperties::adjoint_photonuclear_data_available(self, file_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_properties::*;

    const ROOM_TEMPERATURE_MEV: f64 = 2.5301e-08;

    fn h1_nuclear(temperature_mev: f64, version: u32) -> Arc<dyn NuclearDataProperties> {
        Arc::new(NuclearDataFile::new(
            Zaid::new(1001),
            0.999167,
            Energy::from_mev(temperature_mev),
            NuclearDataFileType::AceFile,
            FileLocation::new("neutron/h1.txt", 0, version, "1001.70c"),
        ))
    }

    fn thermal(name: &str, file_type: ThermalNuclearDataFileType) -> Arc<dyn ThermalNuclearDataProperties> {
        Arc::new(ThermalNuclearDataFile::new(
            name,
            [Zaid::new(1001), Zaid::new(1002), Zaid::new(8016)],
            Energy::from_mev(ROOM_TEMPERATURE_MEV),
            file_type,
            FileLocation::new("thermal/table.txt", 0, 0, format!("{}.20t", name)),
        ))
    }

    #[test]
    fn test_construction_validity() {
        assert!(NuclideProperties::new(Zaid::new(1001), 1.0).is_ok());
        for ratio in [0.0, -1.0] {
            let err = NuclideProperties::new(Zaid::new(1001), ratio).unwrap_err();
            assert!(matches!(err, PropertiesError::InvalidData(_)));
        }
        let atom = AtomProperties::new(Zaid::new(1000), 1.0).unwrap().into_shared();
        assert!(NuclideProperties::with_atom_properties(atom, Zaid::new(1001), 0.0).is_err());
    }

    #[test]
    fn test_identity() {
        let nuclide = NuclideProperties::new(Zaid::new(1002), 2.0).unwrap();
        assert_eq!(nuclide.zaid(), Zaid::new(1002));
        assert_eq!(nuclide.atomic_weight_ratio(), 2.0);
        assert!((nuclide.atomic_weight() - 2.0 * NEUTRON_REST_MASS_AMU).abs() < 1e-12);
        assert!(nuclide.is_nuclide());
        assert!(nuclide.as_nuclide().is_some());
        assert_eq!(nuclide.atom().zaid(), Zaid::new(1000));
    }

    #[test]
    fn test_nuclear_data_versions_and_temperatures() {
        let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
        nuclide.set_nuclear_data_properties(h1_nuclear(0.0, 0)).unwrap();
        nuclide.set_nuclear_data_properties(h1_nuclear(ROOM_TEMPERATURE_MEV, 0)).unwrap();
        nuclide.set_nuclear_data_properties(h1_nuclear(ROOM_TEMPERATURE_MEV, 2)).unwrap();

        assert!(nuclide.nuclear_data_available(NuclearDataFileType::AceFile));
        assert!(!nuclide.nuclear_data_available(NuclearDataFileType::NativeFile));
        assert!(nuclide.nuclear_data_available_for_version(NuclearDataFileType::AceFile, 2));
        assert!(!nuclide.nuclear_data_available_for_version(NuclearDataFileType::AceFile, 1));
        assert_eq!(
            nuclide.nuclear_data_file_versions(NuclearDataFileType::AceFile),
            BTreeSet::from([0, 2])
        );
        assert_eq!(
            nuclide
                .recommended_nuclear_data_file_version(NuclearDataFileType::AceFile)
                .unwrap(),
            2
        );
        assert!(nuclide
            .recommended_nuclear_data_file_version(NuclearDataFileType::NativeFile)
            .is_err());

        let temps = nuclide.nuclear_data_evaluation_temps(NuclearDataFileType::AceFile, 0);
        assert_eq!(temps.len(), 2);
        assert_eq!(temps[0].kelvin(), 0.0);
        assert!((temps[1].kelvin() - 2.936059397103837227e+02).abs() < 1e-9);
        assert!(nuclide
            .nuclear_data_available_at(NuclearDataFileType::AceFile, 0, Temperature::from_kelvin(2.936059397103837227e+02)));
    }

    #[test]
    fn test_nuclear_record_for_other_isotope_rejected() {
        let mut nuclide = NuclideProperties::new(Zaid::new(1002), 1.996).unwrap();
        let err = nuclide.set_nuclear_data_properties(h1_nuclear(0.0, 0)).unwrap_err();
        assert!(matches!(err, PropertiesError::ZaidMismatch { .. }));
        assert!(nuclide.nuclear_data_file_types().is_empty());
    }

    #[test]
    fn test_thermal_names_are_independent() {
        let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
        nuclide
            .set_thermal_nuclear_data_properties(thermal("H2O", ThermalNuclearDataFileType::AceFile))
            .unwrap();
        nuclide
            .set_thermal_nuclear_data_properties(thermal("D2O", ThermalNuclearDataFileType::NativeFile))
            .unwrap();

        assert_eq!(
            nuclide.thermal_nuclear_data_names(),
            BTreeSet::from(["D2O".to_string(), "H2O".to_string()])
        );
        assert_eq!(
            nuclide.thermal_nuclear_data_file_types("H2O"),
            BTreeSet::from([ThermalNuclearDataFileType::AceFile])
        );
        assert_eq!(
            nuclide.thermal_nuclear_data_file_types("D2O"),
            BTreeSet::from([ThermalNuclearDataFileType::NativeFile])
        );
        assert!(!nuclide.thermal_nuclear_data_available("h2o", ThermalNuclearDataFileType::AceFile));

        let record = nuclide
            .thermal_nuclear_data_properties(
                "H2O",
                ThermalNuclearDataFileType::AceFile,
                0,
                Energy::from_mev(1e-7),
                false,
            )
            .unwrap();
        assert_eq!(record.name(), "H2O");
    }

    #[test]
    fn test_thermal_record_must_cover_nuclide() {
        let mut nuclide = NuclideProperties::new(Zaid::new(6000), 11.9).unwrap();
        let err = nuclide
            .set_thermal_nuclear_data_properties(thermal("H2O", ThermalNuclearDataFileType::AceFile))
            .unwrap_err();
        assert!(matches!(err, PropertiesError::ZaidMismatch { .. }));
    }

    #[test]
    fn test_photonuclear_is_not_temperature_indexed() {
        let mut nuclide = NuclideProperties::new(Zaid::new(1002), 1.996).unwrap();
        nuclide
            .set_photonuclear_data_properties(Arc::new(PhotonuclearDataFile::new(
                Zaid::new(1002),
                1.996,
                PhotonuclearDataFileType::AceFile,
                FileLocation::new("photonuclear/h2.txt", 0, 70, "1002.70u"),
            )))
            .unwrap();
        assert_eq!(
            nuclide
                .recommended_photonuclear_data_file_version(PhotonuclearDataFileType::AceFile)
                .unwrap(),
            70
        );
        let record = nuclide
            .photonuclear_data_properties(PhotonuclearDataFileType::AceFile, 70)
            .unwrap();
        assert_eq!(record.table_name(), "1002.70u");
        assert!(nuclide
            .photonuclear_data_properties(PhotonuclearDataFileType::NativeFile, 70)
            .is_err());
    }

    #[test]
    fn test_atomic_data_delegates_to_atom_properties() {
        let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
        nuclide
            .set_electroatomic_data_properties(Arc::new(AtomicDataFile::new(
                Zaid::new(1000),
                ElectroatomicDataFileType::NativeEprFile,
                FileLocation::new("electroatomic/h.h5", 0, 1, "h_native"),
            )))
            .unwrap();
        assert!(nuclide.electroatomic_data_available(ElectroatomicDataFileType::NativeEprFile));
        assert!(nuclide
            .atom()
            .electroatomic_data_available_for_version(ElectroatomicDataFileType::NativeEprFile, 1));
    }

    #[test]
    fn test_convenience_lookup_uses_recommended_version() {
        let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
        nuclide.set_nuclear_data_properties(h1_nuclear(0.0, 0)).unwrap();
        nuclide.set_nuclear_data_properties(h1_nuclear(ROOM_TEMPERATURE_MEV, 1)).unwrap();
        nuclide.set_nuclear_data_properties(h1_nuclear(2.1543e-07, 1)).unwrap();

        // Nearest match under the default policy
        let record = nuclide
            .nuclear_data_properties_for_temperature(NuclearDataFileType::AceFile, Energy::from_mev(1e-9))
            .unwrap();
        assert_eq!(record.file_version(), 1);
        assert_eq!(record.evaluation_temperature_in_mev().mev(), ROOM_TEMPERATURE_MEV);
    }

    #[test]
    fn test_invalid_evaluation_temperature_leaves_nuclide_unchanged() {
        let mut nuclide = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
        nuclide.set_nuclear_data_properties(h1_nuclear(ROOM_TEMPERATURE_MEV, 0)).unwrap();
        for temperature in [f64::NAN, -ROOM_TEMPERATURE_MEV] {
            let err = nuclide
                .set_nuclear_data_properties(h1_nuclear(temperature, 0))
                .unwrap_err();
            assert!(matches!(err, PropertiesError::InvalidData(_)), "{}", err);
        }
        assert_eq!(
            nuclide.nuclear_data_evaluation_temps_in_mev(NuclearDataFileType::AceFile, 0),
            vec![Energy::from_mev(ROOM_TEMPERATURE_MEV)]
        );

        let err = nuclide
            .set_thermal_nuclear_data_properties(Arc::new(ThermalNuclearDataFile::new(
                "H2O",
                [Zaid::new(1001)],
                Energy::from_mev(f64::NAN),
                ThermalNuclearDataFileType::AceFile,
                FileLocation::new("thermal/lwtr.txt", 0, 0, "lwtr.20t"),
            )))
            .unwrap_err();
        assert!(matches!(err, PropertiesError::InvalidData(_)));
        assert!(nuclide.thermal_nuclear_data_names().is_empty());
    }

    #[test]
    fn test_scoped_atom_access_releases_lock_for_aliases() {
        let mut h1 = NuclideProperties::new(Zaid::new(1001), 0.999167).unwrap();
        let mut h2 =
            NuclideProperties::with_atom_properties(h1.atom_properties(), Zaid::new(1002), 1.9963)
                .unwrap();
        let available = |nuclide: &NuclideProperties| {
            nuclide.with_atom(|atom| {
                atom.electroatomic_data_available(ElectroatomicDataFileType::NativeEprFile)
            })
        };
        assert!(!available(&h1));

        // no guard outlives the read above, so the aliased setter does not block
        h2.set_electroatomic_data_properties(Arc::new(AtomicDataFile::new(
            Zaid::new(1000),
            ElectroatomicDataFileType::NativeEprFile,
            FileLocation::new("electroatomic/h.h5", 0, 1, "h_native"),
        )))
        .unwrap();
        assert!(available(&h1));

        let zaid = h1.with_atom_mut(|atom| atom.zaid());
        assert_eq!(zaid, Zaid::new(1000));
        assert_eq!(h2.with_atom(|atom| atom.zaid()), Zaid::new(1000));
    }
}
