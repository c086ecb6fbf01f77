// Properties of an element: identity plus its atomic data records
use crate::data_properties::*;
use crate::error::{PropertiesError, Result};
use crate::record_map::VersionedRecordMap;
use crate::scattering_center::ScatteringCenterProperties;
use crate::units::NEUTRON_REST_MASS_AMU;
use crate::zaid::Zaid;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// Atom properties shared between several owners (e.g. every isotope of an
/// element). Mutations through one holder are visible to all of them.
pub type SharedAtomProperties = Arc<RwLock<AtomProperties>>;

pub(crate) fn check_atomic_weight_ratio(zaid: Zaid, atomic_weight_ratio: f64) -> Result<()> {
    if atomic_weight_ratio > 0.0 && atomic_weight_ratio.is_finite() {
        Ok(())
    } else {
        Err(PropertiesError::InvalidData(format!(
            "the atomic weight ratio of {} must be positive (got {})",
            zaid.name(),
            atomic_weight_ratio
        )))
    }
}

// Generates the operation family of one non-temperature atomic category
macro_rules! atomic_category {
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
        #[doc = concat!("Store ", stringify!($field), " data properties (replaces any record at the same file type and version).")]
        ///
        /// # Errors
        /// * `ZaidMismatch` if the record belongs to another element
        pub fn $set(&mut self, properties: Arc<dyn $trait_>) -> Result<()> {
            self.check_element(
                <dyn $trait_ as crate::record_map::VersionedRecord>::CATEGORY,
                properties.zaid(),
            )?;
            self.$field.insert(properties);
            Ok(())
        }

        #[doc = concat!("True if ", stringify!($field), " data exists for the file type.")]
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

        /// The highest stored version of the file type
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

/// Identity and atomic data (photon and electron interaction data) of an
/// element.
///
/// Records are held by shared reference: `clone` copies the maps but not the
/// records, `deep_clone` copies both.
#[derive(Debug, Clone)]
pub struct AtomProperties {
    zaid: Zaid,
    atomic_weight_ratio: f64,
    photoatomic: VersionedRecordMap<dyn PhotoatomicDataProperties>,
    adjoint_photoatomic: VersionedRecordMap<dyn AdjointPhotoatomicDataProperties>,
    electroatomic: VersionedRecordMap<dyn ElectroatomicDataProperties>,
    adjoint_electroatomic: VersionedRecordMap<dyn AdjointElectroatomicDataProperties>,
}

impl AtomProperties {
    /// Create empty atom properties.
    ///
    /// # Errors
    /// * `InvalidData` if `atomic_weight_ratio` is not strictly positive
    pub fn new(zaid: Zaid, atomic_weight_ratio: f64) -> Result<Self> {
        check_atomic_weight_ratio(zaid, atomic_weight_ratio)?;
        Ok(AtomProperties {
            zaid,
            atomic_weight_ratio,
            photoatomic: VersionedRecordMap::new(),
            adjoint_photoatomic: VersionedRecordMap::new(),
            electroatomic: VersionedRecordMap::new(),
            adjoint_electroatomic: VersionedRecordMap::new(),
        })
    }

    /// Wrap into a handle that can be shared by several nuclides
    pub fn into_shared(self) -> SharedAtomProperties {
        Arc::new(RwLock::new(self))
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

    fn check_element(&self, category: &'static str, record_zaid: Zaid) -> Result<()> {
        if record_zaid.atom() == self.zaid.atom() {
            Ok(())
        } else {
            Err(PropertiesError::ZaidMismatch {
                category,
                record: record_zaid.name(),
                owner: self.zaid.name(),
            })
        }
    }

    atomic_category!(
        photoatomic: PhotoatomicDataProperties, PhotoatomicDataFileType,
        set: set_photoatomic_data_properties,
        available: photoatomic_data_available,
        available_for_version: photoatomic_data_available_for_version,
        file_types: photoatomic_data_file_types,
        versions: photoatomic_data_file_versions,
        recommended_version: recommended_photoatomic_data_file_version,
        get: photoatomic_data_properties,
        records: photoatomic_records,
    );

    atomic_category!(
        adjoint_photoatomic: AdjointPhotoatomicDataProperties, AdjointPhotoatomicDataFileType,
        set: set_adjoint_photoatomic_data_properties,
        available: adjoint_photoatomic_data_available,
        available_for_version: adjoint_photoatomic_data_available_for_version,
        file_types: adjoint_photoatomic_data_file_types,
        versions: adjoint_photoatomic_data_file_versions,
        recommended_version: recommended_adjoint_photoatomic_data_file_version,
        get: adjoint_photoatomic_data_properties,
        records: adjoint_photoatomic_records,
    );

    atomic_category!(
        electroatomic: ElectroatomicDataProperties, ElectroatomicDataFileType,
        set: set_electroatomic_data_properties,
        available: electroatomic_data_available,
        available_for_version: electroatomic_data_available_for_version,
        file_types: electroatomic_data_file_types,
        versions: electroatomic_data_file_versions,
        recommended_version: recommended_electroatomic_data_file_version,
        get: electroatomic_data_properties,
        records: electroatomic_records,
    );

    atomic_category!(
        adjoint_electroatomic: AdjointElectroatomicDataProperties, AdjointElectroatomicDataFileType,
        set: set_adjoint_electroatomic_data_properties,
        available: adjoint_electroatomic_data_available,
        available_for_version: adjoint_electroatomic_data_available_for_version,
        file_types: adjoint_electroatomic_data_file_types,
        versions: adjoint_electroatomic_data_file_versions,
        recommended_version: recommended_adjoint_electroatomic_data_file_version,
        get: adjoint_electroatomic_data_properties,
        records: adjoint_electroatomic_records,
    );

    /// Copy with every stored record replaced by an independent copy
    pub fn deep_clone(&self) -> Self {
        AtomProperties {
            zaid: self.zaid,
            atomic_weight_ratio: self.atomic_weight_ratio,
            photoatomic: self.photoatomic.deep_clone(),
            adjoint_photoatomic: self.adjoint_photoatomic.deep_clone(),
            electroatomic: self.electroatomic.deep_clone(),
            adjoint_electroatomic: self.adjoint_electroatomic.deep_clone(),
        }
    }
}

impl ScatteringCenterProperties for AtomProperties {
    fn zaid(&self) -> Zaid {
        self.zaid
    }

    fn atomic_weight_ratio(&self) -> f64 {
        self.atomic_weight_ratio
    }

    fn is_nuclide(&self) -> bool {
        false
    }

    fn clone_properties(&self) -> Box<dyn ScatteringCenterProperties> {
        Box::new(self.clone())
    }

    fn deep_clone_properties(&self) -> Box<dyn ScatteringCenterProperties> {
        Box::new(self.deep_clone())
    }

    fn photoatomic_data_available(&self, file_type: PhotoatomicDataFileType) -> bool {
        AtomProperties::photoatomic_data_available(self, file_type)
    }

    fn adjoint_photoatomic_data_available(&self, file_type: AdjointPhotoatomicDataFileType) -> bool {
        AtomProperties::adjoint_photoatomic_data_available(self, file_type)
    }

    fn electroatomic_data_available(&self, file_type: ElectroatomicDataFileType) -> bool {
        AtomProperties::electroatomic_data_available(self, file_type)
    }

    fn adjoint_electroatomic_data_available(
        &self,
        file_type: AdjointElectroatomicDataFileType,
    ) -> bool {
        AtomProperties::adjoint_electroatomic_data_available(self, file_type)
    }
}
