// Common interface of atom and nuclide properties
use crate::data_properties::*;
use crate::nuclide::NuclideProperties;
use crate::units::NEUTRON_REST_MASS_AMU;
use crate::zaid::Zaid;
use std::fmt;

/// Capability interface implemented by [`crate::AtomProperties`] and
/// [`NuclideProperties`].
///
/// Callers branch on [`is_nuclide`](Self::is_nuclide) (or use
/// [`as_nuclide`](Self::as_nuclide)) instead of downcasting. Nuclide-only
/// queries default to "no data" for atoms.
pub trait ScatteringCenterProperties: fmt::Debug + Send + Sync {
    fn zaid(&self) -> Zaid;

    /// Atomic weight relative to the neutron mass
    fn atomic_weight_ratio(&self) -> f64;

    /// Atomic weight in amu
    fn atomic_weight(&self) -> f64 {
        self.atomic_weight_ratio() * NEUTRON_REST_MASS_AMU
    }

    fn is_nuclide(&self) -> bool;

    fn as_nuclide(&self) -> Option<&NuclideProperties> {
        None
    }

    /// Copy sharing every stored record (and, for nuclides, the atom properties)
    fn clone_properties(&self) -> Box<dyn ScatteringCenterProperties>;

    /// Copy sharing nothing with the original
    fn deep_clone_properties(&self) -> Box<dyn ScatteringCenterProperties>;

    fn photoatomic_data_available(&self, file_type: PhotoatomicDataFileType) -> bool;

    fn adjoint_photoatomic_data_available(&self, file_type: AdjointPhotoatomicDataFileType) -> bool;

    fn electroatomic_data_available(&self, file_type: ElectroatomicDataFileType) -> bool;

    fn adjoint_electroatomic_data_available(
        &self,
        file_type: AdjointElectroatomicDataFileType,
    ) -> bool;

    fn nuclear_data_available(&self, _file_type: NuclearDataFileType) -> bool {
        false
    }

    fn adjoint_nuclear_data_available(&self, _file_type: AdjointNuclearDataFileType) -> bool {
        false
    }

    fn photonuclear_data_available(&self, _file_type: PhotonuclearDataFileType) -> bool {
        false
    }

    fn adjoint_photonuclear_data_available(
        &self,
        _file_type: AdjointPhotonuclearDataFileType,
    ) -> bool {
        false
    }
}
