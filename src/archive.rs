// JSON snapshot of a properties database
use crate::atom::{AtomProperties, SharedAtomProperties};
use crate::data_properties::*;
use crate::error::{PropertiesError, Result};
use crate::file_properties::*;
use crate::nuclide::NuclideProperties;
use crate::zaid::Zaid;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Serializable form of a [`crate::PropertiesDatabase`].
///
/// Every distinct atom properties object is stored once; nuclides refer to
/// it by index so that sharing between nuclides survives a round trip.
/// Records are stored as their file-backed equivalents, which carry the full
/// (file type, version, temperature, name) key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseArchive {
    pub atoms: Vec<AtomArchive>,
    /// Registered atom ZAID -> index into `atoms`
    pub atom_entries: BTreeMap<Zaid, usize>,
    pub nuclides: Vec<NuclideArchive>,
    #[serde(default)]
    pub aliases: BTreeMap<String, Zaid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomArchive {
    pub zaid: Zaid,
    pub atomic_weight_ratio: f64,
    #[serde(default)]
    pub photoatomic: Vec<AtomicDataFile<PhotoatomicDataFileType>>,
    #[serde(default)]
    pub adjoint_photoatomic: Vec<AtomicDataFile<AdjointPhotoatomicDataFileType>>,
    #[serde(default)]
    pub electroatomic: Vec<AtomicDataFile<ElectroatomicDataFileType>>,
    #[serde(default)]
    pub adjoint_electroatomic: Vec<AtomicDataFile<AdjointElectroatomicDataFileType>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NuclideArchive {
    pub zaid: Zaid,
    pub atomic_weight_ratio: f64,
    /// Index into [`DatabaseArchive::atoms`]
    pub atom: usize,
    #[serde(default)]
    pub nuclear: Vec<NuclearDataFile<NuclearDataFileType>>,
    #[serde(default)]
    pub thermal_nuclear: Vec<ThermalNuclearDataFile<ThermalNuclearDataFileType>>,
    #[serde(default)]
    pub adjoint_nuclear: Vec<NuclearDataFile<AdjointNuclearDataFileType>>,
    #[serde(default)]
    pub adjoint_thermal_nuclear: Vec<ThermalNuclearDataFile<AdjointThermalNuclearDataFileType>>,
    #[serde(default)]
    pub photonuclear: Vec<PhotonuclearDataFile<PhotonuclearDataFileType>>,
    #[serde(default)]
    pub adjoint_photonuclear: Vec<PhotonuclearDataFile<AdjointPhotonuclearDataFileType>>,
}

fn location_of<R: ?Sized + DataProperties>(record: &R) -> FileLocation {
    FileLocation::new(
        record.file_path(),
        record.file_start_line(),
        record.file_version(),
        record.table_name(),
    )
}

// Snapshot helpers, one per record shape
macro_rules! atomic_entry {
    ($record:expr) => {{
        let record = $record;
        AtomicDataFile::new(record.zaid(), record.file_type(), location_of(record.as_ref()))
    }};
}

macro_rules! nuclear_entry {
    ($record:expr) => {{
        let record = $record;
        NuclearDataFile::new(
            record.zaid(),
            record.atomic_weight_ratio(),
            record.evaluation_temperature_in_mev(),
            record.file_type(),
            location_of(record.as_ref()),
        )
    }};
}

macro_rules! thermal_entry {
    ($record:expr) => {{
        let record = $record;
        ThermalNuclearDataFile::new(
            record.name(),
            record.zaids(),
            record.evaluation_temperature_in_mev(),
            record.file_type(),
            location_of(record.as_ref()),
        )
    }};
}

macro_rules! photonuclear_entry {
    ($record:expr) => {{
        let record = $record;
        PhotonuclearDataFile::new(
            record.zaid(),
            record.atomic_weight_ratio(),
            record.file_type(),
            location_of(record.as_ref()),
        )
    }};
}

impl AtomArchive {
    fn from_atom(atom: &AtomProperties) -> Self {
        AtomArchive {
            zaid: atom.zaid(),
            atomic_weight_ratio: atom.atomic_weight_ratio(),
            photoatomic: atom.photoatomic_records().map(|r| atomic_entry!(r)).collect(),
            adjoint_photoatomic: atom
                .adjoint_photoatomic_records()
                .map(|r| atomic_entry!(r))
                .collect(),
            electroatomic: atom.electroatomic_records().map(|r| atomic_entry!(r)).collect(),
            adjoint_electroatomic: atom
                .adjoint_electroatomic_records()
                .map(|r| atomic_entry!(r))
                .collect(),
        }
    }

    fn into_atom(self) -> Result<AtomProperties> {
        let mut atom = AtomProperties::new(self.zaid, self.atomic_weight_ratio)?;
        for record in self.photoatomic {
            atom.set_photoatomic_data_properties(Arc::new(record))?;
        }
        for record in self.adjoint_photoatomic {
            atom.set_adjoint_photoatomic_data_properties(Arc::new(record))?;
        }
        for record in self.electroatomic {
            atom.set_electroatomic_data_properties(Arc::new(record))?;
        }
        for record in self.adjoint_electroatomic {
            atom.set_adjoint_electroatomic_data_properties(Arc::new(record))?;
        }
        Ok(atom)
    }
}

impl NuclideArchive {
    fn from_nuclide(nuclide: &NuclideProperties, atom: usize) -> Self {
        NuclideArchive {
            zaid: nuclide.zaid(),
            atomic_weight_ratio: nuclide.atomic_weight_ratio(),
            atom,
            nuclear: nuclide.nuclear_records().map(|r| nuclear_entry!(r)).collect(),
            thermal_nuclear: nuclide
                .thermal_nuclear_records()
                .map(|r| thermal_entry!(r))
                .collect(),
            adjoint_nuclear: nuclide
                .adjoint_nuclear_records()
                .map(|r| nuclear_entry!(r))
                .collect(),
            adjoint_thermal_nuclear: nuclide
                .adjoint_thermal_nuclear_records()
                .map(|r| thermal_entry!(r))
                .collect(),
            photonuclear: nuclide
                .photonuclear_records()
                .map(|r| photonuclear_entry!(r))
                .collect(),
            adjoint_photonuclear: nuclide
                .adjoint_photonuclear_records()
                .map(|r| photonuclear_entry!(r))
                .collect(),
        }
    }

    fn into_nuclide(self, atoms: &[SharedAtomProperties]) -> Result<NuclideProperties> {
        let atom = atoms.get(self.atom).ok_or_else(|| {
            PropertiesError::InvalidData(format!(
                "nuclide {} refers to missing atom properties entry {}",
                self.zaid, self.atom
            ))
        })?;
        let mut nuclide = NuclideProperties::with_atom_properties(
            Arc::clone(atom),
            self.zaid,
            self.atomic_weight_ratio,
        )?;
        for record in self.nuclear {
            nuclide.set_nuclear_data_properties(Arc::new(record))?;
        }
        for record in self.thermal_nuclear {
            nuclide.set_thermal_nuclear_data_properties(Arc::new(record))?;
        }
        for record in self.adjoint_nuclear {
            nuclide.set_adjoint_nuclear_data_properties(Arc::new(record))?;
        }
        for record in self.adjoint_thermal_nuclear {
            nuclide.set_adjoint_thermal_nuclear_data_properties(Arc::new(record))?;
        }
        for record in self.photonuclear {
            nuclide.set_photonuclear_data_properties(Arc::new(record))?;
        }
        for record in self.adjoint_photonuclear {
            nuclide.set_adjoint_photonuclear_data_properties(Arc::new(record))?;
        }
        Ok(nuclide)
    }
}

/// Collects distinct atom properties handles, keyed by pointer identity
#[derive(Default)]
struct AtomIndex {
    handles: Vec<SharedAtomProperties>,
    positions: HashMap<usize, usize>,
}

impl AtomIndex {
    fn index_of(&mut self, atom: &SharedAtomProperties) -> usize {
        let key = Arc::as_ptr(atom) as usize;
        if let Some(&idx) = self.positions.get(&key) {
            return idx;
        }
        let idx = self.handles.len();
        self.handles.push(Arc::clone(atom));
        self.positions.insert(key, idx);
        idx
    }
}

impl DatabaseArchive {
    pub(crate) fn build<'a>(
        atoms: impl Iterator<Item = (&'a Zaid, &'a SharedAtomProperties)>,
        nuclides: impl Iterator<Item = &'a NuclideProperties>,
        aliases: &BTreeMap<String, Zaid>,
    ) -> Self {
        let mut index = AtomIndex::default();
        let atom_entries = atoms
            .map(|(&zaid, atom)| (zaid, index.index_of(atom)))
            .collect();
        let nuclides = nuclides
            .map(|nuclide| {
                let atom = index.index_of(&nuclide.atom_properties());
                NuclideArchive::from_nuclide(nuclide, atom)
            })
            .collect();
        let atoms = index
            .handles
            .iter()
            .map(|atom| {
                let atom = atom.read().unwrap_or_else(|poisoned| poisoned.into_inner());
                AtomArchive::from_atom(&atom)
            })
            .collect();

        DatabaseArchive {
            atoms,
            atom_entries,
            nuclides,
            aliases: aliases.clone(),
        }
    }

    /// Rebuild the shared atom handles, the registered atom entries and the
    /// nuclides (in archive order).
    pub(crate) fn restore(
        self,
    ) -> Result<(
        BTreeMap<Zaid, SharedAtomProperties>,
        Vec<NuclideProperties>,
        BTreeMap<String, Zaid>,
    )> {
        let handles = self
            .atoms
            .into_iter()
            .map(|atom| atom.into_atom().map(AtomProperties::into_shared))
            .collect::<Result<Vec<_>>>()?;

        let mut atom_entries = BTreeMap::new();
        for (zaid, idx) in self.atom_entries {
            let atom = handles.get(idx).ok_or_else(|| {
                PropertiesError::InvalidData(format!(
                    "atom entry {} refers to missing atom properties entry {}",
                    zaid, idx
                ))
            })?;
            atom_entries.insert(zaid, Arc::clone(atom));
        }

        let nuclides = self
            .nuclides
            .into_iter()
            .map(|nuclide| nuclide.into_nuclide(&handles))
            .collect::<Result<Vec<_>>>()?;

        Ok((atom_entries, nuclides, self.aliases))
    }
}
