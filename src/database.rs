// ZAID indexed collection of atom and nuclide properties
use crate::archive::DatabaseArchive;
use crate::atom::{AtomProperties, SharedAtomProperties};
use crate::config::Config;
use crate::error::{PropertiesError, Result};
use crate::nuclide::NuclideProperties;
use crate::scattering_center::ScatteringCenterProperties;
use crate::zaid::Zaid;
use log::info;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

/// Registry of the scattering center properties known to a simulation.
///
/// Atom properties are registered by element ZAID and handed out as shared
/// handles. A nuclide initialized after its element shares the registered
/// atom properties; one initialized first registers its own atom half, so
/// later isotopes of the same element alias it.
///
/// String aliases (e.g. "H-1", "Water-H") map onto registered ZAIDs.
#[derive(Debug, Default, Clone)]
pub struct PropertiesDatabase {
    atoms: BTreeMap<Zaid, SharedAtomProperties>,
    nuclides: BTreeMap<Zaid, NuclideProperties>,
    aliases: BTreeMap<String, Zaid>,
}

impl PropertiesDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register empty atom properties for the element of `zaid`.
    ///
    /// # Errors
    /// * `DuplicateEntry` if the element is already registered
    /// * `InvalidData` if `atomic_weight_ratio` is not strictly positive
    pub fn initialize_atom_properties(
        &mut self,
        zaid: Zaid,
        atomic_weight_ratio: f64,
    ) -> Result<SharedAtomProperties> {
        let key = zaid.atom();
        if self.atoms.contains_key(&key) {
            return Err(PropertiesError::DuplicateEntry(format!(
                "atom properties for {}",
                key.name()
            )));
        }
        let atom = AtomProperties::new(key, atomic_weight_ratio)?.into_shared();
        self.atoms.insert(key, Arc::clone(&atom));
        Ok(atom)
    }

    /// Create and register nuclide properties.
    ///
    /// The nuclide aliases the registered atom properties of its element if
    /// there are any; otherwise it owns fresh ones, which are registered for
    /// the element.
    ///
    /// # Errors
    /// * `DuplicateEntry` if the nuclide is already registered
    /// * `InvalidData` if `atomic_weight_ratio` is not strictly positive
    pub fn initialize_nuclide_properties(
        &mut self,
        zaid: Zaid,
        atomic_weight_ratio: f64,
    ) -> Result<&mut NuclideProperties> {
        if self.nuclides.contains_key(&zaid) {
            return Err(PropertiesError::DuplicateEntry(format!(
                "nuclide properties for {}",
                zaid.name()
            )));
        }
        let nuclide = match self.atoms.get(&zaid.atom()) {
            Some(atom) => {
                NuclideProperties::with_atom_properties(Arc::clone(atom), zaid, atomic_weight_ratio)?
            }
            None => {
                let nuclide = NuclideProperties::new(zaid, atomic_weight_ratio)?;
                self.atoms.insert(zaid.atom(), nuclide.atom_properties());
                nuclide
            }
        };
        Ok(self.nuclides.entry(zaid).or_insert(nuclide))
    }

    pub fn atom_properties_exist(&self, zaid: Zaid) -> bool {
        self.atoms.contains_key(&zaid.atom())
    }

    pub fn nuclide_properties_exist(&self, zaid: Zaid) -> bool {
        self.nuclides.contains_key(&zaid)
    }

    /// Shared handle to the atom properties of the element of `zaid`
    pub fn atom_properties(&self, zaid: Zaid) -> Result<SharedAtomProperties> {
        self.atoms
            .get(&zaid.atom())
            .map(Arc::clone)
            .ok_or_else(|| PropertiesError::RecordNotFound {
                category: "atom",
                detail: format!("no atom properties registered for {}", zaid.atom().name()),
            })
    }

    pub fn nuclide_properties(&self, zaid: Zaid) -> Result<&NuclideProperties> {
        self.nuclides
            .get(&zaid)
            .ok_or_else(|| Self::missing_nuclide(zaid))
    }

    pub fn nuclide_properties_mut(&mut self, zaid: Zaid) -> Result<&mut NuclideProperties> {
        self.nuclides
            .get_mut(&zaid)
            .ok_or_else(|| Self::missing_nuclide(zaid))
    }

    fn missing_nuclide(zaid: Zaid) -> PropertiesError {
        PropertiesError::RecordNotFound {
            category: "nuclide",
            detail: format!("no nuclide properties registered for {}", zaid.name()),
        }
    }

    pub fn atom_zaids(&self) -> BTreeSet<Zaid> {
        self.atoms.keys().copied().collect()
    }

    pub fn nuclide_zaids(&self) -> BTreeSet<Zaid> {
        self.nuclides.keys().copied().collect()
    }

    /// Properties registered for `zaid`, preferring a nuclide over an atom
    /// entry. The result shares every record with the database.
    pub fn properties(&self, zaid: Zaid) -> Result<Box<dyn ScatteringCenterProperties>> {
        if let Some(nuclide) = self.nuclides.get(&zaid) {
            return Ok(nuclide.clone_properties());
        }
        match self.atoms.get(&zaid) {
            Some(atom) => Ok(atom
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone_properties()),
            None => Err(PropertiesError::RecordNotFound {
                category: "scattering center",
                detail: format!("no properties registered for {}", zaid.name()),
            }),
        }
    }

    /// Register `alias` for a ZAID with registered properties (replaces an
    /// existing alias of the same name).
    ///
    /// # Errors
    /// * `RecordNotFound` if nothing is registered for `zaid`
    pub fn set_alias(&mut self, alias: impl Into<String>, zaid: Zaid) -> Result<()> {
        if !self.nuclides.contains_key(&zaid) && !self.atoms.contains_key(&zaid) {
            return Err(PropertiesError::RecordNotFound {
                category: "scattering center",
                detail: format!("cannot alias unregistered ZAID {}", zaid),
            });
        }
        self.aliases.insert(alias.into(), zaid);
        Ok(())
    }

    pub fn alias_exists(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    pub fn zaid_for_alias(&self, alias: &str) -> Result<Zaid> {
        self.aliases
            .get(alias)
            .copied()
            .ok_or_else(|| PropertiesError::UnknownAlias(alias.to_string()))
    }

    pub fn aliases(&self) -> &BTreeMap<String, Zaid> {
        &self.aliases
    }

    /// Write a JSON snapshot of the database
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let archive = DatabaseArchive::build(
            self.atoms.iter(),
            self.nuclides.values(),
            &self.aliases,
        );
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &archive)?;
        info!(
            "Saved properties database ({} atoms, {} nuclides) to {}",
            self.atoms.len(),
            self.nuclides.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a database written by [`save`](Self::save).
    ///
    /// Nuclides that shared atom properties when saved share them again.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let archive: DatabaseArchive = serde_json::from_reader(reader)?;
        let (atoms, nuclide_list, aliases) = archive.restore()?;

        let mut nuclides = BTreeMap::new();
        for nuclide in nuclide_list {
            let zaid = nuclide.zaid();
            if nuclides.insert(zaid, nuclide).is_some() {
                return Err(PropertiesError::DuplicateEntry(format!(
                    "nuclide properties for {} in {}",
                    zaid.name(),
                    path.display()
                )));
            }
        }

        info!(
            "Loaded properties database ({} atoms, {} nuclides) from {}",
            atoms.len(),
            nuclides.len(),
            path.display()
        );
        Ok(PropertiesDatabase {
            atoms,
            nuclides,
            aliases,
        })
    }

    /// Save to the archive path named by the global [`Config`]
    pub fn save_to_config(&self) -> Result<()> {
        let path = Self::configured_path()?;
        self.save(path)
    }

    /// Load from the archive path named by the global [`Config`]
    pub fn load_from_config() -> Result<Self> {
        let path = Self::configured_path()?;
        Self::load(path)
    }

    fn configured_path() -> Result<std::path::PathBuf> {
        Config::global().database_path().ok_or_else(|| {
            PropertiesError::InvalidData("no data directory is configured".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_properties::*;
    use crate::file_properties::*;
    use crate::units::Energy;

    fn photoatomic(zaid: u32, version: u32) -> Arc<dyn PhotoatomicDataProperties> {
        Arc::new(AtomicDataFile::new(
            Zaid::new(zaid),
            PhotoatomicDataFileType::AceFile,
            FileLocation::new("photoatomic/h.txt", 10, version, "1000.12p"),
        ))
    }

    fn nuclear(zaid: u32, awr: f64) -> Arc<dyn NuclearDataProperties> {
        Arc::new(NuclearDataFile::new(
            Zaid::new(zaid),
            awr,
            Energy::from_mev(2.5301e-08),
            NuclearDataFileType::AceFile,
            FileLocation::new("neutron/h.txt", 0, 7, format!("{}.70c", zaid)),
        ))
    }

    #[test]
    fn test_nuclides_of_an_element_share_atom_properties() {
        let mut database = PropertiesDatabase::new();
        let h1 = database
            .initialize_nuclide_properties(Zaid::new(1001), 0.999167)
            .unwrap()
            .atom_properties();
        let h2 = database
            .initialize_nuclide_properties(Zaid::new(1002), 1.996300)
            .unwrap()
            .atom_properties();
        assert!(Arc::ptr_eq(&h1, &h2));
        assert!(database.atom_properties_exist(Zaid::new(1000)));
        assert_eq!(database.atom_zaids().len(), 1);
        assert_eq!(database.nuclide_zaids().len(), 2);
    }

    #[test]
    fn test_nuclide_aliases_preregistered_atom() {
        let mut database = PropertiesDatabase::new();
        let atom = database
            .initialize_atom_properties(Zaid::new(1000), 0.999242)
            .unwrap();
        atom.write().unwrap().set_photoatomic_data_properties(photoatomic(1000, 12)).unwrap();

        let nuclide = database
            .initialize_nuclide_properties(Zaid::new(1001), 0.999167)
            .unwrap();
        assert!(nuclide.photoatomic_data_available(PhotoatomicDataFileType::AceFile));
        assert!(Arc::ptr_eq(&nuclide.atom_properties(), &atom));
    }

    #[test]
    fn test_duplicate_entries_are_rejected() {
        let mut database = PropertiesDatabase::new();
        database.initialize_nuclide_properties(Zaid::new(1001), 0.999167).unwrap();
        let err = database
            .initialize_nuclide_properties(Zaid::new(1001), 0.999167)
            .unwrap_err();
        assert!(matches!(err, PropertiesError::DuplicateEntry(_)));
        let err = database
            .initialize_atom_properties(Zaid::new(1000), 0.999242)
            .unwrap_err();
        assert!(matches!(err, PropertiesError::DuplicateEntry(_)));
    }

    #[test]
    fn test_missing_entries() {
        let database = PropertiesDatabase::new();
        assert!(matches!(
            database.nuclide_properties(Zaid::new(8016)),
            Err(PropertiesError::RecordNotFound { .. })
        ));
        assert!(matches!(
            database.atom_properties(Zaid::new(8016)),
            Err(PropertiesError::RecordNotFound { .. })
        ));
        assert!(database.properties(Zaid::new(8016)).is_err());
    }

    #[test]
    fn test_properties_prefers_nuclide() {
        let mut database = PropertiesDatabase::new();
        database.initialize_atom_properties(Zaid::new(6000), 11.8969).unwrap();
        database.initialize_nuclide_properties(Zaid::new(6012), 11.8969).unwrap();

        let element = database.properties(Zaid::new(6000)).unwrap();
        assert!(!element.is_nuclide());
        let isotope = database.properties(Zaid::new(6012)).unwrap();
        assert!(isotope.is_nuclide());
        assert_eq!(isotope.as_nuclide().map(|n| n.zaid()), Some(Zaid::new(6012)));
    }

    #[test]
    fn test_aliases() {
        let mut database = PropertiesDatabase::new();
        database.initialize_nuclide_properties(Zaid::new(1001), 0.999167).unwrap();
        database.set_alias("H-1", Zaid::new(1001)).unwrap();
        assert!(database.alias_exists("H-1"));
        assert_eq!(database.zaid_for_alias("H-1").unwrap(), Zaid::new(1001));
        assert!(matches!(
            database.zaid_for_alias("O-16"),
            Err(PropertiesError::UnknownAlias(_))
        ));
        assert!(database.set_alias("O-16", Zaid::new(8016)).is_err());
        assert_eq!(database.aliases().len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let mut database = PropertiesDatabase::new();
        let h1 = database.initialize_nuclide_properties(Zaid::new(1001), 0.999167).unwrap();
        h1.set_nuclear_data_properties(nuclear(1001, 0.999167)).unwrap();
        h1.atom_mut().set_photoatomic_data_properties(photoatomic(1000, 12)).unwrap();
        database.initialize_nuclide_properties(Zaid::new(1002), 1.9963).unwrap();
        database.set_alias("H-1", Zaid::new(1001)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        database.save(&path).unwrap();
        let loaded = PropertiesDatabase::load(&path).unwrap();

        assert_eq!(loaded.nuclide_zaids(), database.nuclide_zaids());
        assert_eq!(loaded.atom_zaids(), database.atom_zaids());
        assert_eq!(loaded.zaid_for_alias("H-1").unwrap(), Zaid::new(1001));

        let h1 = loaded.nuclide_properties(Zaid::new(1001)).unwrap();
        let h2 = loaded.nuclide_properties(Zaid::new(1002)).unwrap();
        assert!(h1.shares_atom_properties_with(h2));
        assert!(Arc::ptr_eq(
            &h1.atom_properties(),
            &loaded.atom_properties(Zaid::new(1000)).unwrap()
        ));

        let record = h1
            .nuclear_data_properties(NuclearDataFileType::AceFile, 7, Energy::from_mev(2.5301e-08), true)
            .unwrap();
        assert_eq!(record.table_name(), "1001.70c");
        assert_eq!(record.file_path(), Path::new("neutron/h.txt"));
        assert!(h2.photoatomic_data_available_for_version(PhotoatomicDataFileType::AceFile, 12));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PropertiesDatabase::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PropertiesError::Io(_)));
    }
}
