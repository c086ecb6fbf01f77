// Versioned record maps and the evaluation temperature resolver
use crate::error::{PropertiesError, Result};
use crate::units::{Energy, Temperature};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// A record that can be stored in a [`VersionedRecordMap`].
///
/// Implemented for the trait objects of every data category (see
/// `data_properties`), but any sized type works as well.
pub trait VersionedRecord {
    type FileType: Copy + Ord + fmt::Debug + fmt::Display;
    /// Category name used in error and log messages
    const CATEGORY: &'static str;

    fn file_type(&self) -> Self::FileType;
    fn file_version(&self) -> u32;
    /// Independent copy of the record with identical field values
    fn deep_clone(&self) -> Arc<Self>;
}

/// A record evaluated at a specific temperature.
pub trait TemperatureRecord: VersionedRecord {
    fn evaluation_temperature_in_mev(&self) -> Energy;
}

/// A temperature record that is additionally keyed by a name (e.g. "H2O").
pub trait NamedRecord: TemperatureRecord {
    fn name(&self) -> &str;
}

fn not_found(category: &'static str, detail: String) -> PropertiesError {
    PropertiesError::RecordNotFound { category, detail }
}

fn check_temperature(category: &'static str, temperature: Energy) -> Result<()> {
    if temperature.is_valid_temperature() {
        Ok(())
    } else {
        Err(PropertiesError::InvalidData(format!(
            "{} evaluation temperature must be finite and non-negative, got {}",
            category, temperature
        )))
    }
}

/// file type -> version -> record
pub struct VersionedRecordMap<R: ?Sized + VersionedRecord> {
    records: BTreeMap<R::FileType, BTreeMap<u32, Arc<R>>>,
}

impl<R: ?Sized + VersionedRecord> VersionedRecordMap<R> {
    pub fn new() -> Self {
        VersionedRecordMap {
            records: BTreeMap::new(),
        }
    }

    /// Store a record at its (file type, version) key.
    ///
    /// An existing record at that key is replaced and returned.
    pub fn insert(&mut self, record: Arc<R>) -> Option<Arc<R>> {
        let file_type = record.file_type();
        let version = record.file_version();
        let replaced = self
            .records
            .entry(file_type)
            .or_default()
            .insert(version, record);
        if replaced.is_some() {
            warn!(
                "Replacing {} data properties for file type {} version {}",
                R::CATEGORY,
                file_type,
                version
            );
        }
        replaced
    }

    /// True if any version is stored for the file type
    pub fn is_available(&self, file_type: R::FileType) -> bool {
        self.records
            .get(&file_type)
            .is_some_and(|versions| !versions.is_empty())
    }

    /// True if the (file type, version) pair is stored
    pub fn is_available_for_version(&self, file_type: R::FileType, version: u32) -> bool {
        self.records
            .get(&file_type)
            .is_some_and(|versions| versions.contains_key(&version))
    }

    /// Shared reference to the record stored at (file type, version)
    pub fn get(&self, file_type: R::FileType, version: u32) -> Result<Arc<R>> {
        self.records
            .get(&file_type)
            .and_then(|versions| versions.get(&version))
            .cloned()
            .ok_or_else(|| {
                not_found(
                    R::CATEGORY,
                    format!("file type {} version {}", file_type, version),
                )
            })
    }

    pub fn file_types(&self) -> BTreeSet<R::FileType> {
        self.records
            .iter()
            .filter(|(_, versions)| !versions.is_empty())
            .map(|(&file_type, _)| file_type)
            .collect()
    }

    /// Versions stored for the file type (empty if the file type is absent)
    pub fn versions(&self, file_type: R::FileType) -> BTreeSet<u32> {
        self.records
            .get(&file_type)
            .map(|versions| versions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// The highest version stored for the file type
    pub fn recommended_version(&self, file_type: R::FileType) -> Result<u32> {
        self.records
            .get(&file_type)
            .and_then(|versions| versions.keys().next_back().copied())
            .ok_or_else(|| not_found(R::CATEGORY, format!("file type {}", file_type)))
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(BTreeMap::is_empty)
    }

    /// Every stored record, ordered by (file type, version)
    pub fn records(&self) -> impl Iterator<Item = &Arc<R>> + '_ {
        self.records.values().flat_map(|versions| versions.values())
    }

    /// Same key structure with every record replaced by an independent copy
    pub fn deep_clone(&self) -> Self {
        let mut cloned = VersionedRecordMap::new();
        for record in self.records() {
            cloned.insert(record.deep_clone());
        }
        cloned
    }
}

impl<R: ?Sized + VersionedRecord> Default for VersionedRecordMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

// Shallow: the container is copied, the records are shared
impl<R: ?Sized + VersionedRecord> Clone for VersionedRecordMap<R> {
    fn clone(&self) -> Self {
        VersionedRecordMap {
            records: self.records.clone(),
        }
    }
}

impl<R: ?Sized + VersionedRecord> fmt::Debug for VersionedRecordMap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<(R::FileType, u32)> = self
            .records
            .iter()
            .flat_map(|(&file_type, versions)| versions.keys().map(move |&v| (file_type, v)))
            .collect();
        f.debug_struct("VersionedRecordMap")
            .field("category", &R::CATEGORY)
            .field("keys", &keys)
            .finish()
    }
}

/// Records of one (file type, version) pair sorted by ascending evaluation
/// temperature. Each temperature appears at most once.
struct TemperatureGrid<R: ?Sized> {
    entries: Vec<(Energy, Arc<R>)>,
}

impl<R: ?Sized> Clone for TemperatureGrid<R> {
    fn clone(&self) -> Self {
        TemperatureGrid {
            entries: self.entries.clone(),
        }
    }
}

impl<R: ?Sized> TemperatureGrid<R> {
    fn new() -> Self {
        TemperatureGrid {
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, temperature: Energy, record: Arc<R>) -> Option<Arc<R>> {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(stored, _)| stored.matches(temperature))
        {
            return Some(std::mem::replace(&mut entry.1, record));
        }
        let idx = self
            .entries
            .partition_point(|(stored, _)| stored.mev() < temperature.mev());
        self.entries.insert(idx, (temperature, record));
        None
    }

    fn find_exact(&self, temperature: Energy) -> Option<&(Energy, Arc<R>)> {
        self.entries
            .iter()
            .find(|(stored, _)| stored.matches(temperature))
    }

    /// Entry with the minimum absolute temperature difference.
    ///
    /// The scan runs in ascending order and only a strictly smaller distance
    /// replaces the current best, so an exact tie resolves to the lower
    /// temperature.
    fn find_nearest(&self, temperature: Energy) -> Option<&(Energy, Arc<R>)> {
        if let Some(exact) = self.find_exact(temperature) {
            return Some(exact);
        }
        let mut best: Option<&(Energy, Arc<R>)> = None;
        for entry in &self.entries {
            match best {
                Some((stored, _)) if entry.0.distance(temperature) >= stored.distance(temperature) => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    fn temperatures(&self) -> Vec<Energy> {
        self.entries.iter().map(|(temperature, _)| *temperature).collect()
    }
}

impl<R: ?Sized + VersionedRecord> TemperatureGrid<R> {
    fn deep_clone(&self) -> Self {
        TemperatureGrid {
            entries: self
                .entries
                .iter()
                .map(|(temperature, record)| (*temperature, record.deep_clone()))
                .collect(),
        }
    }
}

/// file type -> version -> evaluation temperature -> record
pub struct TemperatureRecordMap<R: ?Sized + TemperatureRecord> {
    records: BTreeMap<R::FileType, BTreeMap<u32, TemperatureGrid<R>>>,
}

impl<R: ?Sized + TemperatureRecord> TemperatureRecordMap<R> {
    pub fn new() -> Self {
        TemperatureRecordMap {
            records: BTreeMap::new(),
        }
    }

    /// Store a record at its (file type, version, temperature) key.
    ///
    /// An existing record at the same temperature is replaced and returned.
    /// A negative or non-finite evaluation temperature is rejected with
    /// `InvalidData` and the map is left unchanged.
    pub fn insert(&mut self, record: Arc<R>) -> Result<Option<Arc<R>>> {
        let file_type = record.file_type();
        let version = record.file_version();
        let temperature = record.evaluation_temperature_in_mev();
        check_temperature(R::CATEGORY, temperature)?;
        let replaced = self
            .records
            .entry(file_type)
            .or_default()
            .entry(version)
            .or_insert_with(TemperatureGrid::new)
            .insert(temperature, record);
        if replaced.is_some() {
            warn!(
                "Replacing {} data properties for file type {} version {} at {}",
                R::CATEGORY,
                file_type,
                version,
                temperature
            );
        }
        Ok(replaced)
    }

    fn grid(&self, file_type: R::FileType, version: u32) -> Option<&TemperatureGrid<R>> {
        self.records
            .get(&file_type)
            .and_then(|versions| versions.get(&version))
            .filter(|grid| !grid.entries.is_empty())
    }

    pub fn is_available(&self, file_type: R::FileType) -> bool {
        self.records
            .get(&file_type)
            .is_some_and(|versions| versions.values().any(|grid| !grid.entries.is_empty()))
    }

    pub fn is_available_for_version(&self, file_type: R::FileType, version: u32) -> bool {
        self.grid(file_type, version).is_some()
    }

    /// True if a record exists at exactly this evaluation temperature.
    /// Always false for a negative or non-finite temperature.
    pub fn is_available_at(
        &self,
        file_type: R::FileType,
        version: u32,
        temperature: Energy,
    ) -> bool {
        temperature.is_valid_temperature()
            && self
                .grid(file_type, version)
                .is_some_and(|grid| grid.find_exact(temperature).is_some())
    }

    pub fn file_types(&self) -> BTreeSet<R::FileType> {
        self.records
            .keys()
            .copied()
            .filter(|&file_type| self.is_available(file_type))
            .collect()
    }

    pub fn versions(&self, file_type: R::FileType) -> BTreeSet<u32> {
        self.records
            .get(&file_type)
            .map(|versions| {
                versions
                    .iter()
                    .filter(|(_, grid)| !grid.entries.is_empty())
                    .map(|(&version, _)| version)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn recommended_version(&self, file_type: R::FileType) -> Result<u32> {
        self.versions(file_type)
            .into_iter()
            .next_back()
            .ok_or_else(|| not_found(R::CATEGORY, format!("file type {}", file_type)))
    }

    /// Ascending evaluation temperatures in MeV (empty if absent)
    pub fn evaluation_temps_in_mev(&self, file_type: R::FileType, version: u32) -> Vec<Energy> {
        self.grid(file_type, version)
            .map(TemperatureGrid::temperatures)
            .unwrap_or_default()
    }

    /// Ascending evaluation temperatures in kelvin (empty if absent)
    pub fn evaluation_temps(&self, file_type: R::FileType, version: u32) -> Vec<Temperature> {
        self.evaluation_temps_in_mev(file_type, version)
            .into_iter()
            .map(Energy::to_temperature)
            .collect()
    }

    /// Resolve the record for a temperature.
    ///
    /// With `require_exact_match` the stored temperature must equal the
    /// requested one; otherwise the nearest stored temperature is used.
    ///
    /// # Errors
    /// * `InvalidData` if the requested temperature is negative or not finite
    /// * `RecordNotFound` if nothing is stored for (file type, version)
    /// * `RequestNotSatisfiable` if an exact match was required and is absent
    pub fn get(
        &self,
        file_type: R::FileType,
        version: u32,
        temperature: Energy,
        require_exact_match: bool,
    ) -> Result<Arc<R>> {
        check_temperature(R::CATEGORY, temperature)?;
        let grid = self.grid(file_type, version).ok_or_else(|| {
            not_found(
                R::CATEGORY,
                format!("file type {} version {}", file_type, version),
            )
        })?;

        if require_exact_match {
            return grid
                .find_exact(temperature)
                .map(|(_, record)| Arc::clone(record))
                .ok_or_else(|| PropertiesError::RequestNotSatisfiable {
                    category: R::CATEGORY,
                    detail: format!(
                        "no file type {} version {} data evaluated at {} ({})",
                        file_type,
                        version,
                        temperature,
                        temperature.to_temperature()
                    ),
                });
        }

        let (stored, record) = grid.find_nearest(temperature).ok_or_else(|| {
            not_found(
                R::CATEGORY,
                format!("file type {} version {}", file_type, version),
            )
        })?;
        if !stored.matches(temperature) {
            debug!(
                "Using {} data evaluated at {} for requested {}",
                R::CATEGORY,
                stored,
                temperature
            );
        }
        Ok(Arc::clone(record))
    }

    pub fn is_empty(&self) -> bool {
        self.records
            .values()
            .all(|versions| versions.values().all(|grid| grid.entries.is_empty()))
    }

    /// Every stored record, ordered by (file type, version, temperature)
    pub fn records(&self) -> impl Iterator<Item = &Arc<R>> + '_ {
        self.records
            .values()
            .flat_map(|versions| versions.values())
            .flat_map(|grid| grid.entries.iter().map(|(_, record)| record))
    }

    pub fn deep_clone(&self) -> Self {
        TemperatureRecordMap {
            records: self
                .records
                .iter()
                .map(|(&file_type, versions)| {
                    let versions = versions
                        .iter()
                        .map(|(&version, grid)| (version, grid.deep_clone()))
                        .collect();
                    (file_type, versions)
                })
                .collect(),
        }
    }
}

impl<R: ?Sized + TemperatureRecord> Default for TemperatureRecordMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized + TemperatureRecord> Clone for TemperatureRecordMap<R> {
    fn clone(&self) -> Self {
        TemperatureRecordMap {
            records: self.records.clone(),
        }
    }
}

impl<R: ?Sized + TemperatureRecord> fmt::Debug for TemperatureRecordMap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = Vec::new();
        for (&file_type, versions) in &self.records {
            for (&version, grid) in versions {
                keys.push((file_type, version, grid.temperatures()));
            }
        }
        f.debug_struct("TemperatureRecordMap")
            .field("category", &R::CATEGORY)
            .field("keys", &keys)
            .finish()
    }
}

/// name -> file type -> version -> evaluation temperature -> record
///
/// Names are matched exactly (case sensitive).
pub struct NamedTemperatureRecordMap<R: ?Sized + NamedRecord> {
    records: BTreeMap<String, TemperatureRecordMap<R>>,
}

impl<R: ?Sized + NamedRecord> NamedTemperatureRecordMap<R> {
    pub fn new() -> Self {
        NamedTemperatureRecordMap {
            records: BTreeMap::new(),
        }
    }

    /// Store a record under its name; see [`TemperatureRecordMap::insert`].
    pub fn insert(&mut self, record: Arc<R>) -> Result<Option<Arc<R>>> {
        check_temperature(R::CATEGORY, record.evaluation_temperature_in_mev())?;
        self.records
            .entry(record.name().to_string())
            .or_default()
            .insert(record)
    }

    fn named(&self, name: &str) -> Result<&TemperatureRecordMap<R>> {
        self.records
            .get(name)
            .ok_or_else(|| not_found(R::CATEGORY, format!("name '{}'", name)))
    }

    /// Every name with at least one stored record
    pub fn names(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter(|(_, map)| !map.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn is_available(&self, name: &str, file_type: R::FileType) -> bool {
        self.records
            .get(name)
            .is_some_and(|map| map.is_available(file_type))
    }

    pub fn is_available_for_version(&self, name: &str, file_type: R::FileType, version: u32) -> bool {
        self.records
            .get(name)
            .is_some_and(|map| map.is_available_for_version(file_type, version))
    }

    pub fn is_available_at(
        &self,
        name: &str,
        file_type: R::FileType,
        version: u32,
        temperature: Energy,
    ) -> bool {
        self.records
            .get(name)
            .is_some_and(|map| map.is_available_at(file_type, version, temperature))
    }

    /// File types stored under the name (empty if the name is absent)
    pub fn file_types(&self, name: &str) -> BTreeSet<R::FileType> {
        self.records
            .get(name)
            .map(TemperatureRecordMap::file_types)
            .unwrap_or_default()
    }

    pub fn versions(&self, name: &str, file_type: R::FileType) -> BTreeSet<u32> {
        self.records
            .get(name)
            .map(|map| map.versions(file_type))
            .unwrap_or_default()
    }

    pub fn recommended_version(&self, name: &str, file_type: R::FileType) -> Result<u32> {
        self.named(name)?.recommended_version(file_type)
    }

    pub fn evaluation_temps_in_mev(
        &self,
        name: &str,
        file_type: R::FileType,
        version: u32,
    ) -> Vec<Energy> {
        self.records
            .get(name)
            .map(|map| map.evaluation_temps_in_mev(file_type, version))
            .unwrap_or_default()
    }

    pub fn evaluation_temps(
        &self,
        name: &str,
        file_type: R::FileType,
        version: u32,
    ) -> Vec<Temperature> {
        self.records
            .get(name)
            .map(|map| map.evaluation_temps(file_type, version))
            .unwrap_or_default()
    }

    pub fn get(
        &self,
        name: &str,
        file_type: R::FileType,
        version: u32,
        temperature: Energy,
        require_exact_match: bool,
    ) -> Result<Arc<R>> {
        self.named(name)?
            .get(file_type, version, temperature, require_exact_match)
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(TemperatureRecordMap::is_empty)
    }

    pub fn records(&self) -> impl Iterator<Item = &Arc<R>> + '_ {
        self.records.values().flat_map(|map| map.records())
    }

    pub fn deep_clone(&self) -> Self {
        NamedTemperatureRecordMap {
            records: self
                .records
                .iter()
                .map(|(name, map)| (name.clone(), map.deep_clone()))
                .collect(),
        }
    }
}

impl<R: ?Sized + NamedRecord> Default for NamedTemperatureRecordMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized + NamedRecord> Clone for NamedTemperatureRecordMap<R> {
    fn clone(&self) -> Self {
        NamedTemperatureRecordMap {
            records: self.records.clone(),
        }
    }
}

impl<R: ?Sized + NamedRecord> fmt::Debug for NamedTemperatureRecordMap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.records.iter()).finish()
    }
}
