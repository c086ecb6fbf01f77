// Isotope identifier (isomer, Z and A packed into one integer)
use crate::data::{element_symbol, ATOMIC_NUMBERS};
use crate::error::PropertiesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A ZAID packs the atomic number Z and mass number A as `Z * 1000 + A`.
///
/// Metastable states use the SZA form `m * 1_000_000 + Z * 1000 + A` for
/// isomer number `m >= 1`. A mass number of zero denotes the natural element
/// (an "atom" ZAID such as `26000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zaid(u32);

impl Zaid {
    /// Create a ZAID from its raw integer form (e.g. `1001`)
    pub const fn new(raw: u32) -> Self {
        Zaid(raw)
    }

    /// Build a ZAID from atomic number, mass number and isomer number.
    ///
    /// # Errors
    /// `InvalidZaid` if Z or A does not fit in three digits or the packed
    /// value overflows `u32` (isomer numbers above 4293 for most nuclides).
    pub fn from_parts(
        atomic_number: u32,
        atomic_mass_number: u32,
        isomer_number: u32,
    ) -> Result<Self, PropertiesError> {
        let invalid = || {
            PropertiesError::InvalidZaid(format!(
                "Z={} A={} m={}",
                atomic_number, atomic_mass_number, isomer_number
            ))
        };
        if atomic_number >= 1000 || atomic_mass_number >= 1000 {
            return Err(invalid());
        }
        isomer_number
            .checked_mul(1_000_000)
            .and_then(|raw| raw.checked_add(atomic_number * 1000 + atomic_mass_number))
            .map(Zaid)
            .ok_or_else(invalid)
    }

    /// Raw integer form
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Atomic number Z
    #[inline]
    pub const fn atomic_number(self) -> u32 {
        (self.0 % 1_000_000) / 1000
    }

    /// Mass number A (zero for a natural element)
    #[inline]
    pub const fn atomic_mass_number(self) -> u32 {
        self.0 % 1000
    }

    /// Isomer (metastable state) number, zero for the ground state
    #[inline]
    pub const fn isomer_number(self) -> u32 {
        self.0 / 1_000_000
    }

    /// The ZAID of the element this isotope belongs to (`Z * 1000`)
    #[inline]
    pub const fn atom(self) -> Zaid {
        Zaid(self.atomic_number() * 1000)
    }

    /// True if this ZAID denotes a natural element rather than an isotope
    #[inline]
    pub fn is_atom(self) -> bool {
        self.atomic_mass_number() == 0 && self.isomer_number() == 0
    }

    /// Human readable name, e.g. "H1", "Am242m1" or "Fe" for the element
    pub fn name(self) -> String {
        let symbol = element_symbol(self.atomic_number())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Z{}-", self.atomic_number()));
        if self.is_atom() {
            return symbol;
        }
        match self.isomer_number() {
            0 => format!("{}{}", symbol, self.atomic_mass_number()),
            m => format!("{}{}m{}", symbol, self.atomic_mass_number(), m),
        }
    }
}

impl fmt::Display for Zaid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Zaid {
    fn from(raw: u32) -> Self {
        Zaid::new(raw)
    }
}

impl FromStr for Zaid {
    type Err = PropertiesError;

    /// Parse either a raw integer ("1001") or a name ("H1", "Am242m1", "Fe")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<u32>() {
            return Ok(Zaid::new(raw));
        }

        // Split the element symbol from the numeric part
        let idx = s.find(|c: char| c.is_ascii_digit()).unwrap_or(s.len());
        let (symbol, rest) = s.split_at(idx);
        let atomic_number = ATOMIC_NUMBERS
            .get(symbol)
            .copied()
            .ok_or_else(|| PropertiesError::InvalidZaid(s.to_string()))?;
        if rest.is_empty() {
            return Zaid::from_parts(atomic_number, 0, 0);
        }

        let (mass, isomer) = match rest.split_once('m') {
            Some((mass, isomer)) => (mass, isomer),
            None => (rest, "0"),
        };
        let mass = mass
            .parse::<u32>()
            .map_err(|_| PropertiesError::InvalidZaid(s.to_string()))?;
        let isomer = isomer
            .parse::<u32>()
            .map_err(|_| PropertiesError::InvalidZaid(s.to_string()))?;
        if mass == 0 || mass >= 1000 {
            return Err(PropertiesError::InvalidZaid(s.to_string()));
        }
        Zaid::from_parts(atomic_number, mass, isomer)
            .map_err(|_| PropertiesError::InvalidZaid(s.to_string()))
    }
}
