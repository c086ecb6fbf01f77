use once_cell::sync::Lazy;
use std::collections::HashMap;

// src/data.rs
// Static element tables used to name and parse ZAIDs.

/// Element symbols ordered by atomic number (index 0 is hydrogen).
pub static ELEMENT_SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", //
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", //
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", //
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", //
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", //
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", //
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", //
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", //
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", //
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", //
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", //
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Map from element symbol to atomic number, derived from [`ELEMENT_SYMBOLS`].
pub static ATOMIC_NUMBERS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    ELEMENT_SYMBOLS
        .iter()
        .enumerate()
        .map(|(idx, &symbol)| (symbol, idx as u32 + 1))
        .collect()
});

/// Element symbol for an atomic number, if the element is known.
pub fn element_symbol(atomic_number: u32) -> Option<&'static str> {
    if atomic_number == 0 {
        return None;
    }
    ELEMENT_SYMBOLS.get(atomic_number as usize - 1).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(element_symbol(1), Some("H"));
        assert_eq!(element_symbol(26), Some("Fe"));
        assert_eq!(element_symbol(118), Some("Og"));
        assert_eq!(element_symbol(0), None);
        assert_eq!(element_symbol(119), None);
    }

    #[test]
    fn test_atomic_numbers_inverse_of_symbols() {
        assert_eq!(ATOMIC_NUMBERS.get("U").copied(), Some(92));
        assert_eq!(ATOMIC_NUMBERS.len(), ELEMENT_SYMBOLS.len());
    }
}
