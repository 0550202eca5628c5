//! Closed vocabularies for selection fields.
//!
//! These are configuration constants, not derived data: the unit codes and
//! rank codes a person can be assigned are fixed lists maintained here.

/// Unit (UBM) codes, command structures first, numbered battalions after.
pub const UNITS: &[&str] = &[
    "QCG", "ABM", "CFAE", "CIOP", "COP", "CSMV/MO", "GBS", "GRAESP", "GMAF",
    "1º GBM", "2º GBM", "3º GBM", "4º GBM", "5º GBM", "6º GBM", "7º GBM", "8º GBM",
    "9º GBM", "10º GBM", "11º GBM", "12º GBM", "13º GBM", "14º GBM", "15º GBM",
    "16º GBM", "17º GBM", "18º GBM", "19º GBM", "20º GBM", "21º GBM", "22º GBM",
    "23º GBM", "24º GBM", "25º GBM", "26º GBM", "27º GBM", "28º GBM", "29º GBM",
    "30º GBM", "31º GBM", "32º GBM", "33º GBM",
];

/// Rank and grade codes, highest first.
pub const RANKS: &[&str] = &[
    "CEL QOBM", "TEN CEL QOBM", "MAJ QOBM", "CAP QOBM", "1º TEN QOBM", "2º TEN QOBM",
    "ASP OF BM", "SUB TEN BM", "1º SGT BM", "2º SGT BM", "3º SGT BM", "CB BM", "SD BM",
];

/// Rank applied to every newly selected person until edited.
pub const DEFAULT_RANK: &str = "SD BM";

/// Unit applied to every newly selected person until edited.
pub const DEFAULT_UNIT: &str = "QCG";

/// Pre-selected rank for the commander field.
pub const DEFAULT_COMMANDER_RANK: &str = "2º TEN QOBM";

pub fn is_unit(code: &str) -> bool {
    UNITS.contains(&code)
}

pub fn is_rank(code: &str) -> bool {
    RANKS.contains(&code)
}
