//! Static code tables for F1 telemetry ids.
//!
//! Keys are looked up by value, never by position: `-1` (unknown/private) and
//! sparse ids such as 41 or 255 behave like any other key.

/// Immutable `(key, value)` table with a total lookup.
#[derive(Debug, Clone, Copy)]
pub struct LookupTable<K: 'static, V: 'static> {
    entries: &'static [(K, V)],
}

impl<K, V> LookupTable<K, V> {
    pub const fn new(entries: &'static [(K, V)]) -> Self {
        Self { entries }
    }

    pub const fn entries(&self) -> &'static [(K, V)] {
        self.entries
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq, V: Copy> LookupTable<K, V> {
    /// Value for `key`, if mapped.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|&(_, value)| value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

/// `table[code]` if mapped, else `fallback`.
pub fn map_code<K: PartialEq, V: Copy>(table: &LookupTable<K, V>, code: K, fallback: V) -> V {
    table.get(&code).unwrap_or(fallback)
}

/// Like [`map_code`], for codes the backend may send as `null`.
pub fn map_optional_code<K: PartialEq, V: Copy>(
    table: &LookupTable<K, V>,
    code: Option<K>,
    fallback: V,
) -> V {
    code.and_then(|code| table.get(&code)).unwrap_or(fallback)
}

pub const UNKNOWN: &str = "Unknown";
pub const NO_TYRE: &str = "-";
pub const WHITE: &str = "#FFFFFF";

/// Compound code → short label.
pub static TYRE_COMPOUNDS: LookupTable<i32, &str> = LookupTable::new(&[
    (0, "S"),
    (16, "S"),
    (17, "M"),
    (18, "H"),
    (7, "I"),
    (8, "W"),
]);

/// Compound label → badge color.
pub static TYRE_COLORS: LookupTable<&str, &str> = LookupTable::new(&[
    ("S", "#FF0000"),
    ("M", "#FFD700"),
    ("H", "#FFFFFF"),
    ("I", "#00FF00"),
    ("W", "#0000FF"),
]);

pub static SESSION_TYPES: LookupTable<i32, &str> = LookupTable::new(&[
    (5, "Q1"),
    (6, "Q2"),
    (7, "Q3"),
    (8, "Short Qualifying"),
    (9, "One-Shot Qualifying"),
    (10, "Sprint Shootout 1"),
    (11, "Sprint Shootout 2"),
    (12, "Sprint Shootout 3"),
    (13, "Short Sprint Shootout"),
    (14, "One-Shot Sprint Shootout"),
    (15, "Race"),
    (16, "Sprint"),
    (17, "Race 2"),
    (18, "Time Trial"),
]);

pub static TRACKS: LookupTable<i32, &str> = LookupTable::new(&[
    (0, "Melbourne"),
    (1, "Paul Ricard"),
    (2, "Shanghai"),
    (3, "Sakhir"),
    (4, "Catalunya"),
    (5, "Monaco"),
    (6, "Montreal"),
    (7, "Silverstone"),
    (8, "Hockenheim"),
    (9, "Hungaroring"),
    (10, "Spa"),
    (11, "Monza"),
    (12, "Singapore"),
    (13, "Suzuka"),
    (14, "Abu Dhabi"),
    (15, "Texas"),
    (16, "Brazil"),
    (17, "Austria"),
    (18, "Sochi"),
    (19, "Mexico"),
    (20, "Baku"),
    (21, "Sakhir Short"),
    (22, "Silverstone Short"),
    (23, "Texas Short"),
    (24, "Suzuka Short"),
    (25, "Hanoi"),
    (26, "Zandvoort"),
    (27, "Imola"),
    (28, "Portimao"),
    (29, "Jeddah"),
    (30, "Miami"),
    (31, "Las Vegas"),
    (32, "Losail"),
]);

pub static ERS_MODES: LookupTable<i32, &str> = LookupTable::new(&[
    (0, "NONE"),
    (1, "MEDIUM"),
    (2, "HOTLAP"),
    (3, "OVERTAKE"),
    (-1, "PRIVATE"),
]);

pub static FUEL_MIXES: LookupTable<i32, &str> = LookupTable::new(&[
    (0, "Lean"),
    (1, "Standard"),
    (2, "Rich"),
    (3, "Max"),
]);

pub static TEAM_COLORS: LookupTable<i32, &str> = LookupTable::new(&[
    (-1, "#FFFFFF"),
    (0, "#00C7CD"),  // Mercedes
    (1, "#FF0000"),  // Ferrari
    (2, "#0000FF"),  // Red Bull
    (3, "#5097FF"),  // Williams
    (4, "#00902A"),  // Aston Martin
    (5, "#009BFF"),  // Alpine
    (6, "#00446F"),  // Alpha Tauri
    (7, "#95ACBB"),  // Haas
    (8, "#FFAE00"),  // McLaren
    (9, "#980404"),  // Alfa Romeo
    (41, "#000000"), // Multi
    (104, "#670498"),
    (255, "#670498"),
]);

pub static TEAM_NAMES: LookupTable<i32, &str> = LookupTable::new(&[
    (-1, "Unknown"),
    (0, "Mercedes"),
    (1, "Ferrari"),
    (2, "Red Bull"),
    (3, "Williams"),
    (4, "Aston Martin"),
    (5, "Alpine"),
    (6, "Alpha Tauri"),
    (7, "Haas"),
    (8, "McLaren"),
    (9, "Alfa Romeo"),
    (41, "Multi"),
]);

/// Short compound label, `-` when the code is absent or unmapped.
pub fn tyre_label(compound: Option<i32>) -> &'static str {
    map_optional_code(&TYRE_COMPOUNDS, compound, NO_TYRE)
}

/// Badge color for a compound label.
pub fn tyre_color(label: &str) -> &'static str {
    TYRE_COLORS
        .entries()
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map_or(WHITE, |&(_, color)| color)
}

/// Text color drawn on top of a compound badge (the hard badge is white).
pub fn tyre_text_color(label: &str) -> &'static str {
    if label == "H" { "#000" } else { "#fff" }
}

pub fn session_name(session_type: Option<i32>) -> &'static str {
    map_optional_code(&SESSION_TYPES, session_type, UNKNOWN)
}

pub fn track_name(track: Option<i32>) -> &'static str {
    map_optional_code(&TRACKS, track, UNKNOWN)
}

pub fn ers_mode_label(mode: i32) -> &'static str {
    map_code(&ERS_MODES, mode, "NONE")
}

pub fn fuel_mix_label(mix: i32) -> &'static str {
    map_code(&FUEL_MIXES, mix, "Standard")
}

pub fn team_color(team_id: i32) -> &'static str {
    map_code(&TEAM_COLORS, team_id, WHITE)
}

pub fn team_name(team_id: i32) -> &'static str {
    map_code(&TEAM_NAMES, team_id, UNKNOWN)
}
