//! City-name lookup with normalization and prefix fallback.

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// Coordinate used when a city matches nothing in the table (Lyon centre).
pub const DEFAULT_METRO_POINT: GeoPoint = GeoPoint::new(45.7640, 4.8357);

/// Normalized city keys and base coordinates.
const FRENCH_CITIES: &[(&str, f64, f64)] = &[
    ("lyon", 45.7640, 4.8357),
    ("villeurbanne", 45.7719, 4.8902),
    ("venissieux", 45.6975, 4.8867),
    ("vaulx en velin", 45.7786, 4.9214),
    ("bron", 45.7386, 4.9131),
    ("caluire et cuire", 45.7953, 4.8469),
    ("saint priest", 45.6960, 4.9440),
    ("saint fons", 45.7087, 4.8533),
    ("saint genis laval", 45.6953, 4.7931),
    ("sainte foy les lyon", 45.7336, 4.7925),
    ("rillieux la pape", 45.8214, 4.8983),
    ("meyzieu", 45.7667, 5.0036),
    ("decines charpieu", 45.7694, 4.9589),
    ("ecully", 45.7744, 4.7775),
    ("oullins", 45.7144, 4.8075),
    ("tassin la demi lune", 45.7636, 4.7800),
    ("villefranche sur saone", 45.9897, 4.7186),
    ("vienne", 45.5253, 4.8742),
    ("bourg en bresse", 46.2052, 5.2255),
    ("macon", 46.3069, 4.8287),
    ("saint etienne", 45.4397, 4.3872),
    ("grenoble", 45.1885, 5.7245),
    ("chambery", 45.5646, 5.9178),
    ("annecy", 45.8992, 6.1294),
    ("valence", 44.9334, 4.8924),
    ("clermont ferrand", 45.7772, 3.0870),
    ("dijon", 47.3220, 5.0415),
    ("paris", 48.8566, 2.3522),
    ("marseille", 43.2965, 5.3698),
    ("toulouse", 43.6047, 1.4442),
    ("nice", 43.7102, 7.2620),
    ("nantes", 47.2184, -1.5536),
    ("strasbourg", 48.5734, 7.7521),
    ("montpellier", 43.6108, 3.8767),
    ("bordeaux", 44.8378, -0.5792),
    ("lille", 50.6292, 3.0573),
    ("rennes", 48.1173, -1.6778),
];

/// How a city string was matched against the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// The normalized name is a table key.
    Exact,
    /// A table key prefixes the normalized name (e.g. "Lyon 3e").
    Prefix,
    /// Nothing matched; the default metropolitan point was used.
    Fallback,
}

/// Result of resolving a city name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityMatch {
    point: GeoPoint,
    kind: MatchKind,
    key: Option<&'static str>,
}

impl CityMatch {
    /// Base coordinate of the matched city (no jitter).
    pub fn point(&self) -> GeoPoint {
        self.point
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Normalized table key that matched, if any.
    pub fn key(&self) -> Option<&'static str> {
        self.key
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == MatchKind::Fallback
    }
}

/// A fixed table of known city coordinates.
///
/// # Examples
///
/// ```
/// use territory_routing::geocode::{CityTable, MatchKind};
///
/// let table = CityTable::french();
/// assert_eq!(table.resolve("Lyon").kind(), MatchKind::Exact);
/// assert_eq!(table.resolve("Lyon 3e").kind(), MatchKind::Prefix);
/// assert_eq!(table.resolve("Écully").key(), Some("ecully"));
/// assert_eq!(table.resolve("Atlantis").kind(), MatchKind::Fallback);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CityTable {
    entries: &'static [(&'static str, f64, f64)],
    fallback: GeoPoint,
}

impl CityTable {
    /// The built-in table of French cities, centred on the Lyon territory.
    pub const fn french() -> Self {
        Self {
            entries: FRENCH_CITIES,
            fallback: DEFAULT_METRO_POINT,
        }
    }

    /// Number of known cities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a free-text city name. Never fails: unknown names fall back
    /// to the default metropolitan coordinate.
    pub fn resolve(&self, city: &str) -> CityMatch {
        let normalized = normalize_city(city);

        if let Some(&(key, lat, lng)) = self.entries.iter().find(|(key, ..)| *key == normalized) {
            return CityMatch {
                point: GeoPoint::new(lat, lng),
                kind: MatchKind::Exact,
                key: Some(key),
            };
        }

        // Longest key wins so "saint genis laval" beats a shorter overlap.
        let prefix = self
            .entries
            .iter()
            .filter(|(key, ..)| is_word_prefix(key, &normalized))
            .max_by_key(|(key, ..)| key.len());

        match prefix {
            Some(&(key, lat, lng)) => CityMatch {
                point: GeoPoint::new(lat, lng),
                kind: MatchKind::Prefix,
                key: Some(key),
            },
            None => CityMatch {
                point: self.fallback,
                kind: MatchKind::Fallback,
                key: None,
            },
        }
    }
}

impl Default for CityTable {
    fn default() -> Self {
        Self::french()
    }
}

/// `key` prefixes `name` and ends on a word or number boundary.
fn is_word_prefix(key: &str, name: &str) -> bool {
    if !name.starts_with(key) {
        return false;
    }
    match name[key.len()..].chars().next() {
        None => true,
        Some(c) => c == ' ' || c.is_ascii_digit(),
    }
}

/// Case-folds a city name, strips common diacritics, and turns separators
/// into single spaces. "St"/"Ste" abbreviations are expanded.
///
/// # Examples
///
/// ```
/// use territory_routing::geocode::normalize_city;
///
/// assert_eq!(normalize_city("  Saint-Étienne "), "saint etienne");
/// assert_eq!(normalize_city("St-Priest"), "saint priest");
/// assert_eq!(normalize_city("LYON 3e"), "lyon 3e");
/// ```
pub fn normalize_city(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for ch in raw.chars().flat_map(char::to_lowercase) {
        push_folded(ch, &mut folded);
    }

    folded
        .split_whitespace()
        .map(|word| match word {
            "st" => "saint",
            "ste" => "sainte",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_folded(ch: char, out: &mut String) {
    let c = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'œ' => {
            out.push_str("oe");
            return;
        }
        'æ' => {
            out.push_str("ae");
            return;
        }
        '-' | '\'' | '\u{2019}' | '_' | '.' | ',' => ' ',
        other => other,
    };
    out.push(c);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keys_are_normalized() {
        for (key, ..) in FRENCH_CITIES {
            assert_eq!(&normalize_city(key), key);
        }
    }

    #[test]
    fn test_exact_match_case_and_accents() {
        let table = CityTable::french();
        let m = table.resolve("VÉNISSIEUX");
        assert_eq!(m.kind(), MatchKind::Exact);
        assert_eq!(m.key(), Some("venissieux"));
    }

    #[test]
    fn test_hyphenated_name() {
        let m = CityTable::french().resolve("Caluire-et-Cuire");
        assert_eq!(m.kind(), MatchKind::Exact);
    }

    #[test]
    fn test_arrondissement_prefix() {
        let table = CityTable::french();
        let lyon = table.resolve("Lyon");
        let lyon3 = table.resolve("Lyon 3e");
        assert_eq!(lyon3.kind(), MatchKind::Prefix);
        assert_eq!(lyon3.point(), lyon.point());
        assert_eq!(table.resolve("Lyon3").key(), Some("lyon"));
    }

    #[test]
    fn test_prefix_requires_word_boundary() {
        // "lyonnais" must not match "lyon"
        assert!(CityTable::french().resolve("Lyonnais").is_fallback());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let m = CityTable::french().resolve("Saint-Priest Centre");
        assert_eq!(m.key(), Some("saint priest"));
    }

    #[test]
    fn test_unknown_city_falls_back() {
        let m = CityTable::french().resolve("");
        assert!(m.is_fallback());
        assert_eq!(m.point(), DEFAULT_METRO_POINT);
        assert_eq!(m.key(), None);
    }

    #[test]
    fn test_normalize_ligature() {
        assert_eq!(normalize_city("Cœur"), "coeur");
    }
}
