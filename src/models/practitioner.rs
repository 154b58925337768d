//! Practitioner, coordinate, and selection types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geocode;

/// A latitude/longitude pair in degrees.
///
/// # Examples
///
/// ```
/// use territory_routing::models::GeoPoint;
///
/// let lyon = GeoPoint::new(45.764, 4.8357);
/// assert_eq!(lyon.lat, 45.764);
/// assert_eq!(lyon.lng, 4.8357);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns this point shifted by the given offsets.
    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(self.lat + d_lat, self.lng + d_lng)
    }
}

/// Loyalty indicator attached to a practitioner by the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Loyalty {
    Loyal,
    #[default]
    Neutral,
    AtRisk,
}

/// A health-care practitioner as owned by the surrounding application.
///
/// Fields are read-only for the optimizer; the application's snapshot is
/// deserialized from camelCase JSON.
///
/// # Examples
///
/// ```
/// use territory_routing::models::{Loyalty, Practitioner};
///
/// let p = Practitioner::new("hcp-1", "Dr Martin", "Lyon 3e")
///     .with_kol(true)
///     .with_volume(1200.0)
///     .with_loyalty(Loyalty::AtRisk);
/// assert!(p.is_kol());
/// assert!(p.is_at_risk());
/// assert_eq!(p.vingtile(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    id: String,
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    specialty: String,
    city: String,
    #[serde(default)]
    is_kol: bool,
    #[serde(default = "default_vingtile", deserialize_with = "deserialize_vingtile")]
    vingtile: u8,
    #[serde(default, alias = "volumeL")]
    volume_liters: f64,
    #[serde(default)]
    loyalty: Loyalty,
}

fn default_vingtile() -> u8 {
    20
}

/// Out-of-range ranks from imported data clamp to 1..=20.
fn deserialize_vingtile<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let rank = i64::deserialize(deserializer)?;
    Ok(rank.clamp(1, 20) as u8)
}

impl Practitioner {
    /// Creates a practitioner with neutral priority attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: String::new(),
            specialty: String::new(),
            city: city.into(),
            is_kol: false,
            vingtile: default_vingtile(),
            volume_liters: 0.0,
            loyalty: Loyalty::Neutral,
        }
    }

    /// Sets the honorific title (e.g. "Dr", "Pr").
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the medical specialty.
    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = specialty.into();
        self
    }

    /// Flags the practitioner as a key opinion leader.
    pub fn with_kol(mut self, is_kol: bool) -> Self {
        self.is_kol = is_kol;
        self
    }

    /// Sets the prescriber rank, clamped to 1..=20.
    pub fn with_vingtile(mut self, vingtile: u8) -> Self {
        self.vingtile = vingtile.clamp(1, 20);
        self
    }

    /// Sets the annual volume in liters.
    pub fn with_volume(mut self, liters: f64) -> Self {
        self.volume_liters = liters;
        self
    }

    /// Sets the loyalty indicator.
    pub fn with_loyalty(mut self, loyalty: Loyalty) -> Self {
        self.loyalty = loyalty;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    /// Free-text city as entered in the CRM.
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn is_kol(&self) -> bool {
        self.is_kol
    }

    /// Prescriber rank, 1 (top 5%) to 20.
    pub fn vingtile(&self) -> u8 {
        self.vingtile
    }

    /// Annual volume in liters. Non-finite or negative values count as zero.
    pub fn volume_liters(&self) -> f64 {
        if self.volume_liters.is_finite() && self.volume_liters > 0.0 {
            self.volume_liters
        } else {
            0.0
        }
    }

    pub fn loyalty(&self) -> Loyalty {
        self.loyalty
    }

    pub fn is_at_risk(&self) -> bool {
        self.loyalty == Loyalty::AtRisk
    }

    /// Display name with title, e.g. "Dr Martin".
    pub fn display_name(&self) -> String {
        if self.title.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.title, self.name)
        }
    }
}

/// A practitioner together with its resolved coordinates and selection flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPractitioner {
    pub practitioner: Practitioner,
    pub location: GeoPoint,
    pub selected: bool,
}

impl SelectedPractitioner {
    /// Wraps a practitioner with an already known location, selected.
    pub fn new(practitioner: Practitioner, location: GeoPoint) -> Self {
        Self {
            practitioner,
            location,
            selected: true,
        }
    }

    /// Resolves the practitioner's coordinates and marks it selected.
    pub fn resolve(practitioner: &Practitioner) -> Self {
        Self::new(practitioner.clone(), geocode::resolve_coordinates(practitioner))
    }

    pub fn id(&self) -> &str {
        self.practitioner.id()
    }
}

/// Resolves every practitioner of `all`, flagging those whose id is in
/// `selected_ids`.
///
/// The output keeps the order of `all`, which is the order the baseline uses.
pub fn resolve_selection(all: &[Practitioner], selected_ids: &[&str]) -> Vec<SelectedPractitioner> {
    all.iter()
        .map(|p| {
            let mut sp = SelectedPractitioner::resolve(p);
            sp.selected = selected_ids.contains(&p.id());
            sp
        })
        .collect()
}
