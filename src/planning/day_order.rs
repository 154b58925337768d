//! Strategy-driven ordering of day clusters.

use crate::models::{DayCluster, GeoPoint, Objective, OptimizationCriteria};

/// Weights of the balanced score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancedWeights {
    pub kol: f64,
    pub volume: f64,
    pub at_risk: f64,
}

impl BalancedWeights {
    /// Base weights 0.5 KOL / 0.5 volume; `prioritize_kol` doubles the KOL
    /// weight and `prioritize_at_risk` adds an at-risk term.
    pub fn for_criteria(criteria: &OptimizationCriteria) -> Self {
        Self {
            kol: if criteria.prioritize_kol { 1.0 } else { 0.5 },
            volume: 0.5,
            at_risk: if criteria.prioritize_at_risk { 0.5 } else { 0.0 },
        }
    }
}

/// Balanced score of one day: weighted KOL density, volume share relative
/// to the largest day, and at-risk density.
///
/// # Examples
///
/// ```
/// use territory_routing::models::{DayCluster, GeoPoint, Practitioner, SelectedPractitioner};
/// use territory_routing::planning::{balanced_score, BalancedWeights};
///
/// let at = GeoPoint::new(45.76, 4.84);
/// let day = DayCluster::new(vec![
///     SelectedPractitioner::new(Practitioner::new("a", "A", "Lyon").with_kol(true).with_volume(100.0), at),
///     SelectedPractitioner::new(Practitioner::new("b", "B", "Lyon").with_volume(100.0), at),
/// ], 0.0);
/// let w = BalancedWeights { kol: 0.5, volume: 0.5, at_risk: 0.0 };
/// // KOL density 0.5, volume share 1.0
/// assert!((balanced_score(&day, 200.0, w) - 0.75).abs() < 1e-12);
/// ```
pub fn balanced_score(cluster: &DayCluster, max_day_volume: f64, weights: BalancedWeights) -> f64 {
    if cluster.is_empty() {
        return 0.0;
    }
    let n = cluster.len() as f64;
    let kol_density = cluster.kol_count() as f64 / n;
    let at_risk_density = cluster.at_risk_count() as f64 / n;
    let volume_share = if max_day_volume > 0.0 {
        cluster.total_volume() / max_day_volume
    } else {
        0.0
    };
    weights.kol * kol_density + weights.volume * volume_share + weights.at_risk * at_risk_density
}

/// Reorders day clusters according to `criteria.optimize_for`.
///
/// - `KolFirst`: most KOLs first, then most volume;
/// - `Volume`: most volume first;
/// - `Distance` / `Time`: smallest mean distance from `start` first;
/// - `Balanced`: highest [`balanced_score`] first.
///
/// The sort is stable, so ties keep their clustering order.
pub fn order_days(
    clusters: Vec<DayCluster>,
    start: GeoPoint,
    criteria: &OptimizationCriteria,
) -> Vec<DayCluster> {
    let mut days = clusters;
    match criteria.optimize_for {
        Objective::KolFirst => days.sort_by(|a, b| {
            b.kol_count()
                .cmp(&a.kol_count())
                .then_with(|| b.total_volume().total_cmp(&a.total_volume()))
        }),
        Objective::Volume => days.sort_by(|a, b| b.total_volume().total_cmp(&a.total_volume())),
        Objective::Distance | Objective::Time => {
            days = sort_by_score(days, |c| -c.mean_distance_from(start));
        }
        Objective::Balanced => {
            let weights = BalancedWeights::for_criteria(criteria);
            let max_volume = days.iter().map(DayCluster::total_volume).fold(0.0, f64::max);
            days = sort_by_score(days, |c| balanced_score(c, max_volume, weights));
        }
    }
    days
}

/// Stable sort, highest score first.
fn sort_by_score(days: Vec<DayCluster>, score: impl Fn(&DayCluster) -> f64) -> Vec<DayCluster> {
    let mut scored: Vec<(f64, DayCluster)> = days.into_iter().map(|c| (score(&c), c)).collect();
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    scored.into_iter().map(|(_, c)| c).collect()
}
