//! Fuel cost engine
//!
//! Pure, synchronous arithmetic over prices, volumes and distances. Every
//! comparison normalizes prices by the fuel's efficiency ratio so fuels sold
//! in different units (L vs m³) with different energy content can be ranked on
//! one basis: the cost of one gasoline-equivalent unit of work.
//!
//! Validation happens at the top of each public operation; a call either
//! fails before computing anything or returns a complete result.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    ComparisonResult, EfficiencyTable, FuelKind, FuelPriceAnalysis, TripLine, TripResult,
    VolumeLine, VolumeResult,
};
use crate::tips::{static_tips, Tip};

/// Cost of one gasoline-equivalent unit: `price / efficiency_ratio`
pub fn normalize_cost(price: f64, efficiency_ratio: f64) -> f64 {
    price / efficiency_ratio
}

/// Fuel with the strictly smallest cost.
///
/// Gasoline is the default. Iteration follows `FuelKind`'s declaration order
/// and only a strictly lower cost displaces the current pick, so ties go to
/// gasoline, then ethanol, then CNG regardless of how the map was built.
pub fn select_best(costs: &BTreeMap<FuelKind, f64>) -> FuelKind {
    let mut best = FuelKind::Gasoline;
    let mut lowest = costs
        .get(&FuelKind::Gasoline)
        .copied()
        .unwrap_or(f64::INFINITY);

    for (&fuel, &cost) in costs {
        if cost < lowest {
            best = fuel;
            lowest = cost;
        }
    }

    best
}

/// `(base - alt) / base * 100`; positive when the alternative is cheaper.
///
/// `None` when the alternative was not supplied. Negative values are kept.
pub fn savings_percent(base_cost: f64, alt_cost: Option<f64>) -> Option<f64> {
    alt_cost.map(|alt| percent_below(base_cost, alt))
}

/// `alt_price / base_price * 100`
pub fn price_ratio_percent(alt_price: f64, base_price: f64) -> f64 {
    alt_price / base_price * 100.0
}

fn percent_below(base: f64, alt: f64) -> f64 {
    (base - alt) / base * 100.0
}

/// Reject zero, negative and non-finite values
fn require_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Like [`require_positive`], but an exact zero is a structurally impossible
/// query (the value is used as a divisor) rather than a bad price
fn require_divisor(field: &str, value: f64) -> Result<()> {
    if value == 0.0 {
        return Err(Error::DivisionUndefined(format!(
            "{} is used as a divisor and cannot be zero",
            field
        )));
    }
    require_positive(field, value)
}

/// Validate the price set shared by every comparison
pub fn validate_prices(gasoline_price: f64, ethanol_price: f64, cng_price: Option<f64>) -> Result<()> {
    require_divisor("preco_gasolina", gasoline_price)?;
    require_positive("preco_etanol", ethanol_price)?;
    if let Some(price) = cng_price {
        require_positive("preco_gnv", price)?;
    }
    Ok(())
}

/// Validate a reference volume
pub fn validate_volume(reference_liters: f64) -> Result<()> {
    require_positive("litros", reference_liters)
}

/// Validate trip distance and consumption
pub fn validate_trip(distance_km: f64, consumption_km_per_l: f64) -> Result<()> {
    require_divisor("distancia", distance_km)?;
    require_divisor("consumo_gasolina", consumption_km_per_l)
}

/// Stateless engine bound to an immutable efficiency table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FuelCostEngine {
    efficiency: EfficiencyTable,
}

impl FuelCostEngine {
    pub fn new(efficiency: EfficiencyTable) -> Self {
        Self { efficiency }
    }

    pub fn efficiency(&self) -> &EfficiencyTable {
        &self.efficiency
    }

    /// Compare unit prices, normalized by efficiency
    pub fn compute_single_price_comparison(
        &self,
        gasoline_price: f64,
        ethanol_price: f64,
        cng_price: Option<f64>,
    ) -> Result<ComparisonResult> {
        validate_prices(gasoline_price, ethanol_price, cng_price)?;

        let table = &self.efficiency;
        let gasoline_cost = normalize_cost(gasoline_price, table.gasoline());
        let ethanol_cost = normalize_cost(ethanol_price, table.ethanol());
        let cng_cost = cng_price.map(|price| normalize_cost(price, table.cng()));

        let mut costs = BTreeMap::from([
            (FuelKind::Gasoline, gasoline_cost),
            (FuelKind::Ethanol, ethanol_cost),
        ]);
        if let Some(cost) = cng_cost {
            costs.insert(FuelKind::Cng, cost);
        }
        let best = select_best(&costs);

        let ethanol_ratio = price_ratio_percent(ethanol_price, gasoline_price);
        let compensa = ethanol_ratio < table.breakeven_percent(FuelKind::Ethanol);

        let gasoline = FuelPriceAnalysis {
            fuel: FuelKind::Gasoline,
            price: gasoline_price,
            normalized_cost: gasoline_cost,
            efficiency_ratio: table.gasoline(),
            savings_percent: None,
            price_ratio_percent: None,
            worthwhile: None,
            recommended: best == FuelKind::Gasoline,
        };

        let ethanol = FuelPriceAnalysis {
            fuel: FuelKind::Ethanol,
            price: ethanol_price,
            normalized_cost: ethanol_cost,
            efficiency_ratio: table.ethanol(),
            savings_percent: savings_percent(gasoline_cost, Some(ethanol_cost)),
            price_ratio_percent: Some(ethanol_ratio),
            worthwhile: Some(compensa),
            recommended: best == FuelKind::Ethanol,
        };

        let cng = cng_price.zip(cng_cost).map(|(price, cost)| {
            let ratio = price_ratio_percent(price, gasoline_price);
            FuelPriceAnalysis {
                fuel: FuelKind::Cng,
                price,
                normalized_cost: cost,
                efficiency_ratio: table.cng(),
                savings_percent: savings_percent(gasoline_cost, Some(cost)),
                price_ratio_percent: Some(ratio),
                worthwhile: Some(ratio < table.breakeven_percent(FuelKind::Cng)),
                recommended: best == FuelKind::Cng,
            }
        });

        debug!(
            gasoline_price,
            ethanol_price,
            ?cng_price,
            best = %best,
            ethanol_ratio,
            compensa,
            "Compared fuel prices"
        );

        Ok(ComparisonResult {
            gasoline,
            ethanol,
            cng,
            best,
            ethanol_price_ratio_percent: ethanol_ratio,
            compensa,
        })
    }

    /// Compare the cost of doing the work of `reference_liters` of gasoline
    pub fn compute_volume_comparison(
        &self,
        gasoline_price: f64,
        ethanol_price: f64,
        reference_liters: f64,
        cng_price: Option<f64>,
    ) -> Result<VolumeResult> {
        validate_prices(gasoline_price, ethanol_price, cng_price)?;
        validate_volume(reference_liters)?;

        let table = &self.efficiency;
        let gasoline_cost = gasoline_price * reference_liters;
        let work = reference_liters * table.gasoline();

        let line = |fuel: FuelKind, price: f64| {
            let quantity = work / table.ratio(fuel);
            let cost = price * quantity;
            VolumeLine {
                fuel,
                price,
                quantity,
                cost,
                savings: gasoline_cost - cost,
            }
        };

        let gasoline = VolumeLine {
            fuel: FuelKind::Gasoline,
            price: gasoline_price,
            quantity: reference_liters,
            cost: gasoline_cost,
            savings: 0.0,
        };
        let ethanol = line(FuelKind::Ethanol, ethanol_price);
        let cng = cng_price.map(|price| line(FuelKind::Cng, price));

        // Only a strictly positive saving beats gasoline
        let mut best = FuelKind::Gasoline;
        let mut best_savings = 0.0;
        for alt in [Some(&ethanol), cng.as_ref()].into_iter().flatten() {
            if alt.savings > best_savings {
                best = alt.fuel;
                best_savings = alt.savings;
            }
        }

        let percent = if best_savings > 0.0 {
            best_savings / gasoline_cost * 100.0
        } else {
            0.0
        };

        debug!(
            reference_liters,
            best = %best,
            best_savings,
            "Compared fuel volumes"
        );

        Ok(VolumeResult {
            reference_liters,
            gasoline,
            ethanol,
            cng,
            best,
            total_savings: best_savings,
            savings_percent: percent,
        })
    }

    /// Compare the cost of a trip of `distance_km` for a car doing
    /// `consumption_km_per_l` on gasoline
    pub fn compute_trip_comparison(
        &self,
        distance_km: f64,
        consumption_km_per_l: f64,
        gasoline_price: f64,
        ethanol_price: f64,
        cng_price: Option<f64>,
    ) -> Result<TripResult> {
        validate_trip(distance_km, consumption_km_per_l)?;
        validate_prices(gasoline_price, ethanol_price, cng_price)?;

        let table = &self.efficiency;
        let gasoline_cost =
            distance_km / (consumption_km_per_l * table.gasoline()) * gasoline_price;

        let line = |fuel: FuelKind, price: f64| {
            let consumption = consumption_km_per_l * table.ratio(fuel);
            let quantity = distance_km / consumption;
            let cost = quantity * price;
            TripLine {
                fuel,
                price,
                consumption,
                quantity,
                cost,
                cost_per_km: cost / distance_km,
                savings: gasoline_cost - cost,
                savings_percent: percent_below(gasoline_cost, cost),
            }
        };

        let gasoline = line(FuelKind::Gasoline, gasoline_price);
        let ethanol = line(FuelKind::Ethanol, ethanol_price);
        let cng = cng_price.map(|price| line(FuelKind::Cng, price));

        // Stable sort: equal costs keep priority order
        let mut options: Vec<(FuelKind, f64)> = [Some(&gasoline), Some(&ethanol), cng.as_ref()]
            .into_iter()
            .flatten()
            .map(|l| (l.fuel, l.cost))
            .collect();
        options.sort_by(|a, b| a.1.total_cmp(&b.1));

        let (recommended, best_cost) = options[0];
        let ranking = options.iter().map(|(fuel, _)| *fuel).collect();

        debug!(
            distance_km,
            consumption_km_per_l,
            recommended = %recommended,
            best_cost,
            "Compared trip costs"
        );

        Ok(TripResult {
            distance_km,
            gasoline_consumption: consumption_km_per_l,
            gasoline,
            ethanol,
            cng,
            ranking,
            recommended,
            best_cost,
        })
    }

    /// Fixed fuel-saving tips
    pub fn static_tips(&self) -> &'static [Tip] {
        static_tips()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> FuelCostEngine {
        FuelCostEngine::default()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 0.005,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_normalize_cost() {
        assert_eq!(normalize_cost(5.79, 1.0), 5.79);
        assert_eq!(normalize_cost(3.5, 0.7), 3.5 / 0.7);
        assert_close(normalize_cost(4.2, 0.6), 7.0);
    }

    #[test]
    fn test_select_best_picks_lowest() {
        let costs = BTreeMap::from([
            (FuelKind::Gasoline, 5.0),
            (FuelKind::Ethanol, 4.9),
            (FuelKind::Cng, 6.0),
        ]);
        assert_eq!(select_best(&costs), FuelKind::Ethanol);
    }

    #[test]
    fn test_select_best_ties_favor_priority() {
        let costs = BTreeMap::from([(FuelKind::Gasoline, 5.0), (FuelKind::Ethanol, 5.0)]);
        assert_eq!(select_best(&costs), FuelKind::Gasoline);

        let costs = BTreeMap::from([
            (FuelKind::Gasoline, 6.0),
            (FuelKind::Ethanol, 5.0),
            (FuelKind::Cng, 5.0),
        ]);
        assert_eq!(select_best(&costs), FuelKind::Ethanol);
    }

    #[test]
    fn test_select_best_ignores_insertion_order() {
        let pairs = [
            (FuelKind::Cng, 4.0),
            (FuelKind::Ethanol, 4.0),
            (FuelKind::Gasoline, 4.5),
        ];
        let forward: BTreeMap<_, _> = pairs.iter().copied().collect();
        let backward: BTreeMap<_, _> = pairs.iter().rev().copied().collect();
        assert_eq!(select_best(&forward), FuelKind::Ethanol);
        assert_eq!(select_best(&forward), select_best(&backward));
    }

    #[test]
    fn test_savings_percent_sign_and_absence() {
        assert_eq!(savings_percent(5.0, None), None);
        assert_close(savings_percent(5.0, Some(4.0)).unwrap(), 20.0);
        assert!(savings_percent(5.0, Some(6.0)).unwrap() < 0.0);
    }

    #[test]
    fn test_price_ratio_percent() {
        assert_eq!(price_ratio_percent(3.5, 5.0), 70.0);
        assert_close(price_ratio_percent(3.0, 5.0), 60.0);
    }

    #[test]
    fn test_compensa_boundary_is_strict() {
        let result = engine()
            .compute_single_price_comparison(5.0, 3.5, None)
            .unwrap();
        assert_eq!(result.ethanol_price_ratio_percent, 70.0);
        assert!(!result.compensa);
        // Equal normalized cost: gasoline keeps the recommendation
        assert_eq!(result.best, FuelKind::Gasoline);
    }

    #[test]
    fn test_ethanol_recommended_below_breakeven() {
        let result = engine()
            .compute_single_price_comparison(5.0, 3.0, None)
            .unwrap();
        assert!(result.compensa);
        assert_eq!(result.best, FuelKind::Ethanol);
        assert!(result.ethanol.recommended);
        assert!(!result.gasoline.recommended);
        assert_close(result.ethanol_savings_percent(), 14.29);
        assert!(result.cng.is_none());
        assert_eq!(result.cng_savings_percent(), None);
    }

    #[test]
    fn test_cng_recommended_when_cheapest() {
        let result = engine()
            .compute_single_price_comparison(6.0, 4.5, Some(3.0))
            .unwrap();
        assert_eq!(result.best, FuelKind::Cng);
        let cng = result.cng.unwrap();
        assert!(cng.recommended);
        assert_close(cng.normalized_cost, 5.0);
        assert_close(result.cng_savings_percent().unwrap(), 16.67);
        assert_eq!(cng.worthwhile, Some(true));
        assert_eq!(result.best_savings_percent(), result.cng_savings_percent().unwrap());
    }

    #[test]
    fn test_negative_savings_are_surfaced() {
        let result = engine()
            .compute_single_price_comparison(5.0, 4.5, None)
            .unwrap();
        assert!(result.ethanol_savings_percent() < 0.0);
        assert_eq!(result.best_savings_percent(), 0.0);
    }

    #[test]
    fn test_price_validation() {
        let engine = engine();
        assert!(matches!(
            engine.compute_single_price_comparison(0.0, 3.5, None),
            Err(Error::DivisionUndefined(_))
        ));
        assert!(matches!(
            engine.compute_single_price_comparison(-5.0, 3.5, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            engine.compute_single_price_comparison(5.0, 0.0, None),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            engine.compute_single_price_comparison(5.0, 3.5, Some(0.0)),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            engine.compute_single_price_comparison(5.0, f64::NAN, None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_volume_comparison_ethanol_wins() {
        let result = engine()
            .compute_volume_comparison(5.0, 3.0, 40.0, None)
            .unwrap();
        assert_eq!(result.gasoline.cost, 200.0);
        assert_close(result.ethanol.quantity, 57.14);
        assert_close(result.ethanol.cost, 171.43);
        assert_eq!(result.best, FuelKind::Ethanol);
        assert_close(result.total_savings, 28.57);
        assert_close(result.savings_percent, 14.29);
        assert!(result.cng.is_none());
        assert!(result.losses().is_empty());
    }

    #[test]
    fn test_volume_comparison_zero_savings_keeps_gasoline() {
        let result = engine()
            .compute_volume_comparison(5.0, 3.5, 10.0, None)
            .unwrap();
        assert_eq!(result.best, FuelKind::Gasoline);
        assert_eq!(result.total_savings, 0.0);
        assert_eq!(result.savings_percent, 0.0);
    }

    #[test]
    fn test_volume_comparison_reports_losses() {
        let result = engine()
            .compute_volume_comparison(5.0, 4.2, 10.0, Some(4.0))
            .unwrap();
        assert_eq!(result.best, FuelKind::Gasoline);
        let losses = result.losses();
        assert_eq!(losses.len(), 2);
        assert_eq!(losses[0].0, FuelKind::Ethanol);
        assert_close(losses[0].1, 10.0);
        assert_eq!(losses[1].0, FuelKind::Cng);
        assert_close(losses[1].1, 16.67);
    }

    #[test]
    fn test_volume_comparison_cng_beats_ethanol() {
        let result = engine()
            .compute_volume_comparison(6.0, 4.0, 30.0, Some(3.0))
            .unwrap();
        let cng = result.cng.unwrap();
        assert_close(cng.quantity, 50.0);
        assert_close(cng.cost, 150.0);
        assert_eq!(result.best, FuelKind::Cng);
        assert_close(result.total_savings, 30.0);
    }

    #[test]
    fn test_volume_validation() {
        assert!(matches!(
            engine().compute_volume_comparison(5.0, 3.0, 0.0, None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_trip_comparison_reference_case() {
        let result = engine()
            .compute_trip_comparison(100.0, 10.0, 5.0, 3.0, None)
            .unwrap();
        assert_eq!(result.gasoline.cost, 50.0);
        assert_close(result.ethanol.consumption, 7.0);
        assert_close(result.ethanol.quantity, 14.29);
        assert_close(result.ethanol.cost, 42.86);
        assert_eq!(result.ranking, vec![FuelKind::Ethanol, FuelKind::Gasoline]);
        assert_eq!(result.recommended, FuelKind::Ethanol);
        assert_close(result.best_cost, 42.86);
        assert_close(result.gasoline.cost_per_km, 0.5);
        assert!(result.cng.is_none());
    }

    #[test]
    fn test_trip_ranking_includes_cng_when_priced() {
        let result = engine()
            .compute_trip_comparison(300.0, 12.0, 6.0, 4.5, Some(3.0))
            .unwrap();
        assert_eq!(result.ranking.len(), 3);
        assert_eq!(result.ranking[0], FuelKind::Cng);
        let costs: Vec<f64> = result
            .ranking
            .iter()
            .map(|fuel| result.line(*fuel).unwrap().cost)
            .collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_trip_ranking_tie_keeps_priority() {
        let result = engine()
            .compute_trip_comparison(100.0, 10.0, 5.0, 3.5, None)
            .unwrap();
        assert_eq!(result.ranking, vec![FuelKind::Gasoline, FuelKind::Ethanol]);
    }

    #[test]
    fn test_trip_validation() {
        let engine = engine();
        assert!(matches!(
            engine.compute_trip_comparison(100.0, 0.0, 5.0, 3.0, None),
            Err(Error::DivisionUndefined(_))
        ));
        assert!(matches!(
            engine.compute_trip_comparison(0.0, 10.0, 5.0, 3.0, None),
            Err(Error::DivisionUndefined(_))
        ));
        assert!(matches!(
            engine.compute_trip_comparison(-10.0, 10.0, 5.0, 3.0, None),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let engine = engine();
        let a = engine
            .compute_trip_comparison(250.0, 11.5, 5.89, 3.99, Some(4.29))
            .unwrap();
        let b = engine
            .compute_trip_comparison(250.0, 11.5, 5.89, 3.99, Some(4.29))
            .unwrap();
        assert_eq!(a, b);
    }
}
