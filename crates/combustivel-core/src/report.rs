//! Presentation of engine results
//!
//! Turns the numeric results from [`crate::engine`] into the records returned
//! by the tools: currency rounded to 2 places, cost per km to 3, and
//! quantity/percentage labels with 1 decimal. Absent CNG data stays `None` and
//! serializes as `null`.
//!
//! Each record also implements `Display` for terminal output.

use std::fmt;

use serde::Serialize;

use crate::models::{
    ComparisonResult, EfficiencyTable, FuelKind, FuelPriceAnalysis, TripLine, TripResult,
    VolumeLine, VolumeResult,
};
use crate::tips::{Tip, TIPS_SUMMARY, TIPS_TITLE};

/// Round to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `"14.3%"`
pub fn percent_label(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `"57.1L"` or `"16.7m³"`
pub fn quantity_label(value: f64, fuel: FuelKind) -> String {
    format!("{:.1}{}", value, fuel.unit())
}

/// `"70%"`
pub fn efficiency_label(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// The ethanol breakeven rule for the configured efficiency
pub fn breakeven_rule(table: &EfficiencyTable) -> String {
    format!(
        "Etanol compensa quando seu preço for abaixo de {:.0}% do preço da gasolina",
        table.breakeven_percent(FuelKind::Ethanol)
    )
}

// =============================================================================
// qual_combustivel_abastecer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GasolineAnalysis {
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "custo_real")]
    pub real_cost: f64,
    #[serde(rename = "rendimento")]
    pub efficiency: String,
    #[serde(rename = "recomendado")]
    pub recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeAnalysis {
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "custo_real")]
    pub real_cost: f64,
    #[serde(rename = "rendimento")]
    pub efficiency: String,
    #[serde(rename = "economia_vs_gasolina")]
    pub savings: String,
    #[serde(rename = "relacao_preco")]
    pub price_ratio: String,
    pub compensa: bool,
    #[serde(rename = "recomendado")]
    pub recommended: bool,
}

impl AlternativeAnalysis {
    fn from_line(line: &FuelPriceAnalysis) -> Self {
        Self {
            price: line.price,
            real_cost: round_to(line.normalized_cost, 2),
            efficiency: efficiency_label(line.efficiency_ratio),
            savings: percent_label(line.savings_percent.unwrap_or_default()),
            price_ratio: percent_label(line.price_ratio_percent.unwrap_or_default()),
            compensa: line.worthwhile.unwrap_or(false),
            recommended: line.recommended,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAnalysis {
    #[serde(rename = "gasolina")]
    pub gasoline: GasolineAnalysis,
    #[serde(rename = "etanol")]
    pub ethanol: AlternativeAnalysis,
    #[serde(rename = "gnv")]
    pub cng: Option<AlternativeAnalysis>,
}

/// Full answer for `qual_combustivel_abastecer`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelChoiceReport {
    #[serde(rename = "recomendacao")]
    pub recommendation: FuelKind,
    #[serde(rename = "analise")]
    pub analysis: PriceAnalysis,
    #[serde(rename = "explicacao")]
    pub explanation: String,
    #[serde(rename = "dica")]
    pub tip: String,
}

impl FuelChoiceReport {
    pub fn new(result: &ComparisonResult, table: &EfficiencyTable) -> Self {
        let explanation = match result.best {
            FuelKind::Gasoline => format!(
                "Abasteça com {}! Nenhum combustível alternativo compensa no momento.",
                result.best
            ),
            best => format!(
                "Abasteça com {}! Economia de {} vs gasolina.",
                best,
                percent_label(result.best_savings_percent())
            ),
        };

        Self {
            recommendation: result.best,
            analysis: PriceAnalysis {
                gasoline: GasolineAnalysis {
                    price: result.gasoline.price,
                    real_cost: round_to(result.gasoline.normalized_cost, 2),
                    efficiency: efficiency_label(result.gasoline.efficiency_ratio),
                    recommended: result.gasoline.recommended,
                },
                ethanol: AlternativeAnalysis::from_line(&result.ethanol),
                cng: result.cng.as_ref().map(AlternativeAnalysis::from_line),
            },
            explanation,
            tip: breakeven_rule(table),
        }
    }
}

/// Short answer for `qual_combustivel_abastecer` in `resumido` mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickAnswer {
    #[serde(rename = "recomendacao")]
    pub recommendation: FuelKind,
    #[serde(rename = "economia")]
    pub savings: String,
    /// Gasoline plus every alternative that saves money
    #[serde(rename = "opcoes_viaveis")]
    pub viable: Vec<FuelKind>,
    #[serde(rename = "mensagem")]
    pub message: String,
}

impl QuickAnswer {
    pub fn new(result: &ComparisonResult) -> Self {
        let viable: Vec<FuelKind> = result
            .lines()
            .filter(|line| {
                line.fuel == FuelKind::Gasoline || line.savings_percent.is_some_and(|s| s > 0.0)
            })
            .map(|line| line.fuel)
            .collect();

        let best_savings = result.best_savings_percent();
        let savings = percent_label(best_savings.max(0.0));

        let message = format!(
            "Abasteça com {} | Economia: {} | Opções viáveis: {}",
            result.best,
            savings,
            viable
                .iter()
                .map(|fuel| fuel.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            recommendation: result.best,
            savings,
            viable,
            message,
        }
    }
}

/// Either shape of the `qual_combustivel_abastecer` answer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FuelChoice {
    Full(FuelChoiceReport),
    Quick(QuickAnswer),
}

// =============================================================================
// calcular_economia
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeCost {
    #[serde(rename = "quantidade")]
    pub quantity: String,
    #[serde(rename = "custo")]
    pub cost: f64,
    #[serde(rename = "economia", skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
}

impl VolumeCost {
    fn alternative(line: &VolumeLine) -> Self {
        Self {
            quantity: quantity_label(line.quantity, line.fuel),
            cost: round_to(line.cost, 2),
            savings: Some(round_to(line.savings, 2)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeCosts {
    #[serde(rename = "gasolina")]
    pub gasoline: VolumeCost,
    #[serde(rename = "etanol")]
    pub ethanol: VolumeCost,
    #[serde(rename = "gnv")]
    pub cng: Option<VolumeCost>,
}

/// Extra cost of an alternative that does not pay off
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loss {
    #[serde(rename = "combustivel")]
    pub fuel: FuelKind,
    #[serde(rename = "valor")]
    pub amount: f64,
}

/// Answer for `calcular_economia`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsReport {
    #[serde(rename = "referencia")]
    pub reference: String,
    #[serde(rename = "custos")]
    pub costs: VolumeCosts,
    #[serde(rename = "melhor_opcao")]
    pub best: FuelKind,
    #[serde(rename = "economia_total")]
    pub total_savings: f64,
    #[serde(rename = "percentual_economia")]
    pub savings_percent: String,
    /// Filled only when gasoline wins
    #[serde(rename = "prejuizos")]
    pub losses: Vec<Loss>,
}

impl SavingsReport {
    pub fn new(result: &VolumeResult) -> Self {
        let savings_percent = if result.total_savings > 0.0 {
            percent_label(result.savings_percent)
        } else {
            "0%".to_string()
        };

        let losses = if result.best == FuelKind::Gasoline {
            result
                .losses()
                .into_iter()
                .map(|(fuel, amount)| Loss {
                    fuel,
                    amount: round_to(amount, 2),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            reference: format!("{:.1}L de gasolina", result.reference_liters),
            costs: VolumeCosts {
                gasoline: VolumeCost {
                    quantity: quantity_label(result.gasoline.quantity, FuelKind::Gasoline),
                    cost: round_to(result.gasoline.cost, 2),
                    savings: None,
                },
                ethanol: VolumeCost::alternative(&result.ethanol),
                cng: result.cng.as_ref().map(VolumeCost::alternative),
            },
            best: result.best,
            total_savings: round_to(result.total_savings, 2),
            savings_percent,
            losses,
        }
    }
}

// =============================================================================
// comparar_viagem
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripCost {
    #[serde(rename = "quantidade")]
    pub quantity: String,
    #[serde(rename = "custo_total")]
    pub total_cost: f64,
    #[serde(rename = "custo_por_km")]
    pub cost_per_km: f64,
    #[serde(rename = "economia", skip_serializing_if = "Option::is_none")]
    pub savings: Option<f64>,
    #[serde(rename = "economia_percentual", skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<String>,
}

impl TripCost {
    fn new(line: &TripLine) -> Self {
        let alternative = line.fuel != FuelKind::Gasoline;
        Self {
            quantity: quantity_label(line.quantity, line.fuel),
            total_cost: round_to(line.cost, 2),
            cost_per_km: round_to(line.cost_per_km, 3),
            savings: alternative.then(|| round_to(line.savings, 2)),
            savings_percent: alternative.then(|| percent_label(line.savings_percent)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripCosts {
    #[serde(rename = "gasolina")]
    pub gasoline: TripCost,
    #[serde(rename = "etanol")]
    pub ethanol: TripCost,
    #[serde(rename = "gnv")]
    pub cng: Option<TripCost>,
}

/// Answer for `comparar_viagem`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    #[serde(rename = "viagem")]
    pub trip: String,
    #[serde(rename = "consumo_veiculo")]
    pub vehicle_consumption: String,
    #[serde(rename = "comparativo")]
    pub costs: TripCosts,
    pub ranking: Vec<FuelKind>,
    #[serde(rename = "recomendacao")]
    pub recommendation: FuelKind,
    #[serde(rename = "melhor_custo")]
    pub best_cost: f64,
}

impl TripReport {
    pub fn new(result: &TripResult) -> Self {
        Self {
            trip: format!("{:.1} km", result.distance_km),
            vehicle_consumption: format!("{:.1} km/L (gasolina)", result.gasoline_consumption),
            costs: TripCosts {
                gasoline: TripCost::new(&result.gasoline),
                ethanol: TripCost::new(&result.ethanol),
                cng: result.cng.as_ref().map(TripCost::new),
            },
            ranking: result.ranking.clone(),
            recommendation: result.recommended,
            best_cost: round_to(result.best_cost, 2),
        }
    }
}

// =============================================================================
// dicas_economia_combustivel
// =============================================================================

/// Answer for `dicas_economia_combustivel`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TipsReport {
    #[serde(rename = "titulo")]
    pub title: &'static str,
    #[serde(rename = "dicas")]
    pub tips: &'static [Tip],
    #[serde(rename = "resumo")]
    pub summary: &'static str,
    #[serde(rename = "regra_de_ouro")]
    pub golden_rule: String,
}

impl TipsReport {
    pub fn new(tips: &'static [Tip], table: &EfficiencyTable) -> Self {
        Self {
            title: TIPS_TITLE,
            tips,
            summary: TIPS_SUMMARY,
            golden_rule: breakeven_rule(table),
        }
    }
}

// =============================================================================
// Text rendering
// =============================================================================

fn fuel_icon(fuel: FuelKind) -> &'static str {
    match fuel {
        FuelKind::Gasoline => "🚗",
        FuelKind::Ethanol => "⛽",
        FuelKind::Cng => "🔵",
    }
}

impl fmt::Display for FuelChoiceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", fuel_icon(self.recommendation), self.explanation)?;
        writeln!(f)?;
        writeln!(f, "💰 Custo real (considerando rendimento):")?;
        let gasoline = &self.analysis.gasoline;
        writeln!(
            f,
            "   Gasolina: R$ {:.2} → R$ {:.2}/L ({})",
            gasoline.price, gasoline.real_cost, gasoline.efficiency
        )?;
        for (fuel, alt) in [
            (FuelKind::Ethanol, Some(&self.analysis.ethanol)),
            (FuelKind::Cng, self.analysis.cng.as_ref()),
        ] {
            if let Some(alt) = alt {
                writeln!(
                    f,
                    "   {}: R$ {:.2} → R$ {:.2}/L equiv. ({}) | economia {} | relação {}{}",
                    fuel.display_name(),
                    alt.price,
                    alt.real_cost,
                    alt.efficiency,
                    alt.savings,
                    alt.price_ratio,
                    if alt.compensa { " ✅" } else { "" }
                )?;
            }
        }
        writeln!(f)?;
        write!(f, "💡 {}", self.tip)
    }
}

impl fmt::Display for QuickAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "✅ {}", self.message)
    }
}

impl fmt::Display for FuelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(report) => fmt::Display::fmt(report, f),
            Self::Quick(answer) => fmt::Display::fmt(answer, f),
        }
    }
}

impl fmt::Display for SavingsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "💰 Análise de economia para {}", self.reference)?;
        writeln!(f)?;
        writeln!(f, "📊 Custos para a mesma distância:")?;
        for (fuel, cost) in [
            (FuelKind::Gasoline, Some(&self.costs.gasoline)),
            (FuelKind::Ethanol, Some(&self.costs.ethanol)),
            (FuelKind::Cng, self.costs.cng.as_ref()),
        ] {
            if let Some(cost) = cost {
                writeln!(
                    f,
                    "   • {}: {} = R$ {:.2}",
                    fuel.display_name(),
                    cost.quantity,
                    cost.cost
                )?;
            }
        }
        writeln!(f)?;

        if self.best == FuelKind::Gasoline {
            write!(f, "⚠️  Nenhuma economia com combustíveis alternativos")?;
            for loss in &self.losses {
                write!(
                    f,
                    "\n💸 Prejuízo com {}: R$ {:.2}",
                    loss.fuel.display_name(),
                    loss.amount
                )?;
            }
            write!(f, "\n✅ Mantenha gasolina!")
        } else {
            writeln!(f, "✅ Melhor opção: {}", self.best)?;
            writeln!(f, "💵 Economia: R$ {:.2}", self.total_savings)?;
            write!(f, "📈 Percentual: {} mais barato", self.savings_percent)
        }
    }
}

impl fmt::Display for TripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🗺️  Comparação de custo de viagem - {}", self.trip)?;
        writeln!(f, "⛽ Consumo do veículo: {}", self.vehicle_consumption)?;
        for (fuel, cost) in [
            (FuelKind::Gasoline, Some(&self.costs.gasoline)),
            (FuelKind::Ethanol, Some(&self.costs.ethanol)),
            (FuelKind::Cng, self.costs.cng.as_ref()),
        ] {
            let Some(cost) = cost else { continue };
            writeln!(f)?;
            writeln!(f, "💰 {}:", fuel)?;
            writeln!(f, "   • {} = R$ {:.2}", cost.quantity, cost.total_cost)?;
            if let (Some(savings), Some(percent)) = (cost.savings, &cost.savings_percent) {
                writeln!(f, "   • Economia: R$ {:.2} ({})", savings, percent)?;
            }
            writeln!(f, "   • Custo/km: R$ {:.3}", cost.cost_per_km)?;
        }
        writeln!(f)?;
        let ranking: Vec<&str> = self.ranking.iter().map(FuelKind::as_str).collect();
        writeln!(f, "📊 Ranking: {}", ranking.join(" < "))?;
        write!(
            f,
            "✅ Recomendação: {} (R$ {:.2})",
            self.recommendation, self.best_cost
        )
    }
}

impl fmt::Display for TipsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🚗 {}:", self.title)?;
        for tip in self.tips {
            writeln!(f)?;
            writeln!(f, "{}. {} ({})", tip.rank, tip.title, tip.potential_saving)?;
            writeln!(f, "   {}", tip.description)?;
        }
        writeln!(f)?;
        writeln!(f, "💡 {}", self.summary)?;
        write!(f, "⭐ {}", self.golden_rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FuelCostEngine;

    fn engine() -> FuelCostEngine {
        FuelCostEngine::default()
    }

    #[test]
    fn test_labels() {
        assert_eq!(percent_label(70.0), "70.0%");
        assert_eq!(percent_label(14.2857), "14.3%");
        assert_eq!(quantity_label(14.2857, FuelKind::Ethanol), "14.3L");
        assert_eq!(quantity_label(16.666, FuelKind::Cng), "16.7m³");
        assert_eq!(efficiency_label(0.7), "70%");
        assert_eq!(efficiency_label(1.0), "100%");
        assert_eq!(round_to(42.857142, 2), 42.86);
        assert_eq!(round_to(0.428571, 3), 0.429);
    }

    #[test]
    fn test_fuel_choice_report_ethanol() {
        let engine = engine();
        let result = engine
            .compute_single_price_comparison(5.0, 3.0, None)
            .unwrap();
        let report = FuelChoiceReport::new(&result, engine.efficiency());

        assert_eq!(report.recommendation, FuelKind::Ethanol);
        assert_eq!(report.analysis.ethanol.real_cost, 4.29);
        assert_eq!(report.analysis.ethanol.savings, "14.3%");
        assert_eq!(report.analysis.ethanol.price_ratio, "60.0%");
        assert!(report.analysis.ethanol.compensa);
        assert_eq!(report.analysis.gasoline.efficiency, "100%");
        assert_eq!(
            report.explanation,
            "Abasteça com ETANOL! Economia de 14.3% vs gasolina."
        );
        assert!(report.tip.contains("70%"));
    }

    #[test]
    fn test_fuel_choice_report_serializes_null_cng() {
        let engine = engine();
        let result = engine
            .compute_single_price_comparison(5.0, 3.5, None)
            .unwrap();
        let report = FuelChoiceReport::new(&result, engine.efficiency());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["recomendacao"], "GASOLINA");
        assert!(json["analise"]["gnv"].is_null());
        assert_eq!(json["analise"]["etanol"]["relacao_preco"], "70.0%");
        assert_eq!(json["analise"]["etanol"]["compensa"], false);
        assert!(json["explicacao"]
            .as_str()
            .unwrap()
            .contains("Nenhum combustível alternativo"));
    }

    #[test]
    fn test_quick_answer_lists_viable_fuels() {
        let result = engine()
            .compute_single_price_comparison(6.0, 4.0, Some(3.0))
            .unwrap();
        let answer = QuickAnswer::new(&result);

        assert_eq!(answer.recommendation, FuelKind::Cng);
        assert_eq!(
            answer.viable,
            vec![FuelKind::Gasoline, FuelKind::Ethanol, FuelKind::Cng]
        );
        assert_eq!(answer.savings, "16.7%");
        assert!(answer.message.contains("Gasolina, Etanol, GNV"));
    }

    #[test]
    fn test_quick_answer_gasoline_only() {
        let result = engine()
            .compute_single_price_comparison(5.0, 4.5, None)
            .unwrap();
        let answer = QuickAnswer::new(&result);

        assert_eq!(answer.recommendation, FuelKind::Gasoline);
        assert_eq!(answer.viable, vec![FuelKind::Gasoline]);
        assert_eq!(answer.savings, "0.0%");
    }

    #[test]
    fn test_savings_report_with_savings() {
        let result = engine()
            .compute_volume_comparison(5.0, 3.0, 40.0, None)
            .unwrap();
        let report = SavingsReport::new(&result);

        assert_eq!(report.reference, "40.0L de gasolina");
        assert_eq!(report.costs.gasoline.quantity, "40.0L");
        assert_eq!(report.costs.gasoline.cost, 200.0);
        assert_eq!(report.costs.gasoline.savings, None);
        assert_eq!(report.costs.ethanol.quantity, "57.1L");
        assert_eq!(report.costs.ethanol.cost, 171.43);
        assert_eq!(report.costs.ethanol.savings, Some(28.57));
        assert_eq!(report.best, FuelKind::Ethanol);
        assert_eq!(report.total_savings, 28.57);
        assert_eq!(report.savings_percent, "14.3%");
        assert!(report.losses.is_empty());
    }

    #[test]
    fn test_savings_report_without_savings() {
        let result = engine()
            .compute_volume_comparison(5.0, 4.2, 10.0, Some(4.0))
            .unwrap();
        let report = SavingsReport::new(&result);

        assert_eq!(report.best, FuelKind::Gasoline);
        assert_eq!(report.savings_percent, "0%");
        assert_eq!(report.total_savings, 0.0);
        assert_eq!(report.losses.len(), 2);
        assert_eq!(report.costs.cng.as_ref().unwrap().quantity, "16.7m³");

        let text = report.to_string();
        assert!(text.contains("Mantenha gasolina"));
        assert!(text.contains("Prejuízo com Etanol: R$ 10.00"));
    }

    #[test]
    fn test_trip_report() {
        let result = engine()
            .compute_trip_comparison(100.0, 10.0, 5.0, 3.0, None)
            .unwrap();
        let report = TripReport::new(&result);

        assert_eq!(report.trip, "100.0 km");
        assert_eq!(report.vehicle_consumption, "10.0 km/L (gasolina)");
        assert_eq!(report.costs.gasoline.total_cost, 50.0);
        assert_eq!(report.costs.gasoline.cost_per_km, 0.5);
        assert_eq!(report.costs.ethanol.quantity, "14.3L");
        assert_eq!(report.costs.ethanol.total_cost, 42.86);
        assert_eq!(report.costs.ethanol.cost_per_km, 0.429);
        assert_eq!(report.costs.ethanol.savings, Some(7.14));
        assert_eq!(report.ranking, vec![FuelKind::Ethanol, FuelKind::Gasoline]);
        assert_eq!(report.recommendation, FuelKind::Ethanol);
        assert_eq!(report.best_cost, 42.86);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["comparativo"]["gnv"].is_null());
        assert!(json["comparativo"]["gasolina"].get("economia").is_none());
        assert_eq!(json["ranking"], serde_json::json!(["ETANOL", "GASOLINA"]));
    }

    #[test]
    fn test_tips_report() {
        let engine = engine();
        let report = TipsReport::new(engine.static_tips(), engine.efficiency());
        assert_eq!(report.tips.len(), 7);
        assert!(report.golden_rule.contains("70%"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dicas"][0]["numero"], 1);
        assert_eq!(json["dicas"][6]["numero"], 7);

        let text = report.to_string();
        assert!(text.contains("7. Planeje suas rotas"));
    }
}
