//! Fuel comparison commands

use anyhow::Result;
use combustivel_core::tools::{
    self, FuelChoiceParams, OutputMode, SavingsParams, ToolContext, TripParams,
};

use super::render;

pub fn cmd_abastecer(
    ctx: &ToolContext,
    gasolina: f64,
    etanol: f64,
    gnv: Option<f64>,
    resumido: bool,
    json: bool,
) -> Result<()> {
    let params = FuelChoiceParams {
        gasoline_price: gasolina,
        ethanol_price: etanol,
        cng_price: gnv,
        mode: if resumido {
            OutputMode::Resumido
        } else {
            OutputMode::Completo
        },
    };

    let choice = tools::qual_combustivel_abastecer(ctx, params)?;
    println!("{}", render(&choice, json)?);
    Ok(())
}

pub fn cmd_economia(
    ctx: &ToolContext,
    gasolina: f64,
    etanol: f64,
    litros: f64,
    gnv: Option<f64>,
    json: bool,
) -> Result<()> {
    let report = tools::calcular_economia(
        ctx,
        SavingsParams {
            gasoline_price: gasolina,
            ethanol_price: etanol,
            liters: litros,
            cng_price: gnv,
        },
    )?;
    println!("{}", render(&report, json)?);
    Ok(())
}

pub fn cmd_viagem(
    ctx: &ToolContext,
    distancia: f64,
    consumo: f64,
    gasolina: f64,
    etanol: f64,
    gnv: Option<f64>,
    json: bool,
) -> Result<()> {
    let report = tools::comparar_viagem(
        ctx,
        TripParams {
            distance_km: distancia,
            consumption: consumo,
            gasoline_price: gasolina,
            ethanol_price: etanol,
            cng_price: gnv,
        },
    )?;
    println!("{}", render(&report, json)?);
    Ok(())
}

pub fn cmd_dicas(ctx: &ToolContext, json: bool) -> Result<()> {
    let report = tools::dicas_economia_combustivel(ctx);
    println!("{}", render(&report, json)?);
    Ok(())
}
