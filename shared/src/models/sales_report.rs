//! Sales Report Model (reportes/ventas)

use crate::date::iso_date;
use crate::money::round_money;
use crate::resource::{ListFilter, Resource};
use crate::types::Module;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily sales figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportRow {
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub pedidos: u32,
    pub unidades: u32,
    pub facturacion: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesReportFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias: Option<u32>,
}

impl ListFilter for SalesReportFilter {}

impl Resource for SalesReportRow {
    const PATH: &'static str = "reportes/ventas";
    const MODULE: Module = Module::Reportes;
    type Filter = SalesReportFilter;
}

/// Totals over a set of report rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub pedidos: u64,
    pub unidades: u64,
    pub facturacion: Decimal,
    /// `facturacion / pedidos`, `None` without orders
    pub ticket_promedio: Option<Decimal>,
    /// Day with the highest turnover
    pub mejor_dia: Option<NaiveDate>,
}

pub fn summarize(rows: &[SalesReportRow]) -> SalesSummary {
    let pedidos: u64 = rows.iter().map(|r| r.pedidos as u64).sum();
    let unidades: u64 = rows.iter().map(|r| r.unidades as u64).sum();
    let facturacion: Decimal = rows.iter().map(|r| r.facturacion).sum();
    let ticket_promedio = (pedidos > 0).then(|| round_money(facturacion / Decimal::from(pedidos)));
    let mejor_dia = rows
        .iter()
        .max_by(|a, b| a.facturacion.cmp(&b.facturacion).then_with(|| b.fecha.cmp(&a.fecha)))
        .map(|r| r.fecha);

    SalesSummary {
        pedidos,
        unidades,
        facturacion,
        ticket_promedio,
        mejor_dia,
    }
}
