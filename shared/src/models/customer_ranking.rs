//! Customer Ranking Model (clientes/ranking)
//!
//! Read-only. The backend returns one row per customer; the position is
//! assigned client-side with competition ranking (ties share a position and
//! the next position is skipped: 1, 2, 2, 4).

use crate::resource::{ListFilter, Resource};
use crate::types::Module;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRankingRow {
    /// Position in the ranking, assigned client-side
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub posicion: Option<u32>,
    pub cliente: String,
    #[serde(default)]
    pub celular: Option<String>,
    /// Number of purchases in the period
    pub compras: u32,
    pub total_gastado: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRankingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busqueda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias: Option<u32>,
}

impl ListFilter for CustomerRankingFilter {}

impl Resource for CustomerRankingRow {
    const PATH: &'static str = "clientes/ranking";
    const MODULE: Module = Module::Ranking;
    type Filter = CustomerRankingFilter;

    fn arrange(rows: &mut [Self], first_position: u32) {
        rank_customers(rows, first_position);
    }
}

fn ranking_order(a: &CustomerRankingRow, b: &CustomerRankingRow) -> Ordering {
    b.total_gastado
        .cmp(&a.total_gastado)
        .then_with(|| b.compras.cmp(&a.compras))
        .then_with(|| a.cliente.cmp(&b.cliente))
}

fn tied(a: &CustomerRankingRow, b: &CustomerRankingRow) -> bool {
    a.total_gastado == b.total_gastado && a.compras == b.compras
}

/// Sort by total spent (desc), purchases (desc), name (asc) and assign positions
/// starting at `first_position`
pub fn rank_customers(rows: &mut [CustomerRankingRow], first_position: u32) {
    rows.sort_by(ranking_order);

    let mut previous: Option<(u32, usize)> = None;
    for index in 0..rows.len() {
        let shared_position = previous
            .filter(|&(_, prev)| tied(&rows[prev], &rows[index]))
            .map(|(position, _)| position);
        let posicion = shared_position
            .unwrap_or_else(|| first_position.saturating_add(index as u32));
        rows[index].posicion = Some(posicion);
        previous = Some((posicion, index));
    }
}
