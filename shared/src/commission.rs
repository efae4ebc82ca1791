//! Vendor commission preview
//!
//! The authoritative figure is computed by the backend; this is the same
//! formula, used to show the split while a sale is being edited:
//!
//! ```text
//! neto      = montoTotal / (1 + IVA)
//! comision  = neto * comisionPorcentaje / 100
//! parte_i   = comision * porcentaje_i / 100
//! ```
//!
//! Each part is rounded to cents; the rounding remainder goes to the last
//! seller so the parts always add up to the rounded commission.

use crate::money::round_money;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// IVA rate applied to sale totals (21%)
pub const IVA_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Seller participation in one sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerShare {
    pub nombre: String,
    /// Share of the commission, in percent
    pub porcentaje: Decimal,
}

/// Commission assigned to one seller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerCommission {
    pub nombre: String,
    pub monto: Decimal,
}

/// Full breakdown for a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    pub neto: Decimal,
    pub comision: Decimal,
    pub partes: Vec<SellerCommission>,
}

/// Sale total without IVA
pub fn net_of_iva(gross: Decimal) -> Decimal {
    gross / (Decimal::ONE + IVA_RATE)
}

/// Commission pool for a sale, rounded to cents
pub fn commission_pool(gross: Decimal, percent: Decimal) -> Decimal {
    round_money(net_of_iva(gross) * percent / Decimal::ONE_HUNDRED)
}

/// Split `pool` across sellers by their share
pub fn split_commission(pool: Decimal, shares: &[SellerShare]) -> Vec<SellerCommission> {
    let mut parts: Vec<SellerCommission> = shares
        .iter()
        .map(|share| SellerCommission {
            nombre: share.nombre.clone(),
            monto: round_money(pool * share.porcentaje / Decimal::ONE_HUNDRED),
        })
        .collect();

    let assigned: Decimal = parts.iter().map(|p| p.monto).sum();
    let share_total: Decimal = shares.iter().map(|s| s.porcentaje).sum();
    if share_total == Decimal::ONE_HUNDRED
        && let Some(last) = parts.last_mut()
    {
        last.monto += pool - assigned;
    }
    parts
}

/// Net amount, pool and per-seller split in one go
pub fn breakdown(gross: Decimal, percent: Decimal, shares: &[SellerShare]) -> CommissionBreakdown {
    let comision = commission_pool(gross, percent);
    CommissionBreakdown {
        neto: round_money(net_of_iva(gross)),
        comision,
        partes: split_commission(comision, shares),
    }
}
