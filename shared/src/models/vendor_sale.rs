//! Vendor Sale Model (vendedoras/ventas)
//!
//! A sale credited to one or more sellers, each with a share of the
//! commission. See [`crate::commission`] for the preview math.

use crate::commission::{self, CommissionBreakdown, SellerShare};
use crate::date::iso_date;
use crate::error::ValidationErrors;
use crate::resource::{
    Editable, FlagField, ListFilter, Resource, StatusBadge, StatusColor, StatusFlags,
};
use crate::types::Module;
use crate::validation::{MAX_NAME_LEN, Validate, validate_percent, validate_required_text};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSale {
    pub id: i64,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub cliente: String,
    /// Gross total, IVA included
    pub monto_total: Decimal,
    pub comision_porcentaje: Decimal,
    pub vendedoras: Vec<SellerShare>,
    /// Commission paid out
    #[serde(default)]
    pub pagada: bool,
    #[serde(default)]
    pub facturada: bool,
}

impl VendorSale {
    pub fn commission(&self) -> CommissionBreakdown {
        commission::breakdown(self.monto_total, self.comision_porcentaje, &self.vendedoras)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSaleCreate {
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub cliente: String,
    pub monto_total: Decimal,
    pub comision_porcentaje: Decimal,
    pub vendedoras: Vec<SellerShare>,
}

impl VendorSaleCreate {
    /// Preview shown while the form is being filled
    pub fn commission(&self) -> CommissionBreakdown {
        commission::breakdown(self.monto_total, self.comision_porcentaje, &self.vendedoras)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSaleUpdate {
    pub id: i64,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub cliente: String,
    pub monto_total: Decimal,
    pub comision_porcentaje: Decimal,
    pub vendedoras: Vec<SellerShare>,
    pub pagada: bool,
    pub facturada: bool,
}

impl From<&VendorSale> for VendorSaleUpdate {
    fn from(s: &VendorSale) -> Self {
        Self {
            id: s.id,
            fecha: s.fecha,
            cliente: s.cliente.clone(),
            monto_total: s.monto_total,
            comision_porcentaje: s.comision_porcentaje,
            vendedoras: s.vendedoras.clone(),
            pagada: s.pagada,
            facturada: s.facturada,
        }
    }
}

fn validate_fields(
    cliente: &str,
    monto_total: Decimal,
    comision_porcentaje: Decimal,
    vendedoras: &[SellerShare],
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(validate_required_text(cliente, "cliente", MAX_NAME_LEN));
    if monto_total <= Decimal::ZERO {
        errors.add("montoTotal", format!("montoTotal must be positive, got {monto_total}"));
    }
    errors.check(validate_percent(comision_porcentaje, "comisionPorcentaje"));

    if vendedoras.is_empty() {
        errors.add("vendedoras", "at least one seller is required");
    }
    for share in vendedoras {
        errors.check(validate_required_text(&share.nombre, "vendedoras", MAX_NAME_LEN));
        errors.check(validate_percent(share.porcentaje, "vendedoras"));
    }
    let total: Decimal = vendedoras.iter().map(|s| s.porcentaje).sum();
    if !vendedoras.is_empty() && total != Decimal::ONE_HUNDRED {
        errors.add("vendedoras", format!("seller shares must add up to 100, got {total}"));
    }
    errors.into_result()
}

impl Validate for VendorSaleCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(&self.cliente, self.monto_total, self.comision_porcentaje, &self.vendedoras)
    }
}

impl Validate for VendorSaleUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(&self.cliente, self.monto_total, self.comision_porcentaje, &self.vendedoras)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorSaleFilter {
    /// Seller name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendedora: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias: Option<u32>,
}

impl ListFilter for VendorSaleFilter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorSaleField {
    Pagada,
    Facturada,
}

impl FlagField for VendorSaleField {
    fn name(&self) -> &'static str {
        match self {
            VendorSaleField::Pagada => "pagada",
            VendorSaleField::Facturada => "facturada",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            VendorSaleField::Pagada => "Comisión pagada",
            VendorSaleField::Facturada => "Facturada",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorSaleStatusPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagada: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facturada: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VendorSaleStatus {
    Pendiente,
    Facturada,
    PagadaSinFactura,
    Cerrada,
}

impl VendorSaleStatus {
    pub fn from_flags(pagada: bool, facturada: bool) -> Self {
        match (pagada, facturada) {
            (false, false) => VendorSaleStatus::Pendiente,
            (false, true) => VendorSaleStatus::Facturada,
            (true, false) => VendorSaleStatus::PagadaSinFactura,
            (true, true) => VendorSaleStatus::Cerrada,
        }
    }
}

impl StatusBadge for VendorSaleStatus {
    fn label(&self) -> &'static str {
        match self {
            VendorSaleStatus::Pendiente => "Pendiente",
            VendorSaleStatus::Facturada => "Facturada",
            VendorSaleStatus::PagadaSinFactura => "Pagada sin factura",
            VendorSaleStatus::Cerrada => "Cerrada",
        }
    }

    fn color(&self) -> StatusColor {
        match self {
            VendorSaleStatus::Pendiente => StatusColor::Gray,
            VendorSaleStatus::Facturada => StatusColor::Blue,
            VendorSaleStatus::PagadaSinFactura => StatusColor::Orange,
            VendorSaleStatus::Cerrada => StatusColor::Green,
        }
    }
}

impl Resource for VendorSale {
    const PATH: &'static str = "vendedoras/ventas";
    const MODULE: Module = Module::Vendedoras;
    type Filter = VendorSaleFilter;
}

impl Editable for VendorSale {
    type Create = VendorSaleCreate;
    type Update = VendorSaleUpdate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl StatusFlags for VendorSale {
    type Field = VendorSaleField;
    type Patch = VendorSaleStatusPatch;
    type Status = VendorSaleStatus;

    const FIELDS: &'static [VendorSaleField] =
        &[VendorSaleField::Pagada, VendorSaleField::Facturada];

    fn flag(&self, field: VendorSaleField) -> bool {
        match field {
            VendorSaleField::Pagada => self.pagada,
            VendorSaleField::Facturada => self.facturada,
        }
    }

    fn set_flag(&mut self, field: VendorSaleField, value: bool) {
        match field {
            VendorSaleField::Pagada => self.pagada = value,
            VendorSaleField::Facturada => self.facturada = value,
        }
    }

    fn patch(field: VendorSaleField, value: bool) -> VendorSaleStatusPatch {
        let mut patch = VendorSaleStatusPatch::default();
        match field {
            VendorSaleField::Pagada => patch.pagada = Some(value),
            VendorSaleField::Facturada => patch.facturada = Some(value),
        }
        patch
    }

    fn status(&self) -> VendorSaleStatus {
        VendorSaleStatus::from_flags(self.pagada, self.facturada)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(nombre: &str, porcentaje: i64) -> SellerShare {
        SellerShare {
            nombre: nombre.into(),
            porcentaje: Decimal::from(porcentaje),
        }
    }

    fn sample() -> VendorSaleCreate {
        VendorSaleCreate {
            fecha: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            cliente: "Mayorista Sur".into(),
            monto_total: Decimal::from(24200),
            comision_porcentaje: Decimal::from(5),
            vendedoras: vec![share("Ana", 60), share("Bea", 40)],
        }
    }

    #[test]
    fn test_commission_preview() {
        let preview = sample().commission();
        assert_eq!(preview.neto, Decimal::from(20000));
        assert_eq!(preview.comision, Decimal::from(1000));
        assert_eq!(preview.partes[0].monto, Decimal::from(600));
        assert_eq!(preview.partes[1].monto, Decimal::from(400));
    }

    #[test]
    fn test_shares_must_add_up() {
        assert!(sample().validate().is_ok());

        let mut bad = sample();
        bad.vendedoras = vec![share("Ana", 60), share("Bea", 30)];
        let errors = bad.validate().unwrap_err();
        assert!(errors.for_field("vendedoras").is_some());

        bad.vendedoras.clear();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_status() {
        assert_eq!(VendorSaleStatus::from_flags(true, true), VendorSaleStatus::Cerrada);
        assert_eq!(VendorSaleStatus::from_flags(true, false).color(), StatusColor::Orange);
    }
}
