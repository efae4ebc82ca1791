//! Marketplace Return Model (devoluciones-ml)

use crate::date::iso_date;
use crate::error::ValidationErrors;
use crate::resource::{
    Editable, FlagField, ListFilter, Resource, StatusBadge, StatusColor, StatusFlags,
};
use crate::types::Module;
use crate::validation::{
    self, MAX_MODEL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_ORDER_LEN, Validate,
    validate_required_text,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Return opened through the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceReturn {
    pub id: i64,
    pub numero_venta: String,
    pub comprador: String,
    pub producto: String,
    pub motivo: String,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    #[serde(default)]
    pub llego_al_deposito: bool,
    #[serde(default)]
    pub revisado: bool,
    /// Marketplace reimbursed the sale
    #[serde(default)]
    pub reintegrado: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceReturnCreate {
    pub numero_venta: String,
    pub comprador: String,
    pub producto: String,
    pub motivo: String,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceReturnUpdate {
    pub id: i64,
    pub numero_venta: String,
    pub comprador: String,
    pub producto: String,
    pub motivo: String,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub llego_al_deposito: bool,
    pub revisado: bool,
    pub reintegrado: bool,
}

impl From<&MarketplaceReturn> for MarketplaceReturnUpdate {
    fn from(r: &MarketplaceReturn) -> Self {
        Self {
            id: r.id,
            numero_venta: r.numero_venta.clone(),
            comprador: r.comprador.clone(),
            producto: r.producto.clone(),
            motivo: r.motivo.clone(),
            fecha: r.fecha,
            llego_al_deposito: r.llego_al_deposito,
            revisado: r.revisado,
            reintegrado: r.reintegrado,
        }
    }
}

fn validate_fields(
    numero_venta: &str,
    comprador: &str,
    producto: &str,
    motivo: &str,
) -> Result<(), ValidationErrors> {
    validation::collect([
        validate_required_text(numero_venta, "numeroVenta", MAX_ORDER_LEN),
        validate_required_text(comprador, "comprador", MAX_NAME_LEN),
        validate_required_text(producto, "producto", MAX_MODEL_LEN),
        validate_required_text(motivo, "motivo", MAX_NOTE_LEN),
    ])
}

impl Validate for MarketplaceReturnCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(&self.numero_venta, &self.comprador, &self.producto, &self.motivo)
    }
}

impl Validate for MarketplaceReturnUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(&self.numero_venta, &self.comprador, &self.producto, &self.motivo)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceReturnFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busqueda: Option<String>,
    /// Only returns from the last N days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dias: Option<u32>,
}

impl ListFilter for MarketplaceReturnFilter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketplaceReturnField {
    LlegoAlDeposito,
    Revisado,
    Reintegrado,
}

impl FlagField for MarketplaceReturnField {
    fn name(&self) -> &'static str {
        match self {
            MarketplaceReturnField::LlegoAlDeposito => "llegoAlDeposito",
            MarketplaceReturnField::Revisado => "revisado",
            MarketplaceReturnField::Reintegrado => "reintegrado",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MarketplaceReturnField::LlegoAlDeposito => "Llegó al depósito",
            MarketplaceReturnField::Revisado => "Revisado",
            MarketplaceReturnField::Reintegrado => "Reintegrado",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceReturnStatusPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llego_al_deposito: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisado: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reintegrado: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketplaceReturnStatus {
    EnCamino,
    PorRevisar,
    Revisada,
    Reintegrada,
    /// Reimbursed by the marketplace but the item never came back
    ReintegradaSinProducto,
}

impl MarketplaceReturnStatus {
    pub fn from_flags(llego_al_deposito: bool, revisado: bool, reintegrado: bool) -> Self {
        match (llego_al_deposito, revisado, reintegrado) {
            (false, _, true) => MarketplaceReturnStatus::ReintegradaSinProducto,
            (_, _, true) => MarketplaceReturnStatus::Reintegrada,
            (_, true, false) => MarketplaceReturnStatus::Revisada,
            (true, false, false) => MarketplaceReturnStatus::PorRevisar,
            (false, false, false) => MarketplaceReturnStatus::EnCamino,
        }
    }
}

impl StatusBadge for MarketplaceReturnStatus {
    fn label(&self) -> &'static str {
        match self {
            MarketplaceReturnStatus::EnCamino => "En camino",
            MarketplaceReturnStatus::PorRevisar => "Por revisar",
            MarketplaceReturnStatus::Revisada => "Revisada",
            MarketplaceReturnStatus::Reintegrada => "Reintegrada",
            MarketplaceReturnStatus::ReintegradaSinProducto => "Reintegrada sin producto",
        }
    }

    fn color(&self) -> StatusColor {
        match self {
            MarketplaceReturnStatus::EnCamino => StatusColor::Gray,
            MarketplaceReturnStatus::PorRevisar => StatusColor::Orange,
            MarketplaceReturnStatus::Revisada => StatusColor::Blue,
            MarketplaceReturnStatus::Reintegrada => StatusColor::Green,
            MarketplaceReturnStatus::ReintegradaSinProducto => StatusColor::Red,
        }
    }
}

impl Resource for MarketplaceReturn {
    const PATH: &'static str = "devoluciones-ml";
    const MODULE: Module = Module::DevolucionesMl;
    type Filter = MarketplaceReturnFilter;
}

impl Editable for MarketplaceReturn {
    type Create = MarketplaceReturnCreate;
    type Update = MarketplaceReturnUpdate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl StatusFlags for MarketplaceReturn {
    type Field = MarketplaceReturnField;
    type Patch = MarketplaceReturnStatusPatch;
    type Status = MarketplaceReturnStatus;

    const FIELDS: &'static [MarketplaceReturnField] = &[
        MarketplaceReturnField::LlegoAlDeposito,
        MarketplaceReturnField::Revisado,
        MarketplaceReturnField::Reintegrado,
    ];

    fn flag(&self, field: MarketplaceReturnField) -> bool {
        match field {
            MarketplaceReturnField::LlegoAlDeposito => self.llego_al_deposito,
            MarketplaceReturnField::Revisado => self.revisado,
            MarketplaceReturnField::Reintegrado => self.reintegrado,
        }
    }

    fn set_flag(&mut self, field: MarketplaceReturnField, value: bool) {
        match field {
            MarketplaceReturnField::LlegoAlDeposito => self.llego_al_deposito = value,
            MarketplaceReturnField::Revisado => self.revisado = value,
            MarketplaceReturnField::Reintegrado => self.reintegrado = value,
        }
    }

    fn patch(field: MarketplaceReturnField, value: bool) -> MarketplaceReturnStatusPatch {
        let mut patch = MarketplaceReturnStatusPatch::default();
        match field {
            MarketplaceReturnField::LlegoAlDeposito => patch.llego_al_deposito = Some(value),
            MarketplaceReturnField::Revisado => patch.revisado = Some(value),
            MarketplaceReturnField::Reintegrado => patch.reintegrado = Some(value),
        }
        patch
    }

    fn status(&self) -> MarketplaceReturnStatus {
        MarketplaceReturnStatus::from_flags(self.llego_al_deposito, self.revisado, self.reintegrado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_lookup() {
        use MarketplaceReturnStatus::*;
        assert_eq!(MarketplaceReturnStatus::from_flags(false, false, false), EnCamino);
        assert_eq!(MarketplaceReturnStatus::from_flags(true, false, false), PorRevisar);
        assert_eq!(MarketplaceReturnStatus::from_flags(true, true, false), Revisada);
        assert_eq!(MarketplaceReturnStatus::from_flags(false, true, false), Revisada);
        assert_eq!(MarketplaceReturnStatus::from_flags(true, true, true), Reintegrada);
        assert_eq!(MarketplaceReturnStatus::from_flags(false, false, true), ReintegradaSinProducto);
    }

    #[test]
    fn test_filter_query_shape() {
        let filter = MarketplaceReturnFilter {
            busqueda: None,
            dias: Some(30),
        };
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({ "dias": 30 }));
        assert!(!filter.is_empty());
        assert!(MarketplaceReturnFilter::default().is_empty());
    }
}
