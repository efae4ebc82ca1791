//! Exchange Model (cambios)

use crate::date::iso_date;
use crate::money::set_exclusive;
use crate::resource::{
    Editable, FlagField, ListFilter, Resource, StatusBadge, StatusColor, StatusFlags,
};
use crate::types::Module;
use crate::validation::{
    self, MAX_MODEL_LEN, MAX_NAME_LEN, MAX_ORDER_LEN, Validate, validate_amount,
    validate_exclusive_amounts, validate_phone, validate_required_text,
};
use crate::error::ValidationErrors;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Why the customer asked for an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeReason {
    Talle,
    Color,
    Falla,
    Otro,
}

/// Exchange entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub id: i64,
    pub nombre: String,
    pub celular: String,
    pub pedido: String,
    pub modelo_original: String,
    pub modelo_cambio: String,
    pub motivo: ExchangeReason,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    /// Difference paid by the customer
    #[serde(default)]
    pub monto_abonado: Option<Decimal>,
    /// Difference returned to the customer
    #[serde(default)]
    pub monto_devuelto: Option<Decimal>,
    /// Original item arrived at the warehouse
    #[serde(default)]
    pub llego_al_deposito: bool,
    /// Replacement shipped
    #[serde(default)]
    pub enviado: bool,
}

/// Create exchange payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeCreate {
    pub nombre: String,
    pub celular: String,
    pub pedido: String,
    pub modelo_original: String,
    pub modelo_cambio: String,
    pub motivo: ExchangeReason,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monto_abonado: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monto_devuelto: Option<Decimal>,
}

/// Whole-record update payload
///
/// Echoes the server-owned fields (id, flags) as they were loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeUpdate {
    pub id: i64,
    pub nombre: String,
    pub celular: String,
    pub pedido: String,
    pub modelo_original: String,
    pub modelo_cambio: String,
    pub motivo: ExchangeReason,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub monto_abonado: Option<Decimal>,
    pub monto_devuelto: Option<Decimal>,
    pub llego_al_deposito: bool,
    pub enviado: bool,
}

impl From<&Exchange> for ExchangeUpdate {
    fn from(e: &Exchange) -> Self {
        Self {
            id: e.id,
            nombre: e.nombre.clone(),
            celular: e.celular.clone(),
            pedido: e.pedido.clone(),
            modelo_original: e.modelo_original.clone(),
            modelo_cambio: e.modelo_cambio.clone(),
            motivo: e.motivo,
            fecha: e.fecha,
            monto_abonado: e.monto_abonado,
            monto_devuelto: e.monto_devuelto,
            llego_al_deposito: e.llego_al_deposito,
            enviado: e.enviado,
        }
    }
}

macro_rules! exchange_amount_setters {
    ($ty:ty) => {
        impl $ty {
            /// Set the paid difference; a positive value clears the returned one
            pub fn set_monto_abonado(&mut self, value: Option<Decimal>) {
                set_exclusive(&mut self.monto_abonado, &mut self.monto_devuelto, value);
            }

            /// Set the returned difference; a positive value clears the paid one
            pub fn set_monto_devuelto(&mut self, value: Option<Decimal>) {
                set_exclusive(&mut self.monto_devuelto, &mut self.monto_abonado, value);
            }
        }
    };
}

exchange_amount_setters!(ExchangeCreate);
exchange_amount_setters!(ExchangeUpdate);

#[allow(clippy::too_many_arguments)]
fn validate_fields(
    nombre: &str,
    celular: &str,
    pedido: &str,
    modelo_original: &str,
    modelo_cambio: &str,
    monto_abonado: Option<Decimal>,
    monto_devuelto: Option<Decimal>,
) -> Result<(), ValidationErrors> {
    validation::collect([
        validate_required_text(nombre, "nombre", MAX_NAME_LEN),
        validate_phone(celular, "celular"),
        validate_required_text(pedido, "pedido", MAX_ORDER_LEN),
        validate_required_text(modelo_original, "modeloOriginal", MAX_MODEL_LEN),
        validate_required_text(modelo_cambio, "modeloCambio", MAX_MODEL_LEN),
        validate_amount(monto_abonado, "montoAbonado"),
        validate_amount(monto_devuelto, "montoDevuelto"),
        validate_exclusive_amounts(monto_abonado, "montoAbonado", monto_devuelto, "montoDevuelto"),
    ])
}

impl Validate for ExchangeCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            &self.nombre,
            &self.celular,
            &self.pedido,
            &self.modelo_original,
            &self.modelo_cambio,
            self.monto_abonado,
            self.monto_devuelto,
        )
    }
}

impl Validate for ExchangeUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            &self.nombre,
            &self.celular,
            &self.pedido,
            &self.modelo_original,
            &self.modelo_cambio,
            self.monto_abonado,
            self.monto_devuelto,
        )
    }
}

/// Exchange list filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeFilter {
    /// Matches name, phone or order number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busqueda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<ExchangeReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<ExchangeStatus>,
}

impl ListFilter for ExchangeFilter {}

/// Exchange status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeField {
    LlegoAlDeposito,
    Enviado,
}

impl FlagField for ExchangeField {
    fn name(&self) -> &'static str {
        match self {
            ExchangeField::LlegoAlDeposito => "llegoAlDeposito",
            ExchangeField::Enviado => "enviado",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ExchangeField::LlegoAlDeposito => "Llegó al depósito",
            ExchangeField::Enviado => "Enviado",
        }
    }
}

/// Single-field status update body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeStatusPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llego_al_deposito: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enviado: Option<bool>,
}

/// Display status of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExchangeStatus {
    Pendiente,
    EnDeposito,
    EnviadoSinRecibir,
    Finalizado,
}

impl ExchangeStatus {
    pub fn from_flags(llego_al_deposito: bool, enviado: bool) -> Self {
        match (llego_al_deposito, enviado) {
            (false, false) => ExchangeStatus::Pendiente,
            (true, false) => ExchangeStatus::EnDeposito,
            (false, true) => ExchangeStatus::EnviadoSinRecibir,
            (true, true) => ExchangeStatus::Finalizado,
        }
    }
}

impl StatusBadge for ExchangeStatus {
    fn label(&self) -> &'static str {
        match self {
            ExchangeStatus::Pendiente => "Pendiente",
            ExchangeStatus::EnDeposito => "En depósito",
            ExchangeStatus::EnviadoSinRecibir => "Enviado sin recibir",
            ExchangeStatus::Finalizado => "Finalizado",
        }
    }

    fn color(&self) -> StatusColor {
        match self {
            ExchangeStatus::Pendiente => StatusColor::Gray,
            ExchangeStatus::EnDeposito => StatusColor::Blue,
            ExchangeStatus::EnviadoSinRecibir => StatusColor::Orange,
            ExchangeStatus::Finalizado => StatusColor::Green,
        }
    }
}

impl Resource for Exchange {
    const PATH: &'static str = "cambios";
    const MODULE: Module = Module::Cambios;
    type Filter = ExchangeFilter;
}

impl Editable for Exchange {
    type Create = ExchangeCreate;
    type Update = ExchangeUpdate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl StatusFlags for Exchange {
    type Field = ExchangeField;
    type Patch = ExchangeStatusPatch;
    type Status = ExchangeStatus;

    const FIELDS: &'static [ExchangeField] =
        &[ExchangeField::LlegoAlDeposito, ExchangeField::Enviado];

    fn flag(&self, field: ExchangeField) -> bool {
        match field {
            ExchangeField::LlegoAlDeposito => self.llego_al_deposito,
            ExchangeField::Enviado => self.enviado,
        }
    }

    fn set_flag(&mut self, field: ExchangeField, value: bool) {
        match field {
            ExchangeField::LlegoAlDeposito => self.llego_al_deposito = value,
            ExchangeField::Enviado => self.enviado = value,
        }
    }

    fn patch(field: ExchangeField, value: bool) -> ExchangeStatusPatch {
        let mut patch = ExchangeStatusPatch::default();
        match field {
            ExchangeField::LlegoAlDeposito => patch.llego_al_deposito = Some(value),
            ExchangeField::Enviado => patch.enviado = Some(value),
        }
        patch
    }

    fn status(&self) -> ExchangeStatus {
        ExchangeStatus::from_flags(self.llego_al_deposito, self.enviado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_create() -> ExchangeCreate {
        ExchangeCreate {
            nombre: "Ana".into(),
            celular: "111".into(),
            pedido: "p1".into(),
            modelo_original: "A".into(),
            modelo_cambio: "B".into(),
            motivo: ExchangeReason::Talle,
            fecha: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            monto_abonado: None,
            monto_devuelto: None,
        }
    }

    #[test]
    fn test_create_payload_carries_only_creatable_fields() {
        let body = serde_json::to_value(sample_create()).unwrap();
        assert_eq!(
            body,
            json!({
                "nombre": "Ana",
                "celular": "111",
                "pedido": "p1",
                "modeloOriginal": "A",
                "modeloCambio": "B",
                "motivo": "Talle",
                "fecha": "2024-01-01"
            })
        );
    }

    #[test]
    fn test_deserialize_timestamp_and_missing_flags() {
        let exchange: Exchange = serde_json::from_value(json!({
            "id": 7,
            "nombre": "Ana",
            "celular": "111",
            "pedido": "p1",
            "modeloOriginal": "A",
            "modeloCambio": "B",
            "motivo": "Talle",
            "fecha": "2024-01-01T00:00:00.000Z",
            "montoAbonado": 1500.5
        }))
        .unwrap();

        assert_eq!(exchange.fecha, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(exchange.monto_abonado, Some(Decimal::new(15005, 1)));
        assert!(!exchange.llego_al_deposito);
        assert_eq!(exchange.status(), ExchangeStatus::Pendiente);
    }

    #[test]
    fn test_status_lookup_covers_every_combination() {
        assert_eq!(ExchangeStatus::from_flags(false, false).label(), "Pendiente");
        assert_eq!(ExchangeStatus::from_flags(true, false).color(), StatusColor::Blue);
        assert_eq!(ExchangeStatus::from_flags(false, true), ExchangeStatus::EnviadoSinRecibir);
        assert_eq!(ExchangeStatus::from_flags(true, true).color(), StatusColor::Green);
    }

    #[test]
    fn test_patch_carries_single_field() {
        let patch = Exchange::patch(ExchangeField::LlegoAlDeposito, true);
        assert_eq!(serde_json::to_value(patch).unwrap(), json!({ "llegoAlDeposito": true }));
    }

    #[test]
    fn test_exclusive_amount_setters() {
        let mut create = sample_create();
        create.set_monto_devuelto(Some(Decimal::from(200)));
        create.set_monto_abonado(Some(Decimal::from(100)));
        assert_eq!(create.monto_devuelto, None);
        assert_eq!(create.monto_abonado, Some(Decimal::from(100)));

        create.set_monto_devuelto(Some(Decimal::ZERO));
        assert_eq!(create.monto_abonado, Some(Decimal::from(100)));
    }

    #[test]
    fn test_validation() {
        assert!(sample_create().validate().is_ok());

        let mut bad = sample_create();
        bad.nombre = " ".into();
        bad.modelo_cambio.clear();
        let errors = bad.validate().unwrap_err();
        assert!(errors.for_field("nombre").is_some());
        assert!(errors.for_field("modeloCambio").is_some());
    }

    #[test]
    fn test_update_echoes_server_fields() {
        let mut exchange: Exchange = serde_json::from_value(json!({
            "id": 3, "nombre": "Ana", "celular": "111", "pedido": "p1",
            "modeloOriginal": "A", "modeloCambio": "B", "motivo": "Color",
            "fecha": "2024-02-02", "llegoAlDeposito": true
        }))
        .unwrap();
        exchange.nombre = "Ana María".into();

        let update = ExchangeUpdate::from(&exchange);
        assert_eq!(update.id, 3);
        assert!(update.llego_al_deposito);
        assert!(!update.enviado);
    }
}
