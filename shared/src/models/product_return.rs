//! Product Return Model (devoluciones)

use crate::date::iso_date;
use crate::error::ValidationErrors;
use crate::money::set_exclusive;
use crate::resource::{
    Editable, FlagField, ListFilter, Resource, StatusBadge, StatusColor, StatusFlags,
};
use crate::types::Module;
use crate::validation::{
    self, MAX_MODEL_LEN, MAX_NAME_LEN, MAX_ORDER_LEN, Validate, validate_amount,
    validate_exclusive_amounts, validate_phone, validate_required_text,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnReason {
    Talle,
    Falla,
    NoLeGusto,
    Arrepentimiento,
    Otro,
}

/// Product return entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReturn {
    pub id: i64,
    pub nombre: String,
    pub celular: String,
    pub pedido: String,
    pub modelo: String,
    pub motivo: ReturnReason,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    #[serde(default)]
    pub monto_reembolsado: Option<Decimal>,
    #[serde(default)]
    pub monto_nota_credito: Option<Decimal>,
    #[serde(default)]
    pub llego_al_deposito: bool,
    #[serde(default)]
    pub reembolsado: bool,
    #[serde(default)]
    pub nota_de_credito: bool,
}

/// Create return payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReturnCreate {
    pub nombre: String,
    pub celular: String,
    pub pedido: String,
    pub modelo: String,
    pub motivo: ReturnReason,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monto_reembolsado: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monto_nota_credito: Option<Decimal>,
}

/// Whole-record update payload (echoes id and flags)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReturnUpdate {
    pub id: i64,
    pub nombre: String,
    pub celular: String,
    pub pedido: String,
    pub modelo: String,
    pub motivo: ReturnReason,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub monto_reembolsado: Option<Decimal>,
    pub monto_nota_credito: Option<Decimal>,
    pub llego_al_deposito: bool,
    pub reembolsado: bool,
    pub nota_de_credito: bool,
}

impl From<&ProductReturn> for ProductReturnUpdate {
    fn from(r: &ProductReturn) -> Self {
        Self {
            id: r.id,
            nombre: r.nombre.clone(),
            celular: r.celular.clone(),
            pedido: r.pedido.clone(),
            modelo: r.modelo.clone(),
            motivo: r.motivo,
            fecha: r.fecha,
            monto_reembolsado: r.monto_reembolsado,
            monto_nota_credito: r.monto_nota_credito,
            llego_al_deposito: r.llego_al_deposito,
            reembolsado: r.reembolsado,
            nota_de_credito: r.nota_de_credito,
        }
    }
}

macro_rules! return_amount_setters {
    ($ty:ty) => {
        impl $ty {
            pub fn set_monto_reembolsado(&mut self, value: Option<Decimal>) {
                set_exclusive(&mut self.monto_reembolsado, &mut self.monto_nota_credito, value);
            }

            pub fn set_monto_nota_credito(&mut self, value: Option<Decimal>) {
                set_exclusive(&mut self.monto_nota_credito, &mut self.monto_reembolsado, value);
            }
        }
    };
}

return_amount_setters!(ProductReturnCreate);
return_amount_setters!(ProductReturnUpdate);

fn validate_fields(
    nombre: &str,
    celular: &str,
    pedido: &str,
    modelo: &str,
    reembolso: Option<Decimal>,
    credito: Option<Decimal>,
) -> Result<(), ValidationErrors> {
    validation::collect([
        validate_required_text(nombre, "nombre", MAX_NAME_LEN),
        validate_phone(celular, "celular"),
        validate_required_text(pedido, "pedido", MAX_ORDER_LEN),
        validate_required_text(modelo, "modelo", MAX_MODEL_LEN),
        validate_amount(reembolso, "montoReembolsado"),
        validate_amount(credito, "montoNotaCredito"),
        validate_exclusive_amounts(reembolso, "montoReembolsado", credito, "montoNotaCredito"),
    ])
}

impl Validate for ProductReturnCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            &self.nombre,
            &self.celular,
            &self.pedido,
            &self.modelo,
            self.monto_reembolsado,
            self.monto_nota_credito,
        )
    }
}

impl Validate for ProductReturnUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            &self.nombre,
            &self.celular,
            &self.pedido,
            &self.modelo,
            self.monto_reembolsado,
            self.monto_nota_credito,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductReturnFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busqueda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<ReturnReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<ReturnStatus>,
}

impl ListFilter for ProductReturnFilter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnField {
    LlegoAlDeposito,
    Reembolsado,
    NotaDeCredito,
}

impl FlagField for ReturnField {
    fn name(&self) -> &'static str {
        match self {
            ReturnField::LlegoAlDeposito => "llegoAlDeposito",
            ReturnField::Reembolsado => "reembolsado",
            ReturnField::NotaDeCredito => "notaDeCredito",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReturnField::LlegoAlDeposito => "Llegó al depósito",
            ReturnField::Reembolsado => "Reembolsado",
            ReturnField::NotaDeCredito => "Nota de crédito",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatusPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llego_al_deposito: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reembolsado: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota_de_credito: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnStatus {
    EsperandoProducto,
    PorResolver,
    Reembolsada,
    NotaDeCredito,
    ResueltaSinRecibir,
    /// Refund and credit note both issued
    Revisar,
}

impl ReturnStatus {
    pub fn from_flags(llego_al_deposito: bool, reembolsado: bool, nota_de_credito: bool) -> Self {
        match (llego_al_deposito, reembolsado, nota_de_credito) {
            (_, true, true) => ReturnStatus::Revisar,
            (false, false, false) => ReturnStatus::EsperandoProducto,
            (true, false, false) => ReturnStatus::PorResolver,
            (false, _, _) => ReturnStatus::ResueltaSinRecibir,
            (true, true, false) => ReturnStatus::Reembolsada,
            (true, false, true) => ReturnStatus::NotaDeCredito,
        }
    }
}

impl StatusBadge for ReturnStatus {
    fn label(&self) -> &'static str {
        match self {
            ReturnStatus::EsperandoProducto => "Esperando producto",
            ReturnStatus::PorResolver => "Por resolver",
            ReturnStatus::Reembolsada => "Reembolsada",
            ReturnStatus::NotaDeCredito => "Nota de crédito",
            ReturnStatus::ResueltaSinRecibir => "Resuelta sin recibir",
            ReturnStatus::Revisar => "Revisar",
        }
    }

    fn color(&self) -> StatusColor {
        match self {
            ReturnStatus::EsperandoProducto => StatusColor::Gray,
            ReturnStatus::PorResolver => StatusColor::Orange,
            ReturnStatus::Reembolsada => StatusColor::Green,
            ReturnStatus::NotaDeCredito => StatusColor::Purple,
            ReturnStatus::ResueltaSinRecibir => StatusColor::Blue,
            ReturnStatus::Revisar => StatusColor::Red,
        }
    }
}

impl Resource for ProductReturn {
    const PATH: &'static str = "devoluciones";
    const MODULE: Module = Module::Devoluciones;
    type Filter = ProductReturnFilter;
}

impl Editable for ProductReturn {
    type Create = ProductReturnCreate;
    type Update = ProductReturnUpdate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl StatusFlags for ProductReturn {
    type Field = ReturnField;
    type Patch = ReturnStatusPatch;
    type Status = ReturnStatus;

    const FIELDS: &'static [ReturnField] = &[
        ReturnField::LlegoAlDeposito,
        ReturnField::Reembolsado,
        ReturnField::NotaDeCredito,
    ];

    fn flag(&self, field: ReturnField) -> bool {
        match field {
            ReturnField::LlegoAlDeposito => self.llego_al_deposito,
            ReturnField::Reembolsado => self.reembolsado,
            ReturnField::NotaDeCredito => self.nota_de_credito,
        }
    }

    fn set_flag(&mut self, field: ReturnField, value: bool) {
        match field {
            ReturnField::LlegoAlDeposito => self.llego_al_deposito = value,
            ReturnField::Reembolsado => self.reembolsado = value,
            ReturnField::NotaDeCredito => self.nota_de_credito = value,
        }
    }

    fn patch(field: ReturnField, value: bool) -> ReturnStatusPatch {
        let mut patch = ReturnStatusPatch::default();
        match field {
            ReturnField::LlegoAlDeposito => patch.llego_al_deposito = Some(value),
            ReturnField::Reembolsado => patch.reembolsado = Some(value),
            ReturnField::NotaDeCredito => patch.nota_de_credito = Some(value),
        }
        patch
    }

    fn status(&self) -> ReturnStatus {
        ReturnStatus::from_flags(self.llego_al_deposito, self.reembolsado, self.nota_de_credito)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_lookup() {
        use ReturnStatus::*;
        let cases = [
            ((false, false, false), EsperandoProducto),
            ((true, false, false), PorResolver),
            ((true, true, false), Reembolsada),
            ((true, false, true), NotaDeCredito),
            ((false, true, false), ResueltaSinRecibir),
            ((false, false, true), ResueltaSinRecibir),
            ((true, true, true), Revisar),
            ((false, true, true), Revisar),
        ];
        for ((a, b, c), expected) in cases {
            assert_eq!(ReturnStatus::from_flags(a, b, c), expected, "flags {a} {b} {c}");
        }
    }

    #[test]
    fn test_patch() {
        let patch = ProductReturn::patch(ReturnField::NotaDeCredito, false);
        assert_eq!(serde_json::to_value(patch).unwrap(), json!({ "notaDeCredito": false }));
    }

    #[test]
    fn test_exclusive_amounts() {
        let mut create = ProductReturnCreate {
            nombre: "Luz".into(),
            celular: "222".into(),
            pedido: "p9".into(),
            modelo: "Remera".into(),
            motivo: ReturnReason::Falla,
            fecha: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            monto_reembolsado: Some(Decimal::from(10)),
            monto_nota_credito: None,
        };
        create.set_monto_nota_credito(Some(Decimal::from(5)));
        assert_eq!(create.monto_reembolsado, None);
        assert!(create.validate().is_ok());

        create.monto_reembolsado = Some(Decimal::from(1));
        let errors = create.validate().unwrap_err();
        assert!(errors.for_field("montoNotaCredito").is_some());
    }
}
