//! Ad Campaign Model (campanas)

use crate::date::iso_date;
use crate::error::ValidationErrors;
use crate::resource::{
    Editable, FlagField, ListFilter, Resource, StatusBadge, StatusColor, StatusFlags,
};
use crate::types::Module;
use crate::validation::{MAX_NAME_LEN, Validate, validate_amount, validate_required_text};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Meta,
    Google,
    TikTok,
    Otra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: i64,
    pub nombre: String,
    pub plataforma: Platform,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    /// Ad spend
    pub inversion: Decimal,
    /// Revenue attributed to the campaign
    pub ventas_atribuidas: Decimal,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub impresiones: u64,
    #[serde(default)]
    pub activa: bool,
    #[serde(default)]
    pub reportada: bool,
}

impl Campaign {
    /// Return on ad spend; `None` without spend
    pub fn roas(&self) -> Option<Decimal> {
        roas(self.ventas_atribuidas, self.inversion)
    }

    /// Click-through rate in percent; `None` without impressions
    pub fn ctr(&self) -> Option<Decimal> {
        ctr(self.clicks, self.impresiones)
    }
}

pub fn roas(ventas: Decimal, inversion: Decimal) -> Option<Decimal> {
    if inversion.is_zero() {
        return None;
    }
    ventas.checked_div(inversion).map(|r| r.round_dp(2))
}

pub fn ctr(clicks: u64, impresiones: u64) -> Option<Decimal> {
    if impresiones == 0 {
        return None;
    }
    let rate = Decimal::from(clicks) * Decimal::ONE_HUNDRED / Decimal::from(impresiones);
    Some(rate.round_dp(2))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignCreate {
    pub nombre: String,
    pub plataforma: Platform,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub inversion: Decimal,
    pub ventas_atribuidas: Decimal,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub impresiones: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUpdate {
    pub id: i64,
    pub nombre: String,
    pub plataforma: Platform,
    #[serde(with = "iso_date")]
    pub fecha: NaiveDate,
    pub inversion: Decimal,
    pub ventas_atribuidas: Decimal,
    pub clicks: u64,
    pub impresiones: u64,
    pub activa: bool,
    pub reportada: bool,
}

impl From<&Campaign> for CampaignUpdate {
    fn from(c: &Campaign) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre.clone(),
            plataforma: c.plataforma,
            fecha: c.fecha,
            inversion: c.inversion,
            ventas_atribuidas: c.ventas_atribuidas,
            clicks: c.clicks,
            impresiones: c.impresiones,
            activa: c.activa,
            reportada: c.reportada,
        }
    }
}

fn validate_fields(
    nombre: &str,
    inversion: Decimal,
    ventas: Decimal,
    clicks: u64,
    impresiones: u64,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(validate_required_text(nombre, "nombre", MAX_NAME_LEN));
    errors.check(validate_amount(Some(inversion), "inversion"));
    errors.check(validate_amount(Some(ventas), "ventasAtribuidas"));
    if clicks > impresiones {
        errors.add(
            "clicks",
            format!("clicks ({clicks}) cannot exceed impresiones ({impresiones})"),
        );
    }
    errors.into_result()
}

impl Validate for CampaignCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            &self.nombre,
            self.inversion,
            self.ventas_atribuidas,
            self.clicks,
            self.impresiones,
        )
    }
}

impl Validate for CampaignUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_fields(
            &self.nombre,
            self.inversion,
            self.ventas_atribuidas,
            self.clicks,
            self.impresiones,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busqueda: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plataforma: Option<Platform>,
}

impl ListFilter for CampaignFilter {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignField {
    Activa,
    Reportada,
}

impl FlagField for CampaignField {
    fn name(&self) -> &'static str {
        match self {
            CampaignField::Activa => "activa",
            CampaignField::Reportada => "reportada",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CampaignField::Activa => "Activa",
            CampaignField::Reportada => "Reportada",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignStatusPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activa: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reportada: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampaignStatus {
    Pausada,
    EnCurso,
    EnCursoReportada,
    Finalizada,
}

impl CampaignStatus {
    pub fn from_flags(activa: bool, reportada: bool) -> Self {
        match (activa, reportada) {
            (false, false) => CampaignStatus::Pausada,
            (true, false) => CampaignStatus::EnCurso,
            (true, true) => CampaignStatus::EnCursoReportada,
            (false, true) => CampaignStatus::Finalizada,
        }
    }
}

impl StatusBadge for CampaignStatus {
    fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Pausada => "Pausada",
            CampaignStatus::EnCurso => "En curso",
            CampaignStatus::EnCursoReportada => "En curso (reportada)",
            CampaignStatus::Finalizada => "Finalizada",
        }
    }

    fn color(&self) -> StatusColor {
        match self {
            CampaignStatus::Pausada => StatusColor::Gray,
            CampaignStatus::EnCurso => StatusColor::Blue,
            CampaignStatus::EnCursoReportada => StatusColor::Purple,
            CampaignStatus::Finalizada => StatusColor::Green,
        }
    }
}

impl Resource for Campaign {
    const PATH: &'static str = "campanas";
    const MODULE: Module = Module::Campanas;
    type Filter = CampaignFilter;
}

impl Editable for Campaign {
    type Create = CampaignCreate;
    type Update = CampaignUpdate;

    fn id(&self) -> i64 {
        self.id
    }
}

impl StatusFlags for Campaign {
    type Field = CampaignField;
    type Patch = CampaignStatusPatch;
    type Status = CampaignStatus;

    const FIELDS: &'static [CampaignField] = &[CampaignField::Activa, CampaignField::Reportada];

    fn flag(&self, field: CampaignField) -> bool {
        match field {
            CampaignField::Activa => self.activa,
            CampaignField::Reportada => self.reportada,
        }
    }

    fn set_flag(&mut self, field: CampaignField, value: bool) {
        match field {
            CampaignField::Activa => self.activa = value,
            CampaignField::Reportada => self.reportada = value,
        }
    }

    fn patch(field: CampaignField, value: bool) -> CampaignStatusPatch {
        let mut patch = CampaignStatusPatch::default();
        match field {
            CampaignField::Activa => patch.activa = Some(value),
            CampaignField::Reportada => patch.reportada = Some(value),
        }
        patch
    }

    fn status(&self) -> CampaignStatus {
        CampaignStatus::from_flags(self.activa, self.reportada)
    }
}
