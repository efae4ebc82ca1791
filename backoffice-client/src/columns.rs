//! Table layouts of the back-office entities

use shared::models::{
    Campaign, CustomerRankingRow, Exchange, ExchangeReason, MarketplaceReturn, Platform,
    ProductReturn, ReturnReason, SalesReportRow, VendorSale,
};
use shared::StatusFlags;

use crate::list::table::{CellValue, Column, TableColumns, money};

fn exchange_reason(reason: ExchangeReason) -> &'static str {
    match reason {
        ExchangeReason::Talle => "Talle",
        ExchangeReason::Color => "Color",
        ExchangeReason::Falla => "Falla",
        ExchangeReason::Otro => "Otro",
    }
}

fn return_reason(reason: ReturnReason) -> &'static str {
    match reason {
        ReturnReason::Talle => "Talle",
        ReturnReason::Falla => "Falla",
        ReturnReason::NoLeGusto => "No le gustó",
        ReturnReason::Arrepentimiento => "Arrepentimiento",
        ReturnReason::Otro => "Otro",
    }
}

fn platform(platform: Platform) -> &'static str {
    match platform {
        Platform::Meta => "Meta",
        Platform::Google => "Google",
        Platform::TikTok => "TikTok",
        Platform::Otra => "Otra",
    }
}

fn status_cell<R: StatusFlags>(row: &R) -> CellValue {
    CellValue::badge(row.status())
}

impl TableColumns for Exchange {
    fn columns() -> Vec<Column<Self>> {
        type C = Column<Exchange>;
        vec![
            C::new("fecha", "Fecha", |e| CellValue::Date(e.fecha)),
            C::new("nombre", "Cliente", |e| CellValue::text(&e.nombre)),
            C::new("celular", "Celular", |e| CellValue::text(&e.celular)),
            C::new("pedido", "Pedido", |e| CellValue::text(&e.pedido)),
            C::new("modeloOriginal", "Modelo original", |e| {
                CellValue::text(&e.modelo_original)
            }),
            C::new("modeloCambio", "Modelo cambio", |e| CellValue::text(&e.modelo_cambio)),
            C::new("motivo", "Motivo", |e| CellValue::text(exchange_reason(e.motivo))),
            C::new("montoAbonado", "Abonado", |e| CellValue::Money(e.monto_abonado)),
            C::new("montoDevuelto", "Devuelto", |e| CellValue::Money(e.monto_devuelto)),
            C::new("estado", "Estado", status_cell),
        ]
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl TableColumns for ProductReturn {
    fn columns() -> Vec<Column<Self>> {
        type C = Column<ProductReturn>;
        vec![
            C::new("fecha", "Fecha", |r| CellValue::Date(r.fecha)),
            C::new("nombre", "Cliente", |r| CellValue::text(&r.nombre)),
            C::new("celular", "Celular", |r| CellValue::text(&r.celular)),
            C::new("pedido", "Pedido", |r| CellValue::text(&r.pedido)),
            C::new("modelo", "Modelo", |r| CellValue::text(&r.modelo)),
            C::new("motivo", "Motivo", |r| CellValue::text(return_reason(r.motivo))),
            C::new("montoReembolsado", "Reembolsado", |r| {
                CellValue::Money(r.monto_reembolsado)
            }),
            C::new("montoNotaCredito", "Nota de crédito", |r| {
                CellValue::Money(r.monto_nota_credito)
            }),
            C::new("estado", "Estado", status_cell),
        ]
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl TableColumns for MarketplaceReturn {
    fn columns() -> Vec<Column<Self>> {
        type C = Column<MarketplaceReturn>;
        vec![
            C::new("fecha", "Fecha", |r| CellValue::Date(r.fecha)),
            C::new("numeroVenta", "Venta", |r| CellValue::text(&r.numero_venta)),
            C::new("comprador", "Comprador", |r| CellValue::text(&r.comprador)),
            C::new("producto", "Producto", |r| CellValue::text(&r.producto)),
            C::new("motivo", "Motivo", |r| CellValue::text(&r.motivo)),
            C::new("estado", "Estado", status_cell),
        ]
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl TableColumns for VendorSale {
    fn columns() -> Vec<Column<Self>> {
        type C = Column<VendorSale>;
        vec![
            C::new("fecha", "Fecha", |s| CellValue::Date(s.fecha)),
            C::new("cliente", "Cliente", |s| CellValue::text(&s.cliente)),
            C::new("vendedoras", "Vendedoras", |s| {
                let names: Vec<&str> = s.vendedoras.iter().map(|v| v.nombre.as_str()).collect();
                CellValue::text(names.join(", "))
            }),
            C::new("montoTotal", "Total", |s| money(s.monto_total)),
            C::new("comisionPorcentaje", "Comisión %", |s| {
                CellValue::Percent(Some(s.comision_porcentaje))
            }),
            C::new("comision", "Comisión", |s| money(s.commission().comision)),
            C::new("estado", "Estado", |s| CellValue::badge(s.status())),
        ]
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl TableColumns for Campaign {
    fn columns() -> Vec<Column<Self>> {
        type C = Column<Campaign>;
        vec![
            C::new("fecha", "Fecha", |c| CellValue::Date(c.fecha)),
            C::new("nombre", "Campaña", |c| CellValue::text(&c.nombre)),
            C::new("plataforma", "Plataforma", |c| CellValue::text(platform(c.plataforma))),
            C::new("inversion", "Inversión", |c| money(c.inversion)),
            C::new("ventasAtribuidas", "Ventas", |c| money(c.ventas_atribuidas)),
            C::new("roas", "ROAS", |c| {
                c.roas().map(CellValue::Number).unwrap_or(CellValue::Empty)
            }),
            C::new("ctr", "CTR", |c| CellValue::Percent(c.ctr())),
            C::new("estado", "Estado", |c| CellValue::badge(c.status())),
        ]
    }

    fn row_id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl TableColumns for CustomerRankingRow {
    fn columns() -> Vec<Column<Self>> {
        type C = Column<CustomerRankingRow>;
        vec![
            C::new("posicion", "#", |r| {
                r.posicion.map(|p| CellValue::Count(p.into())).unwrap_or(CellValue::Empty)
            }),
            C::new("cliente", "Cliente", |r| CellValue::text(&r.cliente)),
            C::new("celular", "Celular", |r| {
                r.celular.as_deref().map(CellValue::text).unwrap_or(CellValue::Empty)
            }),
            C::new("compras", "Compras", |r| CellValue::Count(r.compras.into())),
            C::new("totalGastado", "Total gastado", |r| money(r.total_gastado)),
        ]
    }
}

impl TableColumns for SalesReportRow {
    fn columns() -> Vec<Column<Self>> {
        type C = Column<SalesReportRow>;
        vec![
            C::new("fecha", "Fecha", |r| CellValue::Date(r.fecha)),
            C::new("pedidos", "Pedidos", |r| CellValue::Count(r.pedidos.into())),
            C::new("unidades", "Unidades", |r| CellValue::Count(r.unidades.into())),
            C::new("facturacion", "Facturación", |r| money(r.facturacion)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::table::{SortSpec, headers, render_flag_rows, render_rows, sort_items};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::models::{ExchangeField, Role};

    fn exchange(id: i64, nombre: &str, abonado: Option<Decimal>) -> Exchange {
        Exchange {
            id,
            nombre: nombre.into(),
            celular: "111".into(),
            pedido: format!("p{id}"),
            modelo_original: "A".into(),
            modelo_cambio: "B".into(),
            motivo: ExchangeReason::Talle,
            fecha: NaiveDate::from_ymd_opt(2024, 1, id as u32).unwrap(),
            monto_abonado: abonado,
            monto_devuelto: None,
            llego_al_deposito: false,
            enviado: false,
        }
    }

    #[test]
    fn test_every_column_renders() {
        let item = exchange(1, "Ana", Some(Decimal::new(1500, 0)));
        let rows = render_rows(&[item], &Role::admin());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, Some(1));
        assert!(rows[0].can_edit && rows[0].can_delete);
        assert_eq!(rows[0].cells.len(), headers::<Exchange>().len());
        assert_eq!(rows[0].cells[7].display(), "$ 1500.00");
        assert_eq!(rows[0].cells[9].display(), "Pendiente");
    }

    #[test]
    fn test_flag_rows_have_one_toggle_per_flag() {
        let mut row = exchange(4, "Ana", None);
        row.llego_al_deposito = true;
        let rows = render_flag_rows(&[row], &Role::admin(), |_, field| {
            field == ExchangeField::Enviado
        });

        let toggles = &rows[0].toggles;
        assert_eq!(toggles.len(), 2);
        let deposito = rows[0].toggle("llegoAlDeposito").unwrap();
        assert!(deposito.value && deposito.enabled);
        let enviado = rows[0].toggle("enviado").unwrap();
        assert!(!enviado.value && !enviado.enabled);
    }

    #[test]
    fn test_viewer_rows_offer_no_actions() {
        let rows = render_flag_rows(&[exchange(2, "Ana", None)], &Role::viewer(), |_, _| false);
        assert!(!rows[0].can_edit && !rows[0].can_delete);
        assert!(rows[0].toggles.iter().all(|t| !t.enabled));
    }

    #[test]
    fn test_read_only_rows_offer_no_actions() {
        let row = CustomerRankingRow {
            posicion: Some(1),
            cliente: "Ana".into(),
            celular: None,
            compras: 3,
            total_gastado: Decimal::TEN,
        };
        let rows = render_rows(&[row], &Role::admin());
        assert_eq!(rows[0].id, None);
        assert!(!rows[0].can_edit && !rows[0].can_delete);
        assert_eq!(rows[0].cells[0].display(), "1");
    }

    #[test]
    fn test_sort_by_money_and_name() {
        let mut items = vec![
            exchange(1, "bruno", Some(Decimal::TEN)),
            exchange(2, "Ana", None),
            exchange(3, "carla", Some(Decimal::ONE)),
        ];
        sort_items(&mut items, SortSpec::desc("montoAbonado"));
        assert_eq!(items.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3, 2]);

        sort_items(&mut items, SortSpec::asc("nombre"));
        assert_eq!(items.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }

    #[test]
    fn test_vendor_sale_commission_column() {
        let sale: VendorSale = serde_json::from_value(serde_json::json!({
            "id": 1,
            "fecha": "2024-03-01",
            "cliente": "Tienda",
            "montoTotal": 121,
            "comisionPorcentaje": 10,
            "vendedoras": [{ "nombre": "Lu", "porcentaje": 100 }]
        }))
        .unwrap();
        let rows = render_rows(&[sale], &Role::admin());
        assert_eq!(rows[0].cells[2].display(), "Lu");
        assert_eq!(rows[0].cells[5].display(), "$ 10.00");
    }
}
