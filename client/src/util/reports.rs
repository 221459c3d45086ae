//! Printable sales and lote reports.
//!
//! Reports are plain row models rendered by the `reportes` and `gestion`
//! pages; the browser's print dialog produces the PDF.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use std::collections::HashMap;

use super::charts::SIZE_CATEGORIES;
use super::listing::{DateRange, SortOrder, format_date, sort_by_date};
use crate::net::types::{Clasificacion, Cliente, DetalleVenta, EstadoLote, Lote, Produccion, Producto, Venta};

/// Shown when a referenced cliente or producto is no longer active.
pub const UNKNOWN: &str = "Desconocido";

#[derive(Clone, Debug, PartialEq)]
pub struct DetalleLine {
    pub producto: String,
    pub tipo_empaque: String,
    pub tamano_huevo: String,
    pub cantidad: i64,
    pub precio_unitario: f64,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VentaReport {
    pub venta_id: i64,
    pub cliente: String,
    pub fecha: String,
    pub total: f64,
    pub detalles: Vec<DetalleLine>,
}

/// Everything a sales report is assembled from.
#[derive(Clone, Copy, Debug)]
pub struct SalesData<'a> {
    pub ventas: &'a [Venta],
    pub detalles: &'a HashMap<i64, Vec<DetalleVenta>>,
    pub clientes: &'a [Cliente],
    pub productos: &'a [Producto],
}

impl SalesData<'_> {
    pub fn cliente_name(&self, cliente_id: i64) -> String {
        self.clientes
            .iter()
            .find(|c| c.cliente_id == cliente_id)
            .map_or_else(|| UNKNOWN.to_owned(), |c| c.nombre_cliente.clone())
    }

    pub fn producto_name(&self, producto_id: i64) -> String {
        self.productos
            .iter()
            .find(|p| p.producto_id == producto_id)
            .map_or_else(|| UNKNOWN.to_owned(), |p| p.nombre_producto.clone())
    }

    fn row(&self, venta: &Venta) -> VentaReport {
        let detalles: Vec<DetalleLine> = self
            .detalles
            .get(&venta.venta_id)
            .map(|lines| {
                lines
                    .iter()
                    .map(|d| DetalleLine {
                        producto: self.producto_name(d.producto_id),
                        tipo_empaque: d.tipo_empaque.clone(),
                        tamano_huevo: d.tamano_huevo.clone(),
                        cantidad: d.cantidad_vendida,
                        precio_unitario: d.precio_unitario,
                        total: detalle_total(d),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let total = if venta.total_venta > 0.0 { venta.total_venta } else { detalles.iter().map(|d| d.total).sum() };
        VentaReport {
            venta_id: venta.venta_id,
            cliente: self.cliente_name(venta.cliente_id),
            fecha: format_date(&venta.fecha_venta),
            total,
            detalles,
        }
    }

    fn rows<'v>(&self, ventas: impl Iterator<Item = &'v Venta>) -> Vec<VentaReport> {
        let mut selected: Vec<&Venta> = ventas.collect();
        sort_by_date(&mut selected, SortOrder::Asc, |v| v.fecha_venta.as_str());
        selected.into_iter().map(|v| self.row(v)).collect()
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn detalle_total(detalle: &DetalleVenta) -> f64 {
    detalle.cantidad_vendida as f64 * detalle.precio_unitario
}

pub fn general_report(data: SalesData<'_>) -> Vec<VentaReport> {
    data.rows(data.ventas.iter())
}

pub fn report_by_cliente(data: SalesData<'_>, cliente_id: i64) -> Vec<VentaReport> {
    data.rows(data.ventas.iter().filter(|v| v.cliente_id == cliente_id))
}

pub fn report_by_date(data: SalesData<'_>, range: DateRange) -> Vec<VentaReport> {
    data.rows(data.ventas.iter().filter(|v| range.contains_raw(&v.fecha_venta)))
}

pub fn grand_total(rows: &[VentaReport]) -> f64 {
    rows.iter().map(|r| r.total).sum()
}

/// Two-decimal currency text.
pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Totals for one lote across its production, classification, and status
/// history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoteReport {
    pub num_lote: String,
    pub fecha_adq: String,
    pub gallinas_iniciales: i64,
    pub gallinas_actuales: i64,
    pub total_producido: i64,
    pub total_defectuosos: i64,
    pub total_bajas: i64,
    pub clasificado: Vec<(String, i64)>,
    pub registros_produccion: usize,
    pub registros_estado: usize,
}

pub fn lote_report(
    lote: &Lote,
    produccion: &[Produccion],
    clasificacion: &[Clasificacion],
    estados: &[EstadoLote],
) -> LoteReport {
    let total_bajas: i64 = estados.iter().map(|e| e.bajas).sum();
    let clasificado = SIZE_CATEGORIES
        .iter()
        .map(|size| {
            let total = clasificacion.iter().filter(|c| c.tamano == *size).map(|c| c.total_unitaria).sum();
            ((*size).to_owned(), total)
        })
        .collect();
    LoteReport {
        num_lote: lote.num_lote.clone(),
        fecha_adq: format_date(&lote.fecha_adq),
        gallinas_iniciales: lote.cantidad_g,
        gallinas_actuales: lote.cantidad_gctual.unwrap_or(lote.cantidad_g - total_bajas),
        total_producido: produccion.iter().map(|p| p.cant_total).sum(),
        total_defectuosos: produccion.iter().map(|p| p.defectuosos).sum(),
        total_bajas,
        clasificado,
        registros_produccion: produccion.len(),
        registros_estado: estados.len(),
    }
}

/// Open the browser print dialog.
pub fn print_page() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.print() {
                log::warn!("print failed: {e:?}");
            }
        }
    }
}
