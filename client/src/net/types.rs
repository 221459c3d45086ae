//! Wire DTOs for the farm API.
//!
//! DESIGN
//! ======
//! Field names mirror the API's camelCase JSON so serde does the mapping.
//! Read models default missing numbers to zero and missing flags to their
//! active state; the API omits or nulls fields freely depending on the
//! endpoint. Dates stay ISO strings on the wire and are parsed on display by
//! `util::listing`.
//!
//! Write payloads match what each endpoint accepts, which is not always the
//! read shape: production and classification writes use PascalCase keys.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

// =============================================================================
// LOTES, CORRALES, RAZAS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lote {
    pub id_lote: i64,
    #[serde(default)]
    pub num_lote: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cantidad_g: i64,
    /// Current hen count after recorded bajas.
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub cantidad_gctual: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id_raza: i64,
    #[serde(default)]
    pub fecha_adq: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id_corral: i64,
    #[serde(default)]
    pub estado_baja: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_lote: Option<i64>,
    pub num_lote: String,
    pub cantidad_g: i64,
    pub id_raza: i64,
    pub fecha_adq: String,
    pub id_corral: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corral {
    pub id_corral: i64,
    #[serde(default)]
    pub num_corral: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub capacidad: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub alto: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ancho: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub largo: i64,
    #[serde(default)]
    pub agua: bool,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub comederos: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub bebederos: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub ponederos: i64,
    #[serde(default = "active")]
    pub estado: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorralPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_corral: Option<i64>,
    pub num_corral: String,
    pub capacidad: i64,
    pub alto: i64,
    pub ancho: i64,
    pub largo: i64,
    pub agua: bool,
    pub comederos: i64,
    pub bebederos: i64,
    pub ponederos: i64,
    pub estado: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Raza {
    pub id_raza: i64,
    #[serde(default)]
    pub raza: String,
    #[serde(default)]
    pub origen: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub color_h: String,
    #[serde(default)]
    pub caract_espec: String,
    #[serde(default = "active")]
    pub estado: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RazaPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_raza: Option<i64>,
    pub raza: String,
    pub origen: String,
    pub color: String,
    pub color_h: String,
    pub caract_espec: String,
}

// =============================================================================
// PRODUCCION, CLASIFICACION, ESTADO
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Produccion {
    pub id_prod: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cant_cajas: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cant_cartones: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cant_sueltos: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub defectuosos: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cant_total: i64,
    #[serde(default)]
    pub fecha_registro_p: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id_lote: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProduccionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_prod: Option<i64>,
    pub cant_cajas: i64,
    pub cant_cartones: i64,
    pub cant_sueltos: i64,
    pub id_lote: i64,
    pub defectuosos: Option<i64>,
    pub fecha_registro_p: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clasificacion {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(default)]
    pub tamano: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cajas: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cartones_extras: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub huevos_sueltos: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_unitaria: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id_prod: i64,
    #[serde(default)]
    pub fecha_cla_s: Option<String>,
    #[serde(default)]
    pub fecha_registro_p: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClasificacionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub tamano: String,
    pub cajas: i64,
    pub cartones_extras: i64,
    pub huevos_sueltos: i64,
    pub id_prod: i64,
    /// Only sent on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_cla_s: Option<String>,
}

/// Remaining unclassified stock of one production record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLote {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id_produccion: i64,
    #[serde(default)]
    pub fecha_produ: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stock_restante: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cajas_restantes: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cartones_restantes: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub huevos_sueltos_restantes: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cantidad_total_produccion: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadoLote {
    pub id_estado: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id_lote: i64,
    #[serde(default)]
    pub fecha_registro: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cantidad_g: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub bajas: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub semana: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id_etapa: i64,
    #[serde(default)]
    pub descripcion: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstadoLotePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_estado: Option<i64>,
    pub bajas: i64,
    /// Only sent on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_registro: Option<String>,
    pub semana: i64,
    pub id_etapa: i64,
    pub id_lote: i64,
    pub descripcion: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Etapa {
    pub id_etapa: i64,
    #[serde(default)]
    pub nombre: String,
}

// =============================================================================
// VENTAS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub cliente_id: i64,
    #[serde(default)]
    pub nombre_cliente: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub telefono: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    pub nombre_cliente: String,
    pub direccion: String,
    pub telefono: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub producto_id: i64,
    #[serde(default)]
    pub nombre_producto: String,
    #[serde(default)]
    pub descripcion: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductoPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<i64>,
    pub nombre_producto: String,
    pub descripcion: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    pub venta_id: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cliente_id: i64,
    #[serde(default)]
    pub fecha_venta: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_venta: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetalleVenta {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub producto_id: i64,
    #[serde(default)]
    pub tipo_empaque: String,
    #[serde(default)]
    pub tamano_huevo: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cantidad_vendida: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precio_unitario: f64,
    #[serde(default, skip_serializing)]
    pub total: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaVenta {
    pub cliente_id: i64,
    pub fecha_venta: String,
}

/// Create payload for `InsertarDetallesVenta`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaPayload {
    pub venta: NuevaVenta,
    pub detalles_venta: Vec<DetalleVenta>,
}

/// Update payload for `ActualizarVenta`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaUpdatePayload {
    pub venta_id: i64,
    pub cliente_id: i64,
    pub fecha_venta: String,
    pub detalles_venta: Vec<DetalleVenta>,
}

/// Classified stock available for sale, per size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHuevos {
    #[serde(default)]
    pub tamano: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cajas: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub cartones_extras: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub huevos_sueltos: i64,
}

// =============================================================================
// USUARIOS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    #[serde(default)]
    pub nombre_user: String,
    #[serde(default)]
    pub email: String,
    /// Role name, e.g. `"Admin"`.
    #[serde(default)]
    pub role: String,
    #[serde(default = "active")]
    pub estado: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioPayload {
    pub nombre_user: String,
    pub email: String,
    pub role_id: i64,
    /// Omitted on update when the password is left blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrasena: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    pub id: i64,
    pub nombre: String,
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoLote {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub produccion_total: i64,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub cantidad_gallinas_actual: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub cantidad_gallinas: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub bajas: Option<i64>,
    #[serde(default)]
    pub raza: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduccionPoint {
    #[serde(default)]
    pub fecha_registro: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub produccion: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub defectuosos: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClasificacionPoint {
    #[serde(default)]
    pub fecha_registro: String,
    #[serde(default)]
    pub tamano: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_unitaria: i64,
}

/// Aggregation window of the dashboard series endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    Diario,
    Semanal,
    Mensual,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Diario, Period::Semanal, Period::Mensual];

    /// Path segment used by the API.
    pub fn as_path(self) -> &'static str {
        match self {
            Period::Diario => "diario",
            Period::Semanal => "semanal",
            Period::Mensual => "mensual",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Diario => "Diario",
            Period::Semanal => "Semanal",
            Period::Mensual => "Mensual",
        }
    }

    pub fn from_path(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_path() == raw)
    }
}

fn active() -> bool {
    true
}

/// Integer that may arrive as a JSON number, a numeric string, or null.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_i64(deserializer)?.unwrap_or_default())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0.0),
        serde_json::Value::Number(number) => {
            number.as_f64().ok_or_else(|| D::Error::custom("expected finite number"))
        }
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected number, got {text:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}

fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(Some(int));
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(Some(float as i64));
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        serde_json::Value::String(text) if text.trim().is_empty() => Ok(None),
        serde_json::Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected integer, got {text:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}
