//! Farm API endpoints.
//!
//! Every call goes through `ApiClient`, so the bearer token and the global
//! 401 redirect apply uniformly. Path builders are plain functions so the
//! endpoint table is testable without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Calls return `Result<_, ApiError>`. Outside the browser build the client
//! answers `ApiError::Unavailable`, so server rendering never blocks on the
//! network.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::ApiError;
use super::http::{ApiClient, Method, RequestAuth, decode_body, encode_body};
use super::types::*;

/// Normalize a list response that may arrive as a single object or null.
pub fn one_or_many<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        single => vec![single],
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
        .collect()
}

async fn list<T: DeserializeOwned>(client: ApiClient, path: &str) -> Result<Vec<T>, ApiError> {
    one_or_many(client.get::<Value>(path).await?)
}

// =============================================================================
// PATHS
// =============================================================================

pub const LOGIN_PATH: &str = "/api/Auth/login";

pub fn lotes_path(dados_de_baja: bool) -> String {
    if dados_de_baja { "/api/lotes?dadosDeBaja=true".to_owned() } else { "/api/lotes".to_owned() }
}

pub fn lote_path(id_lote: i64) -> String {
    format!("/getlote?idLote={id_lote}")
}

pub fn delete_lote_path(id_lote: i64) -> String {
    format!("/updateestadolot?idlote={id_lote}")
}

pub fn lote_baja_path(id_lote: i64) -> String {
    format!("/api/lotes/putLoteBaja?idLote={id_lote}")
}

pub fn corral_estado_path(id_corral: i64) -> String {
    format!("/updestadocorral?id={id_corral}")
}

pub fn produccion_path(id_lote: i64) -> String {
    format!("/getproduccion?IdLote={id_lote}")
}

pub fn clasificacion_path(id_lote: i64) -> String {
    format!("/clasific1?IdLote={id_lote}")
}

pub fn view_stock_path(id_lote: i64) -> String {
    format!("/viewstock?idLote={id_lote}")
}

pub fn estado_lote_path(id_lote: i64) -> String {
    format!("/getestadolote?idLote={id_lote}")
}

pub fn disable_estado_lote_path(id_estado: i64) -> String {
    format!("/api/estadolote/updateestado/{id_estado}")
}

pub fn disable_cliente_path(cliente_id: i64) -> String {
    format!("/updateestadocli?idCli={cliente_id}")
}

pub fn disable_producto_path(producto_id: i64) -> String {
    format!("/updateestadoprod?idProd={producto_id}")
}

pub fn detalles_venta_path(venta_id: i64) -> String {
    format!("/api/Ventas/DetallesVentaActivos/{venta_id}")
}

pub fn update_usuario_path(id: i64) -> String {
    format!("/api/usuarios/update/{id}")
}

pub fn usuario_enabled_path(id: i64, enabled: bool) -> String {
    if enabled { format!("/api/usuarios/enable/{id}") } else { format!("/api/usuarios/disable/{id}") }
}

pub fn info_lote_path(id_lote: i64) -> String {
    format!("/api/dashboard/infolote/{id_lote}")
}

pub fn produccion_series_path(id_lote: i64, period: Period) -> String {
    format!("/api/dashboard/produccion/{id_lote}/{}", period.as_path())
}

pub fn clasificacion_series_path(id_lote: i64, period: Period) -> String {
    format!("/api/dashboard/clasificacion/{id_lote}/{}", period.as_path())
}

// =============================================================================
// AUTH
// =============================================================================

/// Exchange credentials for a bearer token.
///
/// Sent without credentials; a rejected login is a normal `Status` error and
/// does not trigger the global redirect.
///
/// # Errors
///
/// Returns `ApiError::Decode` when the response carries no token.
pub async fn login(client: ApiClient, request: &LoginRequest) -> Result<String, ApiError> {
    let body = encode_body(Some(request))?;
    let text = client.execute(Method::Post, LOGIN_PATH, body, RequestAuth::Anonymous).await?;
    let resp: LoginResponse = decode_body(&text)?;
    resp.access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Decode("token no recibido".to_owned()))
}

// =============================================================================
// LOTES
// =============================================================================

pub async fn list_lotes(client: ApiClient, dados_de_baja: bool) -> Result<Vec<Lote>, ApiError> {
    list(client, &lotes_path(dados_de_baja)).await
}

pub async fn get_lote(client: ApiClient, id_lote: i64) -> Result<Option<Lote>, ApiError> {
    let lotes: Vec<Lote> = list(client, &lote_path(id_lote)).await?;
    Ok(lotes.into_iter().next())
}

pub async fn create_lote(client: ApiClient, payload: &LotePayload) -> Result<(), ApiError> {
    client.post("/postLote", payload).await
}

pub async fn update_lote(client: ApiClient, payload: &LotePayload) -> Result<(), ApiError> {
    client.put("/putLote", payload).await
}

/// Soft-delete a lote.
pub async fn delete_lote(client: ApiClient, id_lote: i64) -> Result<(), ApiError> {
    client.put(&delete_lote_path(id_lote), &json!({ "Estado": false })).await
}

/// Mark a lote dado de baja (`true`) or reactivate it (`false`).
pub async fn set_lote_baja(client: ApiClient, id_lote: i64, baja: bool) -> Result<(), ApiError> {
    client.put(&lote_baja_path(id_lote), &json!({ "estadoBaja": baja })).await
}

// =============================================================================
// CORRALES, RAZAS
// =============================================================================

pub async fn list_corrales(client: ApiClient) -> Result<Vec<Corral>, ApiError> {
    list(client, "/getcorral").await
}

pub async fn create_corral(client: ApiClient, payload: &CorralPayload) -> Result<(), ApiError> {
    client.post("/postcorral", payload).await
}

pub async fn update_corral(client: ApiClient, payload: &CorralPayload) -> Result<(), ApiError> {
    client.put("/putcorral", payload).await
}

pub async fn set_corral_estado(client: ApiClient, id_corral: i64, estado: bool) -> Result<(), ApiError> {
    client.put(&corral_estado_path(id_corral), &json!({ "estado": estado })).await
}

pub async fn list_razas(client: ApiClient) -> Result<Vec<Raza>, ApiError> {
    list(client, "/api/razaG/getrazaG").await
}

pub async fn create_raza(client: ApiClient, payload: &RazaPayload) -> Result<(), ApiError> {
    client.post("/api/razaG/postraza", payload).await
}

pub async fn update_raza(client: ApiClient, payload: &RazaPayload) -> Result<(), ApiError> {
    client.put("/api/razaG/putraza", payload).await
}

// =============================================================================
// PRODUCCION, CLASIFICACION, ESTADO
// =============================================================================

pub async fn list_produccion(client: ApiClient, id_lote: i64) -> Result<Vec<Produccion>, ApiError> {
    list(client, &produccion_path(id_lote)).await
}

pub async fn create_produccion(client: ApiClient, payload: &ProduccionPayload) -> Result<(), ApiError> {
    client.post("/postproduccion", payload).await
}

pub async fn update_produccion(client: ApiClient, payload: &ProduccionPayload) -> Result<(), ApiError> {
    client.put("/updproduccion", payload).await
}

pub async fn list_clasificacion(client: ApiClient, id_lote: i64) -> Result<Vec<Clasificacion>, ApiError> {
    list(client, &clasificacion_path(id_lote)).await
}

pub async fn create_clasificacion(client: ApiClient, payload: &ClasificacionPayload) -> Result<(), ApiError> {
    client.post("/postclasificacion", payload).await
}

pub async fn update_clasificacion(client: ApiClient, payload: &ClasificacionPayload) -> Result<(), ApiError> {
    client.put("/putclasificacion", payload).await
}

pub async fn view_stock(client: ApiClient, id_lote: i64) -> Result<Vec<StockLote>, ApiError> {
    list(client, &view_stock_path(id_lote)).await
}

pub async fn list_estado_lote(client: ApiClient, id_lote: i64) -> Result<Vec<EstadoLote>, ApiError> {
    list(client, &estado_lote_path(id_lote)).await
}

pub async fn create_estado_lote(client: ApiClient, payload: &EstadoLotePayload) -> Result<(), ApiError> {
    client.post("/postestadolote", payload).await
}

pub async fn update_estado_lote(client: ApiClient, payload: &EstadoLotePayload) -> Result<(), ApiError> {
    client.put("/putestadolote", payload).await
}

pub async fn disable_estado_lote(client: ApiClient, id_estado: i64) -> Result<(), ApiError> {
    client.put(&disable_estado_lote_path(id_estado), &json!({ "estado": false })).await
}

pub async fn list_etapas(client: ApiClient) -> Result<Vec<Etapa>, ApiError> {
    list(client, "/getetapas").await
}

// =============================================================================
// CLIENTES, PRODUCTOS, VENTAS
// =============================================================================

pub async fn list_clientes(client: ApiClient) -> Result<Vec<Cliente>, ApiError> {
    list(client, "/api/Ventas/ClientesActivos").await
}

pub async fn create_cliente(client: ApiClient, payload: &ClientePayload) -> Result<(), ApiError> {
    client.post("/api/Ventas/insertCliente", payload).await
}

pub async fn update_cliente(client: ApiClient, payload: &ClientePayload) -> Result<(), ApiError> {
    client.put("/api/Ventas/updCliente", payload).await
}

pub async fn disable_cliente(client: ApiClient, cliente_id: i64) -> Result<(), ApiError> {
    client.put(&disable_cliente_path(cliente_id), &json!({ "estado": false })).await
}

pub async fn list_productos(client: ApiClient) -> Result<Vec<Producto>, ApiError> {
    list(client, "/api/Ventas/ProductosActivos").await
}

pub async fn create_producto(client: ApiClient, payload: &ProductoPayload) -> Result<(), ApiError> {
    client.post("/api/Ventas/InsertarProducto", payload).await
}

pub async fn update_producto(client: ApiClient, payload: &ProductoPayload) -> Result<(), ApiError> {
    client.put("/api/Ventas/updProducto", payload).await
}

pub async fn disable_producto(client: ApiClient, producto_id: i64) -> Result<(), ApiError> {
    client.put(&disable_producto_path(producto_id), &json!({ "estado": false })).await
}

pub async fn list_ventas(client: ApiClient) -> Result<Vec<Venta>, ApiError> {
    list(client, "/api/Ventas/VentasActivas").await
}

pub async fn list_detalles(client: ApiClient, venta_id: i64) -> Result<Vec<DetalleVenta>, ApiError> {
    list(client, &detalles_venta_path(venta_id)).await
}

pub async fn create_venta(client: ApiClient, payload: &VentaPayload) -> Result<(), ApiError> {
    client.post("/api/Ventas/InsertarDetallesVenta", payload).await
}

pub async fn update_venta(client: ApiClient, payload: &VentaUpdatePayload) -> Result<(), ApiError> {
    client.put("/api/Ventas/ActualizarVenta", payload).await
}

pub async fn stock_huevos(client: ApiClient) -> Result<Vec<StockHuevos>, ApiError> {
    list(client, "/api/Ventas/stockhuevos").await
}

// =============================================================================
// USUARIOS
// =============================================================================

pub async fn list_usuarios(client: ApiClient) -> Result<Vec<Usuario>, ApiError> {
    list(client, "/api/usuarios/users").await
}

pub async fn list_roles(client: ApiClient) -> Result<Vec<RoleOption>, ApiError> {
    list(client, "/api/usuarios/roles").await
}

pub async fn register_usuario(client: ApiClient, payload: &UsuarioPayload) -> Result<(), ApiError> {
    client.post("/api/usuarios/register", payload).await
}

pub async fn update_usuario(client: ApiClient, id: i64, payload: &UsuarioPayload) -> Result<(), ApiError> {
    client.put(&update_usuario_path(id), payload).await
}

pub async fn set_usuario_enabled(client: ApiClient, id: i64, enabled: bool) -> Result<(), ApiError> {
    client.put_empty(&usuario_enabled_path(id, enabled)).await
}

// =============================================================================
// DASHBOARD
// =============================================================================

pub async fn info_lote(client: ApiClient, id_lote: i64) -> Result<InfoLote, ApiError> {
    let value = client.get::<Value>(&info_lote_path(id_lote)).await?;
    if value.is_null() {
        return Ok(InfoLote::default());
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn produccion_series(
    client: ApiClient,
    id_lote: i64,
    period: Period,
) -> Result<Vec<ProduccionPoint>, ApiError> {
    list(client, &produccion_series_path(id_lote, period)).await
}

pub async fn clasificacion_series(
    client: ApiClient,
    id_lote: i64,
    period: Period,
) -> Result<Vec<ClasificacionPoint>, ApiError> {
    list(client, &clasificacion_series_path(id_lote, period)).await
}
