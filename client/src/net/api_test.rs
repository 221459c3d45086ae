use super::*;

#[test]
fn lotes_path_selects_dados_de_baja() {
    assert_eq!(lotes_path(false), "/api/lotes");
    assert_eq!(lotes_path(true), "/api/lotes?dadosDeBaja=true");
}

#[test]
fn lote_paths_use_api_query_casing() {
    assert_eq!(lote_path(3), "/getlote?idLote=3");
    assert_eq!(delete_lote_path(3), "/updateestadolot?idlote=3");
    assert_eq!(lote_baja_path(3), "/api/lotes/putLoteBaja?idLote=3");
    assert_eq!(produccion_path(3), "/getproduccion?IdLote=3");
    assert_eq!(clasificacion_path(3), "/clasific1?IdLote=3");
    assert_eq!(view_stock_path(3), "/viewstock?idLote=3");
    assert_eq!(estado_lote_path(3), "/getestadolote?idLote=3");
}

#[test]
fn soft_delete_paths() {
    assert_eq!(corral_estado_path(5), "/updestadocorral?id=5");
    assert_eq!(disable_estado_lote_path(5), "/api/estadolote/updateestado/5");
    assert_eq!(disable_cliente_path(5), "/updateestadocli?idCli=5");
    assert_eq!(disable_producto_path(5), "/updateestadoprod?idProd=5");
}

#[test]
fn usuario_paths() {
    assert_eq!(update_usuario_path(9), "/api/usuarios/update/9");
    assert_eq!(usuario_enabled_path(9, true), "/api/usuarios/enable/9");
    assert_eq!(usuario_enabled_path(9, false), "/api/usuarios/disable/9");
}

#[test]
fn dashboard_paths_include_period() {
    assert_eq!(info_lote_path(2), "/api/dashboard/infolote/2");
    assert_eq!(produccion_series_path(2, Period::Semanal), "/api/dashboard/produccion/2/semanal");
    assert_eq!(clasificacion_series_path(2, Period::Mensual), "/api/dashboard/clasificacion/2/mensual");
    assert_eq!(detalles_venta_path(11), "/api/Ventas/DetallesVentaActivos/11");
}

#[test]
fn one_or_many_wraps_single_object() {
    let etapas: Vec<Etapa> = one_or_many(json!({ "idEtapa": 1, "nombre": "Postura" })).unwrap();
    assert_eq!(etapas.len(), 1);
    assert_eq!(etapas[0].nombre, "Postura");
}

#[test]
fn one_or_many_passes_arrays_and_null() {
    let etapas: Vec<Etapa> =
        one_or_many(json!([{ "idEtapa": 1 }, { "idEtapa": 2, "nombre": "Cría" }])).unwrap();
    assert_eq!(etapas.iter().map(|e| e.id_etapa).collect::<Vec<_>>(), vec![1, 2]);
    let empty: Vec<Etapa> = one_or_many(Value::Null).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn one_or_many_reports_bad_items() {
    let result: Result<Vec<Etapa>, _> = one_or_many(json!([{ "nombre": "sin id" }]));
    assert!(matches!(result, Err(ApiError::Decode(_))));
}
