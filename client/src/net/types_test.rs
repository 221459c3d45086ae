use super::*;
use serde_json::json;

// =============================================================
// Read models
// =============================================================

#[test]
fn lote_deserializes_camel_case_and_current_count() {
    let lote: Lote = serde_json::from_value(json!({
        "idLote": 4,
        "numLote": "L4",
        "cantidadG": 500,
        "cantidadGctual": 480,
        "idRaza": 2,
        "fechaAdq": "2024-03-01T00:00:00",
        "idCorral": 7,
        "estadoBaja": false
    }))
    .unwrap();
    assert_eq!(lote.id_lote, 4);
    assert_eq!(lote.cantidad_gctual, Some(480));
    assert_eq!(lote.id_corral, 7);
}

#[test]
fn lote_defaults_missing_fields() {
    let lote: Lote = serde_json::from_value(json!({ "idLote": 1 })).unwrap();
    assert_eq!(lote.num_lote, "");
    assert_eq!(lote.cantidad_g, 0);
    assert_eq!(lote.cantidad_gctual, None);
    assert!(!lote.estado_baja);
}

#[test]
fn estado_flags_default_to_active() {
    let corral: Corral = serde_json::from_value(json!({ "idCorral": 1, "numCorral": "C1" })).unwrap();
    assert!(corral.estado);
    let usuario: Usuario = serde_json::from_value(json!({ "id": 3, "nombreUser": "ana" })).unwrap();
    assert!(usuario.estado);
}

#[test]
fn numbers_tolerate_null_strings_and_whole_floats() {
    let prod: Produccion = serde_json::from_value(json!({
        "idProd": 9,
        "cantCajas": "3",
        "cantCartones": 2.0,
        "cantSueltos": null,
        "defectuosos": null
    }))
    .unwrap();
    assert_eq!(prod.cant_cajas, 3);
    assert_eq!(prod.cant_cartones, 2);
    assert_eq!(prod.cant_sueltos, 0);
    assert_eq!(prod.defectuosos, 0);
}

#[test]
fn fractional_count_is_rejected() {
    let result = serde_json::from_value::<Produccion>(json!({ "idProd": 1, "cantCajas": 1.5 }));
    assert!(result.is_err());
}

#[test]
fn venta_total_accepts_null_and_strings() {
    let venta: Venta = serde_json::from_value(json!({ "ventaId": 1, "clienteId": 2, "totalVenta": null })).unwrap();
    assert!(venta.total_venta.abs() < f64::EPSILON);
    let venta: Venta = serde_json::from_value(json!({ "ventaId": 1, "totalVenta": "12.5" })).unwrap();
    assert!((venta.total_venta - 12.5).abs() < f64::EPSILON);
}

#[test]
fn login_response_reads_access_token() {
    let resp: LoginResponse = serde_json::from_value(json!({ "accessToken": "a.b.c" })).unwrap();
    assert_eq!(resp.access_token.as_deref(), Some("a.b.c"));
    let resp: LoginResponse = serde_json::from_value(json!({})).unwrap();
    assert_eq!(resp.access_token, None);
}

// =============================================================
// Write payloads
// =============================================================

#[test]
fn produccion_payload_uses_pascal_case() {
    let payload = ProduccionPayload {
        id_prod: None,
        cant_cajas: 1,
        cant_cartones: 2,
        cant_sueltos: 3,
        id_lote: 4,
        defectuosos: Some(5),
        fecha_registro_p: Some("2024-05-01T00:00:00.000Z".to_owned()),
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "CantCajas": 1,
            "CantCartones": 2,
            "CantSueltos": 3,
            "IdLote": 4,
            "Defectuosos": 5,
            "FechaRegistroP": "2024-05-01T00:00:00.000Z"
        })
    );
}

#[test]
fn clasificacion_update_omits_fecha() {
    let payload = ClasificacionPayload {
        id: Some(8),
        tamano: "Grande".to_owned(),
        cajas: 1,
        cartones_extras: 0,
        huevos_sueltos: 4,
        id_prod: 2,
        fecha_cla_s: None,
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "Id": 8, "Tamano": "Grande", "Cajas": 1, "CartonesExtras": 0, "HuevosSueltos": 4, "IdProd": 2 })
    );
}

#[test]
fn venta_payload_nests_venta_and_detalles() {
    let payload = VentaPayload {
        venta: NuevaVenta { cliente_id: 3, fecha_venta: "2024-06-01".to_owned() },
        detalles_venta: vec![DetalleVenta {
            producto_id: 1,
            tipo_empaque: "Cajas".to_owned(),
            tamano_huevo: "Mediano".to_owned(),
            cantidad_vendida: 2,
            precio_unitario: 10.0,
            total: Some(20.0),
        }],
    };
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["venta"]["clienteId"], json!(3));
    assert_eq!(value["detallesVenta"][0]["tamanoHuevo"], json!("Mediano"));
    assert!(value["detallesVenta"][0].get("total").is_none());
}

#[test]
fn usuario_payload_omits_blank_password() {
    let payload = UsuarioPayload {
        nombre_user: "ana".to_owned(),
        email: "ana@granja.test".to_owned(),
        role_id: 2,
        contrasena: None,
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({ "nombreUser": "ana", "email": "ana@granja.test", "roleId": 2 })
    );
}

#[test]
fn period_path_segments() {
    assert_eq!(Period::default().as_path(), "diario");
    assert_eq!(Period::from_path("mensual"), Some(Period::Mensual));
    assert_eq!(Period::from_path("anual"), None);
}
