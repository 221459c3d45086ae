use super::*;

fn inputs(cajas: &str, cartones: &str, sueltos: &str, defectuosos: &str, fecha: &str) -> ProduccionInputs {
    ProduccionInputs {
        cant_cajas: cajas.to_owned(),
        cant_cartones: cartones.to_owned(),
        cant_sueltos: sueltos.to_owned(),
        defectuosos: defectuosos.to_owned(),
        fecha_registro_p: fecha.to_owned(),
    }
}

#[test]
fn valid_record_builds_payload_with_timestamp() {
    let payload = inputs("2", "11", "29", "3", "2024-05-01").validate(None, 7).expect("valid");
    assert_eq!(payload.id_lote, 7);
    assert_eq!(payload.id_prod, None);
    assert_eq!(payload.cant_cartones, 11);
    assert_eq!(payload.defectuosos, Some(3));
    assert_eq!(payload.fecha_registro_p.as_deref(), Some("2024-05-01T00:00:00.000Z"));
}

#[test]
fn cartones_and_sueltos_are_bounded() {
    let errors = inputs("0", "12", "30", "30", "2024-05-01").validate(None, 1).expect_err("invalid");
    assert_eq!(errors.get("cant_cartones").as_deref(), Some("No puede ser mayor a 11."));
    assert_eq!(errors.get("cant_sueltos").as_deref(), Some("No puede ser mayor a 29."));
    assert_eq!(errors.get("defectuosos").as_deref(), Some("No puede ser mayor a 29."));
    assert_eq!(errors.get("cant_cajas"), None);
}

#[test]
fn defectuosos_and_fecha_are_required() {
    let errors = ProduccionInputs::default().validate(None, 1).expect_err("invalid");
    assert!(errors.get("defectuosos").is_some());
    assert!(errors.get("fecha_registro_p").is_some());
    assert_eq!(errors.get("cant_cajas"), None);
}

#[test]
fn edit_prefills_from_record() {
    let record = Produccion {
        id_prod: 5,
        cant_cajas: 1,
        cant_cartones: 2,
        cant_sueltos: 3,
        defectuosos: 4,
        cant_total: 393,
        fecha_registro_p: "2024-05-02T00:00:00".to_owned(),
        id_lote: 1,
    };
    let prefilled = ProduccionInputs::from_produccion(&record);
    assert_eq!(prefilled.fecha_registro_p, "2024-05-02");
    assert_eq!(prefilled.validate(Some(5), 1).map(|p| p.id_prod), Ok(Some(5)));
}
