use super::*;

fn corral(id: i64, estado: bool) -> Corral {
    Corral {
        id_corral: id,
        num_corral: format!("C{id}"),
        capacidad: 100,
        alto: 2,
        ancho: 5,
        largo: 10,
        agua: true,
        comederos: 2,
        bebederos: 2,
        ponederos: 4,
        estado,
    }
}

fn lote(id: i64, id_corral: i64) -> Lote {
    Lote {
        id_lote: id,
        num_lote: format!("L{id}"),
        cantidad_g: 100,
        cantidad_gctual: None,
        id_raza: 1,
        fecha_adq: "2024-01-15T00:00:00".to_owned(),
        id_corral,
        estado_baja: false,
    }
}

fn valid_inputs() -> LoteInputs {
    LoteInputs {
        num_lote: "L7".to_owned(),
        cantidad_g: "250".to_owned(),
        id_raza: "2".to_owned(),
        fecha_adq: "2024-04-01".to_owned(),
        id_corral: "3".to_owned(),
    }
}

#[test]
fn valid_inputs_build_payload() {
    let payload = valid_inputs().validate(Some(9)).expect("valid");
    assert_eq!(payload.id_lote, Some(9));
    assert_eq!(payload.num_lote, "L7");
    assert_eq!(payload.cantidad_g, 250);
    assert_eq!(payload.fecha_adq, "2024-04-01");
}

#[test]
fn invalid_inputs_report_each_field() {
    let inputs = LoteInputs { num_lote: "L 7".to_owned(), cantidad_g: "0".to_owned(), ..LoteInputs::default() };
    let errors = inputs.validate(None).expect_err("invalid");
    assert!(errors.get("num_lote").is_some());
    assert_eq!(errors.get("cantidad_g").as_deref(), Some("El campo debe ser un número positivo."));
    assert_eq!(errors.get("id_raza").as_deref(), Some("Este campo es obligatorio."));
    assert!(errors.get("fecha_adq").is_some());
    assert!(errors.get("id_corral").is_some());
}

#[test]
fn from_lote_prefills_date_input() {
    let inputs = LoteInputs::from_lote(&lote(1, 3));
    assert_eq!(inputs.fecha_adq, "2024-01-15");
    assert_eq!(inputs.id_corral, "3");
}

#[test]
fn available_corrales_skip_disabled_and_occupied() {
    let corrales = vec![corral(1, true), corral(2, true), corral(3, false)];
    let lotes = vec![lote(10, 1)];
    let ids: Vec<_> = available_corrales(&corrales, &lotes, None).into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["2"]);
}

#[test]
fn available_corrales_keep_current_lote_corral() {
    let corrales = vec![corral(1, true), corral(2, true)];
    let lotes = vec![lote(10, 1)];
    assert_eq!(available_corrales(&corrales, &lotes, Some(10)).len(), 2);
}

#[test]
fn raza_name_falls_back_to_dash() {
    assert_eq!(raza_name(&[], 4), "-");
}
