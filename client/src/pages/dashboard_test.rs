use super::*;

fn lote(id: i64) -> Lote {
    Lote {
        id_lote: id,
        num_lote: format!("L{id}"),
        cantidad_g: 100,
        cantidad_gctual: None,
        id_raza: 1,
        fecha_adq: "2024-01-01".to_owned(),
        id_corral: 1,
        estado_baja: false,
    }
}

#[test]
fn pick_lote_defaults_to_first() {
    assert_eq!(pick_lote(&[lote(4), lote(2)], None), Some(4));
    assert_eq!(pick_lote(&[], None), None);
}

#[test]
fn pick_lote_keeps_listed_selection() {
    assert_eq!(pick_lote(&[lote(4), lote(2)], Some(2)), Some(2));
    assert_eq!(pick_lote(&[lote(4), lote(2)], Some(9)), Some(4));
}

#[test]
fn missing_counts_read_not_available() {
    assert_eq!(or_not_available(Some(12)), "12");
    assert_eq!(or_not_available(None), "No disponible");
}
