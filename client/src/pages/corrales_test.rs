use super::*;

fn corral(num: &str) -> Corral {
    Corral {
        id_corral: 1,
        num_corral: num.to_owned(),
        capacidad: 0,
        alto: 0,
        ancho: 0,
        largo: 0,
        agua: false,
        comederos: 0,
        bebederos: 0,
        ponederos: 0,
        estado: true,
    }
}

fn nums(corrales: &[Corral]) -> Vec<&str> {
    corrales.iter().map(|c| c.num_corral.as_str()).collect()
}

#[test]
fn sort_is_numeric_not_lexical() {
    let mut rows = vec![corral("10"), corral("2"), corral("A"), corral("1")];
    sort_corrales(&mut rows, SortOrder::Asc);
    assert_eq!(nums(&rows), vec!["1", "2", "10", "A"]);
    sort_corrales(&mut rows, SortOrder::Desc);
    assert_eq!(nums(&rows), vec!["10", "2", "1", "A"]);
}

#[test]
fn in_use_ignores_lotes_dados_de_baja() {
    let mut lote = Lote {
        id_lote: 1,
        num_lote: "L1".to_owned(),
        cantidad_g: 10,
        cantidad_gctual: None,
        id_raza: 1,
        fecha_adq: String::new(),
        id_corral: 4,
        estado_baja: false,
    };
    assert!(corral_in_use(std::slice::from_ref(&lote), 4));
    assert!(!corral_in_use(std::slice::from_ref(&lote), 5));
    lote.estado_baja = true;
    assert!(!corral_in_use(&[lote], 4));
}

#[test]
fn validate_requires_numeric_fields() {
    let inputs = CorralInputs { num_corral: "3".to_owned(), capacidad: "x".to_owned(), ..CorralInputs::default() };
    let errors = inputs.validate(None, true).expect_err("invalid");
    assert_eq!(errors.get("capacidad").as_deref(), Some("Debe ser un número válido."));
    assert_eq!(errors.get("alto").as_deref(), Some("Este campo es obligatorio."));
    assert_eq!(errors.get("num_corral"), None);
}

#[test]
fn validate_keeps_id_and_estado() {
    let source = Corral { agua: true, capacidad: 50, ..corral("7") };
    let payload = CorralInputs::from_corral(&source).validate(Some(3), false).expect("valid");
    assert_eq!(payload.id_corral, Some(3));
    assert!(!payload.estado);
    assert!(payload.agua);
    assert_eq!(payload.capacidad, 50);
}
