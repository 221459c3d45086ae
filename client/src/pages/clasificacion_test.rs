use super::*;

fn row(id: i64, tamano: &str, clasificado: &str, producido: &str) -> Clasificacion {
    Clasificacion {
        id,
        tamano: tamano.to_owned(),
        cajas: 1,
        cartones_extras: 0,
        huevos_sueltos: 0,
        total_unitaria: 360,
        id_prod: 1,
        fecha_cla_s: Some(clasificado.to_owned()),
        fecha_registro_p: Some(producido.to_owned()),
    }
}

fn fixtures() -> Vec<Clasificacion> {
    vec![
        row(1, "Grande", "2024-05-02", "2024-05-01"),
        row(2, "Mediano", "2024-05-03", "2024-05-01"),
        row(3, "Grande", "2024-05-10", "2024-05-09"),
    ]
}

fn ids(groups: &[(String, Vec<Clasificacion>)]) -> Vec<(String, Vec<i64>)> {
    groups.iter().map(|(label, rows)| (label.clone(), rows.iter().map(|r| r.id).collect())).collect()
}

#[test]
fn groups_by_production_date_newest_first() {
    let groups = clasificacion_groups(&fixtures(), "", DateRange::default(), DateField::Clasificacion, SortOrder::Desc);
    assert_eq!(
        ids(&groups),
        vec![("09/05/2024".to_owned(), vec![3]), ("01/05/2024".to_owned(), vec![2, 1])]
    );
}

#[test]
fn size_search_is_case_insensitive() {
    let groups = clasificacion_groups(&fixtures(), "grande", DateRange::default(), DateField::Clasificacion, SortOrder::Asc);
    assert_eq!(ids(&groups), vec![("01/05/2024".to_owned(), vec![1]), ("09/05/2024".to_owned(), vec![3])]);
}

#[test]
fn range_applies_to_selected_date_field() {
    let range = DateRange::from_inputs("2024-05-02", "2024-05-03");
    let by_clasificacion = clasificacion_groups(&fixtures(), "", range, DateField::Clasificacion, SortOrder::Asc);
    assert_eq!(ids(&by_clasificacion), vec![("01/05/2024".to_owned(), vec![1, 2])]);

    let by_produccion = clasificacion_groups(&fixtures(), "", range, DateField::Produccion, SortOrder::Asc);
    assert!(by_produccion.is_empty());
}

#[test]
fn create_requires_classification_date() {
    let errors = validate_clasificacion(None, "Grande", "1", "0", "0", "4", "").expect_err("invalid");
    assert!(errors.get("fecha_cla_s").is_some());
}

#[test]
fn update_omits_classification_date() {
    let payload = validate_clasificacion(Some(9), "Grande", "1", "2", "3", "4", "").expect("valid");
    assert_eq!(payload.id, Some(9));
    assert_eq!(payload.fecha_cla_s, None);
    assert_eq!(payload.huevos_sueltos, 3);
}

#[test]
fn production_must_be_selected() {
    let errors = validate_clasificacion(None, "Grande", "1", "0", "0", "", "2024-05-01").expect_err("invalid");
    assert_eq!(errors.get("id_prod").as_deref(), Some("Este campo es obligatorio."));
}
