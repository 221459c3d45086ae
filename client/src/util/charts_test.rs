use super::*;

fn clas(fecha: &str, tamano: &str, total: i64) -> ClasificacionPoint {
    ClasificacionPoint { fecha_registro: fecha.to_owned(), tamano: tamano.to_owned(), total_unitaria: total }
}

fn estado(id: i64, fecha: &str, cantidad: i64, bajas: i64) -> EstadoLote {
    EstadoLote {
        id_estado: id,
        id_lote: 1,
        fecha_registro: fecha.to_owned(),
        cantidad_g: cantidad,
        bajas,
        semana: 1,
        id_etapa: 1,
        descripcion: None,
    }
}

#[test]
fn produccion_chart_has_two_series() {
    let points = vec![
        ProduccionPoint { fecha_registro: "2024-05-01".to_owned(), produccion: 100, defectuosos: 3 },
        ProduccionPoint { fecha_registro: "2024-05-02".to_owned(), produccion: 120, defectuosos: 1 },
    ];
    let chart = produccion_chart(&points);
    assert_eq!(chart.labels, vec!["01/05/2024", "02/05/2024"]);
    assert_eq!(chart.series[0].values, vec![100, 120]);
    assert_eq!(chart.series[1].label, "Defectuosos");
    assert_eq!(chart.series[1].values, vec![3, 1]);
}

#[test]
fn non_date_labels_pass_through() {
    let points = vec![ProduccionPoint { fecha_registro: "Semana 5".to_owned(), produccion: 1, defectuosos: 0 }];
    assert_eq!(produccion_chart(&points).labels, vec!["Semana 5"]);
}

#[test]
fn clasificacion_chart_uses_fixed_size_order_and_zero_fill() {
    let points = vec![
        clas("2024-05-02", "Grande", 40),
        clas("2024-05-01", "Pigui", 5),
        clas("2024-05-02", "Pigui", 7),
    ];
    let chart = clasificacion_chart(&points);
    assert_eq!(chart.labels, vec!["02/05/2024", "01/05/2024"]);
    let labels: Vec<_> = chart.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, SIZE_CATEGORIES.to_vec());
    assert_eq!(chart.series[0].values, vec![7, 5]);
    assert_eq!(chart.series[3].values, vec![40, 0]);
    assert_eq!(chart.series[4].values, vec![0, 0]);
}

#[test]
fn clasificacion_chart_ignores_unknown_sizes() {
    let chart = clasificacion_chart(&[clas("2024-05-01", "Jumbo", 9)]);
    assert!(chart.series.iter().all(|s| s.values == vec![0]));
}

#[test]
fn estado_chart_sorts_oldest_first() {
    let chart = estado_chart(&[estado(2, "2024-05-08", 480, 20), estado(1, "2024-05-01", 500, 0)]);
    assert_eq!(chart.labels, vec!["01/05/2024", "08/05/2024"]);
    assert_eq!(chart.series[0].values, vec![500, 480]);
    assert_eq!(chart.series[1].values, vec![0, 20]);
}

#[test]
fn chart_max_never_zero() {
    assert_eq!(chart_max(&ChartData::default()), 1);
    let chart = produccion_chart(&[ProduccionPoint { fecha_registro: String::new(), produccion: 0, defectuosos: 0 }]);
    assert_eq!(chart_max(&chart), 1);
}

#[test]
fn polyline_points_scale_into_box() {
    assert_eq!(polyline_points(&[0, 50, 100], 200.0, 100.0, 100), "0.0,100.0 100.0,50.0 200.0,0.0");
}

#[test]
fn polyline_single_point_is_centered() {
    assert_eq!(polyline_points(&[10], 200.0, 100.0, 10), "100.0,0.0");
    assert_eq!(polyline_points(&[], 200.0, 100.0, 10), "");
}
