use super::*;

fn venta(id: i64, cliente_id: i64, fecha: &str, total: f64) -> Venta {
    Venta { venta_id: id, cliente_id, fecha_venta: fecha.to_owned(), total_venta: total }
}

fn detalle(producto_id: i64, cantidad: i64, precio: f64) -> DetalleVenta {
    DetalleVenta {
        producto_id,
        tipo_empaque: "Cajas".to_owned(),
        tamano_huevo: "Grande".to_owned(),
        cantidad_vendida: cantidad,
        precio_unitario: precio,
        total: None,
    }
}

fn fixtures() -> (Vec<Venta>, HashMap<i64, Vec<DetalleVenta>>, Vec<Cliente>, Vec<Producto>) {
    let ventas = vec![
        venta(1, 10, "2024-05-03T00:00:00", 50.0),
        venta(2, 11, "2024-05-01T00:00:00", 0.0),
        venta(3, 99, "2024-06-01T00:00:00", 5.0),
    ];
    let mut detalles = HashMap::new();
    detalles.insert(1, vec![detalle(100, 5, 10.0)]);
    detalles.insert(2, vec![detalle(100, 2, 7.5), detalle(404, 1, 1.0)]);
    let clientes = vec![
        Cliente { cliente_id: 10, nombre_cliente: "Tienda Sol".to_owned(), direccion: String::new(), telefono: String::new() },
        Cliente { cliente_id: 11, nombre_cliente: "Mercado Luna".to_owned(), direccion: String::new(), telefono: String::new() },
    ];
    let productos =
        vec![Producto { producto_id: 100, nombre_producto: "Huevo".to_owned(), descripcion: String::new() }];
    (ventas, detalles, clientes, productos)
}

#[test]
fn general_report_sorts_by_date_and_resolves_names() {
    let (ventas, detalles, clientes, productos) = fixtures();
    let data = SalesData { ventas: &ventas, detalles: &detalles, clientes: &clientes, productos: &productos };
    let rows = general_report(data);
    assert_eq!(rows.iter().map(|r| r.venta_id).collect::<Vec<_>>(), vec![2, 1, 3]);
    assert_eq!(rows[0].cliente, "Mercado Luna");
    assert_eq!(rows[0].fecha, "01/05/2024");
    assert_eq!(rows[2].cliente, UNKNOWN);
    assert_eq!(rows[0].detalles[1].producto, UNKNOWN);
}

#[test]
fn zero_total_falls_back_to_detalle_sum() {
    let (ventas, detalles, clientes, productos) = fixtures();
    let data = SalesData { ventas: &ventas, detalles: &detalles, clientes: &clientes, productos: &productos };
    let rows = general_report(data);
    assert!((rows[0].total - 16.0).abs() < 1e-9);
    assert!((rows[1].total - 50.0).abs() < 1e-9);
}

#[test]
fn report_by_cliente_filters() {
    let (ventas, detalles, clientes, productos) = fixtures();
    let data = SalesData { ventas: &ventas, detalles: &detalles, clientes: &clientes, productos: &productos };
    let rows = report_by_cliente(data, 10);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].venta_id, 1);
}

#[test]
fn report_by_date_filters_inclusive_range() {
    let (ventas, detalles, clientes, productos) = fixtures();
    let data = SalesData { ventas: &ventas, detalles: &detalles, clientes: &clientes, productos: &productos };
    let rows = report_by_date(data, DateRange::from_inputs("2024-05-01", "2024-05-31"));
    assert_eq!(rows.iter().map(|r| r.venta_id).collect::<Vec<_>>(), vec![2, 1]);
    assert!((grand_total(&rows) - 66.0).abs() < 1e-9);
}

#[test]
fn detalle_total_multiplies_quantity_and_price() {
    assert!((detalle_total(&detalle(1, 3, 2.5)) - 7.5).abs() < 1e-9);
    assert_eq!(money(7.5), "7.50");
}

#[test]
fn lote_report_sums_history() {
    let lote = Lote {
        id_lote: 1,
        num_lote: "L1".to_owned(),
        cantidad_g: 500,
        cantidad_gctual: None,
        id_raza: 1,
        fecha_adq: "2024-01-10T00:00:00".to_owned(),
        id_corral: 1,
        estado_baja: false,
    };
    let produccion = vec![
        Produccion {
            id_prod: 1,
            cant_cajas: 1,
            cant_cartones: 0,
            cant_sueltos: 0,
            defectuosos: 2,
            cant_total: 360,
            fecha_registro_p: "2024-02-01".to_owned(),
            id_lote: 1,
        },
        Produccion {
            id_prod: 2,
            cant_cajas: 0,
            cant_cartones: 1,
            cant_sueltos: 4,
            defectuosos: 1,
            cant_total: 34,
            fecha_registro_p: "2024-02-02".to_owned(),
            id_lote: 1,
        },
    ];
    let clasificacion = vec![Clasificacion {
        id: 1,
        tamano: "Mediano".to_owned(),
        cajas: 1,
        cartones_extras: 0,
        huevos_sueltos: 0,
        total_unitaria: 360,
        id_prod: 1,
        fecha_cla_s: None,
        fecha_registro_p: None,
    }];
    let estados = vec![EstadoLote {
        id_estado: 1,
        id_lote: 1,
        fecha_registro: "2024-02-01".to_owned(),
        cantidad_g: 490,
        bajas: 10,
        semana: 3,
        id_etapa: 1,
        descripcion: None,
    }];

    let report = lote_report(&lote, &produccion, &clasificacion, &estados);

    assert_eq!(report.fecha_adq, "10/01/2024");
    assert_eq!(report.total_producido, 394);
    assert_eq!(report.total_defectuosos, 3);
    assert_eq!(report.total_bajas, 10);
    assert_eq!(report.gallinas_actuales, 490);
    assert_eq!(report.clasificado[2], ("Mediano".to_owned(), 360));
    assert_eq!(report.clasificado[0], ("Pigui".to_owned(), 0));
    assert_eq!(report.registros_produccion, 2);
}
