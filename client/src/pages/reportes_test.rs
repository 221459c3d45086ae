use super::*;

fn fixtures() -> (Vec<Venta>, HashMap<i64, Vec<DetalleVenta>>, Vec<Cliente>, Vec<Producto>) {
    let ventas = vec![
        Venta { venta_id: 1, cliente_id: 10, fecha_venta: "2024-05-03".to_owned(), total_venta: 20.0 },
        Venta { venta_id: 2, cliente_id: 11, fecha_venta: "2024-06-10".to_owned(), total_venta: 30.0 },
    ];
    let clientes =
        vec![Cliente { cliente_id: 10, nombre_cliente: "Tienda Sol".to_owned(), direccion: String::new(), telefono: String::new() }];
    (ventas, HashMap::new(), clientes, Vec::new())
}

#[test]
fn kind_keys_round_trip_and_default_to_general() {
    for kind in ReportKind::ALL {
        assert_eq!(ReportKind::from_key(kind.key()), kind);
    }
    assert_eq!(ReportKind::from_key("otro"), ReportKind::General);
}

#[test]
fn by_cliente_without_selection_is_empty() {
    let (ventas, detalles, clientes, productos) = fixtures();
    let data = SalesData { ventas: &ventas, detalles: &detalles, clientes: &clientes, productos: &productos };
    assert!(build_report(data, ReportKind::PorCliente, None, DateRange::default()).is_empty());

    let rows = build_report(data, ReportKind::PorCliente, Some(10), DateRange::default());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].cliente, "Tienda Sol");
}

#[test]
fn by_fecha_applies_range_and_general_ignores_it() {
    let (ventas, detalles, clientes, productos) = fixtures();
    let data = SalesData { ventas: &ventas, detalles: &detalles, clientes: &clientes, productos: &productos };
    let may = DateRange::from_inputs("2024-05-01", "2024-05-31");
    let rows = build_report(data, ReportKind::PorFecha, None, may);
    assert_eq!(rows.iter().map(|r| r.venta_id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(build_report(data, ReportKind::General, None, may).len(), 2);
}
