use super::*;

fn venta(id: i64, cliente_id: i64, fecha: &str) -> Venta {
    Venta { venta_id: id, cliente_id, fecha_venta: fecha.to_owned(), total_venta: 10.0 }
}

fn line() -> DetalleInputs {
    DetalleInputs {
        producto_id: "3".to_owned(),
        tipo_empaque: "Caja".to_owned(),
        tamano_huevo: "Grande".to_owned(),
        cantidad: "2".to_owned(),
        precio: "12,50".to_owned(),
    }
}

#[test]
fn filter_by_cliente_and_range() {
    let ventas = vec![venta(1, 1, "2024-03-01"), venta(2, 2, "2024-03-05"), venta(3, 1, "2024-04-01")];
    let march = DateRange::from_inputs("2024-03-01", "2024-03-31");

    let ids: Vec<_> = filter_ventas(&ventas, Some(1), march).iter().map(|v| v.venta_id).collect();
    assert_eq!(ids, vec![1]);

    let all = filter_ventas(&ventas, None, DateRange::default());
    assert_eq!(all.len(), 3);
}

#[test]
fn detalle_line_parses_comma_price() {
    let detalle = line().validate().expect("valid line");
    assert_eq!(detalle.producto_id, 3);
    assert_eq!(detalle.cantidad_vendida, 2);
    assert!((detalle.precio_unitario - 12.5).abs() < f64::EPSILON);
    assert_eq!(detalle.total, None);
}

#[test]
fn detalle_line_rejects_zero_quantity_and_price() {
    let bad = DetalleInputs { cantidad: "0".to_owned(), precio: "0".to_owned(), ..line() };
    let errors = bad.validate().expect_err("invalid");
    assert!(errors.get("cantidad").is_some());
    assert_eq!(errors.get("precio").as_deref(), Some("El campo debe ser un número positivo."));
}

#[test]
fn venta_validation_reports_each_line() {
    let inputs = VentaInputs {
        cliente_id: "1".to_owned(),
        fecha_venta: "2024-05-02".to_owned(),
        lines: vec![line(), DetalleInputs::default()],
    };
    let errors = inputs.validate().expect_err("second line is blank");
    assert!(errors.venta.is_empty());
    assert_eq!(errors.line(0, "producto_id"), None);
    assert!(errors.line(1, "producto_id").is_some());
    assert!(errors.line(1, "tipo_empaque").is_some());
}

#[test]
fn valid_venta_builds_create_and_update_payloads() {
    let inputs = VentaInputs { cliente_id: "4".to_owned(), fecha_venta: "2024-05-02".to_owned(), lines: vec![line()] };
    let payload = inputs.validate().expect("valid");
    assert_eq!(payload.venta.cliente_id, 4);
    assert_eq!(payload.venta.fecha_venta, "2024-05-02");
    assert_eq!(payload.detalles_venta.len(), 1);

    let update = update_payload(9, payload);
    assert_eq!(update.venta_id, 9);
    assert_eq!(update.cliente_id, 4);
}

#[test]
fn last_line_cannot_be_removed() {
    let mut inputs = VentaInputs::blank();
    assert_eq!(inputs.remove_line(0), Err(LAST_LINE));
    inputs.lines.push(line());
    assert_eq!(inputs.remove_line(0), Ok(()));
    assert_eq!(inputs.lines, vec![line()]);
}

#[test]
fn editing_prefills_from_detalles() {
    let detalle = line().validate().expect("valid");
    let inputs = VentaInputs::from_venta(&venta(1, 7, "2024-05-02T00:00:00"), &[detalle]);
    assert_eq!(inputs.cliente_id, "7");
    assert_eq!(inputs.fecha_venta, "2024-05-02");
    assert_eq!(inputs.lines[0].precio, "12.5");
    assert_eq!(VentaInputs::from_venta(&venta(1, 7, ""), &[]).lines.len(), 1);
}

#[test]
fn money_is_quetzales() {
    assert_eq!(format_money(3.5), "Q 3.50");
}
