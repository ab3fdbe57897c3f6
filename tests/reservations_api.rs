//! Reservation lifecycle flows: creation with derived price, listing,
//! updates, the one-way cancellation and the documented absence of
//! overlap exclusion.

mod common;

use axum::http::StatusCode;
use common::{
    build_test_app, create_court, delete, get, patch, post_json, put_json, register_admin,
    register_player, tomorrow,
};
use serde_json::{json, Value};

async fn reservar(
    app: &axum::Router,
    token: &str,
    cancha: &str,
    hora_inicio: &str,
    duracion: f64,
) -> (StatusCode, Value) {
    post_json(
        app,
        "/api/reservas",
        Some(token),
        json!({
            "cancha": cancha,
            "fecha": tomorrow(),
            "horaInicio": hora_inicio,
            "duracion": duracion,
            "participantes": "10",
            "metodoPago": "efectivo",
        }),
    )
    .await
}

#[tokio::test]
async fn reserva_deriva_precio_y_hora_fin() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let jugador = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (status, body) = reservar(&app, &jugador, &cancha, "10:00", 2.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let data = &body["data"];
    assert_eq!(data["precio"], 40000.0);
    assert_eq!(data["precioFormateado"], "$ 40.000");
    assert_eq!(data["horaFin"], "12:00");
    assert_eq!(data["estado"], "completada");
    assert_eq!(data["duracionFormateada"], "2 horas");
    assert_eq!(data["metodoPagoFormateado"], "Efectivo");
    assert_eq!(data["cancha"]["nombre"], "Cancha A");
    assert_eq!(data["usuario"]["email"], "ana@example.com");
}

#[tokio::test]
async fn precio_explicito_no_se_deriva() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let jugador = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (status, body) = post_json(
        &app,
        "/api/reservas",
        Some(&jugador),
        json!({
            "cancha": cancha,
            "fecha": tomorrow(),
            "horaInicio": "10:00",
            "duracion": 1.0,
            "participantes": "5",
            "metodoPago": "nequi",
            "precio": 12345,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["precio"], 12345.0);
}

#[tokio::test]
async fn cancha_inexistente_o_no_disponible_rechaza_la_reserva() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let jugador = register_player(&app, "ana@example.com").await;

    let (status, body) = reservar(
        &app,
        &jugador,
        "00000000-0000-0000-0000-000000000000",
        "10:00",
        1.0,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "La cancha no está disponible");

    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;
    put_json(
        &app,
        &format!("/api/canchas/{cancha}"),
        Some(&admin),
        json!({ "estado": "mantenimiento" }),
    )
    .await;
    let (status, _) = reservar(&app, &jugador, &cancha, "10:00", 1.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fechas_pasadas_y_cruce_de_medianoche_se_rechazan() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let jugador = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let ayer = (chrono::Local::now().date_naive() - chrono::Duration::days(1)).to_string();
    let (status, _) = post_json(
        &app,
        "/api/reservas",
        Some(&jugador),
        json!({
            "cancha": cancha,
            "fecha": ayer,
            "horaInicio": "10:00",
            "duracion": 1.0,
            "participantes": "5",
            "metodoPago": "efectivo",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 23:00 + 2h cruza la medianoche.
    let (status, _) = reservar(&app, &jugador, &cancha, "23:00", 2.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn la_reserva_puede_terminar_exactamente_a_medianoche() {
    // Las reservas no obedecen el horario de funcionamiento de las
    // ventanas (06:00–23:00): solo el límite del día.
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let jugador = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (status, body) = reservar(&app, &jugador, &cancha, "22:00", 2.0).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["horaFin"], "24:00");
}

#[tokio::test]
async fn dos_usuarios_pueden_reservar_el_mismo_turno() {
    // Sin exclusión de solapamiento: comportamiento documentado.
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let ana = register_player(&app, "ana@example.com").await;
    let benito = register_player(&app, "benito@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (status, _) = reservar(&app, &ana, &cancha, "10:00", 2.0).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = reservar(&app, &benito, &cancha, "10:00", 2.0).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn mis_reservas_ordenadas_por_fecha_y_hora_descendente() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let jugador = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    reservar(&app, &jugador, &cancha, "08:00", 1.0).await;
    reservar(&app, &jugador, &cancha, "18:00", 1.0).await;

    let (status, body) = get(&app, "/api/reservas/mis-reservas", Some(&jugador)).await;
    assert_eq!(status, StatusCode::OK);
    let horas: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["horaInicio"].as_str().unwrap())
        .collect();
    assert_eq!(horas, vec!["18:00", "08:00"]);
}

#[tokio::test]
async fn el_admin_lista_las_reservas_de_sus_canchas() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let otro = register_admin(&app, "otro@example.com").await;
    let jugador = register_player(&app, "ana@example.com").await;

    let propia = create_court(&app, &admin, "Propia", 20000).await;
    let ajena = create_court(&app, &otro, "Ajena", 20000).await;
    reservar(&app, &jugador, &propia, "10:00", 1.0).await;
    reservar(&app, &jugador, &ajena, "10:00", 1.0).await;

    let (status, body) = get(&app, "/api/reservas/mis-canchas", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let reservas = body["data"].as_array().unwrap();
    assert_eq!(reservas.len(), 1);
    assert_eq!(reservas[0]["cancha"]["nombre"], "Propia");

    let (status, _) = get(&app, "/api/reservas/mis-canchas", Some(&jugador)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn actualizar_reserva_respeta_propiedad_y_rol() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let ana = register_player(&app, "ana@example.com").await;
    let benito = register_player(&app, "benito@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (_, body) = reservar(&app, &ana, &cancha, "10:00", 2.0).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Otro jugador no puede tocarla.
    let (status, _) = put_json(
        &app,
        &format!("/api/reservas/{id}"),
        Some(&benito),
        json!({ "horaInicio": "11:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // La dueña sí.
    let (status, body) = put_json(
        &app,
        &format!("/api/reservas/{id}"),
        Some(&ana),
        json!({ "horaInicio": "11:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["horaInicio"], "11:00");
    assert_eq!(body["data"]["horaFin"], "13:00");
    // El precio no se recalcula al actualizar.
    assert_eq!(body["data"]["precio"], 40000.0);

    // Cualquier admin también, aunque la cancha no sea suya.
    let (status, _) = put_json(
        &app,
        &format!("/api/reservas/{id}"),
        Some(&admin),
        json!({ "participantes": "5" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn actualizar_valida_el_registro_fusionado() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let ana = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (_, body) = reservar(&app, &ana, &cancha, "22:00", 2.0).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // 23:00 con las 2h ya guardadas cruzaría la medianoche.
    let (status, _) = put_json(
        &app,
        &format!("/api/reservas/{id}"),
        Some(&ana),
        json!({ "horaInicio": "23:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cambiar_de_cancha_repite_el_control_de_disponibilidad() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let ana = register_player(&app, "ana@example.com").await;
    let origen = create_court(&app, &admin, "Origen", 20000).await;
    let destino = create_court(&app, &admin, "Destino", 30000).await;

    let (_, body) = reservar(&app, &ana, &origen, "10:00", 1.0).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    put_json(
        &app,
        &format!("/api/canchas/{destino}"),
        Some(&admin),
        json!({ "estado": "mantenimiento" }),
    )
    .await;

    let (status, body) = put_json(
        &app,
        &format!("/api/reservas/{id}"),
        Some(&ana),
        json!({ "cancha": destino }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "La nueva cancha no está disponible");
}

#[tokio::test]
async fn cancelar_es_terminal_y_no_idempotente() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let ana = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (_, body) = reservar(&app, &ana, &cancha, "10:00", 1.0).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = patch(&app, &format!("/api/reservas/{id}/cancelar"), Some(&ana)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Reserva cancelada exitosamente. Se procesará tu reembolso en las próximas 24-48 horas."
    );
    assert_eq!(body["data"]["estado"], "cancelada");
    assert_eq!(body["data"]["estadoFormateado"], "Cancelada");

    // El segundo intento es un error, no un éxito silencioso.
    let (status, body) = patch(&app, &format!("/api/reservas/{id}/cancelar"), Some(&ana)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "La reserva ya está cancelada");

    // Y una reserva cancelada queda congelada.
    let (status, body) = put_json(
        &app,
        &format!("/api/reservas/{id}"),
        Some(&ana),
        json!({ "horaInicio": "11:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No se puede actualizar una reserva cancelada");
}

#[tokio::test]
async fn un_admin_cancela_la_reserva_de_otro_usuario() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let otro_admin = register_admin(&app, "otro@example.com").await;
    let ana = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    let (_, body) = reservar(&app, &ana, &cancha, "10:00", 1.0).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // La puerta de rol prima sobre la propiedad en reservas: un admin que
    // no es dueño de la cancha también puede cancelar.
    let (status, _) = patch(
        &app,
        &format!("/api/reservas/{id}/cancelar"),
        Some(&otro_admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn el_historial_sobrevive_al_borrado_de_la_cancha() {
    let app = build_test_app();
    let admin = register_admin(&app, "admin@example.com").await;
    let ana = register_player(&app, "ana@example.com").await;
    let cancha = create_court(&app, &admin, "Cancha A", 20000).await;

    reservar(&app, &ana, &cancha, "10:00", 1.0).await;
    delete(&app, &format!("/api/canchas/{cancha}"), Some(&admin)).await;

    // La cancha ya no acepta reservas nuevas...
    let (status, _) = reservar(&app, &ana, &cancha, "12:00", 1.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // ...pero la referencia histórica sigue resolviéndose.
    let (status, body) = get(&app, "/api/reservas/mis-reservas", Some(&ana)).await;
    assert_eq!(status, StatusCode::OK);
    let reservas = body["data"].as_array().unwrap();
    assert_eq!(reservas.len(), 1);
    assert_eq!(reservas[0]["cancha"]["nombre"], "Cancha A");
}

#[tokio::test]
async fn reserva_inexistente_es_not_found() {
    let app = build_test_app();
    let ana = register_player(&app, "ana@example.com").await;

    let (status, _) = patch(
        &app,
        "/api/reservas/00000000-0000-0000-0000-000000000000/cancelar",
        Some(&ana),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
