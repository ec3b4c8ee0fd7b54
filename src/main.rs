mod config;
mod state;
mod database;
mod services;
mod utils;
mod models;
mod middleware;
mod controllers;
mod repositories;
mod routes;
mod dto;

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, error};
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;

use config::environment::EnvironmentConfig;
use state::AppState;
use database::connection::create_pool;
use database::schema::run_migrations;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::license::license_gate;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Permit Tracker - API");
    info!("================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }
    info!("✅ Esquema de base de datos listo");

    let app_state = AppState::new(pool, config.clone());

    // Rutas públicas: login y licencia quedan fuera de las puertas
    let public_routes = Router::new()
        .merge(routes::auth_routes::create_auth_router())
        .merge(routes::license_routes::create_license_router());

    // Rutas protegidas: primero la puerta de licencia, después JWT
    let protected_routes = Router::new()
        .nest("/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/users", routes::user_routes::create_user_router())
        .nest("/share-requests", routes::share_routes::create_share_router())
        .merge(routes::backup_routes::create_backup_router())
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            license_gate,
        ));

    let cors = if config.is_production() && !config.cors_origins.is_empty() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    let app = Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Puerto del servidor
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("🔑 Autenticación y licencia (públicos):");
    info!("   POST /api/login - Login de usuario");
    info!("   GET  /api/logout - Logout");
    info!("   GET  /api/license-status - Estado de licencia/trial");
    info!("   POST /api/activate - Activación con clave");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos visibles");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("👥 Usuarios:");
    info!("   GET  /api/users/me - Usuario actual");
    info!("   GET  /api/users - Listar usuarios (admin)");
    info!("   POST /api/users - Crear usuario (admin)");
    info!("   PUT  /api/users/:id - Actualizar usuario (admin)");
    info!("   DELETE /api/users/:id - Eliminar usuario (admin)");
    info!("   POST /api/users/create - Auto-registro");
    info!("   GET  /api/users/shareable - Usuarios para compartir");
    info!("   GET  /api/users/search - Buscar usuarios");
    info!("🤝 Compartición:");
    info!("   POST /api/share-requests - Crear solicitudes por lotes");
    info!("   GET  /api/share-requests/pending - Solicitudes pendientes");
    info!("   GET  /api/share-requests/sent - Solicitudes enviadas");
    info!("   POST /api/share-requests/:id/accept - Aceptar solicitud");
    info!("   POST /api/share-requests/:id/reject - Rechazar solicitud");
    info!("💾 Backup:");
    info!("   GET  /api/backup-json - Backup JSON de vehículos");
    info!("   POST /api/restore - Restaurar desde backup JSON");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
