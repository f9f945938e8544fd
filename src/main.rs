use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ocean_clean_api::config::database::{mask_database_url, DatabaseConfig};
use ocean_clean_api::config::environment::{EnvironmentConfig, StorageBackend};
use ocean_clean_api::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging: en desarrollo nivel debug con targets, fuera compacto
    let default_level = if config.is_development() { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    if config.is_development() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    info!(
        "🌊 Ocean Clean AI - API de limpieza oceánica ({})",
        config.environment
    );

    let state = match config.storage {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_environment(&config)
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL no configurado"))?;
            info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&db_config.url));

            let pool = match db_config.connect_and_migrate().await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(e);
                }
            };
            info!("✅ Base de datos lista");
            AppState::with_postgres(pool, config.clone())
        }
        StorageBackend::Memory => {
            info!("🧠 Usando almacenamiento en memoria");
            AppState::in_memory(config.clone())
        }
    };

    let app = create_router(state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("   /drones, /drones/ultimos, /drones/ordemalfabetica");
    info!("   /operadores, /missoes, /residuos-plasticos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
