use thiserror::Error;

/// Las dos unicas formas de fallar de la barberia. Ambas se detectan al
/// arrancar; una vez que los hilos estan corriendo no hay errores recuperables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarberShopError {
    #[error("Error de configuracion: {0}")]
    Configuration(String),
    #[error("Error inicializando recursos: {0}")]
    ResourceInitialization(String),
}
