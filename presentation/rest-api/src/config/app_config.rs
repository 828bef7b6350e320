use super::{catalog_config, cors_config, ocr_config::OcrConfig, server_config::ServerConfig};
use business::domain::scan::catalog::RetailerCatalog;
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub ocr: OcrConfig,
    pub catalog: RetailerCatalog,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            ocr: OcrConfig::from_env(),
            catalog: catalog_config::load_catalog()?,
        })
    }
}
