//! Configuração do fluxo carregada a partir de `roteiro.toml`.
//!
//! A struct [`FlowConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `ROTEIRO_STORAGE` tem precedência sobre o arquivo.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Configuração de nível superior carregada de `roteiro.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// Quantidade mínima de votos de aprovação para aprovar um roteiro.
    #[serde(default = "default_approval_quorum")]
    pub approval_quorum: usize,

    /// Máximo de retentativas de uma operação após conflito de concorrência.
    #[serde(default = "default_max_conflict_retries")]
    pub max_conflict_retries: u32,

    /// Caminho do arquivo de snapshot JSON com o estado do fluxo.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

// Quórum padrão de aprovação: 2 votos.
fn default_approval_quorum() -> usize {
    2
}

// Valor padrão para retentativas após conflito: 3.
fn default_max_conflict_retries() -> u32 {
    3
}

// Arquivo de estado padrão no diretório atual.
fn default_storage_path() -> String {
    "roteiro.json".to_string()
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            approval_quorum: default_approval_quorum(),
            max_conflict_retries: default_max_conflict_retries(),
            storage_path: default_storage_path(),
        }
    }
}

impl FlowConfig {
    /// Carrega a configuração de `roteiro.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        let path = Path::new("roteiro.toml");
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<FlowConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração para o snapshot.
        if let Ok(storage) = std::env::var("ROTEIRO_STORAGE")
            && !storage.is_empty()
        {
            config.storage_path = storage;
        }

        Ok(config)
    }
}
