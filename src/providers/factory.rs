use crate::config::Provider;
use crate::core::error::SiakError;
use crate::providers::{
    CompletionProvider, gemini::GeminiProvider, openai_compatible::OpenAICompatibleProvider,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Connection settings resolved from config, environment and CLI.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

type ProviderCreator = Box<
    dyn Fn(&ProviderSettings) -> Result<Arc<dyn CompletionProvider>, SiakError> + Send + Sync,
>;

pub struct ProviderFactory {
    creators: HashMap<Provider, ProviderCreator>,
}

impl ProviderFactory {
    pub fn new() -> Self {
        let mut creators = HashMap::new();

        creators.insert(
            Provider::Gemini,
            Box::new(|settings: &ProviderSettings| {
                let provider = GeminiProvider::new(
                    settings.base_url.clone(),
                    settings.api_key.clone(),
                    settings.timeout,
                )?;
                Ok(Arc::new(provider) as Arc<dyn CompletionProvider>)
            }) as ProviderCreator,
        );

        creators.insert(
            Provider::OpenAI,
            Box::new(|settings: &ProviderSettings| {
                let provider = OpenAICompatibleProvider::new(
                    settings.base_url.clone(),
                    settings.api_key.clone(),
                    settings.timeout,
                )?;
                Ok(Arc::new(provider) as Arc<dyn CompletionProvider>)
            }) as ProviderCreator,
        );

        Self { creators }
    }

    pub fn create(
        &self,
        provider: Provider,
        settings: &ProviderSettings,
    ) -> Result<Arc<dyn CompletionProvider>, SiakError> {
        self.creators
            .get(&provider)
            .ok_or_else(|| SiakError::Config(format!("Provider not found: {:?}", provider)))
            .and_then(|creator| creator(settings))
    }
}

impl Default for ProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}
