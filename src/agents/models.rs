use super::AgentMode;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.5-flash-image";

/// Model identifiers a completion can be routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    pub text: String,
    pub vision: String,
    /// Used for Billing when set; Billing otherwise shares the text model.
    pub reasoning: Option<String>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT_MODEL.to_string(),
            vision: DEFAULT_VISION_MODEL.to_string(),
            reasoning: None,
        }
    }
}

impl ModelCatalog {
    /// An attached image always wins: vision model regardless of mode.
    pub fn select(&self, mode: AgentMode, has_image: bool) -> &str {
        if has_image {
            return &self.vision;
        }

        match (mode, &self.reasoning) {
            (AgentMode::Billing, Some(reasoning)) => reasoning,
            _ => &self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_selects_vision_model_in_every_mode() {
        let catalog = ModelCatalog::default();
        for mode in AgentMode::ALL {
            assert_eq!(catalog.select(mode, true), DEFAULT_VISION_MODEL);
        }
    }

    #[test]
    fn text_only_uses_default_model_including_billing() {
        let catalog = ModelCatalog::default();
        for mode in AgentMode::ALL {
            assert_eq!(catalog.select(mode, false), DEFAULT_TEXT_MODEL);
        }
    }

    #[test]
    fn billing_uses_reasoning_model_when_configured() {
        let catalog = ModelCatalog {
            reasoning: Some("gemini-2.5-pro".to_string()),
            ..ModelCatalog::default()
        };
        assert_eq!(catalog.select(AgentMode::Billing, false), "gemini-2.5-pro");
        assert_eq!(catalog.select(AgentMode::Billing, true), DEFAULT_VISION_MODEL);
        assert_eq!(catalog.select(AgentMode::Clinical, false), DEFAULT_TEXT_MODEL);
    }
}
